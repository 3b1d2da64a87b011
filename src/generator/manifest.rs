use crate::error::Result;
use crate::types::report::Recommendation;
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const PLANS_DIR: &str = ".agent-scorecard/plans";

#[derive(Debug, Clone, Serialize)]
pub struct RemediationPlan {
    pub version: String,
    pub generated_at: String,
    pub profile: String,
    pub final_score: f64,
    pub recommendations: Vec<Recommendation>,
}

impl RemediationPlan {
    pub fn new(profile: &str, final_score: f64, recommendations: Vec<Recommendation>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now().to_rfc3339(),
            profile: profile.to_string(),
            final_score,
            recommendations,
        }
    }
}

pub fn write_plan(root: &Path, plan: &RemediationPlan) -> Result<PathBuf> {
    let dir = root.join(PLANS_DIR);
    fs::create_dir_all(&dir)?;
    let stamp = Utc::now().format("%Y%m%dT%H%M%SZ");
    let out_path = dir.join(format!("plan-{stamp}.json"));
    let json = serde_json::to_string_pretty(plan)?;
    fs::write(&out_path, json)?;
    Ok(out_path)
}
