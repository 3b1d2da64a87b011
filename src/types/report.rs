use super::scoring::FileAnalysisResult;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GodModule {
    pub file: String,
    pub in_degree: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DepAnalysis {
    pub cycles: Vec<Vec<String>>,
    pub god_modules: Vec<GodModule>,
    /// Inbound import count per project file, keyed by relative path.
    pub in_degree: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DirectoryEntropy {
    pub avg_files: f64,
    pub warning: bool,
    pub max_files: usize,
    pub crowded_dirs: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TokenAnalysis {
    pub token_count: usize,
    pub alert: bool,
    /// False when the tokenizer could not run; `token_count` is then 0.
    pub available: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnvironmentHealth {
    pub agents_md: bool,
    pub linter_config: bool,
    pub lock_file: bool,
    pub pyproject_valid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub profile: String,
    pub final_score: f64,
    pub project_score: f64,
    pub passed: bool,
    pub missing_docs: Vec<String>,
    pub project_issues: Vec<String>,
    pub file_results: Vec<FileAnalysisResult>,
    pub dep_analysis: DepAnalysis,
    pub entropy: DirectoryEntropy,
    pub crowded_directories: BTreeMap<String, usize>,
    pub tokens: TokenAnalysis,
    pub environment: EnvironmentHealth,
}

impl AnalysisResult {
    pub fn average_acl(&self) -> Option<f64> {
        average(self.file_results.iter().map(|result| result.acl))
    }

    pub fn average_type_coverage(&self) -> Option<f64> {
        average(self.file_results.iter().map(|result| result.type_coverage))
    }
}

fn average(values: impl ExactSizeIterator<Item = f64>) -> Option<f64> {
    let len = values.len();
    if len == 0 {
        return None;
    }
    Some(values.sum::<f64>() / len as f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Impact {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub id: String,
    pub finding: String,
    pub agent_impact: String,
    pub action: String,
    pub impact: Impact,
    pub file: Option<String>,
}

impl Recommendation {
    pub fn new(
        id: &str,
        finding: impl Into<String>,
        agent_impact: &str,
        action: &str,
        impact: Impact,
        file: Option<String>,
    ) -> Self {
        Self {
            id: id.to_string(),
            finding: finding.into(),
            agent_impact: agent_impact.to_string(),
            action: action.to_string(),
            impact,
            file,
        }
    }
}
