use crate::error::ScorecardError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ACL_YELLOW: f64 = 10.0;
pub const DEFAULT_ACL_RED: f64 = 15.0;
pub const DEFAULT_TYPE_SAFETY: f64 = 90.0;

/// Inbound import count above which a file is reported as a god module.
pub const GOD_MODULE_THRESHOLD: usize = 50;

/// Average files per directory above which the tree is considered crowded.
pub const ENTROPY_AVG_THRESHOLD: f64 = 15.0;

/// Files directly inside one directory above which that directory is crowded.
pub const ENTROPY_MAX_FILES: usize = 50;

/// Skeleton token budget an agent can afford before task-specific reading.
pub const TOKEN_ALERT_THRESHOLD: usize = 32_000;

pub const PASS_THRESHOLD: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub acl_yellow: f64,
    pub acl_red: f64,
    pub type_safety: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            acl_yellow: DEFAULT_ACL_YELLOW,
            acl_red: DEFAULT_ACL_RED,
            type_safety: DEFAULT_TYPE_SAFETY,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), ScorecardError> {
        if self.acl_yellow < 0.0 || self.acl_red < 0.0 {
            return Err(ScorecardError::ConfigParse(
                "thresholds.acl_yellow and thresholds.acl_red must be non-negative".to_string(),
            ));
        }
        if self.acl_yellow > self.acl_red {
            return Err(ScorecardError::ConfigParse(format!(
                "thresholds.acl_yellow ({}) cannot exceed thresholds.acl_red ({})",
                self.acl_yellow, self.acl_red
            )));
        }
        if !(0.0..=100.0).contains(&self.type_safety) {
            return Err(ScorecardError::ConfigParse(
                "thresholds.type_safety must be between 0 and 100".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: &'static str,
    pub description: &'static str,
    pub thresholds: Thresholds,
    pub required_files: Vec<String>,
}

impl Profile {
    pub fn named(name: &str) -> Result<Self, ScorecardError> {
        match name {
            "generic" => Ok(Self {
                name: "generic",
                description: "Standard cleanliness checks.",
                thresholds: Thresholds::default(),
                required_files: vec!["README.md".to_string()],
            }),
            "jules" => Ok(Self {
                name: "jules",
                description: "Strict typing and autonomy instructions.",
                thresholds: Thresholds::default(),
                required_files: vec!["agents.md".to_string(), "instructions.md".to_string()],
            }),
            "copilot" => Ok(Self {
                name: "copilot",
                description: "Optimized for small context completion.",
                thresholds: Thresholds {
                    acl_red: 20.0,
                    ..Thresholds::default()
                },
                required_files: Vec::new(),
            }),
            other => Err(ScorecardError::UnknownProfile(other.to_string())),
        }
    }

    /// Applies user overrides on top of the profile thresholds.
    pub fn with_overrides(mut self, overrides: &ThresholdOverrides) -> Self {
        if let Some(acl_yellow) = overrides.acl_yellow {
            self.thresholds.acl_yellow = acl_yellow;
        }
        if let Some(acl_red) = overrides.acl_red {
            self.thresholds.acl_red = acl_red;
        }
        if let Some(type_safety) = overrides.type_safety {
            self.thresholds.type_safety = type_safety;
        }
        self
    }

    /// Applies overrides and checks the resulting tiers against each other.
    pub fn resolve(self, overrides: &ThresholdOverrides) -> Result<Self, ScorecardError> {
        let profile = self.with_overrides(overrides);
        profile.thresholds.validate()?;
        Ok(profile)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Summary,
    Detailed,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ThresholdOverrides {
    pub acl_yellow: Option<f64>,
    pub acl_red: Option<f64>,
    pub type_safety: Option<f64>,
}

/// Settings read from `[tool.agent-scorecard]` and the global/local files.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScorecardConfig {
    #[serde(default)]
    pub verbosity: Verbosity,
    #[serde(default)]
    pub thresholds: ThresholdOverrides,
}
