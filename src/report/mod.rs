pub mod advisor;
pub mod badge;
pub mod craft;
pub mod json;
pub mod md;
pub mod remediation;
pub mod sarif;
pub mod terminal;

use crate::error::ScorecardError;
use crate::types::config::Profile;
use crate::types::report::AnalysisResult;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
    Sarif,
}

pub fn render(
    result: &AnalysisResult,
    profile: &Profile,
    format: OutputFormat,
) -> Result<String, ScorecardError> {
    match format {
        OutputFormat::Json => json::to_json(result).map_err(ScorecardError::Json),
        OutputFormat::Md => Ok(md::to_markdown(result, profile)),
        OutputFormat::Sarif => sarif::to_sarif(result, profile).map_err(ScorecardError::Json),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::types::report::{
        AnalysisResult, DepAnalysis, DirectoryEntropy, EnvironmentHealth, TokenAnalysis,
    };
    use crate::types::scoring::{FileAnalysisResult, FunctionMetric};
    use std::collections::BTreeMap;

    pub fn function(name: &str, acl: f64, is_typed: bool) -> FunctionMetric {
        FunctionMetric {
            name: name.to_string(),
            start_line: 1,
            loc: 10,
            complexity: acl - 0.5,
            acl,
            is_typed,
        }
    }

    /// Two files: one with a red, a yellow and a green function, one clean.
    pub fn sample_result() -> AnalysisResult {
        let engine = FileAnalysisResult {
            file: "core/engine.py".to_string(),
            loc: 120,
            function_metrics: vec![
                function("busy", 12.0, true),
                function("tangled", 18.0, false),
            ],
            score: 60,
            issues: "1 Red ACL functions (-15), 1 Yellow ACL functions (-5), \
                     Type Safety Index 50% < 90% (-20)"
                .to_string(),
            avg_complexity: 14.5,
            type_coverage: 50.0,
            tokens: 900,
            acl: 18.0,
        };
        let util = FileAnalysisResult {
            file: "util.py".to_string(),
            loc: 12,
            function_metrics: vec![function("tidy", 4.0, true)],
            score: 100,
            issues: String::new(),
            avg_complexity: 3.5,
            type_coverage: 100.0,
            tokens: 40,
            acl: 4.0,
        };

        AnalysisResult {
            profile: "generic".to_string(),
            final_score: 62.0,
            project_score: 90.0,
            passed: false,
            missing_docs: Vec::new(),
            project_issues: vec!["Circular Dependencies Detected: 1".to_string()],
            file_results: vec![engine, util],
            dep_analysis: DepAnalysis {
                cycles: vec![vec!["core/engine.py".to_string(), "util.py".to_string()]],
                god_modules: Vec::new(),
                in_degree: BTreeMap::from([
                    ("core/engine.py".to_string(), 1),
                    ("util.py".to_string(), 1),
                ]),
            },
            entropy: DirectoryEntropy {
                avg_files: 2.0,
                warning: false,
                max_files: 2,
                crowded_dirs: Vec::new(),
            },
            crowded_directories: BTreeMap::new(),
            tokens: TokenAnalysis {
                token_count: 940,
                alert: false,
                available: true,
            },
            environment: EnvironmentHealth {
                agents_md: false,
                linter_config: true,
                lock_file: false,
                pyproject_valid: true,
            },
        }
    }
}
