pub mod acl;
pub mod file_score;
pub mod graph;
pub mod prompts;
pub mod tokens;

use crate::error::Result;
use crate::oracle::{ComplexityOracle, Tokenizer};
use crate::scan::{self, docs, entropy};
use crate::types::config::{Profile, ENTROPY_MAX_FILES, PASS_THRESHOLD};
use crate::types::report::{AnalysisResult, DepAnalysis, EnvironmentHealth};
use crate::types::scoring::FileAnalysisResult;
use graph::DependencyGraph;
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, info};

const FILE_WEIGHT: f64 = 0.8;
const PROJECT_WEIGHT: f64 = 0.2;
const MISSING_DOC_PENALTY: f64 = 15.0;
const MALFORMED_PYPROJECT_PENALTY: f64 = 20.0;
const GOD_MODULE_PENALTY: f64 = 10.0;
const CYCLE_PENALTY: f64 = 10.0;

/// Runs every check against `target` and folds the results into one score.
pub fn perform_analysis(
    target: &Path,
    profile: &Profile,
    oracle: &dyn ComplexityOracle,
    tokenizer: &dyn Tokenizer,
) -> Result<AnalysisResult> {
    let layout = scan::discover(target, oracle)?;
    let root = layout.root.as_path();
    info!(
        root = %root.display(),
        files = layout.files.len(),
        profile = profile.name,
        "analyzing project"
    );

    let mut file_results: Vec<FileAnalysisResult> = layout
        .files
        .par_iter()
        .map(|path| file_score::score_path(root, path, oracle, tokenizer, &profile.thresholds))
        .collect();
    file_results.sort_by(|a, b| a.file.cmp(&b.file));

    let missing_docs = docs::missing_docs(root, &profile.required_files);
    let environment = docs::environment_health(root);
    let dep_analysis = DependencyGraph::build(root, &layout.files, oracle).analyze(root);
    let entropy = entropy::directory_entropy(target);
    let crowded_directories = entropy::crowded_directories(target, ENTROPY_MAX_FILES);
    let tokens = tokens::context_token_budget(&layout, oracle, tokenizer);

    let (project_score, project_issues) =
        project_score(&missing_docs, &environment, &dep_analysis);
    let avg_file_score = average_file_score(&file_results);
    let final_score = avg_file_score * FILE_WEIGHT + project_score * PROJECT_WEIGHT;
    debug!(avg_file_score, project_score, final_score, "aggregated scores");

    Ok(AnalysisResult {
        profile: profile.name.to_string(),
        final_score,
        project_score,
        passed: final_score >= PASS_THRESHOLD,
        missing_docs,
        project_issues,
        file_results,
        dep_analysis,
        entropy,
        crowded_directories,
        tokens,
        environment,
    })
}

/// An empty project averages 0 on the file axis.
pub fn average_file_score(results: &[FileAnalysisResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    results.iter().map(|result| f64::from(result.score)).sum::<f64>() / results.len() as f64
}

/// Project-level score and the issues behind it, in detection order.
pub fn project_score(
    missing_docs: &[String],
    environment: &EnvironmentHealth,
    deps: &DepAnalysis,
) -> (f64, Vec<String>) {
    let mut score = 100.0 - MISSING_DOC_PENALTY * missing_docs.len() as f64;
    let mut issues = Vec::new();

    if !missing_docs.is_empty() {
        issues.push(format!(
            "Missing Critical Documentation: {}",
            missing_docs.join(", ")
        ));
    }
    if !environment.pyproject_valid {
        score -= MALFORMED_PYPROJECT_PENALTY;
        issues.push("Malformed pyproject.toml detected".to_string());
    }
    if !deps.god_modules.is_empty() {
        score -= GOD_MODULE_PENALTY;
        let names: Vec<&str> = deps
            .god_modules
            .iter()
            .map(|module| module.file.as_str())
            .collect();
        issues.push(format!("God Modules Detected: {}", names.join(", ")));
    }
    if !deps.cycles.is_empty() {
        score -= CYCLE_PENALTY;
        issues.push(format!(
            "Circular Dependencies Detected: {}",
            deps.cycles.len()
        ));
    }

    (score.max(0.0), issues)
}
