use super::acl::{calculate_acl, count_loc, count_loc_in_span, AclTier};
use crate::oracle::{ComplexityOracle, Tokenizer};
use crate::types::config::Thresholds;
use crate::types::scoring::{FileAnalysisResult, FunctionMetric, Score};
use std::path::Path;
use tracing::debug;

const BLOAT_LOC_LIMIT: usize = 200;
const BLOAT_LINES_PER_POINT: usize = 10;
const RED_ACL_PENALTY: i64 = 15;
const YELLOW_ACL_PENALTY: i64 = 5;
const TYPE_SAFETY_PENALTY: i64 = 20;

/// Turns oracle seeds into metrics, recomputing loc and ACL per function.
pub fn function_metrics(source: &str, oracle: &dyn ComplexityOracle) -> Vec<FunctionMetric> {
    oracle
        .analyze(source)
        .into_iter()
        .map(|seed| {
            let loc = count_loc_in_span(source, seed.start_line, seed.end_line);
            let complexity = f64::from(seed.complexity.max(1));
            FunctionMetric {
                name: seed.name,
                start_line: seed.start_line,
                loc,
                complexity,
                acl: calculate_acl(complexity, loc),
                is_typed: seed.has_return_annotation || seed.has_param_annotation,
            }
        })
        .collect()
}

/// Scores one file read from disk. Unreadable files are scored as empty.
pub fn score_path(
    root: &Path,
    path: &Path,
    oracle: &dyn ComplexityOracle,
    tokenizer: &dyn Tokenizer,
    thresholds: &Thresholds,
) -> FileAnalysisResult {
    let shown = crate::scan::filesystem::relative_display(root, path);
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            debug!(file = %shown, error = %err, "unreadable source; scoring as empty");
            String::new()
        }
    };
    score_file(&shown, &source, oracle, tokenizer, thresholds)
}

pub fn score_file(
    file: &str,
    source: &str,
    oracle: &dyn ComplexityOracle,
    tokenizer: &dyn Tokenizer,
    thresholds: &Thresholds,
) -> FileAnalysisResult {
    let loc = count_loc(source);
    let metrics = function_metrics(source, oracle);
    let tokens = tokenizer.count(source).unwrap_or(0);

    let mut score: i64 = 100;
    let mut issues = Vec::new();

    if loc > BLOAT_LOC_LIMIT {
        let penalty = ((loc - BLOAT_LOC_LIMIT) / BLOAT_LINES_PER_POINT) as i64;
        if penalty > 0 {
            score -= penalty;
            issues.push(format!("Bloated File: {loc} lines (-{penalty})"));
        }
    }

    if metrics.is_empty() {
        return FileAnalysisResult {
            file: file.to_string(),
            loc,
            function_metrics: metrics,
            score: clamp_score(score),
            issues: issues.join(", "),
            avg_complexity: 0.0,
            type_coverage: 100.0,
            tokens,
            acl: 0.0,
        };
    }

    let tiers: Vec<AclTier> = metrics
        .iter()
        .map(|metric| AclTier::classify(metric.acl, thresholds))
        .collect();
    let red = tiers.iter().filter(|tier| **tier == AclTier::Red).count() as i64;
    let yellow = tiers.iter().filter(|tier| **tier == AclTier::Yellow).count() as i64;

    if red > 0 {
        let penalty = red * RED_ACL_PENALTY;
        score -= penalty;
        issues.push(format!("{red} Red ACL functions (-{penalty})"));
    }
    if yellow > 0 {
        let penalty = yellow * YELLOW_ACL_PENALTY;
        score -= penalty;
        issues.push(format!("{yellow} Yellow ACL functions (-{penalty})"));
    }

    let total = metrics.len() as f64;
    let typed = metrics.iter().filter(|metric| metric.is_typed).count() as f64;
    let type_coverage = typed / total * 100.0;
    if type_coverage < thresholds.type_safety {
        score -= TYPE_SAFETY_PENALTY;
        issues.push(format!(
            "Type Safety Index {:.0}% < {:.0}% (-{TYPE_SAFETY_PENALTY})",
            type_coverage, thresholds.type_safety
        ));
    }

    let avg_complexity = metrics.iter().map(|metric| metric.complexity).sum::<f64>() / total;
    let acl = metrics
        .iter()
        .map(|metric| metric.acl)
        .fold(0.0_f64, f64::max);

    FileAnalysisResult {
        file: file.to_string(),
        loc,
        function_metrics: metrics,
        score: clamp_score(score),
        issues: issues.join(", "),
        avg_complexity,
        type_coverage,
        tokens,
        acl,
    }
}

fn clamp_score(score: i64) -> Score {
    score.clamp(0, 100) as Score
}
