use crate::analyze::acl::AclTier;
use crate::types::config::{Thresholds, TOKEN_ALERT_THRESHOLD};
use crate::types::report::{AnalysisResult, Impact, Recommendation};

pub const RECOMMENDATIONS_FILE: &str = "RECOMMENDATIONS.md";

/// Average complexity above which a file is flagged for refactoring.
const HIGH_COMPLEXITY: f64 = 20.0;

pub fn recommendations(result: &AnalysisResult, thresholds: &Thresholds) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    for file in &result.file_results {
        let path = Some(file.file.clone());
        if file.avg_complexity > HIGH_COMPLEXITY {
            recs.push(Recommendation::new(
                "high_complexity",
                format!("High Complexity: {}", file.file),
                "Context window overflow.",
                "Refactor units.",
                Impact::High,
                path.clone(),
            ));
        }
        let red = file
            .function_metrics
            .iter()
            .filter(|metric| AclTier::classify(metric.acl, thresholds) == AclTier::Red)
            .count();
        if red > 0 {
            recs.push(Recommendation::new(
                "red_acl",
                format!("{red} Red ACL functions: {}", file.file),
                "Agent loses track of control flow.",
                "Extract helpers until each function is under the red threshold.",
                Impact::High,
                path.clone(),
            ));
        }
        if file.type_coverage < thresholds.type_safety {
            recs.push(Recommendation::new(
                "low_type_safety",
                format!("Low Type Safety: {}", file.file),
                "Hallucination of signatures.",
                "Add PEP 484 hints.",
                Impact::Medium,
                path,
            ));
        }
    }

    for cycle in &result.dep_analysis.cycles {
        recs.push(Recommendation::new(
            "circular_dependency",
            format!("Circular Dependency: {}", cycle.join(" → ")),
            "Recursive loops.",
            "Use DI.",
            Impact::High,
            cycle.first().cloned(),
        ));
    }

    for god in &result.dep_analysis.god_modules {
        recs.push(Recommendation::new(
            "god_module",
            format!("God Module: {} ({} importers)", god.file, god.in_degree),
            "Every edit pulls the whole module into context.",
            "Split by responsibility.",
            Impact::High,
            Some(god.file.clone()),
        ));
    }

    if result.tokens.alert {
        recs.push(Recommendation::new(
            "token_budget",
            format!(
                "Skeleton Context: {} tokens > {TOKEN_ALERT_THRESHOLD}",
                result.tokens.token_count
            ),
            "Agent cannot hold the project map in context.",
            "Trim README and split large packages.",
            Impact::Medium,
            None,
        ));
    }

    for doc in &result.missing_docs {
        if doc.eq_ignore_ascii_case("agents.md") {
            recs.push(Recommendation::new(
                "missing_agents_md",
                "Missing AGENTS.md",
                "Agent guesses repository structure.",
                "Create AGENTS.md.",
                Impact::High,
                Some(doc.clone()),
            ));
        } else {
            recs.push(Recommendation::new(
                "missing_doc",
                format!("Missing {doc}"),
                "Agent lacks project instructions.",
                &format!("Create {doc}."),
                Impact::Medium,
                Some(doc.clone()),
            ));
        }
    }

    recs
}

/// Content of `RECOMMENDATIONS.md`.
pub fn recommendations_markdown(recs: &[Recommendation]) -> String {
    if recs.is_empty() {
        return "# Recommendations\n\n✅ Your codebase looks Agent-Ready!\n".to_string();
    }
    let mut output = String::from("# Recommendations\n\n");
    output.push_str("| Finding | Agent Impact | Recommendation |\n| :--- | :--- | :--- |\n");
    for rec in recs {
        output.push_str(&format!(
            "| {} | {} | {} |\n",
            rec.finding, rec.agent_impact, rec.action
        ));
    }
    output
}
