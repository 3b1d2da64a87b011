use super::craft::{craft_prompt, CraftPrompt};
use crate::analyze::acl::AclTier;
use crate::types::config::{Profile, Thresholds, GOD_MODULE_THRESHOLD, PASS_THRESHOLD};
use crate::types::report::AnalysisResult;
use crate::types::scoring::FunctionMetric;

const TOP_ACL_ROWS: usize = 10;
/// Files scoring below this get remediation prompts.
const PROMPT_SCORE_CUTOFF: u32 = 90;

pub fn to_markdown(result: &AnalysisResult, profile: &Profile) -> String {
    let mut output = String::new();
    output.push_str(&summary_section(result, profile));
    output.push_str(&acl_section(result, &profile.thresholds));
    output.push_str(&type_safety_section(result, &profile.thresholds));
    output.push_str(&prompts_section(result, &profile.thresholds));
    output.push_str(&file_table_section(result));
    output
}

fn summary_section(result: &AnalysisResult, profile: &Profile) -> String {
    let passed = result.final_score >= PASS_THRESHOLD;
    let mut output = String::from("# Agent Scorecard Report\n\n");
    let headline = profile.description.split('.').next().unwrap_or(profile.name);
    output.push_str(&format!("**Target Agent Profile:** {headline}\n"));
    output.push_str(&format!(
        "**Overall Score: {:.1}/100** - {}\n",
        result.final_score,
        if passed { "PASS" } else { "FAIL" }
    ));
    if let Some(avg_acl) = result.average_acl() {
        output.push_str(&format!("**Average ACL:** {avg_acl:.1}\n"));
    }
    if let Some(avg_types) = result.average_type_coverage() {
        output.push_str(&format!("**Average Type Safety:** {avg_types:.0}%\n"));
    }
    output.push('\n');

    if passed {
        output.push_str("✅ **Status: PASSED** - This codebase is Agent-Ready.\n\n");
    } else {
        output.push_str("❌ **Status: FAILED** - This codebase needs improvement for AI Agents.\n\n");
    }

    if !result.project_issues.is_empty() {
        output.push_str("### ⚠️ Project Issues\n");
        for issue in &result.project_issues {
            output.push_str(&format!("- {issue}\n"));
        }
        output.push('\n');
    }
    output
}

fn acl_section(result: &AnalysisResult, thresholds: &Thresholds) -> String {
    let mut output = String::from("## 🎯 Top Refactoring Targets (Agent Cognitive Load (ACL))\n\n");
    output.push_str(&format!(
        "ACL = Complexity + (Lines of Code / 20). Target: ACL <= {}.\n\n",
        thresholds.acl_yellow
    ));

    let mut functions: Vec<(&str, &FunctionMetric)> = result
        .file_results
        .iter()
        .flat_map(|file| {
            file.function_metrics
                .iter()
                .map(move |metric| (file.file.as_str(), metric))
        })
        .filter(|(_, metric)| AclTier::classify(metric.acl, thresholds) != AclTier::Green)
        .collect();
    functions.sort_by(|a, b| b.1.acl.total_cmp(&a.1.acl));
    functions.truncate(TOP_ACL_ROWS);

    if functions.is_empty() {
        output.push_str("✅ No functions with high cognitive load found.\n\n");
        return output;
    }

    output.push_str("| Function | File | ACL | Status |\n");
    output.push_str("|----------|------|-----|--------|\n");
    for (file, metric) in functions {
        let status = match AclTier::classify(metric.acl, thresholds) {
            AclTier::Red => "🔴 Red",
            _ => "🟡 Yellow",
        };
        output.push_str(&format!(
            "| `{}` | `{}` | {:.1} | {} |\n",
            metric.name, file, metric.acl, status
        ));
    }
    output.push('\n');
    output
}

fn type_safety_section(result: &AnalysisResult, thresholds: &Thresholds) -> String {
    let mut output = String::from("## 🛡️ Type Safety Index\n\n");
    output.push_str(&format!(
        "Target: >{}% of functions must have explicit type signatures.\n\n",
        thresholds.type_safety
    ));
    output.push_str("| File | Type Safety Index | Status |\n");
    output.push_str("| :--- | :---------------: | :----- |\n");

    let mut files: Vec<_> = result.file_results.iter().collect();
    files.sort_by(|a, b| a.type_coverage.total_cmp(&b.type_coverage));
    for file in files {
        let status = if file.type_coverage >= thresholds.type_safety {
            "✅"
        } else {
            "❌"
        };
        output.push_str(&format!(
            "| {} | {:.0}% | {} |\n",
            file.file, file.type_coverage, status
        ));
    }
    output.push('\n');
    output
}

fn prompts_section(result: &AnalysisResult, thresholds: &Thresholds) -> String {
    let mut output = String::from("## 🤖 Agent Prompts for Remediation (CRAFT Format)\n\n");

    for module in &result.dep_analysis.god_modules {
        output.push_str(&format!("### Project Issue: God Module `{}`\n", module.file));
        let frame = format!(
            "Inbound imports must stay below {GOD_MODULE_THRESHOLD}. Maintain existing logic."
        );
        output.push_str(&craft_prompt(&CraftPrompt {
            context: "You are a Software Architect specializing in modular system design.",
            request: &format!(
                "Decompose the God Module `{}` to reduce context pressure.",
                module.file
            ),
            actions: &[
                "Identify distinct responsibilities within the module.".to_string(),
                "Extract logic into cohesive sub-modules.".to_string(),
                "Refactor imports to maintain functionality.".to_string(),
            ],
            frame: &frame,
            template: "A refactoring plan followed by the new module code structure.",
        }));
        output.push_str("\n\n");
    }

    for file in result
        .file_results
        .iter()
        .filter(|file| file.score < PROMPT_SCORE_CUTOFF)
    {
        let red: Vec<String> = file
            .function_metrics
            .iter()
            .filter(|metric| metric.acl > thresholds.acl_red)
            .map(|metric| format!("`{}`", metric.name))
            .collect();
        if !red.is_empty() {
            output.push_str(&format!("### File: `{}` - High Cognitive Load\n", file.file));
            output.push_str(&craft_prompt(&CraftPrompt {
                context: "You are a Senior Python Engineer focused on code maintainability.",
                request: &format!("Refactor functions in `{}` with Red ACL scores.", file.file),
                actions: &[
                    format!("Target functions: {}.", red.join(", ")),
                    "Extract nested logic into smaller helper functions.".to_string(),
                    format!(
                        "Ensure all units result in an ACL score < {}.",
                        thresholds.acl_yellow
                    ),
                ],
                frame: "Keep functions under 50 lines. Ensure all tests pass.",
                template: "Markdown code blocks for the refactored code.",
            }));
            output.push_str("\n\n");
        }

        if file.type_coverage < thresholds.type_safety {
            output.push_str(&format!("### File: `{}` - Low Type Safety\n", file.file));
            output.push_str(&craft_prompt(&CraftPrompt {
                context: "You are a Python Developer focused on static analysis.",
                request: &format!("Add PEP 484 type hints to `{}`.", file.file),
                actions: &[
                    "Analyze functions missing explicit type signatures.".to_string(),
                    "Add comprehensive type hints to arguments and return values.".to_string(),
                    "Use the `typing` module for complex structures.".to_string(),
                ],
                frame: &format!(
                    "Target {}% type coverage. Do not change runtime logic.",
                    thresholds.type_safety
                ),
                template: "The full updated content of the Python file.",
            }));
            output.push_str("\n\n");
        }
    }
    output
}

fn file_table_section(result: &AnalysisResult) -> String {
    let mut output = String::from("### 📂 Full File Analysis\n\n");
    output.push_str("| File | Score | Issues |\n");
    output.push_str("| :--- | :---: | :--- |\n");
    for file in &result.file_results {
        let status = if f64::from(file.score) >= PASS_THRESHOLD {
            "✅"
        } else {
            "❌"
        };
        output.push_str(&format!(
            "| {} | {} {} | {} |\n",
            file.file, file.score, status, file.issues
        ));
    }
    output
}
