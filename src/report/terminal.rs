//! Human-facing console output for `score` and `check-prompts`.

use crate::analyze::prompts::PromptAnalysis;
use crate::types::config::{Verbosity, ENTROPY_MAX_FILES, PASS_THRESHOLD};
use crate::types::report::AnalysisResult;
use colored::Colorize;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};

fn pass_fail(ok: bool) -> Cell {
    if ok {
        Cell::new("PASS").fg(Color::Green)
    } else {
        Cell::new("FAIL").fg(Color::Red)
    }
}

/// Titled table; cell colors are emitted only when writing to a terminal.
fn table(title: &str, headers: &[&str], rows: Vec<Vec<Cell>>) -> String {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.to_vec());
    for row in rows {
        table.add_row(row);
    }
    format!("{}\n{table}\n", title.bold())
}

fn environment_table(result: &AnalysisResult) -> String {
    let env = &result.environment;
    let entropy = &result.entropy;
    let entropy_text = if entropy.warning && entropy.max_files > ENTROPY_MAX_FILES {
        format!("Max {} files/dir", entropy.max_files)
    } else {
        format!("{:.1} files/dir", entropy.avg_files)
    };
    let entropy_color = if entropy.warning {
        Color::Yellow
    } else {
        Color::Green
    };
    let token_text = if result.tokens.available {
        format!("{} tokens", result.tokens.token_count)
    } else {
        "unavailable".to_string()
    };
    let token_color = if result.tokens.alert {
        Color::Red
    } else {
        Color::Green
    };

    let rows = vec![
        vec![Cell::new("AGENTS.md"), pass_fail(env.agents_md)],
        vec![Cell::new("Linter Config"), pass_fail(env.linter_config)],
        vec![Cell::new("Lock File"), pass_fail(env.lock_file)],
        vec![
            Cell::new("Directory Entropy"),
            Cell::new(entropy_text).fg(entropy_color),
        ],
        vec![
            Cell::new("Critical Token Count"),
            Cell::new(token_text).fg(token_color),
        ],
    ];
    table("Environment Health", &["Check", "Status"], rows)
}

fn file_table(result: &AnalysisResult, verbosity: Verbosity) -> Option<String> {
    let rows: Vec<Vec<Cell>> = result
        .file_results
        .iter()
        .filter(|file| verbosity == Verbosity::Detailed || file.score < 100)
        .map(|file| {
            let color = if f64::from(file.score) >= PASS_THRESHOLD {
                Color::Green
            } else {
                Color::Red
            };
            vec![
                Cell::new(&file.file),
                Cell::new(file.score).fg(color),
                Cell::new(&file.issues),
            ]
        })
        .collect();
    if rows.is_empty() {
        return None;
    }
    Some(table("File Analysis", &["File", "Score", "Issues"], rows))
}

/// Console summary of a scoring run, shaped by `verbosity`.
pub fn score_summary(result: &AnalysisResult, verbosity: Verbosity) -> String {
    let mut output = String::new();

    if verbosity != Verbosity::Quiet {
        output.push_str(&environment_table(result));
        output.push('\n');
        if let Some(files) = file_table(result, verbosity) {
            output.push_str(&files);
            output.push('\n');
        }
        if !result.project_issues.is_empty() {
            output.push_str(&format!("{}\n", "Project Issues Detected:".yellow().bold()));
            for issue in &result.project_issues {
                output.push_str(&format!("- {}\n", issue.red()));
            }
            output.push('\n');
        }
    }

    if !result.missing_docs.is_empty() {
        output.push_str(&format!(
            "{} {}\n",
            "Missing Critical Agent Docs:".red().bold(),
            result.missing_docs.join(", ")
        ));
    }

    let verdict = if result.passed {
        "PASS".green().bold()
    } else {
        "FAIL".red().bold()
    };
    output.push_str(&format!(
        "Final Agent Score: {:.1}/100 - {verdict}\n",
        result.final_score
    ));
    output
}

pub fn prompt_report(path: &str, analysis: &PromptAnalysis, plain: bool) -> String {
    let mut output = String::new();
    if plain {
        output.push_str(&format!("Prompt Analysis: {path}\n"));
        output.push_str(&format!("Score: {}/100\n\n", analysis.score));
        for result in &analysis.results {
            let status = if result.passed { "PASS" } else { "FAIL" };
            output.push_str(&format!("{}: {status}\n", result.label));
        }
        if !analysis.improvements.is_empty() {
            output.push_str("\nRefactored Suggestions:\n");
            for improvement in &analysis.improvements {
                output.push_str(&format!("- {improvement}\n"));
            }
        }
        if analysis.passed() {
            output.push_str("PASSED: Prompt is optimized!\n");
        } else {
            output.push_str("FAILED: Prompt score too low.\n");
        }
        return output;
    }

    output.push_str(&format!("{}\n", format!("Prompt Analysis: {path}").cyan().bold()));
    let score = format!("{}/100", analysis.score);
    let score = if analysis.passed() {
        score.green().bold()
    } else {
        score.red().bold()
    };
    output.push_str(&format!("Score: {score}\n\n"));
    let rows: Vec<Vec<Cell>> = analysis
        .results
        .iter()
        .map(|result| vec![Cell::new(result.label), pass_fail(result.passed)])
        .collect();
    output.push_str(&table("Heuristics", &["Metric", "Status"], rows));
    if !analysis.improvements.is_empty() {
        output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
        for improvement in &analysis.improvements {
            output.push_str(&format!("- {improvement}\n"));
        }
    }
    if analysis.passed() {
        output.push_str(&format!("\n{}\n", "PASSED: Prompt is optimized!".green().bold()));
    } else {
        output.push_str(&format!("\n{}\n", "FAILED: Prompt score too low.".red().bold()));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::prompts::PromptAnalyzer;
    use crate::report::test_support::sample_result;

    #[test]
    fn table_renders_title_headers_and_cells() {
        let output = table(
            "Heuristics",
            &["Metric", "Status"],
            vec![vec![Cell::new("Role Definition"), pass_fail(true)]],
        );
        assert!(output.contains("Heuristics"));
        assert!(output.contains("Metric"));
        assert!(output.contains("Role Definition"));
        assert!(output.contains("PASS"));
        assert_eq!(output.lines().filter(|line| line.contains("PASS")).count(), 1);
    }

    #[test]
    fn quiet_shows_only_verdict_and_missing_docs() {
        let mut result = sample_result();
        result.missing_docs = vec!["README.md".to_string()];
        let output = score_summary(&result, Verbosity::Quiet);
        assert!(!output.contains("Environment Health"));
        assert!(!output.contains("File Analysis"));
        assert!(output.contains("Missing Critical Agent Docs:"));
        assert!(output.contains("Final Agent Score: 62.0/100"));
    }

    #[test]
    fn summary_hides_perfect_files() {
        let output = score_summary(&sample_result(), Verbosity::Summary);
        assert!(output.contains("Environment Health"));
        assert!(output.contains("File Analysis"));
        assert!(output.contains("core/engine.py"));
        assert!(!output.contains("util.py"));
        assert!(output.contains("Circular Dependencies Detected: 1"));
    }

    #[test]
    fn detailed_lists_every_file() {
        let output = score_summary(&sample_result(), Verbosity::Detailed);
        assert!(output.contains("core/engine.py"));
        assert!(output.contains("util.py"));
        assert!(output.contains("940 tokens"));
    }

    #[test]
    fn plain_prompt_report_lists_heuristics_and_suggestions() {
        let analysis = PromptAnalyzer::new()
            .expect("patterns should compile")
            .analyze("Analyze the ACL of this file.");
        let output = prompt_report("prompt.txt", &analysis, true);
        assert!(output.contains("Prompt Analysis: prompt.txt\n"));
        assert!(output.contains("Score: 0/100\n\n"));
        assert!(output.contains("Role Definition: FAIL"));
        assert!(output.contains("Negative Constraints: PASS"));
        assert!(output.contains("\nRefactored Suggestions:\n- "));
        assert!(output.ends_with("FAILED: Prompt score too low.\n"));
    }
}
