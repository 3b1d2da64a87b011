#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const TYPED_SOURCE: &str = "def add(a: int, b: int) -> int:\n    return a + b\n";
const UNTYPED_SOURCE: &str = "def add(a, b):\n    return a + b\n";

fn scorecard() -> Command {
    Command::cargo_bin("agent-scorecard").expect("binary should compile")
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent dir should be created");
    }
    fs::write(path, content).expect("file should write");
}

/// README plus one fully typed module: scores 100 under the generic profile.
fn clean_project() -> TempDir {
    let repo = TempDir::new().expect("temp dir should be created");
    write(repo.path(), "README.md", "# Demo\n");
    write(repo.path(), "main.py", TYPED_SOURCE);
    repo
}

#[test]
fn score_clean_project_passes() {
    let repo = clean_project();
    scorecard()
        .arg("score")
        .arg(repo.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Running Agent Scorecard"))
        .stdout(predicate::str::contains("Final Agent Score: 100.0/100"));
}

#[test]
fn jules_profile_on_empty_dir_reports_missing_docs() {
    let repo = TempDir::new().expect("temp dir should be created");
    scorecard()
        .arg("score")
        .arg(repo.path())
        .args(["--agent", "jules"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Missing Critical Agent Docs"))
        .stdout(predicate::str::contains("agents.md, instructions.md"));
}

#[test]
fn quiet_mode_prints_only_the_verdict() {
    let repo = clean_project();
    scorecard()
        .arg("-q")
        .arg("score")
        .arg(repo.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Final Agent Score"))
        .stdout(predicate::str::contains("Running Agent Scorecard").not())
        .stdout(predicate::str::contains("Environment Health").not())
        .stdout(predicate::str::contains("File Analysis").not());
}

#[test]
fn summary_hides_perfect_files_and_detailed_shows_them() {
    let repo = TempDir::new().expect("temp dir should be created");
    write(repo.path(), "README.md", "# Demo\n");
    write(repo.path(), "pass.py", TYPED_SOURCE);
    write(repo.path(), "fail.py", UNTYPED_SOURCE);

    scorecard()
        .arg("score")
        .arg(repo.path())
        .args(["--verbosity", "summary"])
        .assert()
        .stdout(predicate::str::contains("fail.py"))
        .stdout(predicate::str::contains("pass.py").not());

    scorecard()
        .arg("score")
        .arg(repo.path())
        .args(["--verbosity", "detailed"])
        .assert()
        .stdout(predicate::str::contains("fail.py"))
        .stdout(predicate::str::contains("pass.py"));
}

#[test]
fn verbosity_can_come_from_pyproject() {
    let repo = clean_project();
    write(
        repo.path(),
        "pyproject.toml",
        "[tool.agent-scorecard]\nverbosity = \"quiet\"\n",
    );
    scorecard()
        .arg("score")
        .arg(repo.path())
        .assert()
        .stdout(predicate::str::contains("Environment Health").not())
        .stdout(predicate::str::contains("Final Agent Score"));
}

#[test]
fn badge_flag_writes_svg() {
    let repo = clean_project();
    scorecard()
        .arg("score")
        .arg(repo.path())
        .arg("--badge")
        .assert()
        .code(0)
        .stderr(predicate::str::contains("Badge saved"));

    let svg = fs::read_to_string(repo.path().join("agent_score.svg")).expect("badge should exist");
    assert!(svg.contains("#4c1"));
}

#[test]
fn json_format_emits_machine_readable_report() {
    let repo = clean_project();
    let output = scorecard()
        .arg("score")
        .arg(repo.path())
        .args(["--format", "json"])
        .output()
        .expect("binary should run");

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be json");
    assert_eq!(value["final_score"], 100.0);
    assert_eq!(value["passed"], true);
    assert_eq!(value["file_results"][0]["file"], "main.py");
}

#[test]
fn json_with_badge_and_plan_keeps_stdout_parseable() {
    let repo = clean_project();
    let output = scorecard()
        .arg("score")
        .arg(repo.path())
        .args(["--format", "json", "--badge", "--export-plan"])
        .output()
        .expect("binary should run");

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be json only");
    assert_eq!(value["passed"], true);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Badge saved"));
    assert!(stderr.contains("Plan saved to"));
    assert!(repo.path().join("agent_score.svg").exists());
}

#[test]
fn copilot_accepts_yellow_override_below_its_red_tier() {
    let repo = clean_project();
    write(
        repo.path(),
        ".agent-scorecard/local.toml",
        "[thresholds]\nacl_yellow = 18\n",
    );
    scorecard()
        .arg("score")
        .arg(repo.path())
        .args(["--agent", "copilot"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("profile: copilot"));

    scorecard()
        .arg("score")
        .arg(repo.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("cannot exceed"));
}

#[test]
fn markdown_format_reports_cycles() {
    let repo = TempDir::new().expect("temp dir should be created");
    write(repo.path(), "README.md", "# Demo\n");
    write(repo.path(), "a.py", "import b\n");
    write(repo.path(), "b.py", "import a\n");

    scorecard()
        .arg("score")
        .arg(repo.path())
        .args(["--format", "md"])
        .assert()
        .stdout(predicate::str::contains("# Agent Scorecard Report"))
        .stdout(predicate::str::contains("Circular Dependencies Detected: 1"));
}

#[test]
fn export_plan_writes_plan_and_recommendations() {
    let repo = TempDir::new().expect("temp dir should be created");
    write(repo.path(), "main.py", UNTYPED_SOURCE);

    scorecard()
        .arg("score")
        .arg(repo.path())
        .args(["--agent", "jules", "--export-plan"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Plan saved to"))
        .stderr(predicate::str::contains("Recommendations saved to"));

    let plans: Vec<_> = fs::read_dir(repo.path().join(".agent-scorecard/plans"))
        .expect("plans dir should exist")
        .collect();
    assert_eq!(plans.len(), 1);

    let recommendations = fs::read_to_string(repo.path().join("RECOMMENDATIONS.md"))
        .expect("recommendations should exist");
    assert!(recommendations.contains("| Missing AGENTS.md |"));
    assert!(recommendations.contains("Low Type Safety: main.py"));
}

#[test]
fn advise_writes_report_to_output_file() {
    let repo = clean_project();
    let report_path = repo.path().join("advice.md");
    scorecard()
        .arg("advise")
        .arg(repo.path())
        .arg("--output")
        .arg(&report_path)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Advisor report saved"));

    let report = fs::read_to_string(report_path).expect("report should exist");
    assert!(report.contains("Agent Advisor Report"));
    assert!(report.contains("Hallucination Zones"));
}

#[test]
fn fix_preview_writes_nothing() {
    let repo = TempDir::new().expect("temp dir should be created");
    scorecard()
        .arg("fix")
        .arg(repo.path())
        .args(["--agent", "jules"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("scope: create=2"))
        .stdout(predicate::str::contains("preview: no files were written"));

    assert!(!repo.path().join("agents.md").exists());
}

#[test]
fn fix_apply_creates_docs_and_rollback_manifest() {
    let repo = TempDir::new().expect("temp dir should be created");
    scorecard()
        .arg("fix")
        .arg(repo.path())
        .args(["--agent", "jules", "--apply-mode", "apply", "--yes"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("rollback manifest:"))
        .stdout(predicate::str::contains("apply complete: wrote 2 file(s)"));

    let agents = fs::read_to_string(repo.path().join("agents.md")).expect("agents.md should exist");
    assert!(agents.contains("Agent Context"));
    assert!(repo.path().join("instructions.md").exists());
    assert!(repo.path().join(".agent-scorecard/rollback").is_dir());

    scorecard()
        .arg("score")
        .arg(repo.path())
        .args(["--agent", "jules"])
        .assert()
        .stdout(predicate::str::contains("Missing Critical Agent Docs").not());
}

#[test]
fn fix_leaves_existing_docs_alone() {
    let repo = TempDir::new().expect("temp dir should be created");
    write(repo.path(), "README.md", "# Mine\n");
    scorecard()
        .arg("fix")
        .arg(repo.path())
        .args(["--apply-mode", "apply", "--yes"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("no-op: no changes required"));

    let readme = fs::read_to_string(repo.path().join("README.md")).expect("readme should exist");
    assert_eq!(readme, "# Mine\n");
}

#[test]
fn check_prompts_passes_a_structured_prompt() {
    let repo = TempDir::new().expect("temp dir should be created");
    write(
        repo.path(),
        "prompt.txt",
        "You are a Python expert. Think step by step.\n\
         <code>{{source}}</code>\n\
         Example: input: x = 1 output: x: int = 1\n",
    );

    scorecard()
        .arg("check-prompts")
        .arg(repo.path().join("prompt.txt"))
        .arg("--plain")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Score: 100/100"))
        .stdout(predicate::str::contains("PASSED: Prompt is optimized!"));
}

#[test]
fn check_prompts_fails_a_bare_prompt() {
    let repo = TempDir::new().expect("temp dir should be created");
    write(repo.path(), "prompt.txt", "Fix the code. Don't break anything.\n");

    scorecard()
        .arg("check-prompts")
        .arg(repo.path().join("prompt.txt"))
        .arg("--plain")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Score: 0/100"))
        .stdout(predicate::str::contains("Refactored Suggestions:"))
        .stdout(predicate::str::contains("FAILED: Prompt score too low."));
}
