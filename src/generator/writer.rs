use super::templates::template_for;
use crate::cli::{ApplyMode, FixCommand};
use crate::error::Result;
use crate::scan::docs::missing_docs;
use crate::scan::filesystem::base_name;
use crate::types::config::Profile;
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const ROLLBACK_DIR: &str = ".agent-scorecard/rollback";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChangeAction {
    Create,
}

impl ChangeAction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
        }
    }
}

#[derive(Debug, Clone)]
struct PlannedChange {
    path: PathBuf,
    action: ChangeAction,
    content: String,
}

#[derive(Debug, Serialize)]
struct RollbackManifest {
    timestamp: String,
    scorecard_version: String,
    files: Vec<RollbackFile>,
}

#[derive(Debug, Serialize)]
struct RollbackFile {
    path: String,
    action: String,
    sha256: Option<String>,
}

/// Directory the documentation files belong in.
fn fix_root(path: &Path) -> PathBuf {
    if path.is_file() {
        return path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
    }
    path.to_path_buf()
}

pub fn execute_fix(cmd: &FixCommand, profile: &Profile) -> Result<()> {
    let root = fix_root(&cmd.path);
    let changes = build_changes(&root, profile);

    print_scope_summary(&root, &changes);
    if changes.is_empty() {
        println!("no-op: no changes required");
        return Ok(());
    }

    if matches!(cmd.apply_mode, ApplyMode::Preview) {
        println!("preview: no files were written");
        return Ok(());
    }

    if !cmd.yes && !confirm_apply()? {
        println!("apply cancelled");
        return Ok(());
    }

    let rollback_path = create_rollback_manifest(&root, &changes)?;
    println!("rollback manifest: {}", rollback_path.display());
    let written = apply_changes(&changes)?;
    println!("apply complete: wrote {written} file(s)");
    Ok(())
}

fn build_changes(root: &Path, profile: &Profile) -> Vec<PlannedChange> {
    let project_name = base_name(root);
    missing_docs(root, &profile.required_files)
        .into_iter()
        .filter_map(|doc| match template_for(&doc, &project_name) {
            Some(content) => Some(PlannedChange {
                path: root.join(&doc),
                action: ChangeAction::Create,
                content,
            }),
            None => {
                warn!(file = %doc, "no template for required file");
                None
            }
        })
        .collect()
}

fn print_scope_summary(root: &Path, changes: &[PlannedChange]) {
    println!("scope: create={} modify=0 delete=0", changes.len());
    for change in changes {
        let display_path = change
            .path
            .strip_prefix(root)
            .unwrap_or(change.path.as_path())
            .display();
        println!("{}: {}", change.action.as_str(), display_path);
    }
}

fn confirm_apply() -> Result<bool> {
    print!("Apply these changes? [y/N]: ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let normalized = input.trim().to_ascii_lowercase();
    Ok(normalized == "y" || normalized == "yes")
}

fn create_rollback_manifest(root: &Path, changes: &[PlannedChange]) -> Result<PathBuf> {
    let timestamp = Utc::now();
    let file_stamp = timestamp.format("%Y%m%dT%H%M%SZ").to_string();
    let rollback_dir = root.join(ROLLBACK_DIR);
    fs::create_dir_all(&rollback_dir)?;

    let mut files = Vec::new();
    for change in changes {
        let relative = change
            .path
            .strip_prefix(root)
            .unwrap_or(change.path.as_path())
            .to_string_lossy()
            .to_string();
        let sha256 = if change.path.exists() {
            Some(sha256_hex(&fs::read(&change.path)?))
        } else {
            None
        };
        files.push(RollbackFile {
            path: relative,
            action: change.action.as_str().to_string(),
            sha256,
        });
    }

    let manifest = RollbackManifest {
        timestamp: timestamp.to_rfc3339(),
        scorecard_version: env!("CARGO_PKG_VERSION").to_string(),
        files,
    };

    let out_path = rollback_dir.join(format!("{file_stamp}.json"));
    fs::write(&out_path, serde_json::to_string_pretty(&manifest)?)?;
    Ok(out_path)
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{digest:x}")
}

/// Writes planned files, skipping any that appeared since planning.
fn apply_changes(changes: &[PlannedChange]) -> Result<usize> {
    let mut written = 0;
    for change in changes {
        if change.path.exists() {
            debug!(path = %change.path.display(), "file exists, not overwriting");
            continue;
        }
        if let Some(parent) = change.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&change.path, &change.content)?;
        println!("Created {}", change.path.display());
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn jules() -> Profile {
        Profile::named("jules").expect("jules should exist")
    }

    #[test]
    fn plans_only_missing_required_docs() {
        let tmp = TempDir::new().expect("temp dir should create");
        fs::write(tmp.path().join("Instructions.md"), "# Mine\n").expect("doc should write");

        let changes = build_changes(tmp.path(), &jules());

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].path, tmp.path().join("agents.md"));
        assert!(changes[0].content.contains("# Agent Context: "));
    }

    #[test]
    fn generic_profile_plans_readme() {
        let tmp = TempDir::new().expect("temp dir should create");
        let generic = Profile::named("generic").expect("generic should exist");
        let changes = build_changes(tmp.path(), &generic);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].content, "# Project\n\nAuto-generated README.\n");
    }

    #[test]
    fn rollback_manifest_records_planned_files() {
        let tmp = TempDir::new().expect("temp dir should create");
        let changes = build_changes(tmp.path(), &jules());

        let path = create_rollback_manifest(tmp.path(), &changes).expect("manifest should write");
        assert!(path.starts_with(tmp.path().join(ROLLBACK_DIR)));

        let raw = fs::read_to_string(path).expect("manifest should read");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("manifest should parse");
        assert_eq!(value["files"][0]["path"], "agents.md");
        assert_eq!(value["files"][0]["action"], "create");
        assert!(value["files"][0]["sha256"].is_null());
    }

    #[test]
    fn apply_never_overwrites_existing_files() {
        let tmp = TempDir::new().expect("temp dir should create");
        let changes = build_changes(tmp.path(), &jules());
        fs::write(tmp.path().join("agents.md"), "keep me").expect("agents should write");

        let written = apply_changes(&changes).expect("apply should succeed");

        assert_eq!(written, 1);
        let kept = fs::read_to_string(tmp.path().join("agents.md")).expect("agents should read");
        assert_eq!(kept, "keep me");
        assert!(tmp.path().join("instructions.md").exists());
    }

    #[test]
    fn sha256_hex_matches_known_digest() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn file_target_fixes_its_parent() {
        let tmp = TempDir::new().expect("temp dir should create");
        let file = tmp.path().join("main.py");
        fs::write(&file, "x = 1\n").expect("source should write");
        assert_eq!(fix_root(&file), tmp.path());
    }
}
