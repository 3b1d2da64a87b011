use super::filesystem::{file_exists, read_to_string_if_exists};
use crate::types::report::EnvironmentHealth;
use std::collections::HashSet;
use std::path::Path;

const LINTER_CONFIGS: [&str; 3] = ["ruff.toml", ".flake8", ".eslintrc"];
const LOCK_FILES: [&str; 3] = ["package-lock.json", "poetry.lock", "uv.lock"];
pub const PYPROJECT: &str = "pyproject.toml";

fn lowercase_entries(dir: &Path) -> HashSet<String> {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().to_lowercase())
                .collect()
        })
        .unwrap_or_default()
}

/// Required documentation files absent from `root`, compared case-insensitively.
pub fn missing_docs(root: &Path, required: &[String]) -> Vec<String> {
    let present = lowercase_entries(root);
    required
        .iter()
        .filter(|name| !present.contains(&name.to_lowercase()))
        .cloned()
        .collect()
}

/// True when `pyproject.toml` is absent or parses as TOML.
pub fn pyproject_valid(root: &Path) -> bool {
    match read_to_string_if_exists(&root.join(PYPROJECT)) {
        Some(content) => content.parse::<toml::Table>().is_ok(),
        None => !file_exists(&root.join(PYPROJECT)),
    }
}

/// Probes `root` and its parent for agent-facing project hygiene files.
pub fn environment_health(root: &Path) -> EnvironmentHealth {
    let mut health = EnvironmentHealth {
        pyproject_valid: pyproject_valid(root),
        ..EnvironmentHealth::default()
    };

    let mut search_dirs = vec![root.to_path_buf()];
    if let Some(parent) = root
        .canonicalize()
        .ok()
        .and_then(|resolved| resolved.parent().map(Path::to_path_buf))
    {
        search_dirs.push(parent);
    }

    for dir in &search_dirs {
        let entries = lowercase_entries(dir);
        if entries.is_empty() {
            continue;
        }
        health.agents_md |= entries.contains("agents.md");
        health.linter_config |= LINTER_CONFIGS.iter().any(|name| entries.contains(*name))
            || read_to_string_if_exists(&dir.join(PYPROJECT))
                .map(|content| content.contains("[tool.ruff]"))
                .unwrap_or(false);
        health.lock_file |= LOCK_FILES.iter().any(|name| entries.contains(*name));
    }

    health
}
