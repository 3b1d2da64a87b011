use crate::error::{Result, ScorecardError};
use crate::scan::docs::PYPROJECT;
use crate::types::config::ScorecardConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;
use tracing::{debug, warn};

pub const TOOL_TABLE: &str = "agent-scorecard";
pub const DEFAULT_LOCAL_FILE: &str = ".agent-scorecard/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/agent-scorecard/config.toml";

pub fn load_config(root: &Path) -> Result<ScorecardConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

/// Merges global, `[tool.agent-scorecard]` and local settings, later
/// layers winning key by key.
pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<ScorecardConfig> {
    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    if let Some(tool_table) = pyproject_tool_table(&root.join(PYPROJECT)) {
        merge_toml(&mut merged, tool_table);
    }
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    let cfg: ScorecardConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| ScorecardError::ConfigParse(e.to_string()))?;
    Ok(cfg)
}

/// The `[tool.agent-scorecard]` table, if present. A malformed pyproject
/// is skipped here; the aggregator reports it as a project issue.
fn pyproject_tool_table(path: &Path) -> Option<Value> {
    let content = std::fs::read_to_string(path).ok()?;
    let mut document: Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring malformed pyproject.toml");
            return None;
        }
    };
    let table = document
        .get_mut("tool")
        .and_then(|tool| tool.as_table_mut())
        .and_then(|tool| tool.remove(TOOL_TABLE))?;
    debug!(path = %path.display(), "loaded [tool.agent-scorecard]");
    Some(table)
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| ScorecardError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
