pub mod docs;
pub mod entropy;
pub mod filesystem;

use crate::error::{Result, ScorecardError};
use crate::oracle::ComplexityOracle;
use filesystem::list_source_files;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Files selected for one analysis run.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    /// Directory documentation and structure checks run against. For a
    /// single-file target this is the file's parent.
    pub root: PathBuf,
    /// Source files to score, sorted by path.
    pub files: Vec<PathBuf>,
    pub single_file: bool,
}

pub fn discover(target: &Path, oracle: &dyn ComplexityOracle) -> Result<ProjectLayout> {
    if !target.exists() {
        return Err(ScorecardError::PathNotFound(target.display().to_string()));
    }

    if target.is_file() {
        let root = target
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        return Ok(ProjectLayout {
            root,
            files: vec![target.to_path_buf()],
            single_file: true,
        });
    }

    let files = list_source_files(target, oracle.extension());
    debug!(root = %target.display(), files = files.len(), "discovered source files");
    Ok(ProjectLayout {
        root: target.to_path_buf(),
        files,
        single_file: false,
    })
}
