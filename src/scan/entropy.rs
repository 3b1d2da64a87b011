use super::filesystem::{base_name, relative_display, walk};
use crate::types::config::{ENTROPY_AVG_THRESHOLD, ENTROPY_MAX_FILES};
use crate::types::report::DirectoryEntropy;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Files directly inside each visited directory, including empty ones.
fn files_per_directory(root: &Path) -> BTreeMap<PathBuf, usize> {
    let mut counts = BTreeMap::new();
    for entry in walk(root) {
        if entry.file_type().is_dir() {
            counts.entry(entry.path().to_path_buf()).or_insert(0);
        } else if entry.file_type().is_file() {
            if let Some(parent) = entry.path().parent() {
                *counts.entry(parent.to_path_buf()).or_insert(0) += 1;
            }
        }
    }
    counts
}

fn directory_key(root: &Path, dir: &Path) -> String {
    let relative = relative_display(root, dir);
    if relative.is_empty() {
        base_name(root)
    } else {
        relative
    }
}

pub fn directory_entropy(root: &Path) -> DirectoryEntropy {
    if !root.is_dir() {
        return DirectoryEntropy::default();
    }

    let counts = files_per_directory(root);
    let total_dirs = counts.len();
    let total_files: usize = counts.values().sum();
    let max_files = counts.values().copied().max().unwrap_or(0);
    let avg_files = if total_dirs > 0 {
        total_files as f64 / total_dirs as f64
    } else {
        0.0
    };
    let crowded_dirs = counts
        .iter()
        .filter(|(_, count)| **count > ENTROPY_MAX_FILES)
        .map(|(dir, _)| directory_key(root, dir))
        .collect();

    DirectoryEntropy {
        avg_files,
        warning: avg_files > ENTROPY_AVG_THRESHOLD || max_files > ENTROPY_MAX_FILES,
        max_files,
        crowded_dirs,
    }
}

/// Directories holding more than `threshold` files directly.
pub fn crowded_directories(root: &Path, threshold: usize) -> BTreeMap<String, usize> {
    if !root.is_dir() {
        return BTreeMap::new();
    }
    files_per_directory(root)
        .into_iter()
        .filter(|(_, count)| *count > threshold)
        .map(|(dir, count)| (directory_key(root, &dir), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch_files(dir: &Path, prefix: &str, count: usize) {
        fs::create_dir_all(dir).expect("dir should create");
        for i in 0..count {
            fs::write(dir.join(format!("{prefix}_{i}.txt")), "").expect("file should write");
        }
    }

    #[test]
    fn entropy_averages_over_visited_directories() {
        let dir = TempDir::new().expect("temp dir should be created");
        touch_files(dir.path(), "file", 15);
        touch_files(&dir.path().join("subdir"), "sub", 5);

        let entropy = directory_entropy(dir.path());
        assert_eq!(entropy.avg_files, 10.0);
        assert!(!entropy.warning);
        assert_eq!(entropy.max_files, 15);
        assert!(entropy.crowded_dirs.is_empty());
    }

    #[test]
    fn entropy_warns_on_high_average() {
        let dir = TempDir::new().expect("temp dir should be created");
        touch_files(dir.path(), "file", 20);

        let entropy = directory_entropy(dir.path());
        assert_eq!(entropy.avg_files, 20.0);
        assert!(entropy.warning);
    }

    #[test]
    fn entropy_warns_on_single_crowded_directory() {
        let dir = TempDir::new().expect("temp dir should be created");
        touch_files(&dir.path().join("god_dir"), "f", 60);
        for i in 0..10 {
            fs::create_dir_all(dir.path().join(format!("empty_{i}"))).expect("dir should create");
        }

        let entropy = directory_entropy(dir.path());
        // 60 files over root + god_dir + 10 empty dirs
        assert_eq!(entropy.avg_files, 5.0);
        assert!(entropy.warning);
        assert_eq!(entropy.max_files, 60);
        assert_eq!(entropy.crowded_dirs, vec!["god_dir".to_string()]);
    }

    #[test]
    fn entropy_skips_hidden_and_cache_directories() {
        let dir = TempDir::new().expect("temp dir should be created");
        touch_files(&dir.path().join(".git/objects"), "obj", 80);
        touch_files(&dir.path().join("__pycache__"), "pyc", 80);
        touch_files(dir.path(), "file", 2);

        let entropy = directory_entropy(dir.path());
        assert_eq!(entropy.avg_files, 2.0);
        assert!(!entropy.warning);
    }

    #[test]
    fn crowded_directories_keys_root_by_base_name() {
        let dir = TempDir::new().expect("temp dir should be created");
        touch_files(dir.path(), "file", 25);
        touch_files(&dir.path().join("subdir"), "sub", 5);

        let crowded = crowded_directories(dir.path(), 20);
        let base = base_name(dir.path());
        assert_eq!(crowded.get(&base), Some(&25));
        assert!(!crowded.contains_key("subdir"));
    }

    #[test]
    fn file_targets_have_no_entropy() {
        let dir = TempDir::new().expect("temp dir should be created");
        let file = dir.path().join("single.py");
        fs::write(&file, "x = 1").expect("file should write");
        assert_eq!(directory_entropy(&file), DirectoryEntropy::default());
        assert!(crowded_directories(&file, 0).is_empty());
    }
}
