//! Dump discovery with efficient directory pruning.
//!
//! Walks a tree for `.ast.json` dumps, pruning build and VCS directories
//! before iteration and processing the remaining entries in parallel.

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directories never worth descending into.
const EXCLUDED_DIRS: &[&str] = &["target", ".git", "node_modules", ".cache"];

/// Dump file suffix produced by front ends.
const DUMP_SUFFIX: &str = ".ast.json";

fn is_excluded_dir(entry: &walkdir::DirEntry, excludes: &HashSet<&str>) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| excludes.contains(name))
}

fn is_dump(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(DUMP_SUFFIX))
}

/// Gathers all `.ast.json` dumps under `root`, sorted for deterministic
/// processing order.
pub fn gather_dumps(root: &Path) -> Result<Vec<PathBuf>> {
    gather_dumps_with_excludes(root, &[])
}

/// Gathers dumps with extra excluded directory names.
pub fn gather_dumps_with_excludes(root: &Path, excludes: &[&str]) -> Result<Vec<PathBuf>> {
    let all_excludes: HashSet<&str> = EXCLUDED_DIRS
        .iter()
        .copied()
        .chain(excludes.iter().copied())
        .collect();

    let mut dumps: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        // filter_entry prunes whole subtrees before iteration
        .filter_entry(|e| !is_excluded_dir(e, &all_excludes))
        .par_bridge()
        .filter_map(|entry| match entry {
            Ok(e) => {
                let path = e.path();
                if is_dump(path) {
                    Some(Ok(path.to_path_buf()))
                } else {
                    None
                }
            }
            Err(e) => Some(Err(e.into())),
        })
        .collect::<Result<Vec<_>>>()
        .context(format!("Failed to gather dumps from {}", root.display()))?;

    dumps.sort();
    Ok(dumps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_gathers_only_dumps() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.ast.json"), "{}").unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("c.cpp"), "").unwrap();

        let dumps = gather_dumps(dir.path()).unwrap();
        assert_eq!(dumps.len(), 1);
        assert!(dumps[0].ends_with("a.ast.json"));
    }

    #[test]
    fn test_prunes_excluded_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("target");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("hidden.ast.json"), "{}").unwrap();
        fs::write(dir.path().join("visible.ast.json"), "{}").unwrap();

        let dumps = gather_dumps(dir.path()).unwrap();
        assert_eq!(dumps.len(), 1);
        assert!(dumps[0].ends_with("visible.ast.json"));
    }

    #[test]
    fn test_sorted_output() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.ast.json"), "{}").unwrap();
        fs::write(dir.path().join("a.ast.json"), "{}").unwrap();

        let dumps = gather_dumps(dir.path()).unwrap();
        assert!(dumps[0] < dumps[1]);
    }
}
