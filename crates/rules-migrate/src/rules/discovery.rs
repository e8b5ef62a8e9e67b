//! Rule file discovery and target-directory resolution.

use crate::errors::MigrateError;
use crate::rewrite::{RULE_EXTENSION, STORAGE_DIR};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Find every `.mdc` file under `root`, sorted lexicographically.
///
/// Directories whose name appears in `excluded` are not descended into.
pub fn discover_rule_files(root: &Path, excluded: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_rule_files(root, excluded, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_rule_files(dir: &Path, excluded: &[String], out: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;
        let name = entry.file_name();
        let name = name.to_string_lossy();

        if file_type.is_dir() {
            if excluded.iter().any(|e| e.as_str() == name.as_ref()) {
                continue;
            }
            collect_rule_files(&path, excluded, out)?;
        } else if file_type.is_file() && is_rule_file(&path) {
            out.push(path);
        }
    }
    Ok(())
}

fn is_rule_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy() == RULE_EXTENSION.trim_start_matches('.'))
        .unwrap_or(false)
}

/// Directory whose aggregate document receives the rule at `rule_path`.
///
/// That is the directory holding the first `.cursor` component, or `repo_root`
/// itself for root-level rules.
pub fn target_directory(rule_path: &Path, repo_root: &Path) -> Result<PathBuf, MigrateError> {
    let relative = rule_path
        .strip_prefix(repo_root)
        .map_err(|_| MigrateError::OutsideRoot {
            path: rule_path.to_path_buf(),
            root: repo_root.to_path_buf(),
        })?;

    let parts: Vec<Component> = relative.components().collect();
    let storage_index = parts
        .iter()
        .position(|c| c.as_os_str() == STORAGE_DIR)
        .ok_or_else(|| MigrateError::MissingRuleSegment {
            path: rule_path.to_path_buf(),
        })?;

    if storage_index == 0 {
        return Ok(repo_root.to_path_buf());
    }
    let owner: PathBuf = parts[..storage_index].iter().collect();
    Ok(repo_root.join(owner))
}
