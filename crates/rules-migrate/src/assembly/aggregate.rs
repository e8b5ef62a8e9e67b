//! Per-directory aggregate documents.
//!
//! The generated rule sections are regenerated in full on every run while the
//! hand-written preface above them is preserved, so re-running with the same
//! rules rewrites the file byte for byte.

use super::{render_rules, RULE_MARKER};
use crate::config::Layout;
use crate::rewrite::{paths, PathRewriter};
use crate::rules::RuleDocument;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Hand-written content of an existing aggregate document.
///
/// Returns everything before the first rule section, right-trimmed, or `None`
/// when the document does not exist. A document without any rule section is
/// treated as preface in its entirety.
pub fn existing_preface(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    match text.find(RULE_MARKER) {
        Some(idx) => Ok(Some(text[..idx].trim_end().to_string())),
        None => {
            if !text.trim().is_empty() {
                warn!(
                    path = %path.display(),
                    marker = RULE_MARKER,
                    "no generated rule section found, keeping whole file as preface"
                );
            }
            Ok(Some(text.trim_end().to_string()))
        }
    }
}

/// Assemble aggregate document content from a preface and rendered sections.
///
/// An empty or missing preface is replaced by a generated title.
pub fn build_aggregate(preface: Option<&str>, relative_dir: &str, sections: &str) -> String {
    let preface = match preface.map(str::trim_end).filter(|p| !p.is_empty()) {
        Some(p) => p.to_string(),
        None if relative_dir == "." => "# Agent Guidance for Project Root".to_string(),
        None => format!("# Agent Guidance for {}", relative_dir),
    };
    format!("{}\n\n{}\n", preface, sections)
}

/// Write (or regenerate) the aggregate document for `target_dir`.
///
/// Returns the written path, or `None` when there are no rules to write.
pub fn write_aggregate(
    repo_root: &Path,
    target_dir: &Path,
    rules: &[RuleDocument],
    layout: &Layout,
) -> Result<Option<PathBuf>> {
    if rules.is_empty() {
        return Ok(None);
    }

    let rewriter = PathRewriter::new(repo_root, target_dir, layout.clone());
    let sections = render_rules(rules, &rewriter);
    let aggregate_path = layout.aggregate_path(target_dir);

    let relative_dir = match target_dir.strip_prefix(repo_root) {
        Ok(rel) if !rel.as_os_str().is_empty() => paths::to_slash(rel),
        _ => ".".to_string(),
    };

    let preface = existing_preface(&aggregate_path)?;
    let content = build_aggregate(preface.as_deref(), &relative_dir, &sections);

    fs::write(&aggregate_path, content)
        .with_context(|| format!("Failed to write {}", aggregate_path.display()))?;
    info!(path = %aggregate_path.display(), rules = rules.len(), "wrote aggregate document");

    Ok(Some(aggregate_path))
}
