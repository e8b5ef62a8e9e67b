//! Standalone companion documents for root-level rules.

use crate::config::Layout;
use crate::rewrite::PathRewriter;
use crate::rules::RuleDocument;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Render the companion document for a root-level rule.
///
/// `rewriter` must be bound to the companion folder so that links resolve
/// from where the document is written.
pub fn render_companion(rule: &RuleDocument, rewriter: &PathRewriter) -> String {
    let mut lines: Vec<String> = vec![
        format!("<!-- Generated from cursor rule '{}' -->", rule.stem()),
        String::new(),
    ];
    if let Some(description) = rule.quoted_description() {
        lines.push(format!("> {}", description));
        lines.push(String::new());
    }
    lines.push(rewriter.rewrite_body(&rule.body));
    format!("{}\n", lines.join("\n").trim())
}

/// Write one companion document per rule under `<repo_root>/<docs_dir>/`.
pub fn write_companions(
    repo_root: &Path,
    rules: &[RuleDocument],
    layout: &Layout,
) -> Result<Vec<PathBuf>> {
    let docs_root = repo_root.join(&layout.docs_dir);
    fs::create_dir_all(&docs_root)
        .with_context(|| format!("Failed to create {}", docs_root.display()))?;

    let rewriter = PathRewriter::new(repo_root, &docs_root, layout.clone());
    let mut written = Vec::with_capacity(rules.len());

    for rule in rules {
        let output_path = repo_root.join(layout.companion_path(&rule.stem()));
        fs::write(&output_path, render_companion(rule, &rewriter))
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        info!(path = %output_path.display(), source = %rule.source.display(), "wrote companion document");
        written.push(output_path);
    }

    Ok(written)
}
