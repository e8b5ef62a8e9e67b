//! Reference rewriting from the Cursor rule convention to `AGENTS.md`.
//!
//! A [`PathRewriter`] is bound to one output directory. It maps single
//! references with [`PathRewriter::map_reference`] and rewrites whole rule
//! bodies with [`PathRewriter::rewrite_body`], which runs the ordered stages
//! in [`stages`]. Rewriting never fails: whenever a reference cannot be
//! resolved, the original text is kept.

pub mod link_text;
pub mod paths;
pub mod stages;

use crate::config::Layout;
use std::path::{Path, PathBuf};
use tracing::trace;

/// File extension of Cursor rule documents.
pub const RULE_EXTENSION: &str = ".mdc";

/// Directory name that holds Cursor rules (`<dir>/.cursor/rules/`).
pub const STORAGE_DIR: &str = ".cursor";

/// Inline link marker used by Cursor for rule-relative references.
pub const INLINE_MARKER: &str = "mdc:";

/// Rewrites references for documents written into one output directory.
///
/// # Example
///
/// ```
/// use rules_migrate::{Layout, PathRewriter};
/// use std::path::Path;
///
/// let rewriter = PathRewriter::new(Path::new("/repo"), Path::new("/repo/pkg"), Layout::default());
///
/// assert_eq!(
///     rewriter.rewrite_body("See [Style Guide](mdc:.cursor/rules/style_guide.mdc)."),
///     "See [Style Guide](../docs/rules/style_guide.md)."
/// );
/// ```
#[derive(Debug, Clone)]
pub struct PathRewriter {
    repo_root: PathBuf,
    target_dir: PathBuf,
    layout: Layout,
}

impl PathRewriter {
    /// Create a rewriter for documents that will live in `target_dir`.
    pub fn new(repo_root: &Path, target_dir: &Path, layout: Layout) -> Self {
        Self {
            repo_root: repo_root.to_path_buf(),
            target_dir: target_dir.to_path_buf(),
            layout,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Rewrite every reference in a rule body.
    pub fn rewrite_body(&self, body: &str) -> String {
        let rewritten = stages::PIPELINE
            .iter()
            .fold(body.trim().to_string(), |text, (name, stage)| {
                let next = stage(self, &text);
                if next != text {
                    trace!(stage = *name, target = %self.target_dir.display(), "stage rewrote body");
                }
                next
            });
        rewritten.trim().to_string()
    }

    /// Map a single reference to its location in the new layout.
    ///
    /// Returns `None` when no relative path from the output directory can be
    /// computed; callers keep the original text in that case.
    pub fn map_reference(&self, reference: &str) -> Option<String> {
        let reference = reference.trim();
        if is_passthrough(reference) {
            return Some(reference.to_string());
        }

        if !reference.contains(STORAGE_DIR) {
            if reference.ends_with(RULE_EXTENSION) {
                return self.relative_to_output(&self.layout.companion_path(&file_stem(reference)));
            }
            if paths::is_output_relative(reference) {
                return Some(reference.to_string());
            }
            return self.relative_to_output(Path::new(reference));
        }

        let parts: Vec<&str> = reference
            .split('/')
            .filter(|p| !p.is_empty() && *p != ".")
            .collect();
        match parts.iter().position(|p| *p == STORAGE_DIR) {
            Some(0) => self.relative_to_output(&self.layout.companion_path(&file_stem(reference))),
            Some(idx) => {
                let owner: PathBuf = parts[..idx].iter().collect();
                self.relative_to_output(&self.layout.aggregate_path(&owner))
            }
            None if paths::is_output_relative(reference) => Some(reference.to_string()),
            None => self.relative_to_output(Path::new(reference)),
        }
    }

    /// Express a repository-relative (or absolute) path relative to the output directory.
    pub fn relative_to_output(&self, path: &Path) -> Option<String> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.repo_root.join(path)
        };
        paths::relative_path(&self.target_dir, &absolute).map(paths::mark_output_relative)
    }
}

/// References that are never rewritten: web URLs, mail links, in-page anchors.
pub fn is_passthrough(reference: &str) -> bool {
    reference.starts_with("http://")
        || reference.starts_with("https://")
        || reference.starts_with("mailto:")
        || reference.starts_with('#')
}

fn file_stem(reference: &str) -> String {
    Path::new(reference)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewriter(target: &str) -> PathRewriter {
        PathRewriter::new(Path::new("/repo"), Path::new(target), Layout::default())
    }

    #[test]
    fn test_rule_reference_maps_to_companion_doc() {
        let r = rewriter("/repo/pkg");
        assert_eq!(
            r.map_reference("foo/bar.mdc"),
            Some("../docs/rules/bar.md".to_string())
        );
    }

    #[test]
    fn test_companion_doc_next_to_output_gets_dot_prefix() {
        let r = rewriter("/repo/docs/rules");
        assert_eq!(r.map_reference("bar.mdc"), Some("./bar.md".to_string()));
    }

    #[test]
    fn test_nested_storage_maps_to_owner_aggregate() {
        let r = rewriter("/repo/app");
        assert_eq!(
            r.map_reference("pkg/.cursor/rules/x.mdc"),
            Some("../pkg/AGENTS.md".to_string())
        );
    }

    #[test]
    fn test_nested_storage_from_same_directory() {
        let r = rewriter("/repo/pkg");
        assert_eq!(
            r.map_reference("pkg/.cursor/rules/x.mdc"),
            Some("./AGENTS.md".to_string())
        );
    }

    #[test]
    fn test_root_storage_maps_to_docs_folder() {
        let r = rewriter("/repo/pkg/sub");
        assert_eq!(
            r.map_reference(".cursor/rules/x.mdc"),
            Some("../../docs/rules/x.md".to_string())
        );
    }

    #[test]
    fn test_dot_prefixed_root_storage_maps_to_docs_folder() {
        let r = rewriter("/repo/pkg");
        assert_eq!(
            r.map_reference("./.cursor/rules/x.mdc"),
            Some("../docs/rules/x.md".to_string())
        );
        assert_eq!(
            r.map_reference(".//.cursor/./rules/x.mdc"),
            Some("../docs/rules/x.md".to_string())
        );
        assert_eq!(
            r.rewrite_body("[x](./.cursor/rules/x.mdc) and (mdc:./.cursor/rules/y.mdc)"),
            "[X](../docs/rules/x.md) and (../docs/rules/y.md)"
        );
    }

    #[test]
    fn test_dot_segments_inside_nested_storage_are_ignored() {
        let r = rewriter("/repo/app");
        assert_eq!(
            r.map_reference("./pkg/./.cursor/rules/x.mdc"),
            Some("../pkg/AGENTS.md".to_string())
        );
    }

    #[test]
    fn test_plain_path_is_made_relative() {
        let r = rewriter("/repo/pkg");
        assert_eq!(
            r.map_reference("src/main.rs"),
            Some("../src/main.rs".to_string())
        );
        assert_eq!(r.map_reference("pkg/lib.rs"), Some("./lib.rs".to_string()));
    }

    #[test]
    fn test_output_relative_paths_are_kept() {
        let r = rewriter("/repo/pkg");
        assert_eq!(
            r.map_reference("../src/main.rs"),
            Some("../src/main.rs".to_string())
        );
    }

    #[test]
    fn test_passthrough_references() {
        let r = rewriter("/repo/pkg");
        for reference in [
            "https://example.com/a.mdc",
            "http://example.com",
            "#usage",
            "mailto:dev@example.com",
        ] {
            assert_eq!(r.map_reference(reference), Some(reference.to_string()));
        }
    }

    #[test]
    fn test_custom_layout() {
        let layout = Layout {
            docs_dir: PathBuf::from("handbook"),
            aggregate_file: "CLAUDE.md".to_string(),
        };
        let r = PathRewriter::new(Path::new("/repo"), Path::new("/repo/app"), layout);
        assert_eq!(
            r.map_reference("x.mdc"),
            Some("../handbook/x.md".to_string())
        );
        assert_eq!(
            r.map_reference("lib/.cursor/rules/y.mdc"),
            Some("../lib/CLAUDE.md".to_string())
        );
    }

    #[test]
    fn test_unresolvable_reference_returns_none() {
        let r = PathRewriter::new(Path::new("repo"), Path::new("/out"), Layout::default());
        assert_eq!(r.map_reference("src/main.rs"), None);
        assert_eq!(r.map_reference("a.mdc"), None);
    }
}

// Include property-based tests
#[cfg(test)]
#[path = "rewrite_proptests.rs"]
mod proptests;
