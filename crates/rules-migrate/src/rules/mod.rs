//! Rule documents and their grouping by output directory.
//!
//! Discovery walks the tree for `.mdc` files, strips each file's front matter
//! and assigns it to the directory whose aggregate document will hold it.

mod discovery;
mod front_matter;

pub use discovery::{discover_rule_files, target_directory};
pub use front_matter::parse_front_matter;

use crate::config::MigrateConfig;
use crate::rewrite::link_text;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A single rule file, read once and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDocument {
    /// Path relative to the repository root
    pub source: PathBuf,
    /// Value of the `description` header key, if any
    pub description: Option<String>,
    /// Markdown body with front matter removed, trimmed
    pub body: String,
}

impl RuleDocument {
    pub fn new(source: PathBuf, description: Option<String>, body: impl Into<String>) -> Self {
        Self {
            source,
            description,
            body: body.into(),
        }
    }

    /// File name without the `.mdc` extension.
    pub fn stem(&self) -> String {
        self.source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Human-readable rule name used in section headings.
    pub fn display_name(&self) -> String {
        link_text::display_text(&self.stem())
    }

    /// Description with surrounding double quotes removed; `None` when empty.
    pub fn quoted_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(|d| d.trim_matches('"'))
            .filter(|d| !d.is_empty())
    }
}

/// Rule documents keyed by the directory they are merged into.
///
/// Within a group, rules keep discovery order.
#[derive(Debug, Default, Clone)]
pub struct OutputGroups {
    groups: BTreeMap<PathBuf, Vec<RuleDocument>>,
}

impl OutputGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule to the group for `target_dir`.
    pub fn push(&mut self, target_dir: PathBuf, rule: RuleDocument) {
        self.groups.entry(target_dir).or_default().push(rule);
    }

    pub fn get(&self, target_dir: &Path) -> Option<&[RuleDocument]> {
        self.groups.get(target_dir).map(|rules| rules.as_slice())
    }

    /// Groups in lexicographic order of their target directory.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &[RuleDocument])> {
        self.groups
            .iter()
            .map(|(dir, rules)| (dir.as_path(), rules.as_slice()))
    }

    /// Number of target directories.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of rules across all groups.
    pub fn rule_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// Read every rule under `repo_root` and group it by target directory.
pub fn collect_rules(repo_root: &Path, config: &MigrateConfig) -> Result<OutputGroups> {
    let mut grouped = OutputGroups::new();

    for rule_path in discover_rule_files(repo_root, &config.excluded_dirs())? {
        let text = std::fs::read_to_string(&rule_path)
            .with_context(|| format!("Failed to read rule {}", rule_path.display()))?;
        let (description, body) = parse_front_matter(&text);
        let target_dir = target_directory(&rule_path, repo_root)?;
        let source = rule_path
            .strip_prefix(repo_root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| rule_path.clone());

        debug!(rule = %source.display(), target = %target_dir.display(), "discovered rule");
        grouped.push(
            target_dir,
            RuleDocument::new(source, description, body.trim()),
        );
    }

    Ok(grouped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MigrateError;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_display_name_from_stem() {
        let rule = RuleDocument::new(
            PathBuf::from("pkg/.cursor/rules/error_handling-guide.mdc"),
            None,
            "",
        );
        assert_eq!(rule.stem(), "error_handling-guide");
        assert_eq!(rule.display_name(), "Error Handling Guide");
    }

    #[test]
    fn test_quoted_description() {
        let quoted = RuleDocument::new(PathBuf::from("a.mdc"), Some("\"Be nice\"".into()), "");
        let empty = RuleDocument::new(PathBuf::from("a.mdc"), Some(String::new()), "");
        assert_eq!(quoted.quoted_description(), Some("Be nice"));
        assert_eq!(empty.quoted_description(), None);
    }

    #[test]
    fn test_collect_rules_groups_by_owner_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, ".cursor/rules/general.mdc", "---\ndescription: General\n---\nBe kind.\n");
        write(root, "api/.cursor/rules/b.mdc", "B body");
        write(root, "api/.cursor/rules/a.mdc", "\n\nA body\n\n");
        write(root, "web/.cursor/rules/ui.mdc", "UI body");

        let groups = collect_rules(root, &MigrateConfig::default()).unwrap();

        assert_eq!(groups.len(), 3);
        assert_eq!(groups.rule_count(), 4);

        let api = groups.get(&root.join("api")).unwrap();
        assert_eq!(api.len(), 2);
        assert_eq!(api[0].source, PathBuf::from("api/.cursor/rules/a.mdc"));
        assert_eq!(api[0].body, "A body");
        assert_eq!(api[1].source, PathBuf::from("api/.cursor/rules/b.mdc"));

        let root_rules = groups.get(root).unwrap();
        assert_eq!(root_rules[0].description.as_deref(), Some("General"));
        assert_eq!(root_rules[0].body, "Be kind.");
    }

    #[test]
    fn test_collect_rules_rejects_stray_rule_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "notes/stray.mdc", "oops");

        let err = collect_rules(root, &MigrateConfig::default()).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<MigrateError>(),
            Some(MigrateError::MissingRuleSegment { .. })
        ));
    }

    #[test]
    fn test_collect_rules_on_empty_tree() {
        let temp_dir = TempDir::new().unwrap();
        let groups = collect_rules(temp_dir.path(), &MigrateConfig::default()).unwrap();
        assert!(groups.is_empty());
    }
}
