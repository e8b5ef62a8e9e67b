//! Error types and actionable error formatting.
//!
//! Structural failures (a rule file outside the expected `.cursor` layout, a
//! missing root directory) are typed as [`MigrateError`]. When the binary
//! reports one, it is rendered as an [`ActionableError`] with:
//! - Clear error description
//! - Possible causes (diagnostics)
//! - Remediation steps (actionable fixes)

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that abort a migration run
#[derive(Debug, Error, PartialEq)]
pub enum MigrateError {
    /// A rule file was found whose path has no `.cursor` component
    #[error("Expected '.cursor' in rule path: {}", path.display())]
    MissingRuleSegment { path: PathBuf },
    /// A rule file path does not live under the repository root
    #[error("Rule path {} is not inside root {}", path.display(), root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },
    /// The root directory passed on the command line does not exist
    #[error("Root directory not found: {}", path.display())]
    RootNotFound { path: PathBuf },
}

impl MigrateError {
    /// Expand into an error message with causes and remedies.
    pub fn actionable(&self) -> ActionableError {
        match self {
            MigrateError::MissingRuleSegment { path } => missing_rule_segment(path),
            MigrateError::OutsideRoot { path, root } => outside_root(path, root),
            MigrateError::RootNotFound { path } => root_not_found(path),
        }
    }
}

/// An error with diagnostic context and remediation steps.
///
/// # Example
///
/// ```
/// use rules_migrate::errors::ActionableError;
///
/// let error = ActionableError::new("Expected '.cursor' in rule path: notes/a.mdc")
///     .with_cause("The file uses the .mdc extension but is not a Cursor rule")
///     .with_remedy("Move the file under a .cursor/rules/ directory");
///
/// assert!(error.to_error_message().contains("To fix:"));
/// ```
#[derive(Debug, Clone)]
pub struct ActionableError {
    error: String,
    causes: Vec<String>,
    remediation: Vec<String>,
}

impl ActionableError {
    /// Create a new actionable error with the given message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            causes: Vec::new(),
            remediation: Vec::new(),
        }
    }

    /// Add a possible cause (diagnostic hint).
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }

    /// Add a remediation step (actionable fix).
    pub fn with_remedy(mut self, remedy: impl Into<String>) -> Self {
        self.remediation.push(remedy.into());
        self
    }

    /// Convert to a formatted error message suitable for display.
    pub fn to_error_message(&self) -> String {
        let mut msg = format!("Error: {}\n", self.error);

        if !self.causes.is_empty() {
            msg.push_str("\nPossible causes:\n");
            for cause in &self.causes {
                msg.push_str(&format!("  • {}\n", cause));
            }
        }

        if !self.remediation.is_empty() {
            msg.push_str("\nTo fix:\n");
            for remedy in &self.remediation {
                msg.push_str(&format!("  • {}\n", remedy));
            }
        }

        msg
    }
}

impl fmt::Display for ActionableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_error_message())
    }
}

impl std::error::Error for ActionableError {}

/// Helper for rule files that sit outside a `.cursor` directory.
pub fn missing_rule_segment(path: &Path) -> ActionableError {
    ActionableError::new(format!("Expected '.cursor' in rule path: {}", path.display()))
        .with_cause("A file with the .mdc extension exists outside any .cursor/rules/ folder")
        .with_cause("The source tree does not follow the Cursor rule layout")
        .with_remedy("Move the file under <dir>/.cursor/rules/")
        .with_remedy(
            "Add its parent directory to [discovery].exclude in rules-migrate.toml",
        )
}

/// Helper for rule paths that do not resolve under the root.
pub fn outside_root(path: &Path, root: &Path) -> ActionableError {
    ActionableError::new(format!(
        "Rule path {} is not inside root {}",
        path.display(),
        root.display()
    ))
    .with_cause("A symlink inside the tree points outside of it")
    .with_remedy("Run the migration from the directory that contains the rules")
}

/// Helper for a root directory that does not exist.
pub fn root_not_found(path: &Path) -> ActionableError {
    ActionableError::new(format!("Root directory not found: {}", path.display()))
        .with_cause("The path was mistyped")
        .with_remedy("Pass an existing directory, or omit it to use the current directory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actionable_error_formatting() {
        let error = ActionableError::new("Test error")
            .with_cause("First cause")
            .with_remedy("First remedy");

        let msg = error.to_error_message();

        assert!(msg.contains("Error: Test error"));
        assert!(msg.contains("Possible causes:"));
        assert!(msg.contains("• First cause"));
        assert!(msg.contains("To fix:"));
        assert!(msg.contains("• First remedy"));
    }

    #[test]
    fn test_error_without_causes() {
        let error = ActionableError::new("Simple error").with_remedy("Just fix it");

        let msg = error.to_error_message();

        assert!(!msg.contains("Possible causes:"));
        assert!(msg.contains("• Just fix it"));
    }

    #[test]
    fn test_missing_rule_segment_display_and_actionable() {
        let err = MigrateError::MissingRuleSegment {
            path: PathBuf::from("/repo/notes/a.mdc"),
        };

        assert_eq!(
            err.to_string(),
            "Expected '.cursor' in rule path: /repo/notes/a.mdc"
        );
        let msg = err.actionable().to_error_message();
        assert!(msg.contains(".cursor/rules/"));
        assert!(msg.contains("[discovery].exclude"));
    }

    #[test]
    fn test_root_not_found_helper() {
        let msg = root_not_found(Path::new("/nope")).to_error_message();

        assert!(msg.contains("Root directory not found: /nope"));
        assert!(msg.contains("current directory"));
    }
}
