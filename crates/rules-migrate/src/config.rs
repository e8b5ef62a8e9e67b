//! Configuration file loading and parsing.
//!
//! A repository may carry a `rules-migrate.toml` at its root to override where
//! generated documents land and which directories discovery skips.
//! If no config file exists, the system falls back to sensible defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name of the optional configuration file at the repository root.
pub const CONFIG_FILE_NAME: &str = "rules-migrate.toml";

/// Default folder (relative to the root) that receives companion documents.
pub const DEFAULT_DOCS_DIR: &str = "docs/rules";

/// Default file name of the per-directory aggregate document.
pub const DEFAULT_AGGREGATE_FILE: &str = "AGENTS.md";

/// Directory names skipped during discovery unless configured otherwise.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[".git", "venv", "node_modules", "target"];

/// Root configuration structure loaded from `rules-migrate.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MigrateConfig {
    /// Output placement (optional).
    pub output: Option<OutputConfig>,
    /// Discovery behaviour (optional).
    pub discovery: Option<DiscoveryConfig>,
}

/// Where generated documents are written.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Companion document folder, relative to the root (default: "docs/rules").
    pub docs_dir: Option<String>,
    /// Aggregate document file name (default: "AGENTS.md").
    pub aggregate_file: Option<String>,
}

/// Which parts of the tree are scanned for rule files.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscoveryConfig {
    /// Directory names to skip anywhere in the tree.
    pub exclude: Option<Vec<String>>,
}

impl MigrateConfig {
    /// Load configuration from `<root>/rules-migrate.toml`.
    ///
    /// Returns the default configuration when the file does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", CONFIG_FILE_NAME))?;

        let config: MigrateConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", CONFIG_FILE_NAME))?;

        Ok(config)
    }

    /// Resolve the destination layout, applying defaults.
    pub fn layout(&self) -> Layout {
        let output = self.output.clone().unwrap_or_default();
        Layout {
            docs_dir: PathBuf::from(
                output
                    .docs_dir
                    .unwrap_or_else(|| DEFAULT_DOCS_DIR.to_string()),
            ),
            aggregate_file: output
                .aggregate_file
                .unwrap_or_else(|| DEFAULT_AGGREGATE_FILE.to_string()),
        }
    }

    /// Directory names skipped during discovery.
    pub fn excluded_dirs(&self) -> Vec<String> {
        self.discovery
            .as_ref()
            .and_then(|d| d.exclude.clone())
            .unwrap_or_else(|| {
                DEFAULT_EXCLUDED_DIRS
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
    }
}

/// Destination conventions for migrated content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Companion document folder, relative to the repository root.
    pub docs_dir: PathBuf,
    /// File name of the aggregate document placed in each target directory.
    pub aggregate_file: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from(DEFAULT_DOCS_DIR),
            aggregate_file: DEFAULT_AGGREGATE_FILE.to_string(),
        }
    }
}

impl Layout {
    /// Repository-relative path of the companion document for a rule stem.
    pub fn companion_path(&self, stem: &str) -> PathBuf {
        self.docs_dir.join(format!("{}.md", stem))
    }

    /// Path of the aggregate document inside `dir`.
    pub fn aggregate_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.aggregate_file)
    }
}
