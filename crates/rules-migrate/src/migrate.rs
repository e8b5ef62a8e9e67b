//! One migration run over a repository tree.

use crate::assembly;
use crate::config::MigrateConfig;
use crate::errors::MigrateError;
use crate::rules;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// What a run discovered and wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Absolute root the run operated on
    pub root: PathBuf,
    /// Number of rule files discovered
    pub rules: usize,
    /// Aggregate documents written, in target-directory order
    pub aggregates: Vec<PathBuf>,
    /// Companion documents written, in discovery order
    pub companions: Vec<PathBuf>,
}

impl MigrationReport {
    /// Total number of files written.
    pub fn written(&self) -> usize {
        self.aggregates.len() + self.companions.len()
    }
}

/// Runs the migration for one root directory.
///
/// # Example
///
/// ```no_run
/// use rules_migrate::{MigrateConfig, Migrator};
/// use std::path::Path;
///
/// let root = Path::new(".");
/// let config = MigrateConfig::load(root)?;
/// let report = Migrator::new(root, config).run()?;
/// println!("migrated {} rules", report.rules);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct Migrator {
    root: PathBuf,
    config: MigrateConfig,
}

impl Migrator {
    pub fn new(root: &Path, config: MigrateConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            config,
        }
    }

    /// Discover, group, rewrite and write every rule under the root.
    pub fn run(&self) -> Result<MigrationReport> {
        let root = match self.root.canonicalize() {
            Ok(root) => root,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(MigrateError::RootNotFound {
                    path: self.root.clone(),
                }
                .into());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to resolve root directory {}", self.root.display())
                });
            }
        };
        let layout = self.config.layout();

        let groups = rules::collect_rules(&root, &self.config)?;
        info!(root = %root.display(), rules = groups.rule_count(), groups = groups.len(), "collected rules");

        let mut report = MigrationReport {
            root: root.clone(),
            rules: groups.rule_count(),
            ..Default::default()
        };

        for (target_dir, group) in groups.iter() {
            if target_dir == root {
                report
                    .companions
                    .extend(assembly::write_companions(&root, group, &layout)?);
            } else if let Some(path) = assembly::write_aggregate(&root, target_dir, group, &layout)? {
                report.aggregates.push(path);
            }
        }

        Ok(report)
    }
}
