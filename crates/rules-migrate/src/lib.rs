//! Cursor Rule Migration Library
//!
//! Converts Cursor `.mdc` rule files into the `AGENTS.md` convention:
//! directory-scoped rules are merged into the nearest `AGENTS.md`, root-level
//! rules become companion documents under `docs/rules/`, and every embedded
//! cross-reference is rewritten to point at the new locations.

pub mod assembly;
pub mod cli;
pub mod config;
pub mod errors;
pub mod migrate;
pub mod output;
pub mod rewrite;
pub mod rules;

// Re-export commonly used types
pub use config::{Layout, MigrateConfig};
pub use errors::MigrateError;
pub use migrate::{MigrationReport, Migrator};
pub use rewrite::PathRewriter;
pub use rules::{OutputGroups, RuleDocument};
