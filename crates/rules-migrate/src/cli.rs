//! Command-line interface definitions using clap.

use clap::Parser;
use std::path::PathBuf;

/// Convert Cursor .mdc rules into nested AGENTS.md files.
///
/// Directory-scoped rules (`<dir>/.cursor/rules/*.mdc`) are merged into
/// `<dir>/AGENTS.md`, keeping any hand-written text above the generated
/// sections. Root-level rules become companion documents under `docs/rules/`.
///
/// Set RUST_LOG (e.g. RUST_LOG=debug) for detailed progress on stderr.
///
/// Exit Codes:
///   0  - Migration succeeded
///   1  - Generic error occurred
///   3  - Root directory not found
///   4  - A rule file is outside any .cursor directory
///  10  - File system failure
#[derive(Parser, Debug)]
#[command(name = "rules-migrate", version)]
pub struct Cli {
    /// Repository root (defaults to the current working directory)
    pub root: Option<PathBuf>,
}
