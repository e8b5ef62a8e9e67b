//! Cursor Rule Migration
//!
//! Synchronises Cursor `.mdc` rule files with nested `AGENTS.md` documents.
//!
//! - Directory-scoped rules are merged into the nearest `AGENTS.md`
//! - Root-level rules are emitted as companion markdown under `docs/rules/`
//! - References to `.cursor`/`.mdc` are rewritten to the new locations

use anyhow::Result;
use clap::Parser;
use rules_migrate::cli::Cli;
use rules_migrate::output::{self, ExitCode};
use rules_migrate::{MigrateConfig, MigrateError, Migrator};
use std::env;
use tracing_subscriber::EnvFilter;

/// Helper to determine exit code from an error chain
fn error_to_exit_code(error: &anyhow::Error) -> ExitCode {
    if let Some(migrate_error) = error.downcast_ref::<MigrateError>() {
        return match migrate_error {
            MigrateError::RootNotFound { .. } => ExitCode::NotFound,
            MigrateError::MissingRuleSegment { .. } | MigrateError::OutsideRoot { .. } => {
                ExitCode::InvalidLayout
            }
        };
    }

    if let Some(io_error) = error.chain().find_map(|e| e.downcast_ref::<std::io::Error>()) {
        return match io_error.kind() {
            std::io::ErrorKind::NotFound => ExitCode::NotFound,
            _ => ExitCode::ExternalError,
        };
    }

    ExitCode::GenericError
}

fn report_error(error: &anyhow::Error) {
    match error.downcast_ref::<MigrateError>() {
        Some(migrate_error) => eprint!("{}", migrate_error.actionable()),
        None => eprintln!("Error: {:#}", error),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let exit_code = match run() {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            report_error(&e);
            error_to_exit_code(&e)
        }
    };

    if exit_code != ExitCode::Success {
        std::process::exit(exit_code.code());
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let root = match cli.root {
        Some(root) => root,
        None => env::current_dir()?,
    };

    let config = MigrateConfig::load(&root)?;
    let report = Migrator::new(&root, config).run()?;
    output::print_report(&report)?;

    Ok(())
}
