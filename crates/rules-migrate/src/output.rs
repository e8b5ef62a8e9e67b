//! Terminal output and process exit codes.

use crate::migrate::MigrationReport;
use crate::rewrite::paths;
use std::fmt::Display;
use std::io::{self, Write};

/// Standard exit codes for the CLI
///
/// # Example
///
/// ```
/// use rules_migrate::output::ExitCode;
///
/// assert_eq!(ExitCode::InvalidLayout.code(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Migration succeeded (0)
    Success = 0,

    /// Generic error (1)
    GenericError = 1,

    /// Root directory or rule file not found (3)
    NotFound = 3,

    /// Source tree does not follow the rule layout (4)
    InvalidLayout = 4,

    /// File system failure while reading or writing (10)
    ExternalError = 10,
}

impl ExitCode {
    /// Convert exit code to i32 for `std::process::exit`
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Print a line to stdout, exiting quietly if the pipe is closed.
pub fn print_line(msg: impl Display) -> io::Result<()> {
    match writeln!(io::stdout(), "{}", msg) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            // Silently exit on broken pipe (expected when piping to head, etc.)
            std::process::exit(0);
        }
        Err(e) => Err(e),
    }
}

/// Human-readable lines describing a finished run.
pub fn report_lines(report: &MigrationReport) -> Vec<String> {
    let display = |path: &std::path::Path| {
        path.strip_prefix(&report.root)
            .map(paths::to_slash)
            .unwrap_or_else(|_| path.display().to_string())
    };

    let mut lines = Vec::new();
    for path in &report.aggregates {
        lines.push(format!("Updated {}", display(path.as_path())));
    }
    for path in &report.companions {
        lines.push(format!("Generated {}", display(path.as_path())));
    }
    lines.push(format!(
        "Migrated {} rule(s) into {} file(s)",
        report.rules,
        report.written()
    ));
    lines
}

/// Print the summary of a finished run to stdout.
pub fn print_report(report: &MigrationReport) -> io::Result<()> {
    for line in report_lines(report) {
        print_line(line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::GenericError.code(), 1);
        assert_eq!(ExitCode::NotFound.code(), 3);
        assert_eq!(ExitCode::ExternalError.code(), 10);
    }

    #[test]
    fn test_report_lines_use_root_relative_paths() {
        let report = MigrationReport {
            root: PathBuf::from("/repo"),
            rules: 3,
            aggregates: vec![PathBuf::from("/repo/api/AGENTS.md")],
            companions: vec![PathBuf::from("/repo/docs/rules/general.md")],
        };

        assert_eq!(
            report_lines(&report),
            vec![
                "Updated api/AGENTS.md",
                "Generated docs/rules/general.md",
                "Migrated 3 rule(s) into 2 file(s)",
            ]
        );
    }

    #[test]
    fn test_report_lines_for_empty_run() {
        let report = MigrationReport {
            root: PathBuf::from("/repo"),
            ..Default::default()
        };
        assert_eq!(report_lines(&report), vec!["Migrated 0 rule(s) into 0 file(s)"]);
    }
}
