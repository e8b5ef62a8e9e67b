//! Document assembly for migrated rules.
//!
//! Two kinds of output are produced:
//! - aggregate documents (`<dir>/AGENTS.md`) holding every rule scoped to a
//!   directory, below any hand-written preface
//! - companion documents (`docs/rules/<stem>.md`), one per root-level rule

mod aggregate;
mod companion;

pub use aggregate::{build_aggregate, existing_preface, write_aggregate};
pub use companion::{render_companion, write_companions};

use crate::rewrite::PathRewriter;
use crate::rules::RuleDocument;

/// Heading prefix that starts every generated rule section.
///
/// Everything above the first occurrence in an aggregate document is preface.
pub const RULE_MARKER: &str = "## Rule:";

/// Render one rule as an aggregate-document section.
pub fn render_rule(rule: &RuleDocument, rewriter: &PathRewriter) -> String {
    let mut lines: Vec<String> = vec![
        format!("{} {}", RULE_MARKER, rule.display_name()),
        String::new(),
    ];
    if let Some(description) = rule.quoted_description() {
        lines.push(format!("> {}", description));
        lines.push(String::new());
    }
    lines.push(rewriter.rewrite_body(&rule.body));
    lines.join("\n").trim_end().to_string()
}

/// Render every rule of a group, separated by blank lines.
pub fn render_rules(rules: &[RuleDocument], rewriter: &PathRewriter) -> String {
    rules
        .iter()
        .map(|rule| render_rule(rule, rewriter))
        .collect::<Vec<_>>()
        .join("\n\n")
        .trim()
        .to_string()
}
