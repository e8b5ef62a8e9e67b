//! Front-matter splitting for `.mdc` rule files.
//!
//! Cursor rules open with a `---` fenced key-value block. Only the
//! `description` key is carried over; everything else in the header
//! (globs, alwaysApply, ...) is specific to Cursor and dropped.

/// Split a rule file into its optional description and markdown body.
///
/// A missing or unterminated header yields no description and the whole text
/// as body. Leading newlines are removed from the body in both cases.
///
/// # Examples
///
/// ```
/// use rules_migrate::rules::parse_front_matter;
///
/// let (description, body) = parse_front_matter("---\ndescription: Use tabs\nglobs: *.go\n---\n\n# Tabs\n");
/// assert_eq!(description.as_deref(), Some("Use tabs"));
/// assert_eq!(body, "# Tabs\n");
/// ```
pub fn parse_front_matter(text: &str) -> (Option<String>, String) {
    if text.starts_with("---") {
        if let Some(offset) = text.get(3..).and_then(|rest| rest.find("\n---")) {
            let closing = offset + 3;
            let header = text.get(4..closing).unwrap_or("");
            let remainder = &text[closing + 4..];
            return (
                find_description(header),
                remainder.trim_start_matches('\n').to_string(),
            );
        }
    }
    (None, text.trim_start_matches('\n').to_string())
}

/// First `description:` value in a header block, trimmed.
fn find_description(header: &str) -> Option<String> {
    header.lines().find_map(|line| {
        let stripped = line.trim();
        let key = stripped.get(..12)?;
        if key.eq_ignore_ascii_case("description:") {
            Some(stripped[12..].trim().to_string())
        } else {
            None
        }
    })
}
