//! Display-text cleanup for migrated links and rule headings.

use super::RULE_EXTENSION;

/// Turn a rule file name or link label into readable text.
///
/// Strips a trailing `.mdc`, replaces `_` and `-` with spaces, trims, and
/// title-cases each word.
///
/// # Examples
///
/// ```
/// use rules_migrate::rewrite::link_text::display_text;
///
/// assert_eq!(display_text("My-Rule.mdc"), "My Rule");
/// assert_eq!(display_text("api_error-handling"), "Api Error Handling");
/// ```
pub fn display_text(text: &str) -> String {
    let text = text.strip_suffix(RULE_EXTENSION).unwrap_or(text);
    let spaced = text.replace(['_', '-'], " ");
    title_case(spaced.trim())
}

/// Title-case text the way Python's `str.title` does.
///
/// A letter that follows a cased letter is lowercased; any other letter
/// starts a word and is uppercased. `api_GUIDE` therefore reads `Api Guide`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_cased = false;
    for ch in text.chars() {
        if prev_cased {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        prev_cased = ch.is_lowercase() || ch.is_uppercase();
    }
    out
}
