//! Ordered text stages applied by [`PathRewriter::rewrite_body`].
//!
//! Order matters. Each stage only matches text that earlier stages leave
//! behind: links become `.md`/output-relative targets before the bare
//! `.mdc` and `.cursor` passes run, and those passes use character classes
//! that cannot reach into rewritten output.

use super::{link_text, PathRewriter, INLINE_MARKER};
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// A pure body-to-body transform.
pub type Stage = fn(&PathRewriter, &str) -> String;

/// The stages in application order, with names for tracing.
pub const PIPELINE: [(&str, Stage); 6] = [
    ("marker-links", rewrite_marker_links),
    ("markdown-links", rewrite_markdown_links),
    ("strip-marker", strip_marker),
    ("rule-files", rewrite_rule_files),
    ("storage-paths", rewrite_storage_paths),
    ("storage-dirs", rewrite_storage_dirs),
];

static MARKER_LINK: OnceLock<Regex> = OnceLock::new();
static MARKDOWN_LINK: OnceLock<Regex> = OnceLock::new();
static RULE_FILE: OnceLock<Regex> = OnceLock::new();
static STORAGE_PATH: OnceLock<Regex> = OnceLock::new();
static STORAGE_DIR: OnceLock<Regex> = OnceLock::new();

/// `(mdc:<target>)`
fn marker_link_regex() -> &'static Regex {
    MARKER_LINK.get_or_init(|| {
        Regex::new(r"\(mdc:([^)]+)\)").expect("marker link regex should compile")
    })
}

/// `[text](target)`
fn markdown_link_regex() -> &'static Regex {
    MARKDOWN_LINK.get_or_init(|| {
        Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("markdown link regex should compile")
    })
}

/// Bare `name.mdc` or `dir/name.mdc`
fn rule_file_regex() -> &'static Regex {
    RULE_FILE.get_or_init(|| {
        Regex::new(r"([A-Za-z0-9_/.\-]+\.mdc)").expect("rule file regex should compile")
    })
}

/// Paths running through `.cursor` and ending in `.mdc`
fn storage_path_regex() -> &'static Regex {
    STORAGE_PATH.get_or_init(|| {
        Regex::new(r"([A-Za-z0-9_/.\-]*\.cursor[^\s`]*\.mdc)")
            .expect("storage path regex should compile")
    })
}

/// `<prefix>.cursor/` or `<prefix>.cursor/rules/` without a file name
fn storage_dir_regex() -> &'static Regex {
    STORAGE_DIR.get_or_init(|| {
        Regex::new(r"([A-Za-z0-9_/.\-]*)\.cursor(?:/rules)?/")
            .expect("storage dir regex should compile")
    })
}

/// Stage 1: rewrite the target of `(mdc:...)` links.
pub fn rewrite_marker_links(rewriter: &PathRewriter, body: &str) -> String {
    marker_link_regex()
        .replace_all(body, |caps: &Captures| {
            match rewriter.map_reference(caps[1].trim()) {
                Some(mapped) => format!("({})", mapped),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Stage 2: clean the label and rewrite the target of every `[text](target)` link.
pub fn rewrite_markdown_links(rewriter: &PathRewriter, body: &str) -> String {
    markdown_link_regex()
        .replace_all(body, |caps: &Captures| {
            let text = link_text::display_text(&caps[1]);
            match rewriter.map_reference(caps[2].trim()) {
                Some(mapped) => format!("[{}]({})", text, mapped),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Stage 3: drop any `mdc:` marker that was not part of a link.
pub fn strip_marker(_rewriter: &PathRewriter, body: &str) -> String {
    body.replace(INLINE_MARKER, "")
}

/// Stage 4: rewrite bare `*.mdc` file names.
pub fn rewrite_rule_files(rewriter: &PathRewriter, body: &str) -> String {
    replace_with_mapping(rule_file_regex(), rewriter, body)
}

/// Stage 5: rewrite remaining `.cursor/...mdc` paths.
pub fn rewrite_storage_paths(rewriter: &PathRewriter, body: &str) -> String {
    replace_with_mapping(storage_path_regex(), rewriter, body)
}

/// Stage 6: rewrite `.cursor/` directory mentions.
///
/// A mention with a prefix (`pkg/.cursor/rules/`) points at that directory's
/// aggregate document; a bare mention points at the companion document folder.
pub fn rewrite_storage_dirs(rewriter: &PathRewriter, body: &str) -> String {
    storage_dir_regex()
        .replace_all(body, |caps: &Captures| {
            if continues_url(body, &caps) {
                return caps[0].to_string();
            }
            let prefix = caps[1].trim_end_matches('/');
            let layout = rewriter.layout();
            let destination = if prefix.is_empty() {
                layout.docs_dir.clone()
            } else {
                layout.aggregate_path(std::path::Path::new(prefix))
            };
            rewriter
                .relative_to_output(&destination)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn replace_with_mapping(regex: &Regex, rewriter: &PathRewriter, body: &str) -> String {
    regex
        .replace_all(body, |caps: &Captures| {
            if continues_url(body, &caps) {
                return caps[0].to_string();
            }
            rewriter
                .map_reference(&caps[1])
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Whether a match is part of a URL token such as `https://host/a.mdc`.
///
/// The bare-path character classes stop at the scheme's `:`, so the token is
/// rebuilt from the preceding delimiter through the end of the match. Only
/// `scheme://` and `mailto:` tokens count; `Note:a.mdc` is ordinary prose.
fn continues_url(body: &str, caps: &Captures) -> bool {
    let Some(m) = caps.get(0) else {
        return false;
    };
    let prefix = &body[..m.start()];
    let token_start = prefix
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace() || matches!(c, '(' | '[' | '<' | '`' | '"' | '\''))
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let token = &body[token_start..m.end()];
    token.contains("://") || token.starts_with("mailto:")
}
