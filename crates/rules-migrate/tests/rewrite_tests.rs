use rules_migrate::assembly::{render_rules, write_aggregate};
use rules_migrate::{Layout, PathRewriter, RuleDocument};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn rewriter(target: &str) -> PathRewriter {
    PathRewriter::new(Path::new("/repo"), Path::new(target), Layout::default())
}

#[test]
fn test_marker_link_resolves_to_companion_doc() {
    let r = rewriter("/repo/services/billing");

    let out = r.rewrite_body("Follow (mdc:foo/bar.mdc).");

    assert_eq!(out, "Follow (../../docs/rules/bar.md).");
    assert!(out.contains("docs/rules/bar.md)"));
}

#[test]
fn test_nested_storage_reference_points_at_owner_aggregate() {
    let r = rewriter("/repo/tools");

    assert_eq!(
        r.rewrite_body("See pkg/.cursor/rules/x.mdc for details."),
        "See ../pkg/AGENTS.md for details."
    );
}

#[test]
fn test_marker_link_text_is_cleaned() {
    let r = rewriter("/repo/pkg");

    assert_eq!(
        r.rewrite_body("[My Rule](mdc:sub_dir/My-Rule.mdc)"),
        "[My Rule](../docs/rules/My-Rule.md)"
    );
    assert_eq!(
        r.rewrite_body("[my-rule.mdc](mdc:sub_dir/My-Rule.mdc)"),
        "[My Rule](../docs/rules/My-Rule.md)"
    );
}

#[test]
fn test_absolute_urls_are_untouched() {
    let r = rewriter("/repo/pkg");
    let url = "https://cursor.com/docs/context/rules#project-rules";

    assert_eq!(r.map_reference(url).as_deref(), Some(url));
    assert_eq!(
        r.rewrite_body(&format!("[Cursor]({})", url)),
        format!("[Cursor]({})", url)
    );
}

#[test]
fn test_unresolvable_reference_is_left_alone() {
    let r = PathRewriter::new(
        Path::new("relative/repo"),
        Path::new("/abs/out"),
        Layout::default(),
    );
    let body = "Read [guide](docs/guide.md), (mdc:a.mdc), b.mdc and .cursor/rules/.";

    assert_eq!(r.map_reference("docs/guide.md"), None);
    assert_eq!(r.rewrite_body(body), body.replace("mdc:", ""));
}

#[test]
fn test_plain_references_rewrite_idempotently() {
    let r = rewriter("/repo/pkg");
    let body = "Edit [main](src/main.rs), [lib](pkg/lib.rs) or [readme](#readme).";

    let once = r.rewrite_body(body);
    let twice = r.rewrite_body(&once);

    assert_eq!(
        once,
        "Edit [Main](../src/main.rs), [Lib](./lib.rs) or [Readme](#readme)."
    );
    assert_eq!(once, twice);
}

#[test]
fn test_later_stages_do_not_rematch_rewritten_links() {
    let r = rewriter("/repo/docs/rules");

    let out = r.rewrite_body("[a](mdc:.cursor/rules/a.mdc) then .cursor/rules/b.mdc then .cursor/");

    assert_eq!(out, "[A](./a.md) then ./b.md then .");
}

#[test]
fn test_rendered_sections_match_written_aggregate() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let pkg = root.join("pkg");
    fs::create_dir_all(&pkg).unwrap();
    let rules = vec![RuleDocument::new(
        PathBuf::from("pkg/.cursor/rules/db.mdc"),
        None,
        "Use [migrations](pkg/migrations).",
    )];
    let layout = Layout::default();

    let written = write_aggregate(root, &pkg, &rules, &layout).unwrap().unwrap();
    let sections = render_rules(&rules, &PathRewriter::new(root, &pkg, layout));

    assert_eq!(
        fs::read_to_string(written).unwrap(),
        format!("# Agent Guidance for pkg\n\n{}\n", sections)
    );
    assert_eq!(sections, "## Rule: Db\n\nUse [Migrations](./migrations).");
}
