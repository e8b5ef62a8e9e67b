//! Property-based tests for reference rewriting
//!
//! These tests use `proptest` to check rewriting invariants across randomly
//! generated references and bodies.

use super::*;
use proptest::prelude::*;

// Generator for plain repository paths (no rule extension, no .cursor)
fn plain_path_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec("[a-z][a-z0-9_]{0,8}", 1..4),
        prop_oneof![Just(""), Just(".rs"), Just(".md"), Just(".toml")],
    )
        .prop_map(|(segments, ext)| format!("{}{}", segments.join("/"), ext))
}

// Generator for output directories inside the repository
fn target_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("/repo"),
        Just("/repo/pkg"),
        Just("/repo/pkg/sub"),
        Just("/repo/docs/rules"),
    ]
}

fn url_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("http"), Just("https")],
        "[a-z]{1,10}\\.(com|org)",
        prop::collection::vec("[a-z0-9]{1,6}", 0..3),
        prop_oneof![Just(""), Just(".mdc"), Just(".md")],
    )
        .prop_map(|(scheme, host, segments, ext)| {
            let mut url = format!("{}://{}", scheme, host);
            for segment in segments {
                url.push('/');
                url.push_str(&segment);
            }
            url.push_str(ext);
            url
        })
}

// Generator for bodies mixing prose and links to plain paths
fn body_strategy() -> impl Strategy<Value = String> {
    let item = prop_oneof![
        "[a-z]{1,8}".prop_map(|w| w.to_string()),
        ("[a-z][a-z_ -]{0,10}", plain_path_strategy())
            .prop_map(|(label, path)| format!("[{}]({})", label, path)),
    ];
    prop::collection::vec(item, 1..8).prop_map(|items| items.join(" "))
}

fn rewriter(target: &str) -> PathRewriter {
    PathRewriter::new(Path::new("/repo"), Path::new(target), Layout::default())
}

proptest! {
    #[test]
    fn prop_plain_reference_mapping_is_idempotent(
        reference in plain_path_strategy(),
        target in target_strategy()
    ) {
        let r = rewriter(target);

        let once = r.map_reference(&reference).unwrap();
        let twice = r.map_reference(&once).unwrap();

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_body_rewrite_is_idempotent(
        body in body_strategy(),
        target in target_strategy()
    ) {
        let r = rewriter(target);

        let once = r.rewrite_body(&body);
        let twice = r.rewrite_body(&once);

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_urls_pass_through(
        url in url_strategy(),
        target in target_strategy()
    ) {
        let r = rewriter(target);

        prop_assert_eq!(r.map_reference(&url), Some(url.clone()));

        let rewritten = r.rewrite_body(&format!("Read [the docs]({}) or {} directly.", url, url));
        prop_assert_eq!(
            rewritten,
            format!("Read [The Docs]({}) or {} directly.", url, url)
        );
    }

    #[test]
    fn prop_unresolvable_bodies_are_unchanged(body in body_strategy()) {
        let r = PathRewriter::new(Path::new("relative/root"), Path::new("/out"), Layout::default());

        prop_assert_eq!(r.rewrite_body(&body), body.trim());
    }
}
