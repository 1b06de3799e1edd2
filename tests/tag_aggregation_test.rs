//! Tag aggregation: union over chains, deduplication, first-seen ordering.

use causetrace::{has_tag, Error, Tag};
use proptest::prelude::*;

const DB_ERROR: Tag = Tag::from_static("db_error");

#[test]
fn aggregates_in_root_to_cause_order() {
    let root = Error::with_cause("svc", Error::new("db").tag(DB_ERROR).tag("timeout"))
        .tag("service_error");
    assert_eq!(
        root.tags(),
        [
            Tag::from_static("service_error"),
            DB_ERROR,
            Tag::from_static("timeout"),
        ]
    );
}

#[test]
fn duplicates_collapse_to_first_occurrence() {
    let root = Error::with_cause("svc", Error::new("db").tag("shared").tag("db_only"))
        .tag("shared")
        .tag("shared");
    let collected = root.tags();
    let shared_count = collected.iter().filter(|tag| **tag == "shared").count();
    assert_eq!(shared_count, 1);
    assert_eq!(collected.first().map(Tag::as_str), Some("shared"));
}

#[test]
fn membership_at_any_depth() {
    let root = Error::with_cause("a", Error::with_cause("b", Error::new("c").tag("deep")));
    assert!(has_tag(&root, "deep"));
    assert!(root.has_tag("deep"));
    assert!(!root.has_tag("never_attached"));
}

#[test]
fn tagging_never_mutates_an_ancestor() {
    let parent = Error::new("parent");
    let child = Error::with_cause("child", parent.clone()).tag("child_only");
    assert!(child.has_tag("child_only"));
    assert!(parent.own_tags().is_empty());
    assert!(!has_tag(&parent, "child_only"));
}

#[test]
fn is_dispatches_on_tag_targets() {
    let err = Error::new("tagged").tag(DB_ERROR);
    assert!(causetrace::is(&err, &DB_ERROR));
    assert!(!causetrace::is(&err, &Tag::from_static("other")));
}

proptest! {
    #[test]
    fn tag_union_over_chain_depth(depth in 1usize..8, tags_per_level in 0usize..4) {
        let mut node = Error::new("level 0")
            .add_tags((0..tags_per_level).map(|t| format!("tag_0_{t}")));
        for level in 1..depth {
            node = Error::with_cause(format!("level {level}"), node)
                .add_tags((0..tags_per_level).map(|t| format!("tag_{level}_{t}")));
        }

        let mut expected = Vec::new();
        for level in (0..depth).rev() {
            for t in 0..tags_per_level {
                expected.push(format!("tag_{level}_{t}"));
            }
        }
        let collected: Vec<String> = node
            .tags()
            .iter()
            .map(|tag| tag.as_str().to_string())
            .collect();
        prop_assert_eq!(collected, expected);
    }
}
