#[path = "common/mod.rs"]
mod common;

use common::*;
use rscrape::{flatten, flatten_into, ApiError, Comment, Kind};
use serde_json::{json, Value};

fn ids(comments: &[Comment]) -> Vec<&str> {
    comments.iter().map(|c| c.id.as_str()).collect()
}

/// `replies: ""` is how the API marks a leaf; it is not a decode error.
#[test]
fn empty_string_replies_is_a_leaf() {
    let f = flatten(raw_comment(&leaf("aaaaa"))).unwrap();
    assert!(f.replies.is_empty());
    assert!(f.comment.resolved_replies.is_empty());
    assert!(f.comment.deferred_replies.is_empty());
    assert_eq!(f.comment.depth, 0);
}

#[test]
fn absent_or_null_replies_is_a_leaf() {
    let f = flatten(raw_comment(&comment("aaaaa", Value::Null))).unwrap();
    assert!(f.replies.is_empty());
    assert!(f.comment.deferred_replies.is_empty());

    let mut v = leaf("bbbbb");
    v["data"].as_object_mut().unwrap().remove("replies");
    let f = flatten(raw_comment(&v)).unwrap();
    assert!(f.replies.is_empty());
}

/// Listing [A, more{tok1,tok2}, B]: output is A, A's subtree, B, B's subtree; the
/// parent keeps tok1, tok2 and the parent is not part of its own output.
#[test]
fn siblings_and_more_tokens_keep_order_and_scope() {
    let parent = with_replies(
        "ppppp",
        Value::Null,
        vec![
            with_replies("aaaaa", Value::Null, vec![leaf("aaaa1"), leaf("aaaa2")]),
            more(&["t1_tok01", "t1_tok02"]),
            with_replies("bbbbb", Value::Null, vec![leaf("bbbb1")]),
        ],
    );

    let f = flatten(raw_comment(&parent)).unwrap();

    assert_eq!(ids(&f.replies), vec!["aaaaa", "aaaa1", "aaaa2", "bbbbb", "bbbb1"]);
    assert_eq!(f.comment.id, "ppppp");
    assert_eq!(f.comment.resolved_replies, vec!["aaaaa", "bbbbb"]);
    assert_eq!(f.comment.deferred_replies, vec!["t1_tok01", "t1_tok02"]);

    let depths: Vec<usize> = f.replies.iter().map(|c| c.depth).collect();
    assert_eq!(depths, vec![1, 2, 2, 1, 2]);
    assert_eq!(f.replies[0].resolved_replies, vec!["aaaa1", "aaaa2"]);
    assert!(f.replies.iter().all(|c| c.deferred_replies.is_empty()));
}

/// A valid continuation on the replies listing itself is kept on the node too;
/// it is recorded before the tokens of the `more` children.
#[test]
fn listing_continuation_joins_node_tokens() {
    let parent = with_replies(
        "ppppp",
        json!("t1_after1"),
        vec![leaf("aaaaa"), more(&["t1_tok01", "t1_tok02"]), leaf("bbbbb")],
    );
    let f = flatten(raw_comment(&parent)).unwrap();
    assert_eq!(ids(&f.replies), vec!["aaaaa", "bbbbb"]);
    assert_eq!(f.comment.deferred_replies, vec!["t1_after1", "t1_tok01", "t1_tok02"]);

    let garbage = with_replies("ppppp", json!("not-a-token"), vec![leaf("aaaaa")]);
    let f = flatten(raw_comment(&garbage)).unwrap();
    assert!(f.comment.deferred_replies.is_empty());
}

/// Tokens found under A's subtree stay on the node they were nested under and
/// never reach B or the root.
#[test]
fn deferred_tokens_are_never_merged_across_depths() {
    let root = with_replies(
        "rrrrr",
        Value::Null,
        vec![
            with_replies(
                "aaaaa",
                Value::Null,
                vec![with_replies("aaaa1", Value::Null, vec![more(&["t1_deep1"])]), more(&["t1_mida1"])],
            ),
            with_replies("bbbbb", json!("t1_bnext"), vec![leaf("bbbb1")]),
            more(&["t1_root1"]),
        ],
    );

    let f = flatten(raw_comment(&root)).unwrap();
    assert_eq!(ids(&f.replies), vec!["aaaaa", "aaaa1", "bbbbb", "bbbb1"]);

    let by_id = |id: &str| f.replies.iter().find(|c| c.id == id).unwrap();
    assert_eq!(f.comment.deferred_replies, vec!["t1_root1"]);
    assert_eq!(by_id("aaaaa").deferred_replies, vec!["t1_mida1"]);
    assert_eq!(by_id("aaaa1").deferred_replies, vec!["t1_deep1"]);
    assert_eq!(by_id("bbbbb").deferred_replies, vec!["t1_bnext"]);
    assert!(by_id("bbbb1").deferred_replies.is_empty());
}

/// A `more` token equal to the listing's own continuation is not de-duplicated.
#[test]
fn duplicate_continuation_and_more_token_are_both_kept() {
    let parent = with_replies("ppppp", json!("t1_same1"), vec![leaf("aaaaa"), more(&["t1_same1"])]);
    let f = flatten(raw_comment(&parent)).unwrap();
    assert_eq!(f.comment.deferred_replies, vec!["t1_same1", "t1_same1"]);
}

/// flatten_into emits the comment itself first, then its subtree.
#[test]
fn flatten_into_is_pre_order_including_root() {
    let root = with_replies(
        "rrrrr",
        Value::Null,
        vec![with_replies("aaaaa", Value::Null, vec![leaf("aaaa1")]), leaf("bbbbb")],
    );
    let mut out = Vec::new();
    flatten_into(raw_comment(&root), &mut out).unwrap();
    assert_eq!(ids(&out), vec!["rrrrr", "aaaaa", "aaaa1", "bbbbb"]);
    assert_eq!(out[0].resolved_replies, vec!["aaaaa", "bbbbb"]);
    assert_eq!(out[1].resolved_replies, vec!["aaaa1"]);
}

/// A post inside a reply listing means the API contract changed: fatal.
#[test]
fn unexpected_tree_node_is_fatal() {
    let parent = with_replies("ppppp", Value::Null, vec![leaf("aaaaa"), post("xxxxx")]);
    match flatten(raw_comment(&parent)) {
        Err(ApiError::UnexpectedTreeNode { tag, .. }) => assert_eq!(tag, "t3"),
        other => panic!("expected UnexpectedTreeNode, got {other:?}"),
    }
}

/// Errors deep in the tree propagate unchanged; no partial result comes back.
#[test]
fn nested_failures_propagate() {
    let deep = with_replies(
        "ppppp",
        Value::Null,
        vec![with_replies("aaaaa", Value::Null, vec![envelope("t2", json!({}))])],
    );
    assert!(matches!(flatten(raw_comment(&deep)), Err(ApiError::UnexpectedTreeNode { .. })));

    // replies that are neither blank nor an envelope
    let bad = comment("ppppp", json!({ "nope": true }));
    assert!(matches!(flatten(raw_comment(&bad)), Err(ApiError::MalformedEnvelope(_))));

    // replies that are an envelope, but not a listing
    let not_listing = comment("ppppp", leaf("aaaaa"));
    match flatten(raw_comment(&not_listing)) {
        Err(ApiError::TypeMismatch { expected, actual }) => {
            assert_eq!(expected, Kind::Listing);
            assert_eq!(actual, "t1");
        }
        other => panic!("expected TypeMismatch, got {other:?}"),
    }
}

/// A `t1` child whose payload does not decode as a comment (and is not `more`)
/// is an unexpected node; the decode failure is kept as its cause.
#[test]
fn undecodable_comment_child_is_unexpected_node() {
    let parent = with_replies(
        "ppppp",
        Value::Null,
        vec![envelope("t1", json!({ "id": 12345, "created_utc": 1.0 }))],
    );
    match flatten(raw_comment(&parent)) {
        Err(ApiError::UnexpectedTreeNode { tag, cause }) => {
            assert_eq!(tag, "t1");
            assert!(
                matches!(cause.as_deref(), Some(ApiError::MalformedPayload { kind: Kind::Comment, .. })),
                "cause should be the comment decode failure, got {cause:?}"
            );
        }
        other => panic!("expected UnexpectedTreeNode, got {other:?}"),
    }

    let bad_more = with_replies("ppppp", Value::Null, vec![envelope("more", json!({ "children": "abc" }))]);
    assert!(matches!(flatten(raw_comment(&bad_more)), Err(ApiError::UnexpectedTreeNode { .. })));
}

/// Timestamps outside the calendar range leave `created_on` empty instead of failing.
#[test]
fn extreme_created_utc_still_flattens() {
    let mut child = leaf("aaaaa");
    child["data"]["created_utc"] = json!(1e13);
    let parent = with_replies("ppppp", Value::Null, vec![child]);
    let f = flatten(raw_comment(&parent)).unwrap();
    assert!(f.comment.created_on.is_some());
    assert_eq!(ids(&f.replies), vec!["aaaaa"]);
    assert_eq!(f.replies[0].created_on, None);
}
