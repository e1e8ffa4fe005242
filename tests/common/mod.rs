#![allow(dead_code)]

use rscrape::{decode_envelope, extract_as, Envelope, RawComment, Transport};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Fixed creation time for fixtures: 2006-01-01T00:00:00Z plus a fractional part
/// that timestamp derivation must floor away.
pub const CREATED: f64 = 1136073600.75;

/// `{"kind": kind, "data": data}`
pub fn envelope(kind: &str, data: Value) -> Value {
    json!({ "kind": kind, "data": data })
}

/// A `Listing` envelope. Pass `Value::Null` for `after` to omit the token.
pub fn listing(after: Value, children: Vec<Value>) -> Value {
    envelope("Listing", json!({ "after": after, "before": null, "children": children }))
}

/// A `t1` comment envelope with the given raw `replies` value.
pub fn comment(id: &str, replies: Value) -> Value {
    envelope(
        "t1",
        json!({
            "id": id,
            "name": format!("t1_{id}"),
            "link_id": "t3_post01",
            "parent_id": "t3_post01",
            "author": format!("author_{id}"),
            "author_flair_text": null,
            "author_flair_css_class": null,
            "permalink": format!("/r/rust/comments/post01/_/{id}/"),
            "created_utc": CREATED,
            "gilded": 0,
            "score": 3,
            "ups": 3,
            "downs": 0,
            "body": format!("body of {id}"),
            "body_html": null,
            "replies": replies,
        }),
    )
}

/// A comment with no replies, encoded the way the API does it (`""`).
pub fn leaf(id: &str) -> Value {
    comment(id, json!(""))
}

/// A comment whose replies listing holds `children` and continuation `after`.
pub fn with_replies(id: &str, after: Value, children: Vec<Value>) -> Value {
    comment(id, listing(after, children))
}

/// A `more` placeholder envelope.
pub fn more(tokens: &[&str]) -> Value {
    envelope("more", json!({ "count": tokens.len(), "children": tokens }))
}

pub fn post(id: &str) -> Value {
    envelope(
        "t3",
        json!({
            "id": id,
            "subreddit_id": "t5_2qh1i",
            "author": "bob",
            "link_flair_text": null,
            "link_flair_css_class": null,
            "author_flair_text": "rustacean",
            "author_flair_css_class": null,
            "title": format!("title {id}"),
            "url": format!("https://example.com/{id}"),
            "permalink": format!("/r/rust/comments/{id}/"),
            "created_utc": CREATED,
            "gilded": 1,
            "score": 183,
            "ups": 183,
            "downs": 0,
            "selftext": "",
            "selftext_html": null,
        }),
    )
}

pub fn subreddit(name: &str) -> Value {
    envelope(
        "t5",
        json!({
            "id": "2qh1i",
            "display_name": name,
            "url": format!("/r/{name}/"),
            "title": "The Rust Programming Language",
            "created_utc": CREATED,
        }),
    )
}

pub fn bytes(v: &Value) -> Vec<u8> {
    serde_json::to_vec(v).unwrap()
}

pub fn decode(v: &Value) -> Envelope {
    decode_envelope(&bytes(v)).unwrap()
}

/// Decode a `t1` fixture into the raw comment the flattener consumes.
pub fn raw_comment(v: &Value) -> RawComment {
    extract_as::<RawComment>(&decode(v)).unwrap()
}

/// In-memory transport: serves canned bodies by exact URL and records every request.
pub fn mock_transport(routes: Vec<(&str, Value)>) -> (impl Transport, Arc<Mutex<Vec<String>>>) {
    let routes: HashMap<String, Vec<u8>> = routes.into_iter().map(|(u, v)| (u.to_string(), bytes(&v))).collect();
    let hits = Arc::new(Mutex::new(Vec::new()));
    let seen = hits.clone();
    let transport = move |url: &str| -> anyhow::Result<Vec<u8>> {
        seen.lock().unwrap().push(url.to_string());
        routes.get(url).cloned().ok_or_else(|| anyhow::anyhow!("no route for {url}"))
    };
    (transport, hits)
}
