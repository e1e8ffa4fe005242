//! Typed records carried inside envelopes: subreddits, posts, comments and
//! "more replies" placeholders.

use crate::date::from_created_utc;
use crate::envelope::{Kind, Record};
use crate::error::ApiError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;
use time::OffsetDateTime;

/// Treat an explicit JSON `null` the same as an absent field.
pub(crate) fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Subreddit {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "display_name", default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_utc: f64,
    /// `None` when `created_utc` is outside the representable calendar range.
    #[serde(skip_deserializing, serialize_with = "time::serde::rfc3339::option::serialize")]
    pub created_on: Option<OffsetDateTime>,
}

impl Record for Subreddit {
    const KIND: Kind = Kind::Subreddit;

    fn finish(&mut self) -> Result<(), ApiError> {
        self.created_on = from_created_utc(self.created_utc);
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Post {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subreddit_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default)]
    pub link_flair_text: Option<String>,
    #[serde(rename = "link_flair_css_class", default)]
    pub link_flair_css: Option<String>,
    #[serde(default)]
    pub author_flair_text: Option<String>,
    #[serde(rename = "author_flair_css_class", default)]
    pub author_flair_css: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permalink: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_utc: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gilded: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: i64,
    #[serde(rename = "ups", default, deserialize_with = "null_as_default")]
    pub up_votes: i64,
    #[serde(rename = "downs", default, deserialize_with = "null_as_default")]
    pub down_votes: i64,
    #[serde(rename = "selftext", default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(rename = "selftext_html", default)]
    pub text_html: Option<String>,
    /// `None` when `created_utc` is outside the representable calendar range.
    #[serde(skip_deserializing, serialize_with = "time::serde::rfc3339::option::serialize")]
    pub created_on: Option<OffsetDateTime>,
}

impl Record for Post {
    const KIND: Kind = Kind::Post;

    fn finish(&mut self) -> Result<(), ApiError> {
        self.created_on = from_created_utc(self.created_utc);
        Ok(())
    }
}

/// A comment exactly as decoded from a `t1` payload, nested `replies` still raw.
/// Consumed by [`crate::replies`] to produce normalized [`Comment`]s.
#[derive(Debug, Deserialize)]
pub struct RawComment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "link_id", default, deserialize_with = "null_as_default")]
    pub post_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parent_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default)]
    pub author_flair_text: Option<String>,
    #[serde(rename = "author_flair_css_class", default)]
    pub author_flair_css: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permalink: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_utc: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gilded: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: i64,
    #[serde(rename = "ups", default, deserialize_with = "null_as_default")]
    pub up_votes: i64,
    #[serde(rename = "downs", default, deserialize_with = "null_as_default")]
    pub down_votes: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(default)]
    pub body_html: Option<String>,
    /// Either `""` / absent / `null` (leaf) or a nested `Listing` envelope.
    #[serde(default)]
    pub replies: Option<Box<RawValue>>,
}

impl Record for RawComment {
    const KIND: Kind = Kind::Comment;
}

impl RawComment {
    /// Split into the normalized record (no reply bookkeeping yet) and the raw replies.
    pub(crate) fn into_parts(self, depth: usize) -> (Comment, Option<Box<RawValue>>) {
        let created_on = from_created_utc(self.created_utc);
        let comment = Comment {
            id: self.id,
            post_id: self.post_id,
            parent_id: self.parent_id,
            author: self.author,
            author_flair_text: self.author_flair_text,
            author_flair_css: self.author_flair_css,
            permalink: self.permalink,
            created_utc: self.created_utc,
            gilded: self.gilded,
            score: self.score,
            up_votes: self.up_votes,
            down_votes: self.down_votes,
            body: self.body,
            body_html: self.body_html,
            created_on,
            depth,
            resolved_replies: Vec::new(),
            deferred_replies: Vec::new(),
        };
        (comment, self.replies)
    }
}

/// A normalized comment. It has no raw replies field, so it cannot be flattened twice.
#[derive(Clone, Debug, Serialize)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub parent_id: String,
    pub author: String,
    pub author_flair_text: Option<String>,
    pub author_flair_css: Option<String>,
    pub permalink: String,
    pub created_utc: f64,
    pub gilded: i64,
    pub score: i64,
    pub up_votes: i64,
    pub down_votes: i64,
    pub body: String,
    pub body_html: Option<String>,
    #[serde(serialize_with = "time::serde::rfc3339::option::serialize")]
    pub created_on: Option<OffsetDateTime>,
    /// 0 for a comment taken straight from a page listing.
    pub depth: usize,
    /// IDs of direct children that were returned inline, in listing order. The
    /// children themselves follow this comment in the flattened output; use
    /// [`crate::Page::replies_of`] to get them back as comments.
    pub resolved_replies: Vec<String>,
    /// Tokens for children at this position that still have to be fetched.
    pub deferred_replies: Vec<String>,
}

/// Placeholder for one or more subtrees the API did not inline.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MoreReplies {
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<String>,
}

impl Record for MoreReplies {
    const KIND: Kind = Kind::More;
}
