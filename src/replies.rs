//! Reply-tree flattening.
//!
//! A comment's `replies` is either blank or a `Listing` envelope whose children are
//! comments (recursively carrying their own `replies`) or `more` placeholders. Flattening
//! turns that into one depth-first, pre-order sequence of normalized comments. Every node
//! keeps the continuation tokens found directly under it; tokens never move to a parent
//! or a sibling.

use crate::envelope::{decode_child, extract_as, Child, Envelope};
use crate::error::ApiError;
use crate::listing::Listing;
use crate::models::{Comment, RawComment};
use serde_json::value::RawValue;

/// A flattened comment: the normalized node plus every strictly-deeper descendant,
/// depth-first pre-order, siblings in listing order.
#[derive(Debug)]
pub struct Flattened {
    pub comment: Comment,
    pub replies: Vec<Comment>,
}

/// Flatten one comment. The returned `replies` never include the comment itself.
pub fn flatten(raw: RawComment) -> Result<Flattened, ApiError> {
    flatten_at(raw, 0)
}

/// Flatten a comment that sits `depth` levels below a page listing.
pub fn flatten_at(raw: RawComment, depth: usize) -> Result<Flattened, ApiError> {
    let (mut comment, replies) = raw.into_parts(depth);
    let mut out = Vec::new();
    let (resolved, deferred) = expand_replies(&comment.id, replies.as_deref(), depth, &mut out)?;
    comment.resolved_replies = resolved;
    comment.deferred_replies = deferred;
    Ok(Flattened { comment, replies: out })
}

/// Append `raw` followed by all of its descendants to `out`.
pub fn flatten_into(raw: RawComment, out: &mut Vec<Comment>) -> Result<(), ApiError> {
    push_subtree(raw, 0, out)
}

fn push_subtree(raw: RawComment, depth: usize, out: &mut Vec<Comment>) -> Result<(), ApiError> {
    let (comment, replies) = raw.into_parts(depth);
    let slot = out.len();
    let id = comment.id.clone();
    out.push(comment);
    let (resolved, deferred) = expand_replies(&id, replies.as_deref(), depth, out)?;
    let node = &mut out[slot];
    node.resolved_replies = resolved;
    node.deferred_replies = deferred;
    Ok(())
}

/// Walk the replies listing of the node `id`, pushing descendants into `out`.
/// Returns that node's (direct child IDs, deferred tokens).
fn expand_replies(
    id: &str,
    replies: Option<&RawValue>,
    depth: usize,
    out: &mut Vec<Comment>,
) -> Result<(Vec<String>, Vec<String>), ApiError> {
    let mut resolved = Vec::new();
    let mut deferred = Vec::new();

    let Some(raw) = replies.filter(|r| !is_blank(r)) else {
        return Ok((resolved, deferred));
    };

    let env = Envelope::from_raw(raw)?;
    let listing: Listing = extract_as(&env)?;

    deferred.extend(listing.continuation);

    for child in &listing.children {
        match decode_child::<RawComment>(child)? {
            Child::Item(reply) => {
                resolved.push(reply.id.clone());
                push_subtree(reply, depth + 1, out)?;
            }
            Child::More(more) => deferred.extend(more.children),
        }
    }

    tracing::trace!(
        "flattened replies of {} at depth {}: {} inline, {} deferred",
        id,
        depth,
        resolved.len(),
        deferred.len()
    );
    Ok((resolved, deferred))
}

/// Leaf markers: `""` (what the API sends for no replies), `null`, or whitespace.
fn is_blank(raw: &RawValue) -> bool {
    matches!(raw.get().trim(), "" | "\"\"" | "null")
}
