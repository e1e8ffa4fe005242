//! Page assembly: one response body -> typed items + continuation bookkeeping.

use crate::envelope::{decode_child, decode_envelope, decode_envelopes, extract_as, Child, Envelope, Record};
use crate::error::ApiError;
use crate::listing::Listing;
use crate::models::{Comment, Post, RawComment};
use crate::replies::flatten_into;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

/// One page of results.
#[derive(Clone, Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Token for the next page; `None` at the end of results.
    pub next: Option<String>,
    /// Tokens from `more` placeholders sitting directly in the page listing.
    pub deferred: Vec<String>,
}

impl<T> Page<T> {
    /// Continuation as the API-style string sentinel (`""` = no more pages).
    pub fn next_token(&self) -> &str {
        self.next.as_deref().unwrap_or("")
    }

    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }
}

impl Page<Comment> {
    /// Direct inline replies of `parent`, in listing order, looked up in this page.
    pub fn replies_of<'a>(&'a self, parent: &Comment) -> Vec<&'a Comment> {
        let by_id: HashMap<&str, &Comment> = self.items.iter().map(|c| (c.id.as_str(), c)).collect();
        parent
            .resolved_replies
            .iter()
            .filter_map(|id| by_id.get(id.as_str()).copied())
            .collect()
    }
}

/// A record kind that can appear as a page child, and how it expands into output rows.
pub trait PageItem: Record + Send {
    type Output: Send;

    fn expand_into(self, out: &mut Vec<Self::Output>) -> Result<(), ApiError>;
}

impl PageItem for Post {
    type Output = Post;

    fn expand_into(self, out: &mut Vec<Post>) -> Result<(), ApiError> {
        out.push(self);
        Ok(())
    }
}

/// Comments expand into themselves followed by their flattened reply tree.
impl PageItem for RawComment {
    type Output = Comment;

    fn expand_into(self, out: &mut Vec<Comment>) -> Result<(), ApiError> {
        flatten_into(self, out)
    }
}

/// Decode a single-envelope response as exactly one record.
pub fn decode_record<T: Record>(bytes: &[u8]) -> Result<T, ApiError> {
    let env = decode_envelope(bytes)?;
    extract_as(&env)
}

/// Assemble a page from a single-listing response (posts, subreddit listings).
pub fn assemble_page<T: PageItem>(bytes: &[u8], parallel: bool) -> Result<Page<T::Output>, ApiError> {
    let env = decode_envelope(bytes)?;
    let listing: Listing = extract_as(&env)?;
    assemble_listing::<T>(listing, parallel)
}

/// Assemble a comments page. The body is an array of envelopes (post listing, then
/// comment listing); the first listing whose first child is a comment is used.
pub fn assemble_comment_page(bytes: &[u8], parallel: bool) -> Result<Page<Comment>, ApiError> {
    let envelopes = decode_envelopes(bytes)?;
    let listing = select_comment_listing(envelopes)?;
    assemble_listing::<RawComment>(listing, parallel)
}

/// Pick the first envelope that is a listing whose first child decodes as a comment.
pub fn select_comment_listing(envelopes: Vec<Envelope>) -> Result<Listing, ApiError> {
    for (i, env) in envelopes.into_iter().enumerate() {
        let listing = match extract_as::<Listing>(&env) {
            Ok(l) => l,
            Err(e) => {
                tracing::debug!("response part {} skipped: {}", i, e);
                continue;
            }
        };
        let Some(first) = listing.children.first() else {
            tracing::debug!("response part {} skipped: empty listing", i);
            continue;
        };
        if extract_as::<RawComment>(first).is_ok() {
            return Ok(listing);
        }
        tracing::debug!("response part {} skipped: first child is {:?}", i, first.tag());
    }
    Err(ApiError::NoCommentListingFound)
}

/// Decode every child of `listing` as `T` (or `more`), then expand items in order.
///
/// With `parallel`, items are expanded on the rayon pool; output order is unchanged.
pub fn assemble_listing<T: PageItem>(listing: Listing, parallel: bool) -> Result<Page<T::Output>, ApiError> {
    let Listing { continuation, children } = listing;

    let mut deferred = Vec::new();
    let mut pending = Vec::with_capacity(children.len());
    for child in &children {
        match decode_child::<T>(child)? {
            Child::Item(item) => pending.push(item),
            Child::More(more) => deferred.extend(more.children),
        }
    }
    let top_level = pending.len();

    let items = if parallel && pending.len() > 1 {
        let parts: Vec<Vec<T::Output>> = pending
            .into_par_iter()
            .map(|item| -> Result<Vec<T::Output>, ApiError> {
                let mut part = Vec::new();
                item.expand_into(&mut part)?;
                Ok(part)
            })
            .collect::<Result<_, ApiError>>()?;
        parts.into_iter().flatten().collect()
    } else {
        let mut items = Vec::with_capacity(pending.len());
        for item in pending {
            item.expand_into(&mut items)?;
        }
        items
    };

    tracing::debug!(
        "assembled {} page: {} top-level, {} total, {} deferred, next={:?}",
        T::KIND,
        top_level,
        items.len(),
        deferred.len(),
        continuation
    );

    Ok(Page { items, next: continuation, deferred })
}
