//! Decode / flatten errors surfaced by the envelope, listing and reply-tree layers.

use crate::envelope::Kind;

/// Errors produced while turning response bytes into typed records.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("response is not a {{kind, data}} envelope: {0}")]
    MalformedEnvelope(#[source] serde_json::Error),

    #[error("expected a {expected} envelope, got {actual:?}")]
    TypeMismatch { expected: Kind, actual: String },

    #[error("malformed {kind} payload: {source}")]
    MalformedPayload {
        kind: Kind,
        #[source]
        source: serde_json::Error,
    },

    #[error("API object of kind {tag:?} is not a comment or more-replies placeholder")]
    UnexpectedTreeNode {
        tag: String,
        /// Decode failure of the last candidate tried, if the tag matched one.
        #[source]
        cause: Option<Box<ApiError>>,
    },

    #[error("no comment listings found in response")]
    NoCommentListingFound,
}

impl ApiError {
    /// A mismatch is the only "try the next candidate" outcome during dispatch.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, ApiError::TypeMismatch { .. })
    }
}
