//! Tagged `{kind, data}` envelopes and dispatch-by-tag into typed records.
//!
//! The payload stays as unparsed JSON text until the tag has been checked, since
//! the five record shapes are mutually incompatible.

use crate::error::ApiError;
use crate::models::MoreReplies;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::value::RawValue;
use std::fmt;

/// Record kinds the API wraps in envelopes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Listing,
    Comment,
    Post,
    Subreddit,
    More,
}

impl Kind {
    pub const ALL: [Kind; 5] = [Kind::Listing, Kind::Comment, Kind::Post, Kind::Subreddit, Kind::More];

    /// Wire tag as it appears in the envelope's `kind` field.
    pub fn tag(self) -> &'static str {
        match self {
            Kind::Listing => "Listing",
            Kind::Comment => "t1",
            Kind::Post => "t3",
            Kind::Subreddit => "t5",
            Kind::More => "more",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Kind> {
        Kind::ALL.into_iter().find(|k| k.tag() == tag)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One tagged API object. Immutable once decoded.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(rename = "kind")]
    tag: String,
    data: Box<RawValue>,
}

impl Envelope {
    /// Raw `kind` string, including tags this crate doesn't model.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn kind(&self) -> Option<Kind> {
        Kind::from_tag(&self.tag)
    }

    /// Undecoded payload JSON.
    pub fn payload(&self) -> &str {
        self.data.get()
    }

    /// Decode an envelope embedded in another payload (e.g. a comment's `replies`).
    pub fn from_raw(raw: &RawValue) -> Result<Envelope, ApiError> {
        serde_json::from_str(raw.get()).map_err(ApiError::MalformedEnvelope)
    }
}

/// Parse one response body into an envelope without touching the payload.
pub fn decode_envelope(bytes: &[u8]) -> Result<Envelope, ApiError> {
    serde_json::from_slice(bytes).map_err(ApiError::MalformedEnvelope)
}

/// Parse a response body that is a JSON array of envelopes (the comments endpoint).
pub fn decode_envelopes(bytes: &[u8]) -> Result<Vec<Envelope>, ApiError> {
    serde_json::from_slice(bytes).map_err(ApiError::MalformedEnvelope)
}

/// A record shape selected by an envelope tag.
pub trait Record: DeserializeOwned {
    const KIND: Kind;

    /// Derived fields, run once after the structural decode.
    fn finish(&mut self) -> Result<(), ApiError> {
        Ok(())
    }
}

/// Decode `env` as `T`, failing with `TypeMismatch` when the tag is not `T::KIND`.
pub fn extract_as<T: Record>(env: &Envelope) -> Result<T, ApiError> {
    if env.tag != T::KIND.tag() {
        return Err(ApiError::TypeMismatch { expected: T::KIND, actual: env.tag.clone() });
    }
    let mut record: T = serde_json::from_str(env.payload())
        .map_err(|source| ApiError::MalformedPayload { kind: T::KIND, source })?;
    record.finish()?;
    Ok(record)
}

/// Like [`extract_as`] but a tag mismatch is a miss (`Ok(None)`), not an error.
pub fn try_extract_as<T: Record>(env: &Envelope) -> Result<Option<T>, ApiError> {
    match extract_as(env) {
        Ok(record) => Ok(Some(record)),
        Err(e) if e.is_type_mismatch() => Ok(None),
        Err(e) => Err(e),
    }
}

/// A listing child: either the expected record or a "more" placeholder.
#[derive(Debug)]
pub enum Child<T> {
    Item(T),
    More(MoreReplies),
}

/// Try `T`, then `more`. A child that decodes as neither is an `UnexpectedTreeNode`,
/// whether its tag was foreign or its payload was broken.
pub fn decode_child<T: Record>(env: &Envelope) -> Result<Child<T>, ApiError> {
    let mut cause = match try_extract_as::<T>(env) {
        Ok(Some(item)) => return Ok(Child::Item(item)),
        Ok(None) => None,
        Err(e) => Some(e),
    };
    match try_extract_as::<MoreReplies>(env) {
        Ok(Some(more)) => return Ok(Child::More(more)),
        Ok(None) => {}
        Err(e) => cause = Some(e),
    }
    if let Some(e) = &cause {
        tracing::debug!("{:?} child matched no candidate: {}", env.tag, e);
    }
    Err(ApiError::UnexpectedTreeNode { tag: env.tag.clone(), cause: cause.map(Box::new) })
}
