use crate::envelope::{extract_as, Envelope, Kind, Record};
use crate::error::ApiError;
use crate::ident::normalize_token;
use crate::models::null_as_default;
use serde::Deserialize;

/// One page of child envelopes plus the token to resume after it.
#[derive(Debug, Deserialize)]
#[serde(from = "ListingPayload")]
pub struct Listing {
    /// Only ever holds a valid identifier; garbage and `""` become `None`.
    pub continuation: Option<String>,
    pub children: Vec<Envelope>,
}

#[derive(Deserialize)]
struct ListingPayload {
    #[serde(default)]
    after: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    children: Vec<Envelope>,
}

impl From<ListingPayload> for Listing {
    fn from(p: ListingPayload) -> Self {
        Listing { continuation: normalize_token(p.after.as_deref()), children: p.children }
    }
}

impl Record for Listing {
    const KIND: Kind = Kind::Listing;
}

pub fn extract_listing(env: &Envelope) -> Result<Listing, ApiError> {
    extract_as(env)
}
