//! Blocking client for the Reddit JSON API.
//!
//! Response bodies go through three layers: tagged `{kind, data}` envelopes
//! ([`envelope`]), listings with validated continuation tokens ([`listing`]), and
//! typed records ([`models`]). Comment reply trees are flattened depth-first with
//! unresolved subtrees kept as per-node deferred tokens ([`replies`]); [`page`]
//! ties it together for one response.

mod config;
mod date;
mod endpoints;
mod error;
mod ident;
mod progress;
mod transport;
mod util;

pub mod envelope;
pub mod listing;
pub mod models;
pub mod page;
pub mod replies;

mod client;

pub use crate::config::{ClientOptions, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use crate::date::from_created_utc;
pub use crate::endpoints::{comments_url, posts_url, subreddit_url, ListingSort, TopWindow};
pub use crate::error::ApiError;
pub use crate::ident::{is_valid_identifier, normalize_token, strip_post_prefix};
pub use crate::transport::{HttpTransport, Transport};
pub use crate::util::init_tracing_once;

pub use crate::envelope::{decode_envelope, decode_envelopes, extract_as, try_extract_as, Envelope, Kind, Record};
pub use crate::listing::{extract_listing, Listing};
pub use crate::models::{Comment, MoreReplies, Post, RawComment, Subreddit};
pub use crate::page::{assemble_comment_page, assemble_page, decode_record, select_comment_listing, Page};
pub use crate::replies::{flatten, flatten_into, Flattened};

pub use crate::client::{PostPages, RedditClient};
pub use reqwest::Url;
