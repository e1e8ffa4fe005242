//! Identifier ("fullname") checks used wherever a continuation token is accepted.

use regex::Regex;
use std::sync::OnceLock;

/// Fullname shape: kind digit (1 = comment, 3 = post, 5 = subreddit) + base36-ish suffix.
const IDENTIFIER_PATTERN: &str = "^t(1|3|5)_[A-Za-z0-9]{5,9}$";

static IDENTIFIER_RE: OnceLock<Regex> = OnceLock::new();

fn identifier_re() -> &'static Regex {
    IDENTIFIER_RE.get_or_init(|| Regex::new(IDENTIFIER_PATTERN).expect("static identifier pattern"))
}

/// True if `s` is a syntactically valid identifier / continuation token.
/// Full-string, case-sensitive match; surrounding whitespace is not tolerated.
#[inline]
pub fn is_valid_identifier(s: &str) -> bool {
    identifier_re().is_match(s)
}

/// Keep a token only if it passes [`is_valid_identifier`]. Anything else
/// (empty string at the end of pagination, `null`, garbage) collapses to `None`.
pub fn normalize_token(raw: Option<&str>) -> Option<String> {
    match raw {
        Some(s) if is_valid_identifier(s) => Some(s.to_string()),
        Some(s) if !s.is_empty() => {
            tracing::debug!("dropping invalid continuation token {:?}", s);
            None
        }
        _ => None,
    }
}

/// Strip a leading `t3_` so a post fullname can be used as a bare post ID.
pub fn strip_post_prefix(id: &str) -> &str {
    id.strip_prefix("t3_").unwrap_or(id)
}
