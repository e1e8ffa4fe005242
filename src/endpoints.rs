//! Endpoint URL construction.

use crate::ident::{is_valid_identifier, strip_post_prefix};
use reqwest::Url;
use std::fmt;
use std::str::FromStr;

/// Which post listing of a subreddit to read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListingSort {
    #[default]
    New,
    Hot,
    Top,
}

impl ListingSort {
    pub fn as_str(self) -> &'static str {
        match self {
            ListingSort::New => "new",
            ListingSort::Hot => "hot",
            ListingSort::Top => "top",
        }
    }
}

impl fmt::Display for ListingSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingSort {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(ListingSort::New),
            "hot" => Ok(ListingSort::Hot),
            "top" => Ok(ListingSort::Top),
            other => Err(format!("unknown listing {other:?} (expected new, hot or top)")),
        }
    }
}

/// Time window for the `top` listing. Ignored by the other listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TopWindow {
    Hour,
    Day,
    Week,
    Month,
    Year,
    #[default]
    All,
}

impl TopWindow {
    pub fn as_str(self) -> &'static str {
        match self {
            TopWindow::Hour => "hour",
            TopWindow::Day => "day",
            TopWindow::Week => "week",
            TopWindow::Month => "month",
            TopWindow::Year => "year",
            TopWindow::All => "all",
        }
    }

    /// Anything unrecognized means all time, matching the API's own default.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for TopWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TopWindow {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hour" => Ok(TopWindow::Hour),
            "day" => Ok(TopWindow::Day),
            "week" => Ok(TopWindow::Week),
            "month" => Ok(TopWindow::Month),
            "year" => Ok(TopWindow::Year),
            "all" => Ok(TopWindow::All),
            other => Err(format!("unknown top window {other:?}")),
        }
    }
}

/// `r/rust`, `/r/rust` and `rust` all name the same subreddit.
fn subreddit_segment(name: &str) -> &str {
    let s = name.trim().trim_start_matches('/');
    s.strip_prefix("r/").unwrap_or(s)
}

fn with_path(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    url.set_path(path);
    url.set_query(None);
    url
}

pub fn subreddit_url(base: &Url, subreddit: &str) -> Url {
    with_path(base, &format!("/r/{}/about.json", subreddit_segment(subreddit)))
}

/// `after` is only sent when it is a valid identifier; `t` only for the top listing.
pub fn posts_url(base: &Url, subreddit: &str, sort: ListingSort, after: Option<&str>, top: TopWindow) -> Url {
    let mut url = with_path(base, &format!("/r/{}/{}.json", subreddit_segment(subreddit), sort));
    let after = after.filter(|a| is_valid_identifier(a));
    if after.is_some() || sort == ListingSort::Top {
        let mut q = url.query_pairs_mut();
        if let Some(a) = after {
            q.append_pair("after", a);
        }
        if sort == ListingSort::Top {
            q.append_pair("t", top.as_str());
        }
    }
    url
}

/// Accepts either a bare post ID or its `t3_` fullname.
pub fn comments_url(base: &Url, subreddit: &str, post_id: &str, after: Option<&str>) -> Url {
    let mut url = with_path(
        base,
        &format!("/r/{}/comments/{}.json", subreddit_segment(subreddit), strip_post_prefix(post_id.trim())),
    );
    if let Some(a) = after.filter(|a| is_valid_identifier(a)) {
        url.query_pairs_mut().append_pair("after", a);
    }
    url
}
