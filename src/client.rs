use crate::config::ClientOptions;
use crate::endpoints::{comments_url, posts_url, subreddit_url, ListingSort, TopWindow};
use crate::models::{Comment, Post, Subreddit};
use crate::page::{assemble_comment_page, assemble_page, decode_record, Page};
use crate::progress::make_page_progress;
use crate::transport::{HttpTransport, Transport};
use crate::util::init_tracing_once;
use anyhow::{Context, Result};
use indicatif::ProgressBar;
use reqwest::Url;

/// Blocking client for the subreddit / posts / comments endpoints.
///
/// Decode failures surface as [`crate::ApiError`] inside the `anyhow` chain
/// (`err.downcast_ref::<ApiError>()`).
pub struct RedditClient<T = HttpTransport> {
    opts: ClientOptions,
    base: Url,
    transport: T,
}

impl RedditClient<HttpTransport> {
    /// HTTP client configured from the environment (see [`ClientOptions::from_env`]).
    pub fn new() -> Result<Self> {
        Self::with_options(ClientOptions::from_env())
    }

    pub fn with_options(opts: ClientOptions) -> Result<Self> {
        let transport = HttpTransport::new(&opts)?;
        Self::with_transport(opts, transport)
    }
}

impl<T: Transport> RedditClient<T> {
    pub fn with_transport(opts: ClientOptions, transport: T) -> Result<Self> {
        init_tracing_once();
        let base = Url::parse(&opts.base_url).with_context(|| format!("invalid base url {:?}", opts.base_url))?;
        Ok(Self { opts, base, transport })
    }

    pub fn options(&self) -> &ClientOptions {
        &self.opts
    }

    fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        self.transport.get(url.as_str()).with_context(|| format!("fetch {url}"))
    }

    /// Subreddit metadata from `/r/{name}/about.json`.
    pub fn subreddit(&self, name: &str) -> Result<Subreddit> {
        let url = subreddit_url(&self.base, name);
        let body = self.fetch(&url)?;
        let sub = decode_record::<Subreddit>(&body).with_context(|| format!("decode subreddit from {url}"))?;
        Ok(sub)
    }

    /// One page of posts. `top` only matters for [`ListingSort::Top`]; an invalid
    /// `after` is not sent, which reads the first page.
    pub fn posts(&self, subreddit: &str, sort: ListingSort, after: Option<&str>, top: TopWindow) -> Result<Page<Post>> {
        let url = posts_url(&self.base, subreddit, sort, after, top);
        let body = self.fetch(&url)?;
        let page = assemble_page::<Post>(&body, self.opts.parallel_flatten)
            .with_context(|| format!("decode posts from {url}"))?;
        Ok(page)
    }

    /// One page of comments for a post, reply trees already flattened depth-first.
    pub fn comments(&self, subreddit: &str, post_id: &str, after: Option<&str>) -> Result<Page<Comment>> {
        let url = comments_url(&self.base, subreddit, post_id, after);
        let body = self.fetch(&url)?;
        let page = assemble_comment_page(&body, self.opts.parallel_flatten)
            .with_context(|| format!("decode comments from {url}"))?;
        tracing::debug!(
            "{} comments for {} ({} deferred)",
            page.items.len(),
            post_id,
            page.deferred.len()
        );
        Ok(page)
    }

    /// Follow `next` tokens page by page, starting at `after`. Bound it with `.take(n)`.
    pub fn post_pages(&self, subreddit: &str, sort: ListingSort, top: TopWindow, after: Option<&str>) -> PostPages<'_, T> {
        let pb = if self.opts.progress {
            Some(make_page_progress(&format!("r/{subreddit} {sort}")))
        } else {
            None
        };
        PostPages {
            client: self,
            subreddit: subreddit.to_string(),
            sort,
            top,
            after: after.map(str::to_string),
            done: false,
            pb,
            items: 0,
        }
    }
}

/// Iterator returned by [`RedditClient::post_pages`]. Stops after the last page or
/// after yielding the first error.
pub struct PostPages<'a, T> {
    client: &'a RedditClient<T>,
    subreddit: String,
    sort: ListingSort,
    top: TopWindow,
    after: Option<String>,
    done: bool,
    pb: Option<ProgressBar>,
    items: u64,
}

impl<'a, T: Transport> Iterator for PostPages<'a, T> {
    type Item = Result<Page<Post>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.client.posts(&self.subreddit, self.sort, self.after.as_deref(), self.top) {
            Ok(page) => {
                if page.next.is_some() && page.next == self.after {
                    tracing::warn!("r/{} returned the same continuation twice, stopping", self.subreddit);
                    self.done = true;
                } else {
                    self.done = page.next.is_none();
                }
                self.after = page.next.clone();
                if let Some(pb) = &self.pb {
                    self.items += page.items.len() as u64;
                    pb.inc(1);
                    pb.set_prefix(self.items.to_string());
                }
                Some(Ok(page))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<'a, T> Drop for PostPages<'a, T> {
    fn drop(&mut self) {
        if let Some(pb) = self.pb.take() {
            pb.finish_with_message(format!("r/{} done", self.subreddit));
        }
    }
}
