use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://reddit.com";
pub const DEFAULT_USER_AGENT: &str = concat!("rscrape/", env!("CARGO_PKG_VERSION"));

/// Client options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct ClientOptions {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub parallel_flatten: bool, // flatten top-level comment subtrees on the rayon pool
    pub progress: bool,         // show a page counter while crawling
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            parallel_flatten: true,
            progress: false,
        }
    }
}

impl ClientOptions {
    /// Defaults overridden by the environment:
    /// - RSCRAPE_BASE_URL
    /// - RSCRAPE_USER_AGENT
    /// - RSCRAPE_TIMEOUT_SECS (whole seconds)
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Ok(s) = std::env::var("RSCRAPE_BASE_URL") {
            if !s.trim().is_empty() {
                opts = opts.with_base_url(s);
            }
        }
        if let Ok(s) = std::env::var("RSCRAPE_USER_AGENT") {
            if !s.trim().is_empty() {
                opts = opts.with_user_agent(s);
            }
        }
        if let Ok(s) = std::env::var("RSCRAPE_TIMEOUT_SECS") {
            match s.trim().parse::<u64>() {
                Ok(secs) => opts = opts.with_timeout(Duration::from_secs(secs)),
                Err(_) => tracing::warn!("RSCRAPE_TIMEOUT_SECS is not a whole number of seconds: {}", s),
            }
        }
        opts
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim().trim_end_matches('/').to_string();
        self
    }
    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout.max(Duration::from_secs(1));
        self
    }
    pub fn with_parallel_flatten(mut self, yes: bool) -> Self {
        self.parallel_flatten = yes;
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
}
