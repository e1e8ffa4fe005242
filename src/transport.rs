//! The single blocking GET the decode layer depends on.

use crate::config::ClientOptions;
use anyhow::{Context, Result};

/// Fetch a URL and return the complete response body.
///
/// Implementations own headers and networking; callers only ever look at the body.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<Vec<u8>>;
}

impl<F> Transport for F
where
    F: Fn(&str) -> Result<Vec<u8>> + Send + Sync,
{
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        self(url)
    }
}

/// `reqwest` blocking transport sending the configured User-Agent.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(opts: &ClientOptions) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(opts.user_agent.clone())
            .timeout(opts.timeout)
            .build()
            .context("build http client")?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("GET {}", url);
        let resp = self.client.get(url).send().with_context(|| format!("GET {url}"))?;
        let status = resp.status();
        if !status.is_success() {
            // Body still goes to the decoder; error payloads fail there as malformed envelopes.
            tracing::warn!("GET {} returned {}", url, status);
        }
        let body = resp.bytes().with_context(|| format!("read body of {url}"))?;
        Ok(body.to_vec())
    }
}
