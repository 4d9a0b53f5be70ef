// src/core/net.rs
// Blocking HTTP GET plus an in-memory stand-in for offline runs.

use std::cell::Cell;
use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use url::Url;

use super::ScrapeError;
use crate::config::options::ScrapeOptions;

/// Anything that can turn a URL into an HTML document.
pub trait Fetch {
    fn get(&self, url: &str) -> Result<String, ScrapeError>;
}

/// Sequential HTTP fetcher. One client per run so the connection pool is reused.
pub struct HttpFetch {
    client: Client,
    pause: Duration,
    first: Cell<bool>,
}

impl HttpFetch {
    pub fn new(opts: &ScrapeOptions) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(opts.user_agent.clone())
            .timeout(Duration::from_secs(opts.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, Duration::from_millis(opts.pause_ms)))
    }

    pub fn with_client(client: Client, pause: Duration) -> Self {
        Self { client, pause, first: Cell::new(true) }
    }
}

impl Fetch for HttpFetch {
    fn get(&self, url: &str) -> Result<String, ScrapeError> {
        if !self.first.replace(false) && !self.pause.is_zero() {
            thread::sleep(self.pause); // be polite
        }

        logd!("GET {url}");
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|source| ScrapeError::Request { url: s!(url), source })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::Status { url: s!(url), status: status.as_u16() });
        }

        resp.text()
            .map_err(|source| ScrapeError::Request { url: s!(url), source })
    }
}

/// URL → HTML map. Unknown URLs answer 404.
#[derive(Default)]
pub struct MapFetch {
    pages: HashMap<String, String>,
    hits: Cell<usize>,
}

impl MapFetch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(s!(url), s!(html));
        self
    }

    /// Number of `get` calls so far, misses included.
    pub fn hits(&self) -> usize {
        self.hits.get()
    }
}

impl Fetch for MapFetch {
    fn get(&self, url: &str) -> Result<String, ScrapeError> {
        self.hits.set(self.hits.get() + 1);
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::Status { url: s!(url), status: 404 })
    }
}

/// Resolve `href` against `base`. Hrefs that fail to resolve are returned unchanged.
pub fn absolute_url(base: &Url, href: &str) -> String {
    match base.join(href.trim()) {
        Ok(u) => u.into(),
        Err(_) => s!(href),
    }
}
