use reqwest::blocking::Client;
use reqwest::header::ACCEPT;

use crate::errors::{WatchError, WatchResult};
use crate::sources::traits::FeedSource;

const USER_AGENT: &str = concat!("feedwatch/", env!("CARGO_PKG_VERSION"));
const ACCEPT_FEED: &str = "application/rss+xml, application/xml, text/xml";

pub struct HttpFeedSource {
    client: Client,
}

impl HttpFeedSource {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }
}

impl Default for HttpFeedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedSource for HttpFeedSource {
    fn fetch(&self, url: &str) -> WatchResult<String> {
        // One attempt per run; the periodic trigger is the retry loop.
        let response = self.client.get(url).header(ACCEPT, ACCEPT_FEED).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(WatchError::SourceUnavailable {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text()?)
    }
}
