use crate::errors::WatchResult;

#[cfg_attr(test, mockall::automock)]
pub trait FeedSource: Send + Sync {
    /// Fetch the raw markup document behind a feed endpoint.
    /// A transport failure or non-success status is an error; callers skip
    /// the endpoint and keep going.
    fn fetch(&self, url: &str) -> WatchResult<String>;
}
