use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// One entry extracted from a feed document. Immutable after extraction;
/// the pipeline only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedItem {
    pub identifier: String,
    pub title: String,
    pub link: Option<String>,
    pub published: Option<String>,
    pub author: Option<String>,
    pub media_url: Option<String>,
}

impl FeedItem {
    pub fn new(identifier: String, title: String) -> Self {
        Self {
            identifier,
            title,
            link: None,
            published: None,
            author: None,
            media_url: None,
        }
    }

    pub fn with_link(mut self, link: Option<String>) -> Self {
        self.link = link;
        self
    }

    pub fn with_published(mut self, published: Option<String>) -> Self {
        self.published = published;
        self
    }

    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.author = author;
        self
    }

    pub fn with_media_url(mut self, media_url: Option<String>) -> Self {
        self.media_url = media_url;
        self
    }

    /// Epoch seconds of the published timestamp, for newest-first sorting.
    /// Accepts RFC 3339 (extractor output) and RFC 2822 (raw RSS pubDate);
    /// anything else is `None`, which callers sort as earliest.
    pub fn published_ts(&self) -> Option<i64> {
        let raw = self.published.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .or_else(|_| DateTime::parse_from_rfc2822(raw))
            .ok()
            .map(|dt| dt.timestamp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_published_ts_rfc3339() {
        let item = FeedItem::new("1".to_string(), "Title".to_string())
            .with_published(Some("2024-01-15T12:00:00+00:00".to_string()));
        assert_eq!(item.published_ts(), Some(1705320000));
    }

    #[test]
    fn test_published_ts_rfc2822() {
        let item = FeedItem::new("1".to_string(), "Title".to_string())
            .with_published(Some("Mon, 15 Jan 2024 12:00:00 +0000".to_string()));
        assert_eq!(item.published_ts(), Some(1705320000));
    }

    #[test]
    fn test_published_ts_unparsable() {
        let item = FeedItem::new("1".to_string(), "Title".to_string())
            .with_published(Some("three days ago".to_string()));
        assert_eq!(item.published_ts(), None);
    }

    #[test]
    fn test_published_ts_absent() {
        let item = FeedItem::new("1".to_string(), "Title".to_string());
        assert_eq!(item.published_ts(), None);
    }
}
