use feed_rs::parser;

use crate::domain::FeedItem;
use crate::errors::{WatchError, WatchResult};

/// Extract items from a raw feed document, in document order.
///
/// Extraction is tolerant per field: anything optional that is absent or
/// malformed becomes `None`. Entries without an identifier or a title are
/// skipped entirely. A document that does not parse as a feed at all is an
/// error; the caller treats the endpoint as unavailable.
pub fn extract_items(raw: &str) -> WatchResult<Vec<FeedItem>> {
    let parsed =
        parser::parse(raw.as_bytes()).map_err(|e| WatchError::FeedParse(e.to_string()))?;

    let items = parsed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let identifier = entry.id.trim().to_string();
            let title = entry
                .title
                .map(|t| t.content.trim().to_string())
                .unwrap_or_default();

            // Required fields; an entry missing either is dropped, not an error.
            if identifier.is_empty() || title.is_empty() {
                return None;
            }

            let link = entry.links.first().map(|l| l.href.clone());

            let published = entry
                .published
                .or(entry.updated)
                .map(|dt| dt.to_rfc3339());

            let author = entry
                .authors
                .first()
                .map(|person| person.name.trim().to_string())
                .filter(|name| !name.is_empty());

            let media_url = entry
                .media
                .iter()
                .flat_map(|media| media.content.iter())
                .find_map(|content| content.url.as_ref().map(|u| u.to_string()));

            Some(
                FeedItem::new(identifier, title)
                    .with_link(link)
                    .with_published(published)
                    .with_author(author)
                    .with_media_url(media_url),
            )
        })
        .collect();

    Ok(items)
}
