use once_cell::sync::Lazy;
use regex::Regex;

use super::FeedItem;

static RE_REPOST_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^RT by @\w+:\s*").unwrap());
static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static RE_PIC_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s*pic\.?\s*$").unwrap());

/// Longest headline shown in the push title.
const HEADLINE_MAX_CHARS: usize = 40;

/// A formatted push message for one feed item.
#[derive(Debug, Clone)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    /// Build the outbound message for an item whose title has already been
    /// run through the translation facade.
    pub fn from_item(item: &FeedItem, translated_title: &str) -> Self {
        let headline_source = if translated_title.is_empty() {
            &item.title
        } else {
            translated_title
        };

        let title = format!("New post - {}", headline(headline_source));

        let mut body = format!(
            "<h3>New feed post</h3>\n\
             <p><b>Published:</b> {}</p>\n\
             <p><b>Author:</b> {}</p>\n\
             <hr/>\n\
             <p><b>Original:</b></p>\n\
             <p>{}</p>\n\
             <hr/>\n\
             <p><b>Translation:</b></p>\n\
             <p>{}</p>",
            item.published.as_deref().unwrap_or("unknown"),
            item.author.as_deref().unwrap_or("unknown"),
            item.title,
            translated_title,
        );

        if let Some(media_url) = &item.media_url {
            body.push_str(&format!(
                "\n<hr/>\n<p><img src=\"{media_url}\" style=\"max-width:100%;\" /></p>"
            ));
        }

        if let Some(link) = &item.link {
            body.push_str(&format!(
                "\n<hr/>\n<p><a href=\"{link}\">View original post</a></p>"
            ));
        }

        Self { title, body }
    }
}

/// Reduce a raw item title to a short plain-text headline: drop repost
/// prefixes, strip markup, collapse whitespace, drop the trailing "pic."
/// artifact some archives append, then cap the length.
pub fn headline(raw: &str) -> String {
    let mut summary = RE_REPOST_PREFIX.replace(raw.trim(), "").to_string();
    summary = RE_TAGS.replace_all(&summary, "").to_string();
    summary = RE_WHITESPACE.replace_all(&summary, " ").trim().to_string();
    summary = RE_PIC_SUFFIX.replace(&summary, "").to_string();

    if summary.chars().count() > HEADLINE_MAX_CHARS {
        let truncated: String = summary.chars().take(HEADLINE_MAX_CHARS - 3).collect();
        summary = format!("{truncated}...");
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headline_strips_repost_prefix() {
        assert_eq!(headline("RT by @someone: hello world"), "hello world");
    }

    #[test]
    fn test_headline_strips_tags_and_collapses_whitespace() {
        assert_eq!(
            headline("  <p>hello</p>   <b>there</b>  "),
            "hello there"
        );
    }

    #[test]
    fn test_headline_drops_pic_suffix() {
        assert_eq!(headline("a big announcement pic."), "a big announcement");
    }

    #[test]
    fn test_headline_caps_length() {
        let long = "x".repeat(80);
        let out = headline(&long);
        assert_eq!(out.chars().count(), 40);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_headline_short_title_unchanged() {
        assert_eq!(headline("short"), "short");
    }

    #[test]
    fn test_from_item_uses_translation_for_title() {
        let item = FeedItem::new("1".to_string(), "Hello".to_string());
        let note = Notification::from_item(&item, "Bonjour");
        assert_eq!(note.title, "New post - Bonjour");
    }

    #[test]
    fn test_from_item_falls_back_to_original_title() {
        let item = FeedItem::new("1".to_string(), "Hello".to_string());
        let note = Notification::from_item(&item, "");
        assert_eq!(note.title, "New post - Hello");
    }

    #[test]
    fn test_from_item_body_includes_optional_fields() {
        let item = FeedItem::new("1".to_string(), "Hello".to_string())
            .with_link(Some("https://example.com/post/1".to_string()))
            .with_author(Some("author".to_string()))
            .with_media_url(Some("https://example.com/img.jpg".to_string()));
        let note = Notification::from_item(&item, "Bonjour");

        assert!(note.body.contains("Hello"));
        assert!(note.body.contains("Bonjour"));
        assert!(note.body.contains("https://example.com/post/1"));
        assert!(note.body.contains("https://example.com/img.jpg"));
        assert!(note.body.contains("author"));
    }

    #[test]
    fn test_from_item_body_omits_absent_fields() {
        let item = FeedItem::new("1".to_string(), "Hello".to_string());
        let note = Notification::from_item(&item, "Bonjour");
        assert!(!note.body.contains("<img"));
        assert!(!note.body.contains("<a href"));
        assert!(note.body.contains("unknown"));
    }
}
