use std::cmp::Reverse;
use std::collections::HashSet;
use std::thread;

use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::domain::{Cursor, FeedItem, Notification};
use crate::services::notification_service::NotificationSink;
use crate::services::translation_service::Translator;
use crate::sources::extract::extract_items;
use crate::sources::traits::FeedSource;
use crate::storage::traits::CursorRepository;

/// Outcome of one pipeline run, for the caller's logging only.
#[derive(Debug, Clone)]
pub struct DispatchResult {
    pub success: bool,
    pub message: String,
    pub dispatched: usize,
}

/// One-shot ingestion pipeline: fetch, extract, dedupe, order, filter
/// against the persisted cursor, dispatch a capped batch, persist.
///
/// Stateless across runs except through the cursor repository. A run never
/// returns an error; every failure either skips one endpoint/item or
/// degrades the whole run to a zero-dispatch result.
pub struct PipelineService<S, T, N, C>
where
    S: FeedSource,
    T: Translator,
    N: NotificationSink,
    C: CursorRepository,
{
    source: S,
    translator: T,
    sink: N,
    cursor_repo: C,
    feed_urls: Vec<String>,
    config: PipelineConfig,
}

impl<S, T, N, C> PipelineService<S, T, N, C>
where
    S: FeedSource,
    T: Translator,
    N: NotificationSink,
    C: CursorRepository,
{
    pub fn new(
        source: S,
        translator: T,
        sink: N,
        cursor_repo: C,
        feed_urls: Vec<String>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            source,
            translator,
            sink,
            cursor_repo,
            feed_urls,
            config,
        }
    }

    /// Fetch every configured endpoint, extract, dedupe by identifier
    /// (first occurrence wins) and order newest first. Endpoints that fail
    /// to fetch or parse are skipped, not fatal.
    pub fn fetch_merged(&self) -> Vec<FeedItem> {
        let mut all_items = Vec::new();

        for url in &self.feed_urls {
            let raw = match self.source.fetch(url) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(%url, error = %e, "feed fetch failed, skipping endpoint");
                    continue;
                }
            };

            match extract_items(&raw) {
                Ok(items) => {
                    info!(%url, count = items.len(), "extracted items");
                    all_items.extend(items);
                }
                Err(e) => warn!(%url, error = %e, "feed did not parse, skipping endpoint"),
            }
        }

        let mut merged = dedupe_by_identifier(all_items);
        // Stable sort: equal and unparsable timestamps keep their dedup order.
        merged.sort_by_key(|item| Reverse(item.published_ts().unwrap_or(i64::MIN)));
        merged
    }

    /// The capped batch `run` would dispatch right now. Read-only.
    pub fn candidates(&self) -> Vec<FeedItem> {
        let cursor = self.load_cursor();
        self.fetch_merged()
            .into_iter()
            .filter(|item| !cursor.contains(&item.identifier))
            .take(self.config.max_dispatches_per_run)
            .collect()
    }

    pub fn run(&self) -> DispatchResult {
        let items = self.fetch_merged();
        if items.is_empty() {
            return DispatchResult {
                success: false,
                message: "no items fetched from any feed".to_string(),
                dispatched: 0,
            };
        }

        let mut cursor = self.load_cursor();
        let fresh: Vec<FeedItem> = items
            .into_iter()
            .filter(|item| !cursor.contains(&item.identifier))
            .collect();

        if fresh.is_empty() {
            // Nothing novel; the cursor is left untouched.
            return DispatchResult {
                success: true,
                message: "no new items".to_string(),
                dispatched: 0,
            };
        }

        info!(count = fresh.len(), "new items found");

        let mut dispatched = 0;
        for (attempt, item) in fresh
            .iter()
            .take(self.config.max_dispatches_per_run)
            .enumerate()
        {
            if attempt > 0 && !self.config.dispatch_delay.is_zero() {
                thread::sleep(self.config.dispatch_delay);
            }

            let translated = self.translator.translate(&item.title);
            let notification = Notification::from_item(item, &translated);

            match self.sink.send(&notification.title, &notification.body) {
                Ok(()) => {
                    info!(identifier = %item.identifier, "dispatched");
                    dispatched += 1;
                    cursor.record(item.identifier.clone());
                }
                Err(e) => {
                    // The identifier is not recorded; the item stays a
                    // candidate for the next run.
                    warn!(identifier = %item.identifier, error = %e, "dispatch failed");
                }
            }
        }

        cursor.truncate_oldest(self.config.cursor_capacity);
        if let Err(e) = self.cursor_repo.save(cursor.ids()) {
            warn!(error = %e, "cursor save failed, dispatched items may repeat next run");
        }

        DispatchResult {
            success: true,
            message: format!("dispatched {dispatched} new items"),
            dispatched,
        }
    }

    fn load_cursor(&self) -> Cursor {
        match self.cursor_repo.load() {
            Ok(ids) => Cursor::new(ids),
            Err(e) => {
                warn!(error = %e, "cursor load failed, starting from an empty cursor");
                Cursor::default()
            }
        }
    }
}

fn dedupe_by_identifier(items: Vec<FeedItem>) -> Vec<FeedItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.identifier.clone()))
        .collect()
}
