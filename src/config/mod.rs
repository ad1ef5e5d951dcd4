use std::time::Duration;

use url::Url;

use crate::errors::{WatchError, WatchResult};

pub const DEFAULT_PUSH_API_URL: &str = "http://www.pushplus.plus/send";
pub const DEFAULT_MYMEMORY_API_URL: &str = "https://api.mymemory.translated.net/get";
pub const DEFAULT_GOOGLE_API_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Pipeline tuning knobs; passed into the orchestrator explicitly so tests
/// can shrink the delay and bounds.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Most items dispatched in one run, newest first.
    pub max_dispatches_per_run: usize,
    /// Most delivered identifiers remembered across runs.
    pub cursor_capacity: usize,
    /// Pause between successive dispatch attempts.
    pub dispatch_delay: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_dispatches_per_run: 3,
            cursor_capacity: 100,
            dispatch_delay: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub feed_urls: Vec<String>,
    pub push_token: Option<String>,
    pub push_topic: String,
    pub push_api_url: String,
    pub mymemory_api_url: String,
    pub google_api_url: String,
    pub target_lang: String,
    pub db_path: String,
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> WatchResult<Self> {
        let exe_dir = Self::exe_dir();

        // Try to load .env from executable's directory first
        if let Some(ref dir) = exe_dir {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        let feeds_raw = std::env::var("FEEDWATCH_FEEDS")
            .map_err(|_| WatchError::MissingEnvVar("FEEDWATCH_FEEDS".to_string()))?;
        let feed_urls = parse_feed_list(&feeds_raw)?;

        let push_token = std::env::var("PUSHPLUS_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let push_topic =
            std::env::var("PUSHPLUS_TOPIC").unwrap_or_else(|_| "feedwatch".to_string());

        let push_api_url = std::env::var("PUSHPLUS_API_URL")
            .unwrap_or_else(|_| DEFAULT_PUSH_API_URL.to_string());

        let mymemory_api_url = std::env::var("FEEDWATCH_MYMEMORY_URL")
            .unwrap_or_else(|_| DEFAULT_MYMEMORY_API_URL.to_string());

        let google_api_url = std::env::var("FEEDWATCH_GOOGLE_URL")
            .unwrap_or_else(|_| DEFAULT_GOOGLE_API_URL.to_string());

        let target_lang =
            std::env::var("FEEDWATCH_TARGET_LANG").unwrap_or_else(|_| "zh-CN".to_string());

        // Default db_path is relative to executable directory
        let db_path = std::env::var("FEEDWATCH_DB_PATH").unwrap_or_else(|_| {
            exe_dir
                .map(|d| d.join("feedwatch.db").to_string_lossy().into_owned())
                .unwrap_or_else(|| "./feedwatch.db".to_string())
        });

        Ok(Self {
            feed_urls,
            push_token,
            push_topic,
            push_api_url,
            mymemory_api_url,
            google_api_url,
            target_lang,
            db_path,
            pipeline: PipelineConfig::default(),
        })
    }
}

/// Split a comma-separated endpoint list and validate every entry parses as
/// an absolute URL.
fn parse_feed_list(raw: &str) -> WatchResult<Vec<String>> {
    let feed_urls: Vec<String> = raw
        .split(',')
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .collect();

    if feed_urls.is_empty() {
        return Err(WatchError::Config(
            "FEEDWATCH_FEEDS contains no feed URLs".to_string(),
        ));
    }

    for url in &feed_urls {
        Url::parse(url).map_err(|e| WatchError::InvalidUrl(format!("{url}: {e}")))?;
    }

    Ok(feed_urls)
}
