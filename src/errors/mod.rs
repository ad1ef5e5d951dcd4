use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed unavailable: {url} returned status {status}")]
    SourceUnavailable { url: String, status: u16 },

    // Parsing errors
    #[error("Feed parsing failed: {0}")]
    FeedParse(String),

    // Storage errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("State serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    // Translation errors; contained inside the facade, never reach the pipeline
    #[error("Translation failed: {0}")]
    Translation(String),

    // Notification errors
    #[error("Notification rejected: {0}")]
    Notification(String),

    #[error("Notification token is not configured")]
    MissingCredential,

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type WatchResult<T> = Result<T, WatchError>;
