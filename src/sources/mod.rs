pub mod traits;
pub mod http;
pub mod extract;

pub use traits::FeedSource;
pub use http::HttpFeedSource;
pub use extract::extract_items;
