pub mod item;
pub mod cursor;
pub mod notification;

pub use item::FeedItem;
pub use cursor::Cursor;
pub use notification::Notification;
