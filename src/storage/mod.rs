pub mod traits;
pub mod sqlite;

pub use traits::CursorRepository;
pub use sqlite::{SqliteCursorRepository, SqliteStorage};
