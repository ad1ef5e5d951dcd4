mod connection;
mod cursor_repository;

pub use connection::SqliteStorage;
pub use cursor_repository::SqliteCursorRepository;
