use rusqlite::OptionalExtension;
use tracing::warn;

use crate::errors::WatchResult;
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::CursorRepository;

/// Single fixed key the delivered-identifier list lives under.
const STATE_KEY: &str = "delivered_ids";

pub struct SqliteCursorRepository {
    storage: SqliteStorage,
}

impl SqliteCursorRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

impl CursorRepository for SqliteCursorRepository {
    fn load(&self) -> WatchResult<Vec<String>> {
        let conn = self.storage.connection()?;
        let raw: Option<String> = conn
            .prepare("SELECT value FROM pipeline_state WHERE key = ?1")?
            .query_row([STATE_KEY], |row| row.get(0))
            .optional()?;

        let Some(raw) = raw else {
            return Ok(Vec::new());
        };

        // Corrupt state degrades to an empty cursor rather than failing the
        // run; the worst outcome is redelivery.
        match serde_json::from_str(&raw) {
            Ok(ids) => Ok(ids),
            Err(e) => {
                warn!(error = %e, "stored cursor is not valid JSON, starting empty");
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, identifiers: &[String]) -> WatchResult<()> {
        let serialized = serde_json::to_string(identifiers)?;
        let conn = self.storage.connection()?;
        conn.execute(
            "INSERT INTO pipeline_state (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            (STATE_KEY, &serialized),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (SqliteStorage, SqliteCursorRepository) {
        let storage = SqliteStorage::in_memory().unwrap();
        let repo = SqliteCursorRepository::new(storage.clone());
        (storage, repo)
    }

    #[test]
    fn test_load_without_prior_state_is_empty() {
        let (_, repo) = setup();
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips_order() {
        let (_, repo) = setup();
        let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        repo.save(&ids).unwrap();
        assert_eq!(repo.load().unwrap(), ids);
    }

    #[test]
    fn test_save_overwrites_previous_state() {
        let (_, repo) = setup();

        repo.save(&["a".to_string()]).unwrap();
        repo.save(&["b".to_string(), "c".to_string()]).unwrap();

        assert_eq!(repo.load().unwrap(), vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_corrupt_state_loads_as_empty() {
        let (storage, repo) = setup();

        storage
            .connection()
            .unwrap()
            .execute(
                "INSERT INTO pipeline_state (key, value) VALUES (?1, ?2)",
                (STATE_KEY, "not json {{"),
            )
            .unwrap();

        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_empty_list() {
        let (_, repo) = setup();
        repo.save(&["a".to_string()]).unwrap();
        repo.save(&[]).unwrap();
        assert!(repo.load().unwrap().is_empty());
    }
}
