use crate::errors::WatchResult;

#[cfg_attr(test, mockall::automock)]
pub trait CursorRepository: Send + Sync {
    /// Load the delivered-identifier sequence, oldest first. Absent or
    /// undecodable state loads as an empty sequence.
    fn load(&self) -> WatchResult<Vec<String>>;

    /// Overwrite the stored sequence. The caller trims to capacity first;
    /// the store does not enforce the bound.
    fn save(&self, identifiers: &[String]) -> WatchResult<()>;
}
