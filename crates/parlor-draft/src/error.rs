//! Error types for the draft layer.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    /// The storage backend failed to load or save.
    #[error("draft storage failed: {0}")]
    Storage(String),

    /// The autosave task is no longer running.
    #[error("autosaver stopped")]
    Stopped,
}
