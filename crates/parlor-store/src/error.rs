//! Error types for the store layer.

/// Errors surfaced to store subscribers.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Every [`Store`](crate::Store) handle was dropped, so no further
    /// snapshot can ever arrive.
    #[error("store closed")]
    Closed,
}
