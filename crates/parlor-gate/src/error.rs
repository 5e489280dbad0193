//! Error types for the gate layer.

use parlor_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// The session store went away before the gate settled.
    #[error("session store closed while the gate was pending")]
    StoreClosed(#[from] StoreError),
}
