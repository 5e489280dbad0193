//! Unified error type for the Parlor client.

use parlor_draft::DraftError;
use parlor_gate::GateError;
use parlor_notify::NotifyError;
use parlor_protocol::ProtocolError;
use parlor_session::SessionError;

/// Top-level error that wraps all crate-specific errors.
///
/// `?` converts any sub-crate error into this one.
#[derive(Debug, thiserror::Error)]
pub enum ParlorError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Sign-in, sign-out, or identity fetch failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Gate(#[from] GateError),

    /// Draft load or save failed.
    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error(transparent)]
    Notify(#[from] NotifyError),
}
