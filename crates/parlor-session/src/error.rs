//! Error types for the session layer.

/// Errors reported by a [`SessionBackend`](crate::SessionBackend).
///
/// The split between `Unauthorized` and `Unreachable` matters: the first
/// is a definite "you are signed out", the second only means the client
/// could not find out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The backend answered and said there is no valid session (401).
    #[error("not authenticated")]
    Unauthorized,

    /// The request never got an answer (network down, timeout, 5xx).
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    /// The backend answered with an error status and message.
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The backend answered but the body broke a protocol rule.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Errors that can occur during session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Sign-in input failed local validation; no request was made.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The backend call failed.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// A state-mutating request was attempted without a CSRF token,
    /// i.e. while signed out.
    #[error("no csrf token: not signed in")]
    MissingCsrfToken,
}
