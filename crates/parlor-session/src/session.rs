//! Session types: what the client knows about the signed-in character.

use std::time::Duration;

use parlor_protocol::{CharacterId, IdentityResponse};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for session behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// How many extra identity-fetch attempts to make when the backend is
    /// unreachable before giving up and treating the visitor as signed
    /// out. A definite 401 is never retried.
    ///
    /// Default: 2. Set to 0 to fail closed on the first network error.
    pub fetch_retries: u32,

    /// Delay between identity-fetch attempts.
    pub fetch_retry_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fetch_retries: 2,
            fetch_retry_delay: Duration::from_millis(500),
        }
    }
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// The identity half of the session, present only while authenticated.
///
/// Keeping the character id and csrf token in one `Option` means they are
/// both set or both absent; no transition can separate them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub character_id: CharacterId,
    pub csrf_token: String,
    pub notification_token: String,
}

impl From<&IdentityResponse> for Identity {
    fn from(response: &IdentityResponse) -> Self {
        Self {
            character_id: response.id,
            csrf_token: response.csrf_token.clone(),
            notification_token: response.notification_token.clone(),
        }
    }
}

/// Why the last identity fetch failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    /// The backend said there is no session.
    Unauthenticated,
    /// The backend could not be reached (after retries).
    Unreachable,
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// The session slice.
///
/// Fields are crate-private: outside code reads through
/// [`selectors`](crate::selectors) and writes only by dispatching
/// [`SessionEvent`](crate::SessionEvent)s.
///
/// ```text
///   NotTried ──(fetch ok / sign-in ok)──→ Authenticated
///      │                                   │      ↑
///      │(fetch failed)          (sign-out) │      │ (sign-in ok)
///      ▼                                   ▼      │
///   Unauthenticated ←──────────────────────┘──────┘
/// ```
///
/// `is_authentication_tried` only ever moves false → true.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub(crate) is_authentication_tried: bool,
    pub(crate) identity: Option<Identity>,
    pub(crate) administrator: bool,
    pub(crate) exists_unread_mail: bool,
    pub(crate) exists_unread_notification: bool,
    pub(crate) last_failure: Option<FetchFailure>,
}

impl SessionState {
    pub(crate) fn authenticate(&mut self, response: &IdentityResponse) {
        self.is_authentication_tried = true;
        self.identity = Some(Identity::from(response));
        self.administrator = response.administrator;
        self.exists_unread_mail = response.exists_unread_mail;
        self.exists_unread_notification = response.exists_unread_notification;
        self.last_failure = None;
    }

    /// Drops everything tied to an identity. `is_authentication_tried`
    /// is left alone.
    pub(crate) fn clear_identity(&mut self) {
        self.identity = None;
        self.administrator = false;
        self.exists_unread_mail = false;
        self.exists_unread_notification = false;
    }

    pub(crate) fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(admin: bool) -> IdentityResponse {
        IdentityResponse {
            id: CharacterId(3),
            csrf_token: "tok".into(),
            notification_token: "note".into(),
            exists_unread_notification: true,
            exists_unread_mail: false,
            administrator: admin,
        }
    }

    #[test]
    fn test_default_state_is_not_tried_and_signed_out() {
        let state = SessionState::default();
        assert!(!state.is_authentication_tried);
        assert!(!state.is_authenticated());
        assert!(!state.administrator);
        assert!(state.last_failure.is_none());
    }

    #[test]
    fn test_authenticate_copies_identity_fields() {
        let mut state = SessionState::default();

        state.authenticate(&response(true));

        let identity = state.identity.as_ref().unwrap();
        assert_eq!(identity.character_id, CharacterId(3));
        assert_eq!(identity.csrf_token, "tok");
        assert_eq!(identity.notification_token, "note");
        assert!(state.administrator);
        assert!(state.exists_unread_notification);
        assert!(!state.exists_unread_mail);
    }

    #[test]
    fn test_clear_identity_keeps_tried_flag() {
        let mut state = SessionState::default();
        state.authenticate(&response(true));

        state.clear_identity();

        assert!(state.is_authentication_tried);
        assert!(state.identity.is_none());
        assert!(!state.administrator);
    }

    #[test]
    fn test_session_config_default() {
        let config = SessionConfig::default();
        assert_eq!(config.fetch_retries, 2);
        assert_eq!(config.fetch_retry_delay, Duration::from_millis(500));
    }
}
