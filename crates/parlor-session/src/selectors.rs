//! Pure read accessors over [`SessionState`].
//!
//! Selectors take the state by reference and never mutate or cache it.
//! Owned-result selectors plug straight into
//! [`Store::select`](parlor_store::Store::select):
//!
//! ```rust
//! use parlor_session::{SessionStore, selectors};
//!
//! let store = SessionStore::default();
//! assert!(!store.select(selectors::is_authentication_tried));
//! ```

use parlor_protocol::CsrfHeader;

use crate::{FetchFailure, Identity, SessionError, SessionState};

/// The three flags page-level code branches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthenticationStatus {
    pub is_authenticated: bool,
    pub is_authentication_tried: bool,
    /// Signed in *and* holding the administrator flag.
    pub is_administrator_authenticated: bool,
}

pub fn is_authenticated(state: &SessionState) -> bool {
    state.is_authenticated()
}

pub fn is_authentication_tried(state: &SessionState) -> bool {
    state.is_authentication_tried
}

pub fn administrator(state: &SessionState) -> bool {
    state.administrator
}

pub fn csrf_token(state: &SessionState) -> Option<&str> {
    state.identity.as_ref().map(|i| i.csrf_token.as_str())
}

pub fn exists_unread_mail(state: &SessionState) -> bool {
    state.exists_unread_mail
}

pub fn exists_unread_notification(state: &SessionState) -> bool {
    state.exists_unread_notification
}

/// The raw identity record, `None` while signed out.
pub fn identity(state: &SessionState) -> Option<&Identity> {
    state.identity.as_ref()
}

/// Why the most recent identity fetch failed, if it did.
pub fn last_failure(state: &SessionState) -> Option<FetchFailure> {
    state.last_failure
}

pub fn authentication_status(state: &SessionState) -> AuthenticationStatus {
    AuthenticationStatus {
        is_authenticated: state.is_authenticated(),
        is_authentication_tried: state.is_authentication_tried,
        is_administrator_authenticated: state.is_authenticated() && state.administrator,
    }
}

/// The header to attach to a state-mutating request, or `None` while
/// signed out.
pub fn csrf_header(state: &SessionState) -> Option<CsrfHeader> {
    csrf_token(state).map(CsrfHeader::new)
}

/// Like [`csrf_header`], but as an error for callers that must not
/// proceed without a token.
pub fn require_csrf_header(state: &SessionState) -> Result<CsrfHeader, SessionError> {
    csrf_header(state).ok_or(SessionError::MissingCsrfToken)
}

#[cfg(test)]
mod tests {
    use parlor_protocol::{CharacterId, IdentityResponse};
    use parlor_store::Reducer;

    use super::*;
    use crate::{SessionEvent, SessionReducer};

    fn state_after(events: Vec<SessionEvent>) -> SessionState {
        let mut state = SessionState::default();
        for event in events {
            SessionReducer::reduce(&mut state, event);
        }
        state
    }

    fn response(admin: bool) -> IdentityResponse {
        IdentityResponse {
            id: CharacterId(42),
            csrf_token: "abc".into(),
            notification_token: "n".into(),
            exists_unread_notification: false,
            exists_unread_mail: true,
            administrator: admin,
        }
    }

    #[test]
    fn test_status_before_fetch_is_all_false() {
        let status = authentication_status(&SessionState::default());
        assert_eq!(status, AuthenticationStatus::default());
    }

    #[test]
    fn test_status_after_fetch_success_scenario() {
        let state = state_after(vec![SessionEvent::FetchSuccess(response(false))]);

        assert!(is_authenticated(&state));
        assert!(is_authentication_tried(&state));
        assert!(!administrator(&state));
        assert!(exists_unread_mail(&state));
        assert!(!exists_unread_notification(&state));
        assert!(!authentication_status(&state).is_administrator_authenticated);
    }

    #[test]
    fn test_status_admin_requires_authentication() {
        let state = state_after(vec![SessionEvent::FetchSuccess(response(true))]);
        assert!(authentication_status(&state).is_administrator_authenticated);

        let state = state_after(vec![
            SessionEvent::FetchSuccess(response(true)),
            SessionEvent::SignOutSuccess,
        ]);
        assert!(!authentication_status(&state).is_administrator_authenticated);
    }

    #[test]
    fn test_csrf_header_present_when_signed_in() {
        let state = state_after(vec![SessionEvent::FetchSuccess(response(false))]);

        assert_eq!(csrf_token(&state), Some("abc"));
        assert_eq!(csrf_header(&state), Some(CsrfHeader::new("abc")));
        assert_eq!(identity(&state).map(|i| i.character_id), Some(CharacterId(42)));
    }

    #[test]
    fn test_require_csrf_header_errors_when_signed_out() {
        let result = require_csrf_header(&SessionState::default());
        assert!(matches!(result, Err(SessionError::MissingCsrfToken)));
    }

    #[test]
    fn test_last_failure_reports_reason() {
        let state = state_after(vec![SessionEvent::FetchFailure(FetchFailure::Unreachable)]);
        assert_eq!(last_failure(&state), Some(FetchFailure::Unreachable));
    }
}
