//! Session events and the reducer that applies them.

use parlor_protocol::{IdentityResponse, NoticeLevel};
use parlor_store::{Reducer, Store};

use crate::{FetchFailure, SessionState};

/// The session store handle used throughout the client.
pub type SessionStore = Store<SessionReducer>;

/// A transient, non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Everything that may change the session slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// An identity fetch is in flight. Marker only.
    FetchRequest,
    /// The identity fetch returned a session.
    FetchSuccess(IdentityResponse),
    /// The identity fetch settled without a session.
    FetchFailure(FetchFailure),

    /// A sign-in call is in flight. Marker only; the password never
    /// enters the store.
    SignInRequest { key: String },
    /// Sign-in succeeded. Applied exactly like `FetchSuccess`.
    SignInSuccess(IdentityResponse),
    /// Sign-in was refused or could not be attempted.
    SignInFailure { message: String },

    /// The backend ended the session. Identity and unread flags are
    /// cleared; `is_authentication_tried` stays set.
    SignOutSuccess,

    /// The user opened the mailbox.
    ReadAllMails,
    /// The user opened the notification list.
    ReadNotifications,

    /// New mail was detected (push channel or a page poll).
    MailArrived,
    /// A new notification was detected.
    NotificationArrived,

    /// A transient UI message. Does not touch the unread flags.
    Notify(Notice),
}

/// Output of a session transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    /// Show this to the user.
    Notice(Notice),
}

/// The session slice's reducer.
#[derive(Debug)]
pub struct SessionReducer;

impl Reducer for SessionReducer {
    type State = SessionState;
    type Event = SessionEvent;
    type Effect = SessionEffect;

    fn reduce(state: &mut SessionState, event: SessionEvent) -> Vec<SessionEffect> {
        match event {
            SessionEvent::FetchRequest | SessionEvent::SignInRequest { .. } => {}
            SessionEvent::FetchSuccess(response) | SessionEvent::SignInSuccess(response) => {
                state.authenticate(&response);
            }
            SessionEvent::FetchFailure(failure) => {
                state.is_authentication_tried = true;
                state.clear_identity();
                state.last_failure = Some(failure);
            }
            SessionEvent::SignInFailure { message } => {
                return vec![SessionEffect::Notice(Notice::error(message))];
            }
            SessionEvent::SignOutSuccess => {
                state.clear_identity();
                state.last_failure = None;
            }
            SessionEvent::ReadAllMails => state.exists_unread_mail = false,
            SessionEvent::ReadNotifications => state.exists_unread_notification = false,
            SessionEvent::MailArrived => {
                if state.is_authenticated() {
                    state.exists_unread_mail = true;
                }
            }
            SessionEvent::NotificationArrived => {
                if state.is_authenticated() {
                    state.exists_unread_notification = true;
                }
            }
            SessionEvent::Notify(notice) => {
                return vec![SessionEffect::Notice(notice)];
            }
        }
        Vec::new()
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use parlor_protocol::CharacterId;

    use super::*;

    fn identity(id: u64, admin: bool) -> IdentityResponse {
        IdentityResponse {
            id: CharacterId(id),
            csrf_token: "abc".into(),
            notification_token: "n".into(),
            exists_unread_notification: false,
            exists_unread_mail: true,
            administrator: admin,
        }
    }

    fn apply(state: &mut SessionState, event: SessionEvent) -> Vec<SessionEffect> {
        SessionReducer::reduce(state, event)
    }

    fn signed_in(admin: bool) -> SessionState {
        let mut state = SessionState::default();
        apply(&mut state, SessionEvent::FetchSuccess(identity(42, admin)));
        state
    }

    // =====================================================================
    // fetch
    // =====================================================================

    #[test]
    fn test_fetch_request_changes_nothing() {
        let mut state = SessionState::default();

        apply(&mut state, SessionEvent::FetchRequest);

        assert_eq!(state, SessionState::default());
    }

    #[test]
    fn test_fetch_success_authenticates() {
        let state = signed_in(false);

        assert!(state.is_authentication_tried);
        assert!(state.is_authenticated());
        assert!(!state.administrator);
        assert!(state.exists_unread_mail);
        assert!(!state.exists_unread_notification);
        assert_eq!(
            state.identity.as_ref().map(|i| i.character_id),
            Some(CharacterId(42))
        );
    }

    #[test]
    fn test_fetch_failure_marks_tried_and_signed_out() {
        let mut state = SessionState::default();

        apply(&mut state, SessionEvent::FetchFailure(FetchFailure::Unauthenticated));

        assert!(state.is_authentication_tried);
        assert!(!state.is_authenticated());
        assert_eq!(state.last_failure, Some(FetchFailure::Unauthenticated));
    }

    #[test]
    fn test_fetch_failure_after_success_clears_identity() {
        let mut state = signed_in(true);

        apply(&mut state, SessionEvent::FetchFailure(FetchFailure::Unreachable));

        assert!(state.identity.is_none());
        assert!(!state.administrator);
        assert!(!state.exists_unread_mail);
        assert!(state.is_authentication_tried);
    }

    #[test]
    fn test_fetch_success_clears_last_failure() {
        let mut state = SessionState::default();
        apply(&mut state, SessionEvent::FetchFailure(FetchFailure::Unreachable));

        apply(&mut state, SessionEvent::FetchSuccess(identity(1, false)));

        assert!(state.last_failure.is_none());
    }

    // =====================================================================
    // sign-in / sign-out
    // =====================================================================

    #[test]
    fn test_sign_in_success_behaves_like_fetch_success() {
        let mut via_sign_in = SessionState::default();
        apply(&mut via_sign_in, SessionEvent::SignInSuccess(identity(42, false)));

        assert_eq!(via_sign_in, signed_in(false));
    }

    #[test]
    fn test_sign_in_failure_keeps_tried_flag_and_emits_notice() {
        let mut state = SessionState::default();

        let effects = apply(
            &mut state,
            SessionEvent::SignInFailure {
                message: "wrong password".into(),
            },
        );

        assert!(!state.is_authentication_tried, "sign-in failure must not resolve the fetch");
        assert_eq!(
            effects,
            vec![SessionEffect::Notice(Notice::error("wrong password"))]
        );
    }

    #[test]
    fn test_sign_in_request_changes_nothing() {
        let mut state = signed_in(false);
        let before = state.clone();

        apply(&mut state, SessionEvent::SignInRequest { key: "alice".into() });

        assert_eq!(state, before);
    }

    #[test]
    fn test_sign_out_resets_but_keeps_tried() {
        let mut state = signed_in(true);

        apply(&mut state, SessionEvent::SignOutSuccess);

        assert!(state.is_authentication_tried);
        assert!(!state.is_authenticated());
        assert!(state.identity.is_none());
        assert!(!state.administrator);
        assert!(!state.exists_unread_mail);
        assert!(!state.exists_unread_notification);
    }

    // =====================================================================
    // unread flags
    // =====================================================================

    #[test]
    fn test_read_all_mails_is_idempotent() {
        let mut state = signed_in(false);

        for _ in 0..3 {
            apply(&mut state, SessionEvent::ReadAllMails);
            assert!(!state.exists_unread_mail);
        }
    }

    #[test]
    fn test_read_notifications_only_touches_notification_flag() {
        let mut state = signed_in(false);
        apply(&mut state, SessionEvent::NotificationArrived);

        apply(&mut state, SessionEvent::ReadNotifications);

        assert!(!state.exists_unread_notification);
        assert!(state.exists_unread_mail);
    }

    #[test]
    fn test_mail_arrived_sets_flag_when_signed_in() {
        let mut state = signed_in(false);
        apply(&mut state, SessionEvent::ReadAllMails);

        apply(&mut state, SessionEvent::MailArrived);

        assert!(state.exists_unread_mail);
    }

    #[test]
    fn test_arrivals_ignored_when_signed_out() {
        let mut state = SessionState::default();

        apply(&mut state, SessionEvent::MailArrived);
        apply(&mut state, SessionEvent::NotificationArrived);

        assert!(!state.exists_unread_mail);
        assert!(!state.exists_unread_notification);
    }

    #[test]
    fn test_notify_emits_notice_without_touching_flags() {
        let mut state = signed_in(false);
        let before = state.clone();

        let effects = apply(&mut state, SessionEvent::Notify(Notice::info("saved")));

        assert_eq!(state, before);
        assert_eq!(effects, vec![SessionEffect::Notice(Notice::info("saved"))]);
    }
}
