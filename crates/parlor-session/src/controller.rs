//! The session controller: backend calls wrapped in session events.
//!
//! Every operation follows the same shape: dispatch the request marker,
//! await the backend, dispatch success or failure. Views never call the
//! backend directly and never write the store directly.
//!
//! ```text
//! fetch_session() ──→ FetchRequest ──→ backend ──→ FetchSuccess
//!                                         │
//!                         (unreachable, retries left) ──→ sleep ──→ backend
//!                                         │
//!                                         └──→ FetchFailure(reason)
//! ```

use std::sync::Arc;

use parlor_protocol::{CharacterId, IdentityResponse, SignInRequest};
use tokio::sync::broadcast;

use crate::{
    BackendError, FetchFailure, Notice, SessionBackend, SessionConfig, SessionEffect,
    SessionError, SessionEvent, SessionStore, selectors,
};

/// Capacity of the notice broadcast. Slow subscribers skip old notices.
const NOTICE_CHANNEL_SIZE: usize = 16;

/// Drives the session store from backend results.
///
/// Cheap to clone; clones share the store, backend, and notice channel.
pub struct SessionController<B: SessionBackend> {
    store: SessionStore,
    backend: Arc<B>,
    config: SessionConfig,
    notices: broadcast::Sender<Notice>,
}

impl<B: SessionBackend> Clone for SessionController<B> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            backend: Arc::clone(&self.backend),
            config: self.config.clone(),
            notices: self.notices.clone(),
        }
    }
}

impl<B: SessionBackend> SessionController<B> {
    pub fn new(store: SessionStore, backend: impl Into<Arc<B>>, config: SessionConfig) -> Self {
        let (notices, _) = broadcast::channel(NOTICE_CHANNEL_SIZE);
        Self {
            store,
            backend: backend.into(),
            config,
            notices,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Subscribes to transient notices (sign-in errors, pushed messages).
    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    /// Applies `event` to the store and forwards any notices it produced.
    pub fn dispatch(&self, event: SessionEvent) -> Vec<SessionEffect> {
        let effects = self.store.dispatch(event);
        for effect in &effects {
            match effect {
                SessionEffect::Notice(notice) => {
                    tracing::debug!(level = ?notice.level, text = %notice.text, "notice");
                    // No subscribers is fine: nobody is showing notices.
                    let _ = self.notices.send(notice.clone());
                }
            }
        }
        effects
    }

    /// Resolves the initial "who am I" question.
    ///
    /// Always leaves the store with `is_authentication_tried == true`.
    /// Unreachable-backend errors are retried per [`SessionConfig`];
    /// a 401 is final.
    ///
    /// # Errors
    /// Returns the backend error that ended the attempt. The store has
    /// already been updated by then; the error is informational.
    pub async fn fetch_session(&self) -> Result<CharacterId, SessionError> {
        self.dispatch(SessionEvent::FetchRequest);

        let mut attempt = 0;
        loop {
            let result = self.backend.fetch_identity().await.and_then(checked);
            match result {
                Ok(identity) => {
                    let character_id = identity.id;
                    tracing::info!(
                        %character_id,
                        administrator = identity.administrator,
                        "session restored"
                    );
                    self.dispatch(SessionEvent::FetchSuccess(identity));
                    return Ok(character_id);
                }
                Err(BackendError::Unreachable(reason)) if attempt < self.config.fetch_retries => {
                    attempt += 1;
                    tracing::warn!(attempt, %reason, "identity fetch failed, retrying");
                    tokio::time::sleep(self.config.fetch_retry_delay).await;
                }
                Err(e) => {
                    let failure = match e {
                        BackendError::Unauthorized => FetchFailure::Unauthenticated,
                        _ => FetchFailure::Unreachable,
                    };
                    tracing::info!(error = %e, ?failure, "no session");
                    self.dispatch(SessionEvent::FetchFailure(failure));
                    return Err(e.into());
                }
            }
        }
    }

    /// Signs in with a character key and password.
    ///
    /// Empty input is rejected locally without a backend call. Every
    /// failure is also surfaced as an error notice.
    pub async fn sign_in(&self, key: &str, password: &str) -> Result<CharacterId, SessionError> {
        let request = SignInRequest::new(key.trim(), password);
        if request.key.is_empty() {
            return Err(self.reject("a character key is required"));
        }
        if request.password.is_empty() {
            return Err(self.reject("a password is required"));
        }

        self.dispatch(SessionEvent::SignInRequest {
            key: request.key.clone(),
        });

        match self.backend.sign_in(&request).await.and_then(checked) {
            Ok(identity) => {
                let character_id = identity.id;
                tracing::info!(%character_id, key = %request.key, "signed in");
                self.dispatch(SessionEvent::SignInSuccess(identity));
                Ok(character_id)
            }
            Err(e) => {
                tracing::warn!(key = %request.key, error = %e, "sign-in failed");
                self.dispatch(SessionEvent::SignInFailure {
                    message: sign_in_failure_message(&e),
                });
                Err(e.into())
            }
        }
    }

    /// Ends the session.
    ///
    /// # Errors
    /// - [`SessionError::MissingCsrfToken`]: not signed in; nothing sent
    /// - [`SessionError::Backend`]: backend refused; state untouched
    pub async fn sign_out(&self) -> Result<(), SessionError> {
        let csrf = self.store.with(selectors::require_csrf_header)?;

        match self.backend.sign_out(&csrf).await {
            Ok(()) => {
                tracing::info!("signed out");
                self.dispatch(SessionEvent::SignOutSuccess);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "sign-out failed");
                self.dispatch(SessionEvent::Notify(Notice::error(format!(
                    "sign-out failed: {e}"
                ))));
                Err(e.into())
            }
        }
    }

    pub fn read_all_mails(&self) {
        self.dispatch(SessionEvent::ReadAllMails);
    }

    pub fn read_notifications(&self) {
        self.dispatch(SessionEvent::ReadNotifications);
    }

    /// New mail was detected. Ignored while signed out.
    pub fn mail_arrived(&self) {
        self.dispatch(SessionEvent::MailArrived);
    }

    pub fn notification_arrived(&self) {
        self.dispatch(SessionEvent::NotificationArrived);
    }

    pub fn notify(&self, notice: Notice) {
        self.dispatch(SessionEvent::Notify(notice));
    }

    fn reject(&self, message: &str) -> SessionError {
        self.dispatch(SessionEvent::SignInFailure {
            message: message.to_string(),
        });
        SessionError::InvalidCredentials(message.to_string())
    }
}

/// Turns a well-formed but rule-breaking identity into a backend error.
fn checked(identity: IdentityResponse) -> Result<IdentityResponse, BackendError> {
    identity
        .validate()
        .map_err(|e| BackendError::Malformed(e.to_string()))?;
    Ok(identity)
}

fn sign_in_failure_message(error: &BackendError) -> String {
    match error {
        BackendError::Unauthorized => "the character key or password is incorrect".into(),
        BackendError::Unreachable(_) => "could not reach the server, try again".into(),
        BackendError::Rejected { message, .. } => message.clone(),
        BackendError::Malformed(_) => "the server sent an unexpected response".into(),
    }
}

// =========================================================================
// Tests
// =========================================================================
