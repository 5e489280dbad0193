//! Core protocol types for the Parlor backend.
//!
//! Every type here crosses the boundary between the client core and the
//! backend: identity responses, sign-in bodies, push notifications, and
//! persisted drafts. Field names follow the backend's camelCase JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// The identity of a signed-in character.
///
/// `#[serde(transparent)]` keeps it a plain number on the wire, so
/// `CharacterId(42)` is `42` in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub u64);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C-{}", self.0)
    }
}

/// The body returned by the identity fetch and by a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResponse {
    /// The signed-in character.
    pub id: CharacterId,
    /// Anti-forgery token for state-mutating requests.
    pub csrf_token: String,
    /// Credential for the push-notification channel.
    pub notification_token: String,
    pub exists_unread_notification: bool,
    pub exists_unread_mail: bool,
    /// Elevated privileges (control panel access).
    pub administrator: bool,
}

impl IdentityResponse {
    /// Checks the rules serde cannot express.
    ///
    /// An empty CSRF token would leave the session authenticated but
    /// unable to issue any mutating request.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.csrf_token.trim().is_empty() {
            return Err(ProtocolError::InvalidMessage(format!(
                "identity {} carries an empty csrf token",
                self.id
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sign-in
// ---------------------------------------------------------------------------

/// The sign-in request body: `{ "key": ..., "password": ... }`.
///
/// `Debug` is implemented by hand so the password never reaches a log line.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInRequest {
    /// Character key (the login name).
    pub key: String,
    pub password: String,
}

impl SignInRequest {
    pub fn new(key: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInRequest")
            .field("key", &self.key)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// CSRF header
// ---------------------------------------------------------------------------

/// Header name the backend checks on every state-mutating request.
pub const CSRF_HEADER_NAME: &str = "X-CSRF-Token";

/// A ready-to-attach CSRF header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfHeader {
    pub name: &'static str,
    pub value: String,
}

impl CsrfHeader {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            name: CSRF_HEADER_NAME,
            value: token.into(),
        }
    }

    /// Returns the header as a `(name, value)` pair, the form most HTTP
    /// clients accept.
    pub fn as_pair(&self) -> (&'static str, &str) {
        (self.name, &self.value)
    }
}

// ---------------------------------------------------------------------------
// Push notifications
// ---------------------------------------------------------------------------

/// Severity of a transient notice shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    #[default]
    Info,
    Error,
}

/// A message pushed by the backend over the notification channel.
///
/// Internally tagged: `{ "type": "NewMail" }` or
/// `{ "type": "Notice", "level": "info", "text": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PushNotification {
    /// A new in-game mail arrived for the signed-in character.
    NewMail,
    /// A new notification (reply, mention, announcement) arrived.
    NewNotification,
    /// A transient message to display; carries no unread semantics.
    Notice {
        #[serde(default)]
        level: NoticeLevel,
        text: String,
    },
}

// ---------------------------------------------------------------------------
// Drafts
// ---------------------------------------------------------------------------

/// The compose-message part of a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MessageDraft {
    pub autosave: String,
}

/// The persisted draft: `{ "message": { "autosave": "..." } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DraftSnapshot {
    pub message: MessageDraft,
}

impl DraftSnapshot {
    pub fn with_autosave(content: impl Into<String>) -> Self {
        Self {
            message: MessageDraft {
                autosave: content.into(),
            },
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
