//! Wire shapes for Parlor.
//!
//! This crate defines the data the client core exchanges with the
//! backend collaborator:
//!
//! - **Types** ([`IdentityResponse`], [`SignInRequest`], [`PushNotification`],
//!   [`DraftSnapshot`], etc.): the structures that get serialized to JSON
//!   and back.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those structures are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]): what can go wrong while doing so.
//!
//! # Architecture
//!
//! The protocol layer knows nothing about stores, gates, or sockets. It
//! only knows what the backend sends and what it expects back.
//!
//! ```text
//! Backend (JSON) → Protocol (IdentityResponse) → Session (SessionState)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    CSRF_HEADER_NAME, CharacterId, CsrfHeader, DraftSnapshot, IdentityResponse,
    MessageDraft, NoticeLevel, PushNotification, SignInRequest,
};
