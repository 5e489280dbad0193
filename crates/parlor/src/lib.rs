//! # Parlor
//!
//! Client core for a character-driven roleplay web app.
//!
//! Parlor keeps track of who is signed in, decides whether a page may
//! render or must send the visitor to sign in, and autosaves the message
//! being composed. The embedding application supplies the backend calls
//! ([`SessionBackend`](parlor_session::SessionBackend)), the draft storage
//! ([`DraftStorage`](parlor_draft::DraftStorage)), and the router
//! ([`Navigator`](parlor_gate::Navigator)).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use parlor::prelude::*;
//!
//! # async fn run() -> Result<(), ParlorError> {
//! let client = ParlorClientBuilder::new()
//!     .sign_in_path("/signin")
//!     .build(MemoryBackend::new(), MemoryDraftStorage::new());
//!
//! client.bootstrap().await;
//!
//! let navigator = RecordingNavigator::new();
//! let gate = client.require_administrator_authenticated();
//! match client.watch_gate(gate, "/control", &navigator).await? {
//!     GateState::Granted => { /* render the control panel */ }
//!     _ => { /* the navigator was sent to /signin?for=%2Fcontrol */ }
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod logging;

pub use client::{ParlorClient, ParlorClientBuilder};
pub use config::ClientConfig;
pub use error::ParlorError;
pub use logging::init_tracing;

pub use parlor_draft as draft;
pub use parlor_gate as gate;
pub use parlor_notify as notify;
pub use parlor_protocol as protocol;
pub use parlor_session as session;
pub use parlor_store as store;

/// The common surface in one import.
pub mod prelude {
    pub use crate::{ClientConfig, ParlorClient, ParlorClientBuilder, ParlorError};
    pub use parlor_draft::{DraftConfig, DraftStorage, MemoryDraftStorage};
    pub use parlor_gate::{
        Access, AuthGate, GateState, NavigationCommand, Navigator, RecordingNavigator,
    };
    pub use parlor_notify::{NotifyConfig, ReconnectPolicy};
    pub use parlor_protocol::{CharacterId, CsrfHeader, IdentityResponse};
    pub use parlor_session::{
        AuthenticationStatus, BackendError, MemoryBackend, Notice, SessionBackend,
        SessionConfig, selectors,
    };
}
