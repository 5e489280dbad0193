//! Session and authentication state for the Parlor client.
//!
//! This crate owns everything the rest of the client knows about who is
//! signed in:
//!
//! 1. **State**: [`SessionState`], changed only through [`SessionEvent`]s
//!    applied by [`SessionReducer`]
//! 2. **Selectors**: pure read accessors in [`selectors`]
//! 3. **Backend**: the [`SessionBackend`] trait the embedding app
//!    implements against its REST API
//! 4. **Controller**: [`SessionController`], which calls the backend and
//!    dispatches the resulting request/success/failure events
//!
//! # How it fits in the stack
//!
//! ```text
//! Gate / Notify layers (above)  ← read AuthenticationStatus, dispatch unread events
//!     ↕
//! Session layer (this crate)    ← identity, csrf token, unread flags
//!     ↕
//! Store + Protocol (below)      ← Store<R>, IdentityResponse
//! ```

#![allow(async_fn_in_trait)]

mod backend;
mod controller;
mod error;
mod reducer;
pub mod selectors;
mod session;

pub use backend::{MemoryBackend, SessionBackend};
pub use controller::SessionController;
pub use error::{BackendError, SessionError};
pub use reducer::{Notice, SessionEffect, SessionEvent, SessionReducer, SessionStore};
pub use selectors::{AuthenticationStatus, require_csrf_header};
pub use session::{FetchFailure, Identity, SessionConfig, SessionState};
