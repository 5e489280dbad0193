//! Authentication gates for the Parlor client.
//!
//! A page that needs a signed-in visitor (or an administrator) mounts an
//! [`AuthGate`]. The gate waits until the session store has resolved the
//! initial identity fetch, then either lets the page render or issues a
//! single redirect to the sign-in page carrying the current location.
//!
//! # How it fits in the stack
//!
//! ```text
//! Page / view layer            ← Access::{Loading, Render, Withhold}
//!     ↕
//! Gate layer (this crate)      ← AuthGate, GateWatcher, Navigator
//!     ↕
//! Session layer (below)        ← AuthenticationStatus, SessionStore
//! ```
//!
//! The gate itself is a plain state machine with no I/O; [`GateWatcher`]
//! drives it from store subscriptions.

mod error;
mod gate;
mod location;
mod navigator;
mod requirement;
mod watcher;

pub use error::GateError;
pub use gate::{Access, AuthGate, GateState, NavigationCommand};
pub use location::{RETURN_PARAM, return_location, sign_in_location};
pub use navigator::{Navigator, RecordingNavigator};
pub use requirement::Requirement;
pub use watcher::GateWatcher;
