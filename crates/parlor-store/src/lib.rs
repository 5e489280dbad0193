//! State containers for Parlor.
//!
//! Client state lives in explicitly owned [`Store`]s rather than globals, so
//! every test (and every embedding application) can build isolated
//! instances.
//!
//! # Key types
//!
//! - [`Reducer`]: the trait each state slice implements: a closed event
//!   enum plus a pure `(state, event) → state` function
//! - [`Store`]: the shared, clonable handle that applies events in
//!   dispatch order and publishes snapshots
//! - [`StoreWatcher`]: a subscription that wakes on every changed snapshot

mod error;
mod reducer;
mod store;

pub use error::StoreError;
pub use reducer::Reducer;
pub use store::{Store, StoreWatcher};
