//! Message draft autosave for the Parlor client.
//!
//! The compose view keeps a half-written message in a small store slice so
//! it survives reloads. Keystrokes go to an [`AutoSaver`], which debounces
//! them, persists the latest content through a [`DraftStorage`], and
//! records it in the store. On page load a [`DraftLoader`] restores the
//! persisted draft.
//!
//! ```text
//! keystrokes ──→ AutoSaver ──(quiet for `debounce`)──→ DraftStorage::save
//!                                                        │
//!                                  MessageAutoSaveSuccess ▼
//! DraftStorage::load ──→ DraftLoader ──→ DraftStore ──→ select_auto_saved_message
//! ```

#![allow(async_fn_in_trait)]

mod autosave;
mod error;
mod loader;
mod state;
mod storage;

pub use autosave::{AutoSaver, DraftConfig};
pub use error::DraftError;
pub use loader::DraftLoader;
pub use state::{
    DraftEffect, DraftEvent, DraftReducer, DraftState, DraftStore, is_ready,
    select_auto_saved_message,
};
pub use storage::{DraftStorage, MemoryDraftStorage};
