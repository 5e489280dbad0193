//! Restores the persisted draft into the store.

use std::sync::Arc;

use crate::{DraftEffect, DraftEvent, DraftStorage, DraftStore};

pub struct DraftLoader<S: DraftStorage> {
    store: DraftStore,
    storage: Arc<S>,
}

impl<S: DraftStorage> DraftLoader<S> {
    pub fn new(store: DraftStore, storage: Arc<S>) -> Self {
        Self { store, storage }
    }

    /// Loads the draft, dispatches the outcome, and returns the effects it
    /// produced.
    ///
    /// The slice is ready afterwards whether or not the load succeeded. A
    /// failed load yields [`DraftEffect::LoadFailed`].
    pub async fn load_request(&self) -> Vec<DraftEffect> {
        self.store.dispatch(DraftEvent::LoadRequest);

        match self.storage.load().await {
            Ok(snapshot) => {
                tracing::debug!(len = snapshot.message.autosave.len(), "draft loaded");
                self.store.dispatch(DraftEvent::LoadSuccess(snapshot))
            }
            Err(e) => {
                tracing::warn!(error = %e, "draft load failed, starting empty");
                self.store.dispatch(DraftEvent::LoadFailure(e.to_string()))
            }
        }
    }
}
