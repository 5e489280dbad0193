//! The store: single source of truth for one state slice.
//!
//! # Concurrency note
//!
//! Dispatch is synchronous and serialized through the watch channel's
//! write lock, so events apply strictly in dispatch order with
//! last-write-wins semantics. Readers never see a half-applied event.
//! All subscribers read from the same channel, so two gates watching one
//! store observe identical snapshots.

use std::sync::Arc;

use tokio::sync::watch;

use crate::{Reducer, StoreError};

/// A clonable handle to a state slice.
///
/// Cloning is cheap (an `Arc` bump); all clones share the same state.
/// When the last handle drops, subscribers get [`StoreError::Closed`].
pub struct Store<R: Reducer> {
    sender: Arc<watch::Sender<R::State>>,
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<R: Reducer> Store<R> {
    /// Creates a store holding `initial`.
    pub fn new(initial: R::State) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Applies `event` and returns the effects the reducer produced.
    ///
    /// Subscribers are woken only when the state actually changed.
    pub fn dispatch(&self, event: R::Event) -> Vec<R::Effect> {
        tracing::trace!(?event, "dispatch");
        let mut effects = Vec::new();
        self.sender.send_if_modified(|state| {
            let before = state.clone();
            effects = R::reduce(state, event);
            *state != before
        });
        effects
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> R::State {
        self.sender.borrow().clone()
    }

    /// Reads the current state without cloning it.
    ///
    /// The closure runs under the channel's read lock; keep it short and
    /// never dispatch from inside it.
    pub fn with<T>(&self, f: impl FnOnce(&R::State) -> T) -> T {
        f(&self.sender.borrow())
    }

    /// Applies a pure projection (a selector) to the current state.
    pub fn select<T>(&self, selector: fn(&R::State) -> T) -> T {
        self.with(selector)
    }

    /// Subscribes to state changes.
    ///
    /// The returned watcher starts with the current snapshot marked as
    /// unseen, so a first `changed()` call resolves immediately.
    pub fn subscribe(&self) -> StoreWatcher<R::State> {
        let mut receiver = self.sender.subscribe();
        receiver.mark_changed();
        StoreWatcher { receiver }
    }
}

impl<R: Reducer> Default for Store<R>
where
    R::State: Default,
{
    fn default() -> Self {
        Self::new(R::State::default())
    }
}

/// A subscription to a [`Store`].
pub struct StoreWatcher<S> {
    receiver: watch::Receiver<S>,
}

impl<S: Clone> StoreWatcher<S> {
    /// Waits until the state differs from the last one this watcher saw,
    /// then returns it.
    ///
    /// # Errors
    /// Returns [`StoreError::Closed`] once every store handle is gone.
    pub async fn changed(&mut self) -> Result<S, StoreError> {
        self.receiver
            .changed()
            .await
            .map_err(|_| StoreError::Closed)?;
        Ok(self.receiver.borrow_and_update().clone())
    }

    /// Returns the latest state and marks it as seen.
    pub fn current(&mut self) -> S {
        self.receiver.borrow_and_update().clone()
    }
}
