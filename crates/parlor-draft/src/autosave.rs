//! Debounced draft persistence.
//!
//! The compose view calls [`AutoSaver::message_auto_save_request`] on every
//! keystroke. A background task holds only the newest content, waits for
//! the input to go quiet, then saves once.
//!
//! ```text
//! request("h") request("he") request("hel")            (quiet)
//!      │            │             │                       │
//!      └────────────┴─────────────┴──── debounce ────────→ save("hel")
//! ```

use std::sync::Arc;
use std::time::Duration;

use parlor_protocol::DraftSnapshot;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::{DraftError, DraftEvent, DraftStorage, DraftStore};

// ---------------------------------------------------------------------------
// DraftConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftConfig {
    /// How long the input must stay unchanged before it is saved.
    ///
    /// Default: 1 second.
    pub autosave_debounce: Duration,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            autosave_debounce: Duration::from_secs(1),
        }
    }
}

// ---------------------------------------------------------------------------
// AutoSaver
// ---------------------------------------------------------------------------

type FlushReply = oneshot::Sender<Result<(), DraftError>>;

/// Handle to the autosave task.
///
/// Dropping the handle saves any content still waiting out its debounce,
/// then the task exits. [`shutdown`](Self::shutdown) does the same and
/// waits for it.
pub struct AutoSaver {
    store: DraftStore,
    latest: watch::Sender<String>,
    flushes: mpsc::Sender<FlushReply>,
    task: JoinHandle<()>,
}

impl AutoSaver {
    /// Spawns the autosave task on the current tokio runtime.
    pub fn spawn<S: DraftStorage>(store: DraftStore, storage: Arc<S>, config: &DraftConfig) -> Self {
        let (latest, latest_rx) = watch::channel(String::new());
        let (flushes, flush_rx) = mpsc::channel(4);
        let task = tokio::spawn(run(
            store.clone(),
            storage,
            config.autosave_debounce,
            latest_rx,
            flush_rx,
        ));
        Self {
            store,
            latest,
            flushes,
            task,
        }
    }

    /// Queues `content` for saving. Never blocks; a newer call replaces
    /// content that has not been saved yet.
    pub fn message_auto_save_request(&self, content: impl Into<String>) {
        let content = content.into();
        self.store
            .dispatch(DraftEvent::MessageAutoSaveRequest(content.clone()));
        self.latest.send_replace(content);
    }

    /// Saves pending content now instead of waiting for the debounce.
    ///
    /// # Errors
    /// - [`DraftError::Storage`] if the save failed
    /// - [`DraftError::Stopped`] if the task is gone
    pub async fn flush(&self) -> Result<(), DraftError> {
        let (reply, response) = oneshot::channel();
        self.flushes
            .send(reply)
            .await
            .map_err(|_| DraftError::Stopped)?;
        response.await.map_err(|_| DraftError::Stopped)?
    }

    /// Stops accepting content, saves what is pending, and waits for the
    /// task to finish.
    pub async fn shutdown(self) {
        let Self {
            latest,
            flushes,
            task,
            ..
        } = self;
        drop(latest);
        drop(flushes);
        if let Err(e) = task.await {
            tracing::warn!(error = %e, "autosave task ended abnormally");
        }
    }
}

async fn run<S: DraftStorage>(
    store: DraftStore,
    storage: Arc<S>,
    debounce: Duration,
    mut latest: watch::Receiver<String>,
    mut flushes: mpsc::Receiver<FlushReply>,
) {
    let mut pending: Option<String> = None;
    let deadline = time::sleep(debounce);
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            changed = latest.changed() => {
                if changed.is_err() {
                    break;
                }
                pending = Some(latest.borrow_and_update().clone());
                deadline.as_mut().reset(Instant::now() + debounce);
            }
            () = deadline.as_mut(), if pending.is_some() => {
                if let Some(content) = pending.take() {
                    if persist(&store, storage.as_ref(), &content).await.is_err() {
                        pending = Some(content);
                        deadline.as_mut().reset(Instant::now() + debounce);
                    }
                }
            }
            Some(reply) = flushes.recv() => {
                // Pick up content sent just before the flush request.
                if latest.has_changed().unwrap_or(false) {
                    pending = Some(latest.borrow_and_update().clone());
                }
                let result = match pending.take() {
                    Some(content) => {
                        let result = persist(&store, storage.as_ref(), &content).await;
                        if result.is_err() {
                            pending = Some(content);
                            deadline.as_mut().reset(Instant::now() + debounce);
                        }
                        result
                    }
                    None => Ok(()),
                };
                let _ = reply.send(result);
            }
        }
    }

    if let Some(content) = pending.take() {
        if persist(&store, storage.as_ref(), &content).await.is_err() {
            tracing::error!(len = content.len(), "autosave task stopped with an unsaved draft");
        }
    }
    tracing::debug!("autosave task stopped");
}

/// Saves `content`. A failed save leaves it with the caller to retry.
async fn persist<S: DraftStorage>(
    store: &DraftStore,
    storage: &S,
    content: &str,
) -> Result<(), DraftError> {
    let snapshot = DraftSnapshot::with_autosave(content);
    match storage.save(&snapshot).await {
        Ok(()) => {
            tracing::debug!(len = content.len(), "draft saved");
            store.dispatch(DraftEvent::MessageAutoSaveSuccess(snapshot.message.autosave));
            Ok(())
        }
        Err(e) => {
            tracing::warn!(error = %e, "draft save failed, keeping it pending");
            Err(e)
        }
    }
}
