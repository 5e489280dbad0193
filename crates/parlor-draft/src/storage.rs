//! Where drafts are persisted.

use std::future::Future;

use parlor_protocol::DraftSnapshot;
use tokio::sync::Mutex;

use crate::DraftError;

/// Persistence for the draft slice.
///
/// In a browser this is local storage or a backend endpoint; the client
/// core only needs load and save.
pub trait DraftStorage: Send + Sync + 'static {
    /// Loads the persisted draft. A missing draft is `Ok(default)`, not an
    /// error.
    fn load(&self) -> impl Future<Output = Result<DraftSnapshot, DraftError>> + Send;

    fn save(&self, snapshot: &DraftSnapshot) -> impl Future<Output = Result<(), DraftError>> + Send;
}

#[derive(Default)]
struct MemoryInner {
    snapshot: DraftSnapshot,
    saves: u32,
    failing: bool,
}

/// An in-process [`DraftStorage`] for tests and the console demo.
#[derive(Default)]
pub struct MemoryDraftStorage {
    inner: Mutex<MemoryInner>,
}

impl MemoryDraftStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `content` already persisted.
    pub fn with_autosave(mut self, content: impl Into<String>) -> Self {
        self.inner.get_mut().snapshot = DraftSnapshot::with_autosave(content);
        self
    }

    /// Makes every call fail until switched back.
    pub async fn set_failing(&self, failing: bool) {
        self.inner.lock().await.failing = failing;
    }

    /// The currently persisted content.
    pub async fn saved(&self) -> String {
        self.inner.lock().await.snapshot.message.autosave.clone()
    }

    /// Number of successful saves.
    pub async fn save_count(&self) -> u32 {
        self.inner.lock().await.saves
    }
}

impl DraftStorage for MemoryDraftStorage {
    async fn load(&self) -> Result<DraftSnapshot, DraftError> {
        let inner = self.inner.lock().await;
        if inner.failing {
            return Err(DraftError::Storage("storage unavailable".into()));
        }
        Ok(inner.snapshot.clone())
    }

    async fn save(&self, snapshot: &DraftSnapshot) -> Result<(), DraftError> {
        let mut inner = self.inner.lock().await;
        if inner.failing {
            return Err(DraftError::Storage("storage unavailable".into()));
        }
        inner.snapshot = snapshot.clone();
        inner.saves += 1;
        Ok(())
    }
}
