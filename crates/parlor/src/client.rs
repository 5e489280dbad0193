//! `ParlorClient` builder and the client handle.
//!
//! This is the entry point for a page. It ties the layers together:
//! backend → session store → gates, and storage → draft store.

use std::sync::Arc;
use std::time::Duration;

use parlor_draft::{
    AutoSaver, DraftEffect, DraftLoader, DraftStorage, DraftStore, is_ready,
    select_auto_saved_message,
};
use parlor_gate::{AuthGate, GateState, GateWatcher, Navigator};
use parlor_notify::NotifyConfig;
use parlor_protocol::{CharacterId, CsrfHeader};
use parlor_session::{
    AuthenticationStatus, Notice, SessionBackend, SessionConfig, SessionController,
    SessionStore, selectors,
};
use tokio::sync::broadcast;

use crate::{ClientConfig, ParlorError};

/// Builder for a [`ParlorClient`].
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
///
/// use parlor::prelude::*;
///
/// # #[tokio::main] async fn main() {
/// let client = ParlorClientBuilder::new()
///     .sign_in_path("/signin")
///     .autosave_debounce(Duration::from_millis(800))
///     .build(MemoryBackend::new(), MemoryDraftStorage::new());
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParlorClientBuilder {
    config: ClientConfig,
}

impl ParlorClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn sign_in_path(mut self, path: impl Into<String>) -> Self {
        self.config.sign_in_path = path.into();
        self
    }

    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.config.session = config;
        self
    }

    pub fn autosave_debounce(mut self, debounce: Duration) -> Self {
        self.config.draft.autosave_debounce = debounce;
        self
    }

    /// Enables the push-notification channel.
    pub fn notify(mut self, config: NotifyConfig) -> Self {
        self.config.notify = Some(config);
        self
    }

    /// Creates the stores and starts the autosave task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn build<B, S>(self, backend: B, draft_storage: S) -> ParlorClient<B, S>
    where
        B: SessionBackend,
        S: DraftStorage,
    {
        let session = SessionController::new(
            SessionStore::default(),
            backend,
            self.config.session.clone(),
        );
        let drafts = DraftStore::default();
        let storage = Arc::new(draft_storage);
        let loader = DraftLoader::new(drafts.clone(), Arc::clone(&storage));
        let autosaver = AutoSaver::spawn(drafts.clone(), storage, &self.config.draft);

        tracing::debug!(sign_in_path = %self.config.sign_in_path, "parlor client built");

        ParlorClient {
            config: self.config,
            session,
            drafts,
            loader,
            autosaver,
        }
    }
}

/// One page's view of the client core.
pub struct ParlorClient<B: SessionBackend, S: DraftStorage> {
    config: ClientConfig,
    session: SessionController<B>,
    drafts: DraftStore,
    loader: DraftLoader<S>,
    autosaver: AutoSaver,
}

impl<B: SessionBackend, S: DraftStorage> ParlorClient<B, S> {
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Session
    // -----------------------------------------------------------------------

    /// Resolves the session and restores the draft, concurrently.
    ///
    /// Never fails: a visitor without a session is a normal outcome, and
    /// a draft that cannot be restored is reported as an error notice.
    pub async fn bootstrap(&self) -> AuthenticationStatus {
        let (session, draft_effects) =
            tokio::join!(self.session.fetch_session(), self.loader.load_request());

        if let Err(e) = session {
            tracing::debug!(error = %e, "bootstrap finished without a session");
        }
        for effect in draft_effects {
            match effect {
                DraftEffect::LoadFailed { reason } => self.session.notify(Notice::error(format!(
                    "your saved draft could not be restored: {reason}"
                ))),
            }
        }
        self.authentication_status()
    }

    pub async fn sign_in(&self, key: &str, password: &str) -> Result<CharacterId, ParlorError> {
        Ok(self.session.sign_in(key, password).await?)
    }

    /// Saves the draft, then ends the session.
    pub async fn sign_out(&self) -> Result<(), ParlorError> {
        if let Err(e) = self.autosaver.flush().await {
            tracing::warn!(error = %e, "draft not saved before sign-out");
        }
        Ok(self.session.sign_out().await?)
    }

    pub fn authentication_status(&self) -> AuthenticationStatus {
        self.session.store().select(selectors::authentication_status)
    }

    /// The header for a state-mutating request, `None` while signed out.
    pub fn csrf_header(&self) -> Option<CsrfHeader> {
        self.session.store().select(selectors::csrf_header)
    }

    pub fn read_all_mails(&self) {
        self.session.read_all_mails();
    }

    pub fn read_notifications(&self) {
        self.session.read_notifications();
    }

    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.session.subscribe_notices()
    }

    pub fn session(&self) -> &SessionController<B> {
        &self.session
    }

    pub fn session_store(&self) -> &SessionStore {
        self.session.store()
    }

    // -----------------------------------------------------------------------
    // Gates
    // -----------------------------------------------------------------------

    pub fn require_authenticated(&self) -> AuthGate {
        AuthGate::require_authenticated(&self.config.sign_in_path)
    }

    pub fn require_administrator_authenticated(&self) -> AuthGate {
        AuthGate::require_administrator_authenticated(&self.config.sign_in_path)
    }

    /// Runs `gate` for a page at `current_path` until it settles.
    pub async fn watch_gate(
        &self,
        gate: AuthGate,
        current_path: &str,
        navigator: &impl Navigator,
    ) -> Result<GateState, ParlorError> {
        let watcher = GateWatcher::new(gate, self.session.store(), current_path);
        Ok(watcher.run(navigator).await?)
    }

    // -----------------------------------------------------------------------
    // Drafts
    // -----------------------------------------------------------------------

    /// The restored or last saved draft, `None` until the draft loads.
    pub fn auto_saved_message(&self) -> Option<String> {
        self.drafts
            .with(|state| select_auto_saved_message(state).map(str::to_owned))
    }

    /// Whether the draft has finished loading, successfully or not.
    pub fn is_draft_ready(&self) -> bool {
        self.drafts.select(is_ready)
    }

    pub fn message_auto_save_request(&self, content: impl Into<String>) {
        self.autosaver.message_auto_save_request(content);
    }

    pub async fn flush_draft(&self) -> Result<(), ParlorError> {
        Ok(self.autosaver.flush().await?)
    }

    pub fn draft_store(&self) -> &DraftStore {
        &self.drafts
    }

    // -----------------------------------------------------------------------
    // Notifications
    // -----------------------------------------------------------------------

    /// Keeps the push-notification channel open until sign-out.
    ///
    /// Returns immediately when no channel is configured.
    pub async fn listen_notifications(&self) -> Result<(), ParlorError> {
        let Some(config) = &self.config.notify else {
            return Ok(());
        };
        Ok(parlor_notify::listen(config, &self.session).await?)
    }

    /// Saves any pending draft and stops the autosave task.
    pub async fn shutdown(self) {
        self.autosaver.shutdown().await;
    }
}
