//! Drives an [`AuthGate`] from session store updates.

use parlor_session::{SessionState, SessionStore, selectors};
use parlor_store::StoreWatcher;

use crate::{AuthGate, GateError, GateState, Navigator};

/// A gate bound to one page location and one session store.
///
/// `run` re-evaluates the gate on every session change until it settles,
/// hands any redirect to the navigator, and returns the final state.
pub struct GateWatcher {
    gate: AuthGate,
    current_path: String,
    subscription: StoreWatcher<SessionState>,
}

impl GateWatcher {
    pub fn new(gate: AuthGate, store: &SessionStore, current_path: impl Into<String>) -> Self {
        Self {
            gate,
            current_path: current_path.into(),
            subscription: store.subscribe(),
        }
    }

    pub fn gate(&self) -> &AuthGate {
        &self.gate
    }

    /// Waits for the gate to settle.
    ///
    /// Resolves immediately when the session was already tried at mount.
    ///
    /// # Errors
    /// [`GateError::StoreClosed`] if every store handle drops while the
    /// gate is still pending.
    pub async fn run(mut self, navigator: &impl Navigator) -> Result<GateState, GateError> {
        loop {
            let state = self.subscription.changed().await?;
            let status = selectors::authentication_status(&state);
            if let Some(command) = self.gate.evaluate(status, &self.current_path) {
                navigator.navigate(&command);
            }
            if self.gate.state().is_terminal() {
                return Ok(self.gate.state());
            }
        }
    }
}
