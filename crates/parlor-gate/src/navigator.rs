//! The hook through which gates change the browser location.

use std::sync::{Arc, Mutex, PoisonError};

use crate::NavigationCommand;

/// Performs navigation on behalf of a gate.
///
/// The embedding application implements this over its router. Gates
/// call it at most once per mount.
pub trait Navigator: Send + Sync {
    fn navigate(&self, command: &NavigationCommand);
}

impl<N: Navigator + ?Sized> Navigator for Arc<N> {
    fn navigate(&self, command: &NavigationCommand) {
        (**self).navigate(command);
    }
}

/// A [`Navigator`] that only records what it was asked to do.
///
/// Clones share one log, so a test can hand a clone to a watcher and
/// inspect the original afterwards.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    commands: Arc<Mutex<Vec<NavigationCommand>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command received so far, oldest first.
    pub fn commands(&self) -> Vec<NavigationCommand> {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, command: &NavigationCommand) {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(command.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_navigator_shares_log_between_clones() {
        let navigator = RecordingNavigator::new();
        let clone = navigator.clone();

        clone.navigate(&NavigationCommand::Redirect {
            location: "/signin".into(),
        });

        assert_eq!(navigator.commands().len(), 1);
        assert_eq!(navigator.commands()[0].location(), "/signin");
    }
}
