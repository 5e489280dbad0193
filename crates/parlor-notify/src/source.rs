//! Where pushed notifications come from.

use std::future::Future;

use parlor_protocol::PushNotification;

use crate::NotifyError;

/// A stream of pushed notifications.
pub trait NotificationSource: Send + 'static {
    /// Receives the next notification.
    ///
    /// Returns `Ok(None)` when the channel is cleanly closed. A
    /// [`NotifyError::Protocol`] error means one frame was unreadable;
    /// the caller may keep reading.
    fn next(&mut self) -> impl Future<Output = Result<Option<PushNotification>, NotifyError>> + Send;
}
