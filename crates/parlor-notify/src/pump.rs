//! Feeds a notification source into the session store.

use parlor_protocol::PushNotification;
use parlor_session::{Notice, SessionBackend, SessionController};

use crate::{NotificationSource, NotifyError};

/// Applies one pushed notification to the session.
pub fn apply<B: SessionBackend>(controller: &SessionController<B>, notification: PushNotification) {
    match notification {
        PushNotification::NewMail => controller.mail_arrived(),
        PushNotification::NewNotification => controller.notification_arrived(),
        PushNotification::Notice { level, text } => controller.notify(Notice { level, text }),
    }
}

/// Reads `source` until it closes, applying every notification.
///
/// Unreadable frames are logged and skipped.
///
/// # Errors
/// Any source error other than [`NotifyError::Protocol`].
pub async fn pump<S, B>(source: &mut S, controller: &SessionController<B>) -> Result<(), NotifyError>
where
    S: NotificationSource,
    B: SessionBackend,
{
    loop {
        match source.next().await {
            Ok(Some(notification)) => {
                tracing::debug!(?notification, "push notification");
                apply(controller, notification);
            }
            Ok(None) => {
                tracing::debug!("notification channel closed");
                return Ok(());
            }
            Err(NotifyError::Protocol(e)) => {
                tracing::warn!(error = %e, "skipping unreadable notification");
            }
            Err(e) => return Err(e),
        }
    }
}
