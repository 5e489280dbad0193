//! Keeps the notification channel open for as long as a session exists.

use parlor_session::{SessionBackend, SessionController, SessionState, selectors};

use crate::{NotifyConfig, NotifyError, WebSocketSource, pump};

fn notification_token(state: &SessionState) -> Option<&str> {
    selectors::identity(state).map(|identity| identity.notification_token.as_str())
}

/// Connects, pumps, and reconnects until the session signs out.
///
/// An open channel belongs to the token it was opened with. When the
/// session signs out or switches character, the channel is closed at once
/// and reopened with the new token, if any. Returns `Ok(())` once no
/// session is present.
///
/// # Errors
/// The last connection error once [`ReconnectPolicy`](crate::ReconnectPolicy)
/// gives up.
pub async fn listen<B: SessionBackend>(
    config: &NotifyConfig,
    controller: &SessionController<B>,
) -> Result<(), NotifyError> {
    let mut attempt = 0u32;

    loop {
        let token = controller.store().with(|state| notification_token(state).map(str::to_owned));
        let Some(token) = token else {
            tracing::info!("no session, notification listener stopping");
            return Ok(());
        };

        let outcome = match WebSocketSource::connect(&config.url, &token).await {
            Ok(mut source) => {
                attempt = 0;
                let mut watcher = controller.store().subscribe();
                let session_moved_on = async {
                    loop {
                        match watcher.changed().await {
                            Ok(state) if notification_token(&state) == Some(token.as_str()) => {}
                            Ok(_) => return,
                            // Unreachable while `controller` holds the store.
                            Err(_) => std::future::pending::<()>().await,
                        }
                    }
                };

                let pumped = tokio::select! {
                    result = pump(&mut source, controller) => Some(result),
                    () = session_moved_on => None,
                };
                match pumped {
                    Some(result) => result,
                    None => {
                        tracing::info!("session changed, closing notification channel");
                        if let Err(e) = source.close().await {
                            tracing::debug!(error = %e, "close handshake failed");
                        }
                        continue;
                    }
                }
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => tracing::info!(url = %config.url, "notification channel closed by server"),
            Err(e) => {
                attempt += 1;
                if config.reconnect.gives_up_after(attempt) {
                    tracing::warn!(attempt, error = %e, "notification channel gave up");
                    return Err(e);
                }
                tracing::warn!(attempt, error = %e, "notification channel failed");
            }
        }

        let delay = config.reconnect.delay_for(attempt.max(1));
        tokio::time::sleep(delay).await;
    }
}
