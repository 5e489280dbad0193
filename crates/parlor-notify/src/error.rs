use parlor_protocol::ProtocolError;

/// Errors that can occur on the notification channel.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// Opening the channel failed.
    #[error("connect failed: {0}")]
    ConnectFailed(#[source] std::io::Error),

    /// Reading from an open channel failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] std::io::Error),

    /// A frame could not be decoded. The channel itself is still usable.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
