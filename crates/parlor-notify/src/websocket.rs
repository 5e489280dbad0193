//! WebSocket notification source using `tokio-tungstenite`.

use futures_util::StreamExt;
use parlor_protocol::{Codec, JsonCodec, PushNotification};
use tokio_tungstenite::tungstenite::Message;

use crate::{NotificationSource, NotifyError};

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// A [`NotificationSource`] reading JSON frames from a WebSocket.
pub struct WebSocketSource {
    ws: WsStream,
    codec: JsonCodec,
}

impl WebSocketSource {
    /// Opens the channel, presenting `token` as the `token` query
    /// parameter.
    pub async fn connect(url: &str, token: &str) -> Result<Self, NotifyError> {
        let separator = if url.contains('?') { '&' } else { '?' };
        let url = format!("{url}{separator}token={}", urlencoding::encode(token));

        let (ws, _) = tokio_tungstenite::connect_async(url.as_str())
            .await
            .map_err(|e| {
                NotifyError::ConnectFailed(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    e,
                ))
            })?;
        tracing::debug!("notification channel open");

        Ok(Self {
            ws,
            codec: JsonCodec,
        })
    }

    /// Sends a close frame.
    pub async fn close(&mut self) -> Result<(), NotifyError> {
        self.ws.close(None).await.map_err(|e| {
            NotifyError::ReceiveFailed(std::io::Error::new(std::io::ErrorKind::BrokenPipe, e))
        })
    }
}

impl NotificationSource for WebSocketSource {
    async fn next(&mut self) -> Result<Option<PushNotification>, NotifyError> {
        loop {
            match self.ws.next().await {
                Some(Ok(Message::Text(text))) => {
                    return Ok(Some(self.codec.decode(text.as_bytes())?));
                }
                Some(Ok(Message::Binary(data))) => {
                    return Ok(Some(self.codec.decode(&data)?));
                }
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue, // ping/pong/frame
                Some(Err(e)) => {
                    return Err(NotifyError::ReceiveFailed(std::io::Error::new(
                        std::io::ErrorKind::ConnectionReset,
                        e,
                    )));
                }
            }
        }
    }
}
