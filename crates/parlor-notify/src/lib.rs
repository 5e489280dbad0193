//! Push notifications for the Parlor client.
//!
//! The identity response hands out a `notificationToken`. With it the
//! client opens a channel to the backend, which pushes a message whenever
//! new mail or a new notification arrives for the signed-in character.
//! This crate turns those messages into session events:
//!
//! | pushed message    | session event         |
//! |-------------------|-----------------------|
//! | `NewMail`         | `MailArrived`         |
//! | `NewNotification` | `NotificationArrived` |
//! | `Notice`          | `Notify`              |
//!
//! # Feature Flags
//!
//! - `websocket` (default): [`WebSocketSource`] and [`listen`] via
//!   `tokio-tungstenite`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "websocket")]
mod listen;
mod pump;
mod reconnect;
mod source;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::NotifyError;
#[cfg(feature = "websocket")]
pub use listen::listen;
pub use pump::{apply, pump};
pub use reconnect::{NotifyConfig, ReconnectPolicy};
pub use source::NotificationSource;
#[cfg(feature = "websocket")]
pub use websocket::WebSocketSource;
