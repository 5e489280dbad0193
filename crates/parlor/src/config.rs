//! Client configuration.

use parlor_draft::DraftConfig;
use parlor_notify::NotifyConfig;
use parlor_session::SessionConfig;
use serde::{Deserialize, Serialize};

/// Everything [`ParlorClient`](crate::ParlorClient) can be tuned with.
///
/// Every field has a default, so a host can deserialize a partial
/// document:
///
/// ```rust
/// use parlor::ClientConfig;
///
/// let config: ClientConfig = serde_json::from_str(r#"{"sign_in_path":"/login"}"#).unwrap();
/// assert_eq!(config.sign_in_path, "/login");
/// assert!(config.notify.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Where gates send visitors who fail their requirement.
    pub sign_in_path: String,
    pub session: SessionConfig,
    pub draft: DraftConfig,
    /// Push-notification channel. `None` disables it.
    pub notify: Option<NotifyConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            sign_in_path: "/signin".to_string(),
            session: SessionConfig::default(),
            draft: DraftConfig::default(),
            notify: None,
        }
    }
}
