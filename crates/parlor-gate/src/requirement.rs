//! What a gated page demands of the visitor.

use std::fmt;

use parlor_session::AuthenticationStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Requirement {
    /// Any signed-in character.
    Authenticated,
    /// A signed-in character holding the administrator flag.
    Administrator,
}

impl Requirement {
    /// Whether `status` satisfies this requirement.
    ///
    /// Only meaningful once `status.is_authentication_tried` is true;
    /// before that every requirement reads as unmet.
    pub fn is_met(self, status: &AuthenticationStatus) -> bool {
        match self {
            Self::Authenticated => status.is_authenticated,
            Self::Administrator => status.is_administrator_authenticated,
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authenticated => write!(f, "authenticated"),
            Self::Administrator => write!(f, "administrator"),
        }
    }
}
