//! The gate state machine.

use std::fmt;

use parlor_session::AuthenticationStatus;

use crate::{Requirement, sign_in_location};

// ---------------------------------------------------------------------------
// GateState
// ---------------------------------------------------------------------------

/// Where a mounted gate is in its lifecycle.
///
/// ```text
///            ┌──(tried, requirement met)────→ Granted
/// Pending ───┤
///            └──(tried, requirement unmet)──→ DeniedRedirecting
/// ```
///
/// - **Pending**: the identity fetch has not resolved yet. The page shows
///   its loading state and no navigation happens.
/// - **Granted**: the page renders its protected content.
/// - **DeniedRedirecting**: a redirect to sign-in was issued; the page
///   renders nothing while the navigation takes effect.
///
/// Both resolved states are terminal for the lifetime of the gate. A new
/// mount starts again at `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    Pending,
    Granted,
    DeniedRedirecting,
}

impl GateState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// What the page should render in this state.
    pub fn access(&self) -> Access {
        match self {
            Self::Pending => Access::Loading,
            Self::Granted => Access::Render,
            Self::DeniedRedirecting => Access::Withhold,
        }
    }
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Granted => write!(f, "Granted"),
            Self::DeniedRedirecting => write!(f, "DeniedRedirecting"),
        }
    }
}

/// Render decision handed to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Loading,
    Render,
    /// Render nothing protected.
    Withhold,
}

/// A navigation the view layer must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationCommand {
    /// Replace the current location with `location`.
    Redirect { location: String },
}

impl NavigationCommand {
    pub fn location(&self) -> &str {
        match self {
            Self::Redirect { location } => location,
        }
    }
}

// ---------------------------------------------------------------------------
// AuthGate
// ---------------------------------------------------------------------------

/// One mounted authentication gate.
///
/// # Example
///
/// ```rust
/// use parlor_gate::{Access, AuthGate, NavigationCommand};
/// use parlor_session::AuthenticationStatus;
///
/// let mut gate = AuthGate::require_administrator_authenticated("/signin");
/// let signed_in_player = AuthenticationStatus {
///     is_authenticated: true,
///     is_authentication_tried: true,
///     is_administrator_authenticated: false,
/// };
///
/// let command = gate.evaluate(signed_in_player, "/control");
/// assert_eq!(
///     command,
///     Some(NavigationCommand::Redirect {
///         location: "/signin?for=%2Fcontrol".into()
///     })
/// );
/// assert_eq!(gate.access(), Access::Withhold);
/// ```
#[derive(Debug, Clone)]
pub struct AuthGate {
    requirement: Requirement,
    sign_in_path: String,
    state: GateState,
}

impl AuthGate {
    pub fn new(requirement: Requirement, sign_in_path: impl Into<String>) -> Self {
        Self {
            requirement,
            sign_in_path: sign_in_path.into(),
            state: GateState::Pending,
        }
    }

    pub fn require_authenticated(sign_in_path: impl Into<String>) -> Self {
        Self::new(Requirement::Authenticated, sign_in_path)
    }

    pub fn require_administrator_authenticated(sign_in_path: impl Into<String>) -> Self {
        Self::new(Requirement::Administrator, sign_in_path)
    }

    pub fn requirement(&self) -> Requirement {
        self.requirement
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn access(&self) -> Access {
        self.state.access()
    }

    /// Feeds the latest session status into the gate.
    ///
    /// Returns a command at most once per gate: on the transition from
    /// `Pending` to `DeniedRedirecting`. While the session is untried the
    /// gate stays `Pending` whatever the other flags say.
    pub fn evaluate(
        &mut self,
        status: AuthenticationStatus,
        current_path: &str,
    ) -> Option<NavigationCommand> {
        if self.state.is_terminal() || !status.is_authentication_tried {
            return None;
        }

        if self.requirement.is_met(&status) {
            tracing::debug!(requirement = %self.requirement, path = current_path, "gate granted");
            self.state = GateState::Granted;
            return None;
        }

        let location = sign_in_location(&self.sign_in_path, current_path);
        tracing::info!(
            requirement = %self.requirement,
            path = current_path,
            %location,
            "gate denied, redirecting to sign-in"
        );
        self.state = GateState::DeniedRedirecting;
        Some(NavigationCommand::Redirect { location })
    }
}
