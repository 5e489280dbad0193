//! The backend hook for identity, sign-in, and sign-out.
//!
//! Parlor doesn't speak HTTP itself. The embedding application implements
//! [`SessionBackend`] against its REST API (cookie session, endpoints,
//! status mapping) and the [`SessionController`](crate::SessionController)
//! calls it at the right time.

use std::collections::HashMap;
use std::future::Future;

use parlor_protocol::{CsrfHeader, IdentityResponse, SignInRequest};
use tokio::sync::Mutex;

use crate::BackendError;

/// Identity calls made against the backend.
///
/// # Example
///
/// ```rust
/// use parlor_protocol::{CsrfHeader, IdentityResponse, SignInRequest};
/// use parlor_session::{BackendError, SessionBackend};
///
/// /// Always signed out. Handy for rendering public pages in isolation.
/// struct Anonymous;
///
/// impl SessionBackend for Anonymous {
///     async fn fetch_identity(&self) -> Result<IdentityResponse, BackendError> {
///         Err(BackendError::Unauthorized)
///     }
///
///     async fn sign_in(&self, _request: &SignInRequest) -> Result<IdentityResponse, BackendError> {
///         Err(BackendError::Unauthorized)
///     }
///
///     async fn sign_out(&self, _csrf: &CsrfHeader) -> Result<(), BackendError> {
///         Ok(())
///     }
/// }
/// ```
pub trait SessionBackend: Send + Sync + 'static {
    /// Fetches the identity behind the current cookie session.
    ///
    /// # Returns
    /// - `Ok(identity)`: signed in
    /// - `Err(BackendError::Unauthorized)`: definitely signed out
    /// - any other `Err`: could not find out
    fn fetch_identity(
        &self,
    ) -> impl Future<Output = Result<IdentityResponse, BackendError>> + Send;

    /// Exchanges a character key and password for a session.
    fn sign_in(
        &self,
        request: &SignInRequest,
    ) -> impl Future<Output = Result<IdentityResponse, BackendError>> + Send;

    /// Ends the current session. State-mutating, so it carries the CSRF
    /// header.
    fn sign_out(
        &self,
        csrf: &CsrfHeader,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;
}

// ---------------------------------------------------------------------------
// MemoryBackend
// ---------------------------------------------------------------------------

struct Account {
    password: String,
    identity: IdentityResponse,
}

#[derive(Default)]
struct MemoryInner {
    accounts: HashMap<String, Account>,
    current: Option<IdentityResponse>,
    unreachable: bool,
    failing_fetches: u32,
    fetch_calls: u32,
}

/// An in-process [`SessionBackend`] with a fixed set of accounts.
///
/// Used by tests and the console demo. Reachability can be toggled to
/// exercise the retry path.
#[derive(Default)]
pub struct MemoryBackend {
    inner: Mutex<MemoryInner>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account that `sign_in` will accept.
    pub fn with_account(
        mut self,
        key: impl Into<String>,
        password: impl Into<String>,
        identity: IdentityResponse,
    ) -> Self {
        self.inner.get_mut().accounts.insert(
            key.into(),
            Account {
                password: password.into(),
                identity,
            },
        );
        self
    }

    /// Starts with a live cookie session for `identity`, as if the
    /// visitor signed in on a previous page load.
    pub fn signed_in_as(mut self, identity: IdentityResponse) -> Self {
        self.inner.get_mut().current = Some(identity);
        self
    }

    /// Makes every call fail with `Unreachable` until switched back.
    pub async fn set_unreachable(&self, unreachable: bool) {
        self.inner.lock().await.unreachable = unreachable;
    }

    /// Makes the next `count` identity fetches fail with `Unreachable`.
    pub async fn fail_next_fetches(&self, count: u32) {
        self.inner.lock().await.failing_fetches = count;
    }

    /// Number of `fetch_identity` calls made so far.
    pub async fn fetch_calls(&self) -> u32 {
        self.inner.lock().await.fetch_calls
    }
}

impl SessionBackend for MemoryBackend {
    async fn fetch_identity(&self) -> Result<IdentityResponse, BackendError> {
        let mut inner = self.inner.lock().await;
        inner.fetch_calls += 1;
        if inner.unreachable {
            return Err(BackendError::Unreachable("backend offline".into()));
        }
        if inner.failing_fetches > 0 {
            inner.failing_fetches -= 1;
            return Err(BackendError::Unreachable("connection reset".into()));
        }
        inner.current.clone().ok_or(BackendError::Unauthorized)
    }

    async fn sign_in(&self, request: &SignInRequest) -> Result<IdentityResponse, BackendError> {
        let mut inner = self.inner.lock().await;
        if inner.unreachable {
            return Err(BackendError::Unreachable("backend offline".into()));
        }
        let identity = match inner.accounts.get(&request.key) {
            Some(account) if account.password == request.password => account.identity.clone(),
            _ => return Err(BackendError::Unauthorized),
        };
        inner.current = Some(identity.clone());
        Ok(identity)
    }

    async fn sign_out(&self, csrf: &CsrfHeader) -> Result<(), BackendError> {
        let mut inner = self.inner.lock().await;
        if inner.unreachable {
            return Err(BackendError::Unreachable("backend offline".into()));
        }
        let token_matches = inner
            .current
            .as_ref()
            .is_some_and(|current| current.csrf_token == csrf.value);
        if !token_matches {
            return Err(BackendError::Rejected {
                status: 403,
                message: "csrf token mismatch".into(),
            });
        }
        inner.current = None;
        Ok(())
    }
}
