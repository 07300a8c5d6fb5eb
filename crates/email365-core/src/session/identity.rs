//! Identity provider boundary.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

/// An authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Opaque principal identifier.
    pub principal: String,
}

impl Identity {
    /// Create an identity.
    #[must_use]
    pub fn new(principal: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
        }
    }
}

/// Error type for login.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    /// Somebody is already signed in.
    #[error("User is already authenticated")]
    AlreadyAuthenticated,

    /// The provider could not complete the login.
    #[error("Login failed: {0}")]
    Failed(String),
}

/// External identity provider.
pub trait IdentityProvider: Send + Sync + 'static {
    /// Begin an interactive login.
    fn login(&self) -> impl Future<Output = Result<Identity, LoginError>> + Send;

    /// Forget the current identity.
    fn logout(&self) -> impl Future<Output = ()> + Send;

    /// The identity currently signed in, if any.
    fn current(&self) -> Option<Identity>;
}

/// Provider that signs in a fixed principal without leaving the process.
#[derive(Debug)]
pub struct LocalIdentityProvider {
    principal: String,
    current: Mutex<Option<Identity>>,
    unreachable: AtomicBool,
}

impl LocalIdentityProvider {
    /// Create a provider that signs in as `principal`.
    #[must_use]
    pub fn new(principal: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
            current: Mutex::new(None),
            unreachable: AtomicBool::new(false),
        }
    }

    /// Create a provider that starts signed in.
    #[must_use]
    pub fn signed_in(principal: impl Into<String>) -> Self {
        let provider = Self::new(principal);
        let identity = Identity::new(provider.principal.clone());
        *provider
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(identity);
        provider
    }

    /// Make logins fail as if the provider were down.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::Relaxed);
    }
}

impl IdentityProvider for LocalIdentityProvider {
    async fn login(&self) -> Result<Identity, LoginError> {
        if self.unreachable.load(Ordering::Relaxed) {
            return Err(LoginError::Failed("identity provider unreachable".into()));
        }
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if current.is_some() {
            return Err(LoginError::AlreadyAuthenticated);
        }
        let identity = Identity::new(self.principal.clone());
        *current = Some(identity.clone());
        Ok(identity)
    }

    async fn logout(&self) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn current(&self) -> Option<Identity> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
