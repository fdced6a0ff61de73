//! Session state for the API client
//!
//! A [`Session`] holds the bearer token of the signed-in user. It is passed
//! explicitly to [`crate::api::ApiClient`] instead of living in a global:
//! login begins it, logout ends it, and every request flagged as requiring
//! authentication reads it once.
//!
//! Persisting a session between CLI invocations is handled by
//! [`token_store::TokenStore`].

pub mod token_store;

use std::sync::{Arc, RwLock};

pub use token_store::{StoredSession, TokenStore};

/// Shared holder of the current bearer token.
///
/// Cloning is cheap and clones observe the same credential, so a client
/// handed to several concurrent tasks still has exactly one session.
///
/// # Examples
///
/// ```
/// use researchhub::session::Session;
///
/// let session = Session::new();
/// assert!(!session.is_active());
///
/// let shared = session.clone();
/// session.begin("tok_123");
/// assert_eq!(shared.token().as_deref(), Some("tok_123"));
///
/// shared.end();
/// assert!(session.token().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    /// Creates a session with no credential.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session that is already signed in.
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.begin(token);
        session
    }

    /// Starts (or replaces) the session with a freshly issued token.
    ///
    /// An empty token is treated as no token at all so that a request never
    /// carries an empty `Authorization` header.
    pub fn begin(&self, token: impl Into<String>) {
        let token = token.into();
        let value = if token.is_empty() { None } else { Some(token) };
        match self.token.write() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }

    /// Ends the session, dropping the credential.
    pub fn end(&self) {
        match self.token.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }

    /// Current bearer token, if signed in.
    pub fn token(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Returns `true` while a token is held.
    pub fn is_active(&self) -> bool {
        self.token().is_some()
    }
}
