//! Session persistence via OS keyring
//!
//! Stores the signed-in session in the operating system's native credential
//! store (Keychain on macOS, Secret Service on Linux, Windows Credential
//! Manager on Windows) so that a later CLI invocation can reuse it.
//!
//! Sessions are serialized to JSON before storage. [`TokenStore`] itself
//! holds no state; it only namespaces keyring entries by profile.

use serde::{Deserialize, Serialize};

use crate::api::{AuthSession, User};
use crate::error::{Result, ResearchHubError};

const REDACTED: &str = "[redacted]";

// ---------------------------------------------------------------------------
// StoredSession
// ---------------------------------------------------------------------------

/// What is kept in the keyring for one profile.
///
/// The `base_url` records which backend issued the token; a token is only
/// reused against the same backend.
///
/// # Examples
///
/// ```
/// use researchhub::session::StoredSession;
///
/// let stored = StoredSession {
///     access_token: "tok".to_string(),
///     token_type: "bearer".to_string(),
///     user: None,
///     base_url: "http://localhost:8000".to_string(),
/// };
/// assert!(stored.matches_backend("http://localhost:8000/"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    /// Bearer token issued at login.
    pub access_token: String,

    /// Token type reported by the backend, normally `"bearer"`.
    pub token_type: String,

    /// Account the token belongs to, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    /// Base URL of the backend that issued the token.
    pub base_url: String,
}

impl StoredSession {
    /// Builds the record to persist after a successful login or registration.
    pub fn from_auth(auth: &AuthSession, base_url: &str) -> Self {
        Self {
            access_token: auth.access_token().to_string(),
            token_type: auth.token_type().unwrap_or("bearer").to_string(),
            user: Some(auth.user.clone()),
            base_url: base_url.to_string(),
        }
    }

    /// Copy safe to print: the token is replaced by a placeholder.
    pub fn redacted(&self) -> Self {
        Self {
            access_token: REDACTED.to_string(),
            ..self.clone()
        }
    }

    /// Returns `true` when this session was issued by `base_url`.
    ///
    /// Trailing slashes are ignored.
    pub fn matches_backend(&self, base_url: &str) -> bool {
        self.base_url.trim_end_matches('/') == base_url.trim_end_matches('/')
    }
}

// ---------------------------------------------------------------------------
// TokenStore
// ---------------------------------------------------------------------------

/// Stateless accessor for the OS native keyring.
///
/// Each profile is stored under its own service name so that several
/// accounts (or backends) can be signed in side by side.
///
/// # Examples
///
/// ```no_run
/// use researchhub::session::{StoredSession, TokenStore};
///
/// # fn example() -> researchhub::error::Result<()> {
/// let store = TokenStore;
/// let stored = StoredSession {
///     access_token: "tok".to_string(),
///     token_type: "bearer".to_string(),
///     user: None,
///     base_url: "http://localhost:8000".to_string(),
/// };
/// store.save("default", &stored)?;
/// assert!(store.load("default")?.is_some());
/// store.delete("default")?;
/// # Ok(())
/// # }
/// ```
pub struct TokenStore;

impl TokenStore {
    /// Builds the keyring service name for a profile.
    fn service_name(profile: &str) -> String {
        format!("researchhub-{}", profile)
    }

    fn entry(profile: &str) -> Result<keyring::Entry> {
        let service = Self::service_name(profile);
        let entry = keyring::Entry::new(&service, profile).map_err(ResearchHubError::Keyring)?;
        Ok(entry)
    }

    /// Persists the session for `profile`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchHubError::Serialization`] if JSON serialization fails
    /// or [`ResearchHubError::Keyring`] if the credential store rejects the write.
    pub fn save(&self, profile: &str, session: &StoredSession) -> Result<()> {
        let json_str = serde_json::to_string(session).map_err(ResearchHubError::Serialization)?;
        Self::entry(profile)?
            .set_password(&json_str)
            .map_err(ResearchHubError::Keyring)?;
        tracing::debug!("Stored session for profile {}", profile);
        Ok(())
    }

    /// Loads the session stored for `profile`.
    ///
    /// Returns `Ok(None)` when nothing has been saved, so callers can tell
    /// "not logged in" apart from a keyring failure.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchHubError::Keyring`] on an unexpected keyring error or
    /// [`ResearchHubError::Serialization`] if the stored JSON is malformed.
    pub fn load(&self, profile: &str) -> Result<Option<StoredSession>> {
        match Self::entry(profile)?.get_password() {
            Ok(json_str) => {
                let session: StoredSession =
                    serde_json::from_str(&json_str).map_err(ResearchHubError::Serialization)?;
                Ok(Some(session))
            }
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(ResearchHubError::Keyring(e).into()),
        }
    }

    /// Deletes the session stored for `profile`.
    ///
    /// Deleting a profile that has nothing stored is a no-op.
    pub fn delete(&self, profile: &str) -> Result<()> {
        match Self::entry(profile)?.delete_password() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(ResearchHubError::Keyring(e).into()),
        }
    }
}
