//! Error types for ResearchHub
//!
//! Two layers live here. [`RequestError`] is what every API client call
//! fails with; it is the only error a library caller has to handle.
//! [`ResearchHubError`] covers the application around the client
//! (configuration, session persistence, terminal I/O) and wraps
//! [`RequestError`] when a command's request fails.

use thiserror::Error;

/// Fallback message when a failed response carries no usable `detail`.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Fallback message for a failed upload with no usable `detail`.
pub const UPLOAD_ERROR_MESSAGE: &str = "Upload failed";

/// Backend wording for a paper that is already attached to a workspace.
const DUPLICATE_IMPORT_MARKER: &str = "already in workspace";

/// Failure of a single request to the ResearchHub backend.
///
/// Every variant carries a human-readable message; [`RequestError::message`]
/// returns it regardless of the variant. Callers that only care about the
/// text can treat this as a single error kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The backend answered with a non-success status
    #[error("{message}")]
    Status {
        /// HTTP status code of the response
        status: u16,
        /// `detail` from the error body, or a generic fallback
        message: String,
    },

    /// No response was received (connection refused, DNS, TLS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// A success response whose body did not match the expected shape
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The request could not be built (body serialization, bad URL)
    #[error("Invalid request: {0}")]
    Encode(String),
}

impl RequestError {
    /// Human-readable message carried by this error.
    ///
    /// For status failures this is exactly the backend's `detail` text (or
    /// the generic fallback), without any prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Status { message, .. } => message,
            Self::Network(message) | Self::Decode(message) | Self::Encode(message) => message,
        }
    }

    /// HTTP status code, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` when the request never produced a response.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Returns `true` when an import failed because the paper is already in
    /// the target workspace.
    ///
    /// The backend exposes no error code for this case, so the check is a
    /// substring match on the message text.
    pub fn is_duplicate_import(&self) -> bool {
        self.message().contains(DUPLICATE_IMPORT_MARKER)
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Encode(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Result of a single API client call.
pub type RequestResult<T> = std::result::Result<T, RequestError>;

/// Application error type for ResearchHub
///
/// Covers everything the CLI does around the API client: loading
/// configuration, persisting the session, reading terminal input.
#[derive(Error, Debug)]
pub enum ResearchHubError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session errors (not logged in, stored session unusable)
    #[error("Session error: {0}")]
    Session(String),

    /// A backend request failed
    #[error(transparent)]
    Request(#[from] RequestError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    /// Interactive line editor errors
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Result type alias for application-level operations
///
/// Uses `anyhow::Error` so command handlers can attach context while still
/// letting callers downcast to [`ResearchHubError`] or [`RequestError`].
pub type Result<T> = anyhow::Result<T>;
