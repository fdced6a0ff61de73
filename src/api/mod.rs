//! HTTP client for the ResearchHub backend
//!
//! [`ApiClient`] owns the request executor: it builds one HTTP request,
//! signs it with the session's bearer token when asked to, sends it and
//! normalizes the response into either the decoded body or a
//! [`RequestError`]. The resource groups (auth, workspaces, papers, chat)
//! are thin typed facades borrowed from the client:
//!
//! ```no_run
//! use researchhub::api::ApiClient;
//! use researchhub::session::Session;
//!
//! # async fn example() -> researchhub::error::RequestResult<()> {
//! let client = ApiClient::new("http://localhost:8000", Session::new())?;
//! client.auth().login("a@b.com", "pw").await?;
//! let papers = client.papers().search("transformers", 10).await?;
//! println!("{} results", papers.len());
//! # Ok(())
//! # }
//! ```
//!
//! Nothing here retries, caches or times out on its own; a configured
//! transport timeout is the only limit.

mod auth;
mod chat;
mod papers;
pub mod types;
mod workspaces;

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{multipart, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ApiConfig;
use crate::error::{RequestError, RequestResult, GENERIC_ERROR_MESSAGE};
use crate::session::Session;

pub use auth::AuthApi;
pub use chat::ChatApi;
pub use papers::{PaperApi, DEFAULT_SEARCH_LIMIT};
pub use types::{
    AuthSession, ChatExchange, Conversation, HealthStatus, ImportReceipt, Message, Paper, Role,
    Timestamp, User, Workspace, WorkspaceUpdate,
};
pub use workspaces::WorkspaceApi;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Error body shape used by the backend for every failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Client for the ResearchHub REST API.
///
/// Cloning shares the underlying connection pool and the [`Session`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
}

impl ApiClient {
    /// Creates a client for `base_url` with the transport's default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Encode`] if `base_url` is not an absolute
    /// URL that can carry a path.
    pub fn new(base_url: &str, session: Session) -> RequestResult<Self> {
        Self::build(base_url, None, session)
    }

    /// Creates a client from the `api` section of the configuration.
    pub fn from_config(config: &ApiConfig, session: Session) -> RequestResult<Self> {
        Self::build(
            &config.base_url,
            config.timeout_seconds.map(Duration::from_secs),
            session,
        )
    }

    fn build(base_url: &str, timeout: Option<Duration>, session: Session) -> RequestResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| RequestError::Encode(format!("invalid base URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(RequestError::Encode(format!(
                "base URL cannot carry a path: {}",
                base_url
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| RequestError::Encode(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    /// Base URL every path is appended to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Session whose token signs authenticated requests.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Authentication operations.
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    /// Workspace operations.
    pub fn workspaces(&self) -> WorkspaceApi<'_> {
        WorkspaceApi::new(self)
    }

    /// Paper operations.
    pub fn papers(&self) -> PaperApi<'_> {
        PaperApi::new(self)
    }

    /// Conversation and message operations.
    pub fn chat(&self) -> ChatApi<'_> {
        ChatApi::new(self)
    }

    /// Checks that the backend is up (`GET /health`).
    pub async fn health(&self) -> RequestResult<HealthStatus> {
        self.request::<_, ()>(Method::GET, &["health"], None, false)
            .await
    }

    /// Issues one JSON request and decodes the response into `T`.
    ///
    /// `path` is the list of URL segments appended to the base URL; each
    /// segment is percent-encoded, so identifiers can be passed as-is. The
    /// request always carries `Content-Type: application/json`. When
    /// `requires_auth` is set and the session holds a token, an
    /// `Authorization: Bearer <token>` header is added; without a token the
    /// header is left out.
    ///
    /// An empty success body decodes as JSON `null`, so `T = ()` works for
    /// endpoints that answer `204 No Content`. Ask for
    /// [`serde_json::Value`] to get any body untouched.
    ///
    /// # Errors
    ///
    /// - [`RequestError::Status`] for a non-success status, carrying the
    ///   backend's `detail` or `"An error occurred"`.
    /// - [`RequestError::Network`] when no response arrives.
    /// - [`RequestError::Decode`] when a success body does not fit `T`.
    /// - [`RequestError::Encode`] when the body cannot be serialized.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &[&str],
        body: Option<&B>,
        requires_auth: bool,
    ) -> RequestResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        tracing::debug!("{} {}", method, url.path());

        let mut req = self
            .http
            .request(method.clone(), url.clone())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);

        if requires_auth {
            req = self.authorize(req);
        }

        if let Some(body) = body {
            let bytes = serde_json::to_vec(body).map_err(|e| RequestError::Encode(e.to_string()))?;
            req = req.body(bytes);
        }

        let response = req.send().await.map_err(|e| {
            tracing::warn!("{} {} failed to send: {}", method, url.path(), e);
            RequestError::from(e)
        })?;

        read_response(response, GENERIC_ERROR_MESSAGE).await
    }

    /// Issues one multipart request and decodes the response into `T`.
    ///
    /// Unlike [`ApiClient::request`] no JSON content type is set; reqwest
    /// writes the `multipart/form-data` boundary header itself. The bearer
    /// token is attached when present and failures are normalized the same
    /// way, using `fallback` when the error body has no `detail`.
    pub(crate) async fn request_multipart<T>(
        &self,
        path: &[&str],
        query: &[(&str, &str)],
        form: multipart::Form,
        fallback: &str,
    ) -> RequestResult<T>
    where
        T: DeserializeOwned,
    {
        let mut url = self.endpoint(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        tracing::debug!("POST {} (multipart)", url.path());

        let req = self.authorize(self.http.post(url.clone()).multipart(form));

        let response = req.send().await.map_err(|e| {
            tracing::warn!("POST {} failed to send: {}", url.path(), e);
            RequestError::from(e)
        })?;

        read_response(response, fallback).await
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    fn endpoint(&self, path: &[&str]) -> RequestResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                RequestError::Encode(format!("base URL cannot carry a path: {}", self.base_url))
            })?;
            segments.pop_if_empty().extend(path);
        }
        Ok(url)
    }
}

/// Turns a response into the decoded body or a [`RequestError::Status`].
async fn read_response<T: DeserializeOwned>(response: Response, fallback: &str) -> RequestResult<T> {
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| RequestError::Network(e.to_string()))?;

    if !status.is_success() {
        let message = error_message(&bytes, fallback);
        tracing::warn!("Backend returned error {}: {}", status, message);
        return Err(RequestError::Status {
            status: status.as_u16(),
            message,
        });
    }

    decode_body(&bytes)
}

fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> RequestResult<T> {
    let payload: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        bytes
    };
    serde_json::from_slice(payload).map_err(|e| RequestError::Decode(e.to_string()))
}

/// Extracts the human-readable message from a failure body.
///
/// A string `detail` is used verbatim; any other non-null `detail` (the
/// backend sends a list for validation failures) is rendered as compact
/// JSON. Anything else falls back to `fallback`.
fn error_message(bytes: &[u8], fallback: &str) -> String {
    match serde_json::from_slice::<ErrorBody>(bytes) {
        Ok(ErrorBody {
            detail: Some(serde_json::Value::String(detail)),
        }) if !detail.is_empty() => detail,
        Ok(ErrorBody {
            detail: Some(detail),
        }) if !detail.is_null() && !detail.is_string() => detail.to_string(),
        _ => fallback.to_string(),
    }
}
