//! Wire types for the ResearchHub backend
//!
//! Field names match the backend's JSON exactly (snake_case), so a value
//! decoded here and serialized again carries the same keys the server sent.
//! Identifiers are always backend-assigned strings.

use chrono::format::{DelayedFormat, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

/// A backend timestamp.
///
/// The backend writes naive UTC datetimes (`2024-05-01T12:30:00.123456`)
/// for most records but offset-qualified RFC 3339 values elsewhere. Both are
/// accepted and read as UTC. The text the backend sent is kept and written
/// back unchanged on serialization.
///
/// # Examples
///
/// ```
/// use researchhub::api::Timestamp;
///
/// let ts = Timestamp::parse("2024-03-02T11:30:00.000000").unwrap();
/// assert_eq!(ts.as_str(), "2024-03-02T11:30:00.000000");
/// assert_eq!(ts.format("%Y-%m-%d %H:%M").to_string(), "2024-03-02 11:30");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    raw: String,
    utc: DateTime<Utc>,
}

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

impl Timestamp {
    /// Parses an RFC 3339 or naive ISO-8601 timestamp, reading naive values as UTC.
    pub fn parse(raw: &str) -> Option<Self> {
        let utc = match DateTime::parse_from_rfc3339(raw) {
            Ok(dt) => dt.with_timezone(&Utc),
            Err(_) => NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|naive| naive.and_utc())?,
        };
        Some(Self {
            raw: raw.to_string(),
            utc,
        })
    }

    /// Text exactly as the backend sent it.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The instant in UTC.
    pub fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    /// Formats the UTC instant with a `strftime` pattern.
    pub fn format<'a>(&self, fmt: &'a str) -> DelayedFormat<StrftimeItems<'a>> {
        self.utc.format(fmt)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// An account as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// Response of `/auth/login` and `/auth/register`.
///
/// Older deployments name the credential `token` instead of `access_token`.
/// Whichever key arrived is the one written back, and `token_type` is only
/// present when the backend sent it; use [`AuthSession::access_token`] to
/// read the credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AuthSessionBody")]
pub struct AuthSession {
    #[serde(skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token_type: Option<String>,
    pub user: User,
}

impl AuthSession {
    /// The issued bearer token, whichever key carried it.
    pub fn access_token(&self) -> &str {
        self.access_token
            .as_deref()
            .or(self.token.as_deref())
            .unwrap_or_default()
    }

    /// Token type as reported by the backend, if it reported one.
    pub fn token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }
}

#[derive(Deserialize)]
struct AuthSessionBody {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    user: User,
}

impl TryFrom<AuthSessionBody> for AuthSession {
    type Error = String;

    fn try_from(body: AuthSessionBody) -> Result<Self, Self::Error> {
        if body.access_token.is_none() && body.token.is_none() {
            return Err("missing field `access_token`".to_string());
        }
        Ok(Self {
            access_token: body.access_token,
            token: body.token,
            token_type: body.token_type,
            user: body.user,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub full_name: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

// ---------------------------------------------------------------------------
// Workspaces
// ---------------------------------------------------------------------------

/// A user-owned container of papers and conversations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateWorkspaceRequest<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

/// Partial update for a workspace; unset fields are left untouched.
///
/// # Examples
///
/// ```
/// use researchhub::api::WorkspaceUpdate;
///
/// let update = WorkspaceUpdate::default().name("Thesis");
/// let json = serde_json::to_value(&update).unwrap();
/// assert_eq!(json, serde_json::json!({"name": "Thesis"}));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl WorkspaceUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns `true` when no field would be sent.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

// ---------------------------------------------------------------------------
// Papers
// ---------------------------------------------------------------------------

/// A bibliographic record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    #[serde(default)]
    pub publication_date: Option<NaiveDate>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub arxiv_id: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SearchRequest<'a> {
    pub query: &'a str,
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ImportRequest<'a> {
    pub workspace_id: &'a str,
    pub paper_id: &'a str,
}

/// Acknowledgement returned by `/papers/import`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportReceipt {
    #[serde(default)]
    pub message: String,
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// A chat thread scoped to one workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    pub title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One message of a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    pub role: Role,
    pub content: String,
    pub created_at: Timestamp,
}

/// The stored user message and the assistant's reply to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatExchange {
    pub message: Message,
    pub response: Message,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateConversationRequest<'a> {
    pub workspace_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub workspace_id: &'a str,
    pub conversation_id: &'a str,
    pub message: &'a str,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
