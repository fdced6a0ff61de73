/*!
Command handlers for the CLI

Each handler performs the request(s) for one subcommand and renders the
result. Handlers share a [`Context`] holding the configuration and an
[`ApiClient`] whose session was restored from the keyring (or from
`RESEARCHHUB_TOKEN`).

- `auth`: register, login, logout, status
- `workspace`: workspace CRUD
- `paper`: search, import, upload, removal
- `chat`: conversations, messages, interactive session
*/

use colored::Colorize;
use serde::Serialize;

use crate::api::ApiClient;
use crate::cli::Commands;
use crate::config::{Config, OutputFormat};
use crate::error::{Result, ResearchHubError};
use crate::session::{Session, TokenStore};

pub mod auth;
pub mod chat;
pub mod paper;
pub mod workspace;

/// Environment variable that overrides the stored session token.
pub const TOKEN_ENV_VAR: &str = "RESEARCHHUB_TOKEN";

/// State shared by all command handlers.
pub struct Context {
    /// Effective configuration
    pub config: Config,
    /// Client signed with the restored session
    pub client: ApiClient,
    store: TokenStore,
}

impl Context {
    /// Builds the client and restores the session for the configured profile.
    pub fn new(config: Config) -> Result<Self> {
        let session = restore_session(&config);
        let client = ApiClient::from_config(&config.api, session).map_err(ResearchHubError::from)?;
        Ok(Self {
            config,
            client,
            store: TokenStore,
        })
    }

    /// Builds a context around an existing session without touching the keyring.
    pub fn with_session(config: Config, session: Session) -> Result<Self> {
        let client = ApiClient::from_config(&config.api, session).map_err(ResearchHubError::from)?;
        Ok(Self {
            config,
            client,
            store: TokenStore,
        })
    }

    /// Returns `true` when results should be printed as JSON.
    pub fn json(&self) -> bool {
        self.config.output.format == OutputFormat::Json
    }

    pub(crate) fn store(&self) -> &TokenStore {
        &self.store
    }
}

/// Resolves the token for this run: the environment first, then the keyring.
///
/// Keyring problems never stop a command; they are logged and the command
/// runs without a session.
fn restore_session(config: &Config) -> Session {
    if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
        if !token.is_empty() {
            tracing::debug!("Using session token from {}", TOKEN_ENV_VAR);
            return Session::with_token(token);
        }
    }

    let profile = &config.session.profile;
    match TokenStore.load(profile) {
        Ok(Some(stored)) if stored.matches_backend(&config.api.base_url) => {
            tracing::debug!("Restored session for profile {}", profile);
            Session::with_token(stored.access_token)
        }
        Ok(Some(stored)) => {
            tracing::warn!(
                "Stored session for profile {} was issued by {}, not {}; ignoring it",
                profile,
                stored.base_url,
                config.api.base_url
            );
            Session::new()
        }
        Ok(None) => Session::new(),
        Err(e) => {
            tracing::warn!("Could not read stored session for {}: {}", profile, e);
            Session::new()
        }
    }
}

/// Runs one CLI command.
pub async fn dispatch(config: Config, command: Commands) -> Result<()> {
    let ctx = Context::new(config)?;
    run(&ctx, command).await
}

/// Runs one CLI command against an already built context.
pub async fn run(ctx: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::Health => health(ctx).await,
        Commands::Auth { command } => auth::handle(ctx, command).await,
        Commands::Workspace { command } => workspace::handle(ctx, command).await,
        Commands::Paper { command } => paper::handle(ctx, command).await,
        Commands::Chat { command } => chat::handle(ctx, command).await,
    }
}

async fn health(ctx: &Context) -> Result<()> {
    let status = ctx.client.health().await?;
    if ctx.json() {
        return print_json(&status);
    }
    println!(
        "{} {} ({})",
        "Backend".bold(),
        status.status.green(),
        ctx.client.base_url()
    );
    Ok(())
}

/// Prints a backend record as pretty JSON.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(ResearchHubError::Serialization)?;
    println!("{}", json);
    Ok(())
}

/// Shortens `text` to at most `max` characters, marking the cut with `...`.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max {
        return single_line;
    }
    let kept: String = single_line.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}
