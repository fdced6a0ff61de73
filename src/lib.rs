//! ResearchHub - client library for the ResearchHub research-paper service
//!
//! This library talks to the ResearchHub backend, where users keep
//! workspaces of papers and chat with a research assistant about them.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: the request executor ([`api::ApiClient`]) and the typed
//!   resource facades for auth, workspaces, papers and chat
//! - `session`: the bearer-token [`session::Session`] and its keyring store
//! - `config`: configuration loading and validation
//! - `error`: [`RequestError`] and the application error types
//! - `cli` / `commands`: the `researchhub` command-line front-end
//!
//! # Example
//!
//! ```no_run
//! use researchhub::{ApiClient, Session};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ApiClient::new("http://localhost:8000", Session::new())?;
//!     client.auth().login("a@b.com", "pw").await?;
//!
//!     let workspace = client.workspaces().create("Thesis", None).await?;
//!     for paper in client.papers().search("transformers", 10).await? {
//!         client.papers().import(&workspace.id, &paper.id).await?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod session;

// Re-export commonly used types
pub use api::ApiClient;
pub use config::Config;
pub use error::{RequestError, RequestResult, ResearchHubError, Result};
pub use session::Session;
