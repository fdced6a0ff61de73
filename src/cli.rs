//! Command-line interface definition for ResearchHub
//!
//! This module defines the CLI structure using clap's derive API. Each
//! subcommand maps to one user action against the backend.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::api::DEFAULT_SEARCH_LIMIT;

/// ResearchHub - research paper workspaces from the terminal
///
/// Create workspaces, search and import papers, and chat with the
/// research assistant about the papers in a workspace.
#[derive(Parser, Debug, Clone)]
#[command(name = "researchhub")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override the backend base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Keyring profile holding the session
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Print backend records as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Check that the backend is reachable
    Health,

    /// Register, log in and out
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },

    /// Manage workspaces
    Workspace {
        #[command(subcommand)]
        command: WorkspaceCommand,
    },

    /// Search, import and upload papers
    Paper {
        #[command(subcommand)]
        command: PaperCommand,
    },

    /// Chat with the research assistant
    Chat {
        #[command(subcommand)]
        command: ChatCommand,
    },
}

/// Authentication subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum AuthCommand {
    /// Create an account and log in
    Register {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(long, env = "RESEARCHHUB_PASSWORD", hide_env_values = true)]
        password: String,

        /// Display name
        #[arg(short = 'n', long)]
        full_name: String,
    },

    /// Log in and store the session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(long, env = "RESEARCHHUB_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the stored session
    Status,
}

/// Workspace subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum WorkspaceCommand {
    /// Create a workspace
    Create {
        /// Workspace name
        name: String,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List your workspaces
    List,

    /// Show a workspace with its papers and conversations
    Show {
        /// Workspace ID
        id: String,
    },

    /// Rename or re-describe a workspace
    Update {
        /// Workspace ID
        id: String,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a workspace
    Delete {
        /// Workspace ID
        id: String,
    },
}

/// Paper subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum PaperCommand {
    /// Search for papers
    Search {
        /// Search query
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: u32,
    },

    /// Add a paper to a workspace
    Import {
        /// Workspace ID
        workspace: String,

        /// Paper ID (from `paper search`)
        paper: String,
    },

    /// List the papers in a workspace
    List {
        /// Workspace ID
        workspace: String,
    },

    /// Upload a PDF
    Upload {
        /// Path to the PDF file
        file: PathBuf,

        /// Paper title (the backend uses the file name when empty)
        #[arg(short, long, default_value = "")]
        title: String,

        /// Comma-separated author names
        #[arg(short, long, default_value = "")]
        authors: String,

        /// Import the uploaded paper into this workspace
        #[arg(short, long)]
        workspace: Option<String>,
    },

    /// Remove a paper from a workspace
    Remove {
        /// Workspace ID
        workspace: String,

        /// Paper ID
        paper: String,
    },
}

/// Chat subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ChatCommand {
    /// Start a conversation in a workspace
    New {
        /// Workspace ID
        workspace: String,

        /// Conversation title
        #[arg(short, long)]
        title: Option<String>,
    },

    /// List the conversations of a workspace
    List {
        /// Workspace ID
        workspace: String,
    },

    /// Print the messages of a conversation
    Messages {
        /// Conversation ID
        conversation: String,
    },

    /// Send one message and print the reply
    Send {
        /// Workspace ID
        workspace: String,

        /// Conversation ID
        conversation: String,

        /// Message text
        message: String,
    },

    /// Delete a conversation
    Delete {
        /// Conversation ID
        conversation: String,
    },

    /// Interactive chat session
    Repl {
        /// Workspace ID
        workspace: String,

        /// Resume this conversation instead of starting a new one
        #[arg(short, long)]
        conversation: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
