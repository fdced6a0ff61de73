//! `researchhub chat ...`
//!
//! Besides one-shot subcommands this provides `chat repl`, a readline loop
//! where every line is sent to the assistant as one message of the current
//! conversation.

use colored::Colorize;
use prettytable::{format, row, Table};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use super::{print_json, truncate, Context};
use crate::api::{Conversation, Message, Role};
use crate::cli::ChatCommand;
use crate::error::{Result, ResearchHubError};

/// Title used for conversations started from the CLI without one.
pub const DEFAULT_CONVERSATION_TITLE: &str = "New Conversation";

pub async fn handle(ctx: &Context, command: ChatCommand) -> Result<()> {
    let api = ctx.client.chat();
    match command {
        ChatCommand::New { workspace, title } => {
            let conversation = api
                .create_conversation(
                    &workspace,
                    Some(title.as_deref().unwrap_or(DEFAULT_CONVERSATION_TITLE)),
                )
                .await?;
            if ctx.json() {
                return print_json(&conversation);
            }
            println!(
                "{} {} ({})",
                "Started conversation".green(),
                conversation.title.bold(),
                conversation.id.cyan()
            );
        }
        ChatCommand::List { workspace } => {
            let conversations = api.list_conversations(&workspace).await?;
            if ctx.json() {
                return print_json(&conversations);
            }
            if conversations.is_empty() {
                println!("{}", "No conversations in this workspace.".yellow());
            } else {
                print_conversations(&conversations);
            }
        }
        ChatCommand::Messages { conversation } => {
            let messages = api.get_messages(&conversation).await?;
            if ctx.json() {
                return print_json(&messages);
            }
            print_messages(&messages);
        }
        ChatCommand::Send {
            workspace,
            conversation,
            message,
        } => {
            let exchange = api.send_message(&workspace, &conversation, &message).await?;
            if ctx.json() {
                return print_json(&exchange);
            }
            print_message(&exchange.response);
        }
        ChatCommand::Delete { conversation } => {
            api.delete_conversation(&conversation).await?;
            println!("{}", format!("Deleted conversation {}", conversation).green());
        }
        ChatCommand::Repl {
            workspace,
            conversation,
        } => run_repl(ctx, &workspace, conversation).await?,
    }
    Ok(())
}

/// Lines typed in the interactive session that are not sent to the assistant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Leave the session
    Quit,
    /// Start a fresh conversation
    New,
    /// Reprint the current conversation
    History,
    /// Show the available commands
    Help,
    /// Send the text to the assistant
    Send(String),
    /// Nothing to do (blank line)
    Skip,
}

/// Classifies one line of input.
pub fn parse_repl_line(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    match trimmed {
        "" => ReplCommand::Skip,
        "/quit" | "/exit" | "/q" => ReplCommand::Quit,
        "/new" => ReplCommand::New,
        "/history" => ReplCommand::History,
        "/help" | "/?" => ReplCommand::Help,
        _ => ReplCommand::Send(trimmed.to_string()),
    }
}

async fn run_repl(ctx: &Context, workspace_id: &str, resume: Option<String>) -> Result<()> {
    let api = ctx.client.chat();
    let workspace = ctx.client.workspaces().get(workspace_id).await?;

    let mut conversation_id = match resume {
        Some(id) => {
            print_messages(&api.get_messages(&id).await?);
            id
        }
        None => {
            api.create_conversation(workspace_id, Some(DEFAULT_CONVERSATION_TITLE))
                .await?
                .id
        }
    };

    let mut rl = DefaultEditor::new().map_err(ResearchHubError::Readline)?;

    println!(
        "\nChatting about {} (conversation {}). Type {} for commands.\n",
        workspace.name.bold(),
        conversation_id.cyan(),
        "/help".cyan()
    );

    loop {
        let line = match rl.readline(&format!("{} ", "you>".green().bold())) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(ResearchHubError::Readline(e).into()),
        };

        match parse_repl_line(&line) {
            ReplCommand::Skip => continue,
            ReplCommand::Quit => break,
            ReplCommand::Help => print_repl_help(),
            ReplCommand::History => match api.get_messages(&conversation_id).await {
                Ok(messages) => print_messages(&messages),
                Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
            },
            ReplCommand::New => {
                match api
                    .create_conversation(workspace_id, Some(DEFAULT_CONVERSATION_TITLE))
                    .await
                {
                    Ok(conversation) => {
                        conversation_id = conversation.id;
                        println!(
                            "{}",
                            format!("Started conversation {}", conversation_id).green()
                        );
                    }
                    Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
                }
            }
            ReplCommand::Send(text) => {
                rl.add_history_entry(text.as_str())
                    .map_err(ResearchHubError::Readline)?;
                match api.send_message(workspace_id, &conversation_id, &text).await {
                    Ok(exchange) => print_message(&exchange.response),
                    Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
                }
            }
        }
    }

    println!("Goodbye.");
    Ok(())
}

fn print_repl_help() {
    println!("  {}      start a new conversation", "/new".cyan());
    println!("  {}  reprint this conversation", "/history".cyan());
    println!("  {}     leave the session", "/quit".cyan());
}

pub(crate) fn print_conversations(conversations: &[Conversation]) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(row!["ID".bold(), "Title".bold(), "Last Updated".bold()]);

    for conversation in conversations {
        table.add_row(row![
            conversation.id.cyan(),
            truncate(&conversation.title, 40),
            conversation.updated_at.format("%Y-%m-%d %H:%M").to_string()
        ]);
    }

    println!();
    table.printstd();
    println!();
}

/// Prints messages in the order the backend returned them.
fn print_messages(messages: &[Message]) {
    if messages.is_empty() {
        println!("{}", "No messages yet.".yellow());
        return;
    }
    for message in messages {
        print_message(message);
    }
}

fn print_message(message: &Message) {
    let label = match message.role {
        Role::User => "you".green().bold(),
        Role::Assistant => "assistant".blue().bold(),
    };
    println!(
        "{} {}",
        label,
        message.created_at.format("%H:%M").to_string().dimmed()
    );
    println!("{}\n", message.content);
}
