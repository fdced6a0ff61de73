//! `researchhub workspace ...`

use colored::Colorize;
use prettytable::{format, row, Table};

use super::{chat, paper, print_json, truncate, Context};
use crate::api::{Workspace, WorkspaceUpdate};
use crate::cli::WorkspaceCommand;
use crate::error::{Result, ResearchHubError};

pub async fn handle(ctx: &Context, command: WorkspaceCommand) -> Result<()> {
    let api = ctx.client.workspaces();
    match command {
        WorkspaceCommand::Create { name, description } => {
            let workspace = api.create(&name, description.as_deref()).await?;
            if ctx.json() {
                return print_json(&workspace);
            }
            println!(
                "{} {} ({})",
                "Created workspace".green(),
                workspace.name.bold(),
                workspace.id.cyan()
            );
        }
        WorkspaceCommand::List => {
            let workspaces = api.list().await?;
            if ctx.json() {
                return print_json(&workspaces);
            }
            print_workspaces(&workspaces);
        }
        WorkspaceCommand::Show { id } => show(ctx, &id).await?,
        WorkspaceCommand::Update {
            id,
            name,
            description,
        } => {
            let update = WorkspaceUpdate { name, description };
            if update.is_empty() {
                return Err(ResearchHubError::Config(
                    "nothing to update: pass --name and/or --description".to_string(),
                )
                .into());
            }
            let workspace = api.update(&id, &update).await?;
            if ctx.json() {
                return print_json(&workspace);
            }
            println!(
                "{} {}",
                "Updated workspace".green(),
                workspace.name.bold()
            );
        }
        WorkspaceCommand::Delete { id } => {
            api.delete(&id).await?;
            println!("{}", format!("Deleted workspace {}", id).green());
        }
    }
    Ok(())
}

/// Fetches the workspace, its papers and its conversations concurrently.
async fn show(ctx: &Context, id: &str) -> Result<()> {
    let workspaces = ctx.client.workspaces();
    let papers = ctx.client.papers();
    let chat_api = ctx.client.chat();

    let (workspace, papers, conversations) = futures::try_join!(
        workspaces.get(id),
        papers.list_for_workspace(id),
        chat_api.list_conversations(id),
    )?;

    if ctx.json() {
        return print_json(&serde_json::json!({
            "workspace": workspace,
            "papers": papers,
            "conversations": conversations,
        }));
    }

    println!();
    println!("{}", workspace.name.bold());
    if let Some(description) = workspace.description.as_deref().filter(|d| !d.is_empty()) {
        println!("{}", description);
    }
    println!(
        "{} {}   {} {}",
        "ID:".dimmed(),
        workspace.id.cyan(),
        "Updated:".dimmed(),
        workspace.updated_at.format("%Y-%m-%d %H:%M")
    );

    println!("\n{} ({})", "Papers".bold(), papers.len());
    if papers.is_empty() {
        println!("{}", "No papers yet. Use `researchhub paper search`.".yellow());
    } else {
        paper::print_papers(&papers);
    }

    println!("\n{} ({})", "Conversations".bold(), conversations.len());
    if !conversations.is_empty() {
        chat::print_conversations(&conversations);
    }
    println!();
    Ok(())
}

fn print_workspaces(workspaces: &[Workspace]) {
    if workspaces.is_empty() {
        println!("{}", "No workspaces found.".yellow());
        return;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(row![
        "ID".bold(),
        "Name".bold(),
        "Description".bold(),
        "Updated".bold()
    ]);

    for workspace in workspaces {
        let description = workspace
            .description
            .as_deref()
            .map(|d| truncate(d, 40))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(row![
            workspace.id.cyan(),
            truncate(&workspace.name, 30),
            description,
            workspace.updated_at.format("%Y-%m-%d %H:%M").to_string()
        ]);
    }

    println!();
    table.printstd();
    println!();
}
