//! `researchhub paper ...`

use std::path::Path;

use colored::Colorize;
use prettytable::{format, row, Table};

use super::{print_json, truncate, Context};
use crate::api::Paper;
use crate::cli::PaperCommand;
use crate::error::{RequestError, Result};

pub async fn handle(ctx: &Context, command: PaperCommand) -> Result<()> {
    let api = ctx.client.papers();
    match command {
        PaperCommand::Search { query, limit } => {
            tracing::info!("Searching papers for {:?} (limit {})", query, limit);
            let papers = api.search(&query, limit).await?;
            if ctx.json() {
                return print_json(&papers);
            }
            if papers.is_empty() {
                println!("{}", format!("No papers found for {:?}.", query).yellow());
            } else {
                print_papers(&papers);
                println!(
                    "Use {} to add one to a workspace.",
                    "researchhub paper import <WORKSPACE> <PAPER>".cyan()
                );
            }
        }
        PaperCommand::Import { workspace, paper } => import(ctx, &workspace, &paper).await?,
        PaperCommand::List { workspace } => {
            let papers = api.list_for_workspace(&workspace).await?;
            if ctx.json() {
                return print_json(&papers);
            }
            if papers.is_empty() {
                println!("{}", "No papers in this workspace.".yellow());
            } else {
                print_papers(&papers);
            }
        }
        PaperCommand::Upload {
            file,
            title,
            authors,
            workspace,
        } => upload(ctx, &file, &title, &authors, workspace.as_deref()).await?,
        PaperCommand::Remove { workspace, paper } => {
            api.remove_from_workspace(&workspace, &paper).await?;
            println!(
                "{}",
                format!("Removed paper {} from workspace {}", paper, workspace).green()
            );
        }
    }
    Ok(())
}

async fn import(ctx: &Context, workspace: &str, paper: &str) -> Result<()> {
    match ctx.client.papers().import(workspace, paper).await {
        Ok(receipt) => {
            if ctx.json() {
                return print_json(&receipt);
            }
            let message = if receipt.message.is_empty() {
                "Paper imported successfully".to_string()
            } else {
                receipt.message
            };
            println!("{}", message.green());
            Ok(())
        }
        Err(e) if e.is_duplicate_import() => {
            println!("{}", "This paper is already in your workspace.".yellow());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

async fn upload(
    ctx: &Context,
    file: &Path,
    title: &str,
    authors: &str,
    workspace: Option<&str>,
) -> Result<()> {
    let contents = tokio::fs::read(file).await?;
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.pdf".to_string());

    tracing::info!("Uploading {} ({} bytes)", file_name, contents.len());
    let paper = ctx
        .client
        .papers()
        .upload(&file_name, contents, title, authors)
        .await?;

    if let Some(workspace) = workspace {
        match ctx.client.papers().import(workspace, &paper.id).await {
            Ok(_) => tracing::info!("Imported {} into {}", paper.id, workspace),
            Err(e) if e.is_duplicate_import() => {
                tracing::debug!("{} already in {}", paper.id, workspace)
            }
            Err(e) => return Err(with_context(e, "uploaded, but import failed")),
        }
    }

    if ctx.json() {
        return print_json(&paper);
    }
    println!(
        "{} {} ({})",
        "Uploaded".green(),
        paper.title.bold(),
        paper.id.cyan()
    );
    Ok(())
}

fn with_context(err: RequestError, context: &str) -> anyhow::Error {
    anyhow::Error::new(err).context(context.to_string())
}

pub(crate) fn print_papers(papers: &[Paper]) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(row![
        "ID".bold(),
        "Title".bold(),
        "Authors".bold(),
        "Published".bold(),
        "arXiv".bold()
    ]);

    for paper in papers {
        let authors = match paper.authors.len() {
            0 => "-".to_string(),
            1 | 2 => paper.authors.join(", "),
            _ => format!("{} et al.", paper.authors[0]),
        };
        let published = paper
            .publication_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(row![
            paper.id.cyan(),
            truncate(&paper.title, 50),
            truncate(&authors, 30),
            published,
            paper.arxiv_id.clone().unwrap_or_else(|| "-".to_string())
        ]);
    }

    println!();
    table.printstd();
    println!();
}
