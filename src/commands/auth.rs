//! `researchhub auth ...`

use colored::Colorize;

use super::{print_json, Context, TOKEN_ENV_VAR};
use crate::api::AuthSession;
use crate::cli::AuthCommand;
use crate::error::Result;
use crate::session::StoredSession;

pub async fn handle(ctx: &Context, command: AuthCommand) -> Result<()> {
    match command {
        AuthCommand::Register {
            email,
            password,
            full_name,
        } => {
            let auth = ctx
                .client
                .auth()
                .register(&email, &password, &full_name)
                .await?;
            persist(ctx, &auth);
            report(ctx, &auth, "Registered")
        }
        AuthCommand::Login { email, password } => {
            let auth = ctx.client.auth().login(&email, &password).await?;
            persist(ctx, &auth);
            report(ctx, &auth, "Logged in")
        }
        AuthCommand::Logout => {
            ctx.client.auth().logout();
            forget(ctx);
            println!(
                "{}",
                format!("Logged out of profile {}", ctx.config.session.profile).green()
            );
            Ok(())
        }
        AuthCommand::Status => status(ctx),
    }
}

/// Saves the new session to the keyring when persistence is enabled.
///
/// The login itself already succeeded, so a keyring failure only warns.
fn persist(ctx: &Context, auth: &AuthSession) {
    if !ctx.config.session.persist {
        tracing::debug!("Session persistence disabled; not storing token");
        return;
    }
    let stored = StoredSession::from_auth(auth, &ctx.config.api.base_url);
    if let Err(e) = ctx.store().save(&ctx.config.session.profile, &stored) {
        tracing::warn!("Could not store session: {}", e);
        eprintln!(
            "{}",
            format!(
                "Warning: session not saved ({}). Export {} to reuse the token.",
                e, TOKEN_ENV_VAR
            )
            .yellow()
        );
    }
}

/// Removes the stored session for the profile. The local session is already
/// gone, so a keyring failure only warns.
fn forget(ctx: &Context) {
    if !ctx.config.session.persist {
        return;
    }
    if let Err(e) = ctx.store().delete(&ctx.config.session.profile) {
        tracing::warn!("Could not remove stored session: {}", e);
        eprintln!(
            "{}",
            format!("Warning: stored session not removed ({}).", e).yellow()
        );
    }
}

/// Reads the stored session; an unreadable keyring counts as none stored.
fn load_stored(ctx: &Context) -> Option<StoredSession> {
    if !ctx.config.session.persist {
        return None;
    }
    match ctx.store().load(&ctx.config.session.profile) {
        Ok(stored) => stored,
        Err(e) => {
            tracing::warn!("Could not read stored session: {}", e);
            None
        }
    }
}

fn report(ctx: &Context, auth: &AuthSession, verb: &str) -> Result<()> {
    if ctx.json() {
        return print_json(auth);
    }
    let name = if auth.user.full_name.is_empty() {
        auth.user.email.clone()
    } else {
        format!("{} <{}>", auth.user.full_name, auth.user.email)
    };
    println!("{} {}", format!("{} as", verb).green(), name.bold());
    Ok(())
}

fn status(ctx: &Context) -> Result<()> {
    let profile = &ctx.config.session.profile;
    let stored = load_stored(ctx);

    if ctx.json() {
        return print_json(&stored.as_ref().map(StoredSession::redacted));
    }

    match stored {
        Some(stored) => {
            let who = stored
                .user
                .as_ref()
                .map(|u| u.email.clone())
                .unwrap_or_else(|| "unknown user".to_string());
            println!(
                "Profile {}: logged in as {} on {}",
                profile.cyan(),
                who.bold(),
                stored.base_url
            );
            if !stored.matches_backend(&ctx.config.api.base_url) {
                println!(
                    "{}",
                    format!(
                        "Note: the configured backend is {}; this session will not be used.",
                        ctx.config.api.base_url
                    )
                    .yellow()
                );
            }
        }
        None => println!(
            "Profile {}: {}",
            profile.cyan(),
            "not logged in".yellow()
        ),
    }
    Ok(())
}
