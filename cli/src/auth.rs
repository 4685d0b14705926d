//! Sign-in, sign-out, and the guard in front of protected commands.

use std::io::IsTerminal as _;

use anyhow::{Context as _, Result};
use chrono::Utc;
use inquire::Text;
use roster_business::{Access, Session, SessionGate, login, logout};
use tracing::instrument;

use crate::context::CliContext;

/// Prompt for credentials and sign in, persisting the session on success.
async fn prompt_login(ctx: &mut CliContext) -> Result<Session> {
    let email = Text::new("Email:")
        .with_help_message("Enter your account email")
        .prompt()
        .context("Failed to read email")?;

    let email = email.trim().to_owned();
    if email.is_empty() {
        ctx.out.error("Email is required");
        std::process::exit(1);
    }

    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;
    if password.trim().is_empty() {
        ctx.out.error("Password is required");
        std::process::exit(1);
    }

    match login(
        &ctx.http,
        &ctx.config,
        &mut ctx.store,
        &email,
        &password,
        Utc::now(),
    )
    .await
    {
        Ok(session) => Ok(session),
        Err(e) => {
            ctx.out.error(e.user_message());
            std::process::exit(1);
        }
    }
}

#[instrument(skip_all, name = "login")]
pub async fn run_login(ctx: &mut CliContext) -> Result<()> {
    ctx.out.print("Sign in to the directory");
    ctx.out.newline();

    let session = prompt_login(ctx).await?;

    ctx.out.success("Logged in successfully");
    ctx.out.hint(format!(
        "  Session saved to {} (valid until {})",
        ctx.store.path().display(),
        session.expires_at.format("%Y-%m-%d %H:%M UTC"),
    ));
    Ok(())
}

#[instrument(skip_all, name = "logout")]
pub fn run_logout(ctx: &mut CliContext) -> Result<()> {
    logout(&mut ctx.store).context("Failed to clear the session store")?;
    ctx.out.success("Signed out");
    Ok(())
}

#[instrument(skip_all, name = "status")]
pub fn run_status(ctx: &mut CliContext) -> Result<()> {
    match SessionGate::check(&ctx.store, Utc::now()) {
        Access::Granted(session) => {
            ctx.out.success(format!(
                "Signed in (session valid until {})",
                session.expires_at.format("%Y-%m-%d %H:%M UTC"),
            ));
            ctx.out
                .hint(format!("  Session file: {}", ctx.store.path().display()));
        }
        Access::Denied(reason) => {
            ctx.out.warning(reason.message());
            ctx.out.hint("  Use 'roster login' to sign in.");
        }
    }
    Ok(())
}

/// Gate in front of every protected command.
///
/// Checked once on entry, not per render. On denial the operator is told
/// why and, when stdin is a terminal, dropped straight into the login
/// prompt; otherwise the command exits with a hint.
#[instrument(skip_all, name = "ensure_signed_in")]
pub async fn ensure_signed_in(ctx: &mut CliContext) -> Result<Session> {
    match SessionGate::check(&ctx.store, Utc::now()) {
        Access::Granted(session) => Ok(session),
        Access::Denied(reason) => {
            ctx.out.warning(reason.message());

            if !std::io::stdin().is_terminal() {
                ctx.out.error("Cannot prompt for login: stdin is not a terminal.");
                ctx.out.hint("  Run 'roster login' first.");
                std::process::exit(1);
            }

            ctx.out.newline();
            let session = prompt_login(ctx).await?;
            ctx.out.success("Logged in successfully");
            ctx.out.newline();
            Ok(session)
        }
    }
}
