//! One-shot edit of a single entry.

use anyhow::{Context as _, Result};
use inquire::Text;
use roster_business::{EntryAction, PanelState, edit_entry};
use tracing::instrument;

use crate::auth::ensure_signed_in;
use crate::context::CliContext;

use super::load_directory;

#[instrument(skip_all, name = "edit", fields(id))]
pub async fn run_edit(
    ctx: &mut CliContext,
    id: u64,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
) -> Result<()> {
    ensure_signed_in(ctx).await?;

    let mut cache = load_directory(ctx).await;
    if cache.get(id).is_none() {
        ctx.out.error(format!("No entry with id {id}"));
        std::process::exit(1);
    }

    let mut panel = PanelState::new();
    panel.start_action(EntryAction::Edit(id), cache.snapshot());

    // With no flags the three fields are prompted for, prefilled with the
    // current values. With any flag given the command stays non-interactive
    // and unspecified fields keep their current values.
    let prompt_all = first_name.is_none() && last_name.is_none() && email.is_none();
    if let Some(first_name) = first_name {
        panel.edit_first_name = first_name;
    }
    if let Some(last_name) = last_name {
        panel.edit_last_name = last_name;
    }
    if let Some(email) = email {
        panel.edit_email = email;
    }

    if prompt_all {
        panel.edit_first_name = Text::new("First name:")
            .with_initial_value(&panel.edit_first_name)
            .prompt()
            .context("Failed to read first name")?;
        panel.edit_last_name = Text::new("Last name:")
            .with_initial_value(&panel.edit_last_name)
            .prompt()
            .context("Failed to read last name")?;
        panel.edit_email = Text::new("Email:")
            .with_initial_value(&panel.edit_email)
            .prompt()
            .context("Failed to read email")?;
    }

    let patch = panel.edit_patch();
    // Validation failures never reach the remote.
    if patch.first_name.is_empty() {
        ctx.out.error("First name is required");
        std::process::exit(1);
    }
    if patch.last_name.is_empty() {
        ctx.out.error("Last name is required");
        std::process::exit(1);
    }
    if patch.email.is_empty() {
        ctx.out.error("Email is required");
        std::process::exit(1);
    }

    match edit_entry(&ctx.http, &ctx.config, &mut cache, &mut panel, id, patch).await {
        Ok(()) => {
            ctx.out.success("User details edited successfully");
            Ok(())
        }
        Err(e) => {
            let message = panel
                .action_error()
                .map(str::to_owned)
                .unwrap_or_else(|| e.to_string());
            ctx.out.error(message);
            std::process::exit(1);
        }
    }
}
