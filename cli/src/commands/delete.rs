//! One-shot delete of a single entry.

use anyhow::{Context as _, Result};
use inquire::Confirm;
use roster_business::{EntryAction, PanelState, delete_entry};
use tracing::instrument;

use crate::auth::ensure_signed_in;
use crate::context::CliContext;

use super::load_directory;

#[instrument(skip_all, name = "delete", fields(id))]
pub async fn run_delete(ctx: &mut CliContext, id: u64, yes: bool) -> Result<()> {
    ensure_signed_in(ctx).await?;

    let mut cache = load_directory(ctx).await;
    let Some(entry) = cache.get(id) else {
        ctx.out.error(format!("No entry with id {id}"));
        std::process::exit(1);
    };
    let full_name = entry.full_name();

    let mut panel = PanelState::new();
    panel.start_action(EntryAction::Delete(id), cache.snapshot());

    if !yes {
        let confirmed = Confirm::new(&format!("Permanently delete {full_name}?"))
            .with_default(false)
            .with_help_message("This action cannot be undone")
            .prompt()
            .context("Failed to confirm")?;

        if !confirmed {
            panel.close_action();
            ctx.out.print("Cancelled.");
            return Ok(());
        }
    }

    match delete_entry(&ctx.http, &ctx.config, &mut cache, &mut panel).await {
        Ok(()) => {
            ctx.out.success("User deleted successfully");
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
