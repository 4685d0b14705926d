//! Interactive directory browser.
//!
//! One load per session, then a loop over the panel state: search, page
//! navigation, and per-entry edit/delete dialogs. Mutations update the
//! local mirror on success; a failed mutation keeps its dialog open with
//! the error shown, and the operator decides whether to retry.

use anyhow::{Context as _, Result};
use inquire::{Confirm, Select, Text};
use roster_business::{
    DirectoryCache, EntryAction, PanelState, delete_entry, derive, edit_entry,
};
use tracing::instrument;

use crate::auth::ensure_signed_in;
use crate::context::CliContext;

use super::{entries_table, load_directory};

const MENU_NEXT: &str = "Next page";
const MENU_PREVIOUS: &str = "Previous page";
const MENU_SEARCH: &str = "Search by name";
const MENU_CLEAR_SEARCH: &str = "Clear search";
const MENU_QUIT: &str = "Quit";

#[instrument(skip_all, name = "browse")]
pub async fn run_browse(ctx: &mut CliContext) -> Result<()> {
    ensure_signed_in(ctx).await?;

    let mut cache = load_directory(ctx).await;
    let mut panel = PanelState::new();
    let mut page: u32 = 1;

    loop {
        let view = derive(cache.snapshot(), &panel.search_input, page);

        // A delete can empty the page we were on; fall back to the last
        // page that still has content.
        if view.entries.is_empty() && view.page > 1 {
            page = view.page_count() as u32;
            continue;
        }

        ctx.out.newline();
        if view.entries.is_empty() {
            ctx.out
                .print(format!("No entries matching '{}'.", panel.search_input));
        } else {
            ctx.out.print(entries_table(&view.entries));
        }
        ctx.out.print(format!(
            "Page {}/{} ({} matching entries)",
            view.page,
            view.page_count(),
            view.matching,
        ));

        let mut options: Vec<String> = view
            .entries
            .iter()
            .map(|entry| format!("{} <{}> [{}]", entry.full_name(), entry.email, entry.id))
            .collect();
        if view.has_next {
            options.push(MENU_NEXT.to_owned());
        }
        if view.has_previous {
            options.push(MENU_PREVIOUS.to_owned());
        }
        options.push(MENU_SEARCH.to_owned());
        if !panel.search_input.is_empty() {
            options.push(MENU_CLEAR_SEARCH.to_owned());
        }
        options.push(MENU_QUIT.to_owned());

        let selection = Select::new("Select an entry or an action:", options)
            .with_help_message("Use arrow keys to navigate, Enter to select")
            .prompt_skippable()
            .context("Failed to read selection")?;

        match selection.as_deref() {
            None | Some(MENU_QUIT) => break,
            Some(MENU_NEXT) => page += 1,
            Some(MENU_PREVIOUS) => page -= 1,
            Some(MENU_SEARCH) => {
                let search = Text::new("Search:")
                    .with_initial_value(&panel.search_input)
                    .with_help_message("Matches first or last name, case-insensitive")
                    .prompt()
                    .context("Failed to read search text")?;
                panel.search_input = search;
                page = 1;
            }
            Some(MENU_CLEAR_SEARCH) => {
                panel.search_input.clear();
                page = 1;
            }
            Some(selected) => {
                if let Some(id) = extract_id(selected) {
                    entry_dialog(ctx, &mut cache, &mut panel, id).await?;
                }
            }
        }
    }

    Ok(())
}

/// Pull the `[id]` suffix back out of a rendered entry line.
fn extract_id(selected: &str) -> Option<u64> {
    let start = selected.rfind('[')?;
    selected[start + 1..selected.len() - 1].parse().ok()
}

/// Per-entry menu: edit, delete, or back.
async fn entry_dialog(
    ctx: &mut CliContext,
    cache: &mut DirectoryCache,
    panel: &mut PanelState,
    id: u64,
) -> Result<()> {
    let Some(entry) = cache.get(id) else {
        return Ok(());
    };
    let full_name = entry.full_name();

    let choice = Select::new(&format!("{full_name}:"), vec!["Edit", "Delete", "Back"])
        .prompt_skippable()
        .context("Failed to read action")?;

    match choice.as_deref() {
        Some("Edit") => edit_dialog(ctx, cache, panel, id).await,
        Some("Delete") => delete_dialog(ctx, cache, panel, id, &full_name).await,
        _ => Ok(()),
    }
}

/// Edit dialog. Stays open after a failed mutation so the operator can fix
/// the input or retry; cancelling any prompt closes it.
async fn edit_dialog(
    ctx: &mut CliContext,
    cache: &mut DirectoryCache,
    panel: &mut PanelState,
    id: u64,
) -> Result<()> {
    panel.start_action(EntryAction::Edit(id), cache.snapshot());

    loop {
        if let Some(error) = panel.action_error() {
            ctx.out.error(error);
        }

        let Some(first_name) = Text::new("First name:")
            .with_initial_value(&panel.edit_first_name)
            .prompt_skippable()
            .context("Failed to read first name")?
        else {
            panel.close_action();
            return Ok(());
        };
        let Some(last_name) = Text::new("Last name:")
            .with_initial_value(&panel.edit_last_name)
            .prompt_skippable()
            .context("Failed to read last name")?
        else {
            panel.close_action();
            return Ok(());
        };
        let Some(email) = Text::new("Email:")
            .with_initial_value(&panel.edit_email)
            .prompt_skippable()
            .context("Failed to read email")?
        else {
            panel.close_action();
            return Ok(());
        };

        panel.edit_first_name = first_name;
        panel.edit_last_name = last_name;
        panel.edit_email = email;

        let patch = panel.edit_patch();
        if patch.first_name.is_empty() || patch.last_name.is_empty() || patch.email.is_empty() {
            ctx.out.error("All fields are required");
            continue;
        }

        if edit_entry(&ctx.http, &ctx.config, cache, panel, id, patch)
            .await
            .is_ok()
        {
            ctx.out.success("User details edited successfully");
            return Ok(());
        }
        // Failure: the dialog stays open with the error; loop to retry.
    }
}

/// Delete confirmation dialog.
async fn delete_dialog(
    ctx: &mut CliContext,
    cache: &mut DirectoryCache,
    panel: &mut PanelState,
    id: u64,
    full_name: &str,
) -> Result<()> {
    panel.start_action(EntryAction::Delete(id), cache.snapshot());

    loop {
        if let Some(error) = panel.action_error() {
            ctx.out.error(error);
        }

        let confirmed = Confirm::new(&format!("Permanently delete {full_name}?"))
            .with_default(false)
            .with_help_message("This action cannot be undone")
            .prompt_skippable()
            .context("Failed to confirm")?
            .unwrap_or(false);

        if !confirmed {
            panel.close_action();
            ctx.out.print("Cancelled.");
            return Ok(());
        }

        if delete_entry(&ctx.http, &ctx.config, cache, panel)
            .await
            .is_ok()
        {
            ctx.out.success("User deleted successfully");
            return Ok(());
        }
        // Failure: the dialog stays open with the error; loop to retry.
    }
}
