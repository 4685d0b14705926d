//! Non-interactive listing.

use anyhow::Result;
use roster_business::derive;
use tracing::instrument;

use crate::auth::ensure_signed_in;
use crate::context::CliContext;

use super::{entries_table, load_directory};

#[instrument(skip_all, name = "list", fields(page, search = search.as_deref().unwrap_or("")))]
pub async fn run_list(ctx: &mut CliContext, page: u32, search: Option<String>) -> Result<()> {
    ensure_signed_in(ctx).await?;

    let cache = load_directory(ctx).await;
    let search = search.unwrap_or_default();
    let view = derive(cache.snapshot(), &search, page);

    if view.entries.is_empty() {
        if search.is_empty() {
            ctx.out.print("No entries on this page.");
        } else {
            ctx.out.print(format!("No entries matching '{search}'."));
        }
    } else {
        ctx.out.print(entries_table(&view.entries));
    }

    ctx.out.newline();
    ctx.out.print(format!(
        "Page {}/{} ({} matching entries)",
        view.page,
        view.page_count(),
        view.matching,
    ));
    if view.has_next {
        ctx.out.hint(format!("  Next: roster list --page {}", view.page + 1));
    }
    if view.has_previous {
        ctx.out.hint(format!("  Previous: roster list --page {}", view.page - 1));
    }

    Ok(())
}
