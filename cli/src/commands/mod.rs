//! Command implementations.

pub mod browse;
pub mod delete;
pub mod edit;
pub mod list;

use roster_business::{DirectoryCache, DirectoryEntry, load_all};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::context::CliContext;

/// Mirror the full remote collection, exiting with the surfaced error if
/// the load fails. Each command invocation owns one cache for its session.
pub async fn load_directory(ctx: &mut CliContext) -> DirectoryCache {
    let mut cache = DirectoryCache::new();
    if let Err(e) = load_all(&ctx.http, &ctx.config, &mut cache).await {
        ctx.out.error(e.user_message());
        std::process::exit(1);
    }
    cache
}

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{truncated}...")
    } else {
        s.to_owned()
    }
}

/// Render entries as a rounded table.
pub fn entries_table(entries: &[DirectoryEntry]) -> String {
    let rows: Vec<EntryRow> = entries
        .iter()
        .map(|entry| EntryRow {
            id: entry.id,
            name: truncate_str(&entry.full_name(), 32),
            email: truncate_str(&entry.email, 40),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    table.to_string()
}
