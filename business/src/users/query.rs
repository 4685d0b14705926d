//! Pure derivation of the visible page from the cached collection.
//!
//! `derive` is a function of exactly its inputs — no side effects, no
//! clock, no IO — so callers are free to re-run it on every render.

use super::DirectoryEntry;

/// Entries shown per page. Matches the remote's own page size.
pub const PAGE_SIZE: usize = 6;

/// The visible slice plus its pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    /// Entries visible on the requested page, in cache order.
    pub entries: Vec<DirectoryEntry>,
    /// The 1-based page that was requested.
    pub page: u32,
    /// How many entries matched the search, across all pages.
    pub matching: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageView {
    /// Page count of the filtered result. At least 1, so "page 1/1" renders
    /// even for an empty result.
    pub fn page_count(&self) -> usize {
        self.matching.div_ceil(PAGE_SIZE).max(1)
    }
}

/// Case-insensitive substring match on first or last name. An empty search
/// matches everything.
fn matches(entry: &DirectoryEntry, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    entry.first_name.to_lowercase().contains(&needle)
        || entry.last_name.to_lowercase().contains(&needle)
}

/// Filter `entries` by `search`, then slice out 1-based page `page`.
///
/// "Has next" is derived from the *filtered* result length, not from the
/// remote's unfiltered page count — with a search active the two disagree,
/// and the filtered length is the one the operator is actually paging
/// through. A page past the end of the filtered result yields an empty
/// slice rather than an error.
pub fn derive(entries: &[DirectoryEntry], search: &str, page: u32) -> PageView {
    let page = page.max(1);
    let filtered: Vec<&DirectoryEntry> = entries.iter().filter(|e| matches(e, search)).collect();

    let start = (page as usize - 1) * PAGE_SIZE;
    let visible = filtered
        .get(start..filtered.len().min(start + PAGE_SIZE))
        .unwrap_or_default()
        .iter()
        .map(|&e| e.clone())
        .collect();

    PageView {
        entries: visible,
        page,
        matching: filtered.len(),
        has_previous: page > 1,
        has_next: filtered.len() > page as usize * PAGE_SIZE,
    }
}
