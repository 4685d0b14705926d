//! The local mirror of the remote user collection.
//!
//! The cache is populated exactly once per session by concatenating every
//! remote page, then mutated only by successful edits and deletes. It is
//! never refreshed behind the operator's back, so it can diverge from the
//! remote if another actor mutates the directory concurrently — an accepted
//! consistency model (last writer wins from this session's point of view),
//! not something this type tries to detect.

use log::{error, info};

use crate::config::ApiConfig;
use crate::http::{ApiError, Http};

use super::{DirectoryEntry, EntryPatch, api};

/// Load lifecycle of the cache.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// No load attempted yet.
    #[default]
    Idle,
    /// A load is in flight.
    Loading,
    /// The full collection is mirrored locally.
    Loaded,
    /// The load failed; the cache is empty and may be retried.
    Failed(String),
}

/// Ordered, id-unique mirror of the remote collection.
///
/// The backing sequence is deliberately private: outside code reads via
/// [`snapshot`](Self::snapshot)/[`get`](Self::get) and mutates only through
/// the `apply_*` transformations.
#[derive(Debug, Default)]
pub struct DirectoryCache {
    entries: Vec<DirectoryEntry>,
    remote_total_pages: Option<u32>,
    phase: LoadPhase,
}

impl DirectoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cache that is already loaded. Primarily for tests.
    pub fn from_loaded(entries: Vec<DirectoryEntry>, total_pages: u32) -> Self {
        Self {
            entries,
            remote_total_pages: Some(total_pages),
            phase: LoadPhase::Loaded,
        }
    }

    /// Read-only view of the full cached sequence, in remote order.
    pub fn snapshot(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn is_loaded(&self) -> bool {
        self.phase == LoadPhase::Loaded
    }

    /// The page count the remote reported for the unfiltered collection.
    pub fn remote_total_pages(&self) -> Option<u32> {
        self.remote_total_pages
    }

    pub fn get(&self, id: u64) -> Option<&DirectoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Replace the editable fields of the entry with `id`, in place: same
    /// position, same id, avatar untouched. Returns false if no entry with
    /// that id exists.
    pub fn apply_edit(&mut self, id: u64, patch: &EntryPatch) -> bool {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.first_name = patch.first_name.clone();
                entry.last_name = patch.last_name.clone();
                entry.email = patch.email.clone();
                true
            }
            None => false,
        }
    }

    /// Remove the entry with `id`. Returns false if no entry matched.
    pub fn apply_delete(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() < before
    }

    /// Transition into `Loading` if a load is allowed right now.
    ///
    /// Loads are allowed from `Idle` and from `Failed` (the failure left the
    /// cache empty, so the operator may retry); a load already in flight or
    /// already completed makes this a no-op.
    fn begin_load(&mut self) -> bool {
        match self.phase {
            LoadPhase::Idle | LoadPhase::Failed(_) => {
                self.phase = LoadPhase::Loading;
                true
            }
            LoadPhase::Loading | LoadPhase::Loaded => false,
        }
    }

    fn finish_load(&mut self, entries: Vec<DirectoryEntry>, total_pages: u32) {
        self.entries = entries;
        self.remote_total_pages = Some(total_pages);
        self.phase = LoadPhase::Loaded;
    }

    fn fail_load(&mut self, message: String) {
        self.entries.clear();
        self.phase = LoadPhase::Failed(message);
    }
}

/// Fetch the whole remote collection into the cache.
///
/// Issues the minimum number of paged requests: page 1 reveals the remote's
/// page count, then pages `2..=total_pages` follow. A call while a load is
/// in flight or after a successful load is a no-op. On any failure the
/// cache stays empty and no retry is attempted here.
pub async fn load_all(
    http: &Http,
    config: &ApiConfig,
    cache: &mut DirectoryCache,
) -> Result<(), ApiError> {
    if !cache.begin_load() {
        return Ok(());
    }

    match fetch_all_pages(http, config).await {
        Ok((entries, total_pages)) => {
            info!(
                "directory loaded: {} entries across {} remote pages",
                entries.len(),
                total_pages
            );
            cache.finish_load(entries, total_pages);
            Ok(())
        }
        Err(e) => {
            error!("directory load failed: {e}");
            cache.fail_load(e.user_message());
            Err(e)
        }
    }
}

async fn fetch_all_pages(
    http: &Http,
    config: &ApiConfig,
) -> Result<(Vec<DirectoryEntry>, u32), ApiError> {
    let first = api::list_page(http, config, 1).await?;
    let total_pages = first.total_pages;
    let mut entries = first.data;

    for page in 2..=total_pages {
        let next = api::list_page(http, config, page).await?;
        entries.extend(next.data);
    }

    Ok((entries, total_pages))
}
