//! The user directory: cached mirror, pure page derivation, and mutations.

pub mod actions;
pub mod api;
pub mod cache;
pub mod query;
pub mod state;

pub use actions::{ActionError, delete_entry, edit_entry};
pub use cache::{DirectoryCache, LoadPhase, load_all};
pub use query::{PAGE_SIZE, PageView, derive};
pub use state::{EntryAction, PanelState};

use serde::{Deserialize, Serialize};

/// One remote user-directory record, mirrored locally.
///
/// Owned exclusively by [`DirectoryCache`]; everything else refers to an
/// entry by `id` and reads it through the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Remote-assigned, stable identifier.
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Avatar image URL. Never touched by edits.
    pub avatar: String,
}

impl DirectoryEntry {
    /// Display name, `"First Last"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One page of the remote collection.
#[derive(Debug, Clone, Deserialize)]
pub struct ListPageResponse {
    pub data: Vec<DirectoryEntry>,
    pub total_pages: u32,
}

/// The editable fields of an entry, as sent to the remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryPatch {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}
