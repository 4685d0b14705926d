//! Edit and delete coordination.
//!
//! Each action sends the remote request first and only on success applies
//! the matching transformation to the cache and closes the dialog. On
//! failure the cache is untouched, the dialog stays open, and the error is
//! recorded on the panel for display. No automatic retry either way — the
//! operator decides.

use log::{error, info, warn};

use crate::config::ApiConfig;
use crate::http::{ApiError, Http};

use super::cache::DirectoryCache;
use super::state::{EntryAction, PanelState};
use super::{EntryPatch, api};

/// What can go wrong while mutating an entry.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// A mutation was requested with no entry selected. This cannot be
    /// reached through the UI; it is a programming error, not a remote
    /// failure.
    #[error("no entry is selected for this action")]
    NoSelection,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// PUT the patch for `id`, then fold it into the cache.
pub async fn edit_entry(
    http: &Http,
    config: &ApiConfig,
    cache: &mut DirectoryCache,
    panel: &mut PanelState,
    id: u64,
    patch: EntryPatch,
) -> Result<(), ActionError> {
    panel.set_action_in_progress();

    match api::update_entry(http, config, id, &patch).await {
        Ok(()) => {
            if !cache.apply_edit(id, &patch) {
                // The remote accepted an id the cache no longer holds;
                // nothing local to update.
                warn!("edited entry {id} is not in the local cache");
            }
            info!("entry {id} edited");
            panel.close_action();
            Ok(())
        }
        Err(e) => {
            error!("edit of entry {id} failed: {e}");
            panel.set_action_error(e.user_message());
            Err(e.into())
        }
    }
}

/// DELETE the selected entry, then drop it from the cache.
///
/// The selection is the delete dialog's target: calling this without an
/// active delete action is [`ActionError::NoSelection`].
pub async fn delete_entry(
    http: &Http,
    config: &ApiConfig,
    cache: &mut DirectoryCache,
    panel: &mut PanelState,
) -> Result<(), ActionError> {
    let EntryAction::Delete(id) = panel.current_action else {
        return Err(ActionError::NoSelection);
    };

    panel.set_action_in_progress();

    match api::delete_entry(http, config, id).await {
        Ok(()) => {
            if !cache.apply_delete(id) {
                warn!("deleted entry {id} was not in the local cache");
            }
            info!("entry {id} deleted");
            panel.close_action();
            Ok(())
        }
        Err(e) => {
            error!("delete of entry {id} failed: {e}");
            panel.set_action_error(e.user_message());
            Err(e.into())
        }
    }
}
