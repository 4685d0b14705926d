//! Interaction state for the directory panel.
//!
//! This lives in the business crate so the shell can stay "dumb": it reads
//! this state, renders it, and calls the action functions in
//! [`super::actions`]. At most one entry is ever the target of a pending
//! edit or delete, tracked by id — the entry itself stays owned by the
//! cache.

use super::{DirectoryEntry, EntryPatch};

/// Which dialog, if any, is currently active, and for which entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryAction {
    /// No action.
    #[default]
    None,

    /// Edit an entry's name and email.
    Edit(u64),

    /// Delete an entry (with confirmation).
    Delete(u64),
}

/// State for the directory panel.
#[derive(Debug, Default)]
pub struct PanelState {
    /// Free-text search input. Session-local, never persisted.
    pub search_input: String,

    /// Current action being performed.
    pub current_action: EntryAction,

    /// Edit dialog inputs, prefilled from the cache when the action starts.
    pub edit_first_name: String,
    pub edit_last_name: String,
    pub edit_email: String,

    /// Whether a mutation for the current action is in flight. The shell
    /// disables the corresponding control while this is set.
    pub action_in_progress: bool,

    /// Error from the last failed mutation, shown inside the open dialog.
    pub action_error: Option<String>,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an action, making its target the selected entry.
    ///
    /// For an edit the dialog inputs are initialized from the cached entry
    /// so an untouched field keeps its current value.
    pub fn start_action(&mut self, action: EntryAction, entries: &[DirectoryEntry]) {
        self.current_action = action;
        self.action_in_progress = false;
        self.action_error = None;

        if let EntryAction::Edit(id) = action {
            if let Some(entry) = entries.iter().find(|e| e.id == id) {
                self.edit_first_name = entry.first_name.clone();
                self.edit_last_name = entry.last_name.clone();
                self.edit_email = entry.email.clone();
            } else {
                self.edit_first_name.clear();
                self.edit_last_name.clear();
                self.edit_email.clear();
            }
        }
    }

    /// Close the current dialog and clear the selection.
    pub fn close_action(&mut self) {
        self.current_action = EntryAction::None;
        self.action_in_progress = false;
        self.action_error = None;
        self.edit_first_name.clear();
        self.edit_last_name.clear();
        self.edit_email.clear();
    }

    /// Record a failed mutation; the dialog stays open.
    pub fn set_action_error(&mut self, error: String) {
        self.action_error = Some(error);
        self.action_in_progress = false;
    }

    pub fn set_action_in_progress(&mut self) {
        self.action_in_progress = true;
        self.action_error = None;
    }

    /// The id of the entry the current action targets, if any.
    pub fn selected_id(&self) -> Option<u64> {
        match self.current_action {
            EntryAction::None => None,
            EntryAction::Edit(id) | EntryAction::Delete(id) => Some(id),
        }
    }

    /// The patch described by the current edit inputs, trimmed.
    pub fn edit_patch(&self) -> EntryPatch {
        EntryPatch {
            first_name: self.edit_first_name.trim().to_owned(),
            last_name: self.edit_last_name.trim().to_owned(),
            email: self.edit_email.trim().to_owned(),
        }
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    pub fn is_action_in_progress(&self) -> bool {
        self.action_in_progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<DirectoryEntry> {
        vec![
            DirectoryEntry {
                id: 2,
                first_name: "Janet".to_owned(),
                last_name: "Weaver".to_owned(),
                email: "janet.weaver@reqres.in".to_owned(),
                avatar: "https://reqres.in/img/faces/2-image.jpg".to_owned(),
            },
            DirectoryEntry {
                id: 3,
                first_name: "Emma".to_owned(),
                last_name: "Wong".to_owned(),
                email: "emma.wong@reqres.in".to_owned(),
                avatar: "https://reqres.in/img/faces/3-image.jpg".to_owned(),
            },
        ]
    }

    #[test]
    fn test_default_has_no_action() {
        let state = PanelState::new();
        assert_eq!(state.current_action, EntryAction::None);
        assert_eq!(state.selected_id(), None);
        assert!(!state.is_action_in_progress());
        assert!(state.action_error().is_none());
    }

    #[test]
    fn test_start_edit_prefills_inputs_from_cache() {
        let mut state = PanelState::new();
        state.start_action(EntryAction::Edit(2), &entries());

        assert_eq!(state.selected_id(), Some(2));
        assert_eq!(state.edit_first_name, "Janet");
        assert_eq!(state.edit_last_name, "Weaver");
        assert_eq!(state.edit_email, "janet.weaver@reqres.in");
    }

    #[test]
    fn test_start_edit_unknown_id_clears_inputs() {
        let mut state = PanelState::new();
        state.edit_first_name = "stale".to_owned();

        state.start_action(EntryAction::Edit(99), &entries());
        assert_eq!(state.edit_first_name, "");
        assert_eq!(state.edit_last_name, "");
        assert_eq!(state.edit_email, "");
    }

    #[test]
    fn test_start_action_clears_previous_error() {
        let mut state = PanelState::new();
        state.set_action_error("previous failure".to_owned());

        state.start_action(EntryAction::Delete(3), &entries());
        assert!(state.action_error().is_none());
        assert_eq!(state.selected_id(), Some(3));
    }

    #[test]
    fn test_close_action_clears_everything() {
        let mut state = PanelState::new();
        state.start_action(EntryAction::Edit(2), &entries());
        state.set_action_in_progress();

        state.close_action();
        assert_eq!(state.current_action, EntryAction::None);
        assert!(!state.is_action_in_progress());
        assert!(state.action_error().is_none());
        assert_eq!(state.edit_first_name, "");
    }

    #[test]
    fn test_set_action_error_stops_progress_and_keeps_dialog() {
        let mut state = PanelState::new();
        state.start_action(EntryAction::Delete(3), &entries());
        state.set_action_in_progress();

        state.set_action_error("server said no".to_owned());
        assert_eq!(state.action_error(), Some("server said no"));
        assert!(!state.is_action_in_progress());
        // Dialog still open on the same target
        assert_eq!(state.current_action, EntryAction::Delete(3));
    }

    #[test]
    fn test_edit_patch_trims_inputs() {
        let mut state = PanelState::new();
        state.edit_first_name = "  Janet ".to_owned();
        state.edit_last_name = "Weaver  ".to_owned();
        state.edit_email = " janet.weaver@reqres.in ".to_owned();

        let patch = state.edit_patch();
        assert_eq!(patch.first_name, "Janet");
        assert_eq!(patch.last_name, "Weaver");
        assert_eq!(patch.email, "janet.weaver@reqres.in");
    }
}
