use crate::{PreferenceKind, PreferenceValue};

/// What happens when a menu item is clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Start a new recording.
    StartRecording,
    /// Stop the active recording.
    StopRecording,
    /// Make `value` the selection for `kind`.
    Select {
        /// Preference being changed.
        kind: PreferenceKind,
        /// New selection.
        value: PreferenceValue,
    },
    /// Exit the application.
    Quit,
}
