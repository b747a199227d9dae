use tray_recorder_core::{MenuAction, PreferenceKind, PreferenceValue};

/// Commands delivered to the main application loop.
///
/// Menu clicks and the global hotkey both end up here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Start a new recording session.
    StartRecording,
    /// Request the active recording to stop.
    StopRecording,
    /// Start when idle, stop when recording.
    ToggleRecording,
    /// Change the current microphone, display or codec selection.
    SelectPreference {
        /// Preference being changed.
        kind: PreferenceKind,
        /// New selection.
        value: PreferenceValue,
    },
    /// Request application shutdown.
    Quit,
}

impl From<MenuAction> for AppCommand {
    fn from(action: MenuAction) -> Self {
        match action {
            MenuAction::StartRecording => AppCommand::StartRecording,
            MenuAction::StopRecording => AppCommand::StopRecording,
            MenuAction::Select { kind, value } => AppCommand::SelectPreference { kind, value },
            MenuAction::Quit => AppCommand::Quit,
        }
    }
}
