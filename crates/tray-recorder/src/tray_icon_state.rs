use tray_recorder_core::SessionState;

/// Tray icon states corresponding to the recording session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayIconState {
    /// Ready to start recording.
    Idle,
    /// Currently recording.
    Recording,
    /// Finalizing the recording and handing off the file.
    Stopping,
}

impl TrayIconState {
    /// Hover text for this state.
    pub const fn tooltip(&self) -> &'static str {
        match self {
            TrayIconState::Idle => "Tray Recorder - Ready",
            TrayIconState::Recording => "Tray Recorder - Recording...",
            TrayIconState::Stopping => "Tray Recorder - Saving...",
        }
    }

    /// Fill color of the icon dot.
    pub const fn color(&self) -> [u8; 3] {
        match self {
            TrayIconState::Idle => [0x8e, 0x8e, 0x93],
            TrayIconState::Recording => [0xff, 0x3b, 0x30],
            TrayIconState::Stopping => [0xff, 0x95, 0x00],
        }
    }
}

impl From<SessionState> for TrayIconState {
    fn from(state: SessionState) -> Self {
        match state {
            SessionState::Idle => TrayIconState::Idle,
            SessionState::Recording => TrayIconState::Recording,
            SessionState::Stopping => TrayIconState::Stopping,
        }
    }
}
