use std::fmt;

/// Lifecycle state of the recording session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    /// No session; a new one may start.
    #[default]
    Idle,
    /// The engine is capturing.
    Recording,
    /// A stop was requested and will be carried out on the next poll.
    Stopping,
}

impl SessionState {
    /// Stable identifier for log fields.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Stopping => "stopping",
        }
    }

    /// Status shown in the tray menu header.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Recording => "Active",
            Self::Stopping => "Stopping",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
