use std::fmt;

/// The three user-selectable recording preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKind {
    /// Audio input used for the recording.
    Microphone,
    /// Screen that gets captured.
    Display,
    /// Video codec the recording is encoded with.
    Codec,
}

impl PreferenceKind {
    /// Every kind, in menu order.
    pub const ALL: [PreferenceKind; 3] = [Self::Microphone, Self::Display, Self::Codec];

    /// Stable identifier used in menu ids and log fields.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Microphone => "microphone",
            Self::Display => "display",
            Self::Codec => "codec",
        }
    }

    /// Submenu title shown in the tray.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Microphone => "Microphone",
            Self::Display => "Display",
            Self::Codec => "Codec",
        }
    }
}

impl fmt::Display for PreferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
