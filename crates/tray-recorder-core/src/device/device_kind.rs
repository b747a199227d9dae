use std::fmt;

/// Which capture source a [`Device`](crate::Device) represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// Audio input device.
    Microphone,
    /// Screen that can be captured.
    Display,
}

impl DeviceKind {
    /// Stable identifier used in menu ids and log fields.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Microphone => "microphone",
            Self::Display => "display",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
