use crate::DeviceKind;

/// A microphone or display reported by the recording engine.
///
/// `id` is whatever the engine needs to address the device again when a
/// recording starts; `display_name` is only ever shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Device {
    /// Whether this is a microphone or a display.
    pub kind: DeviceKind,
    /// Engine-specific identifier.
    pub id: String,
    /// Human readable name for menus.
    pub display_name: String,
}

impl Device {
    /// Create a microphone entry.
    pub fn microphone(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            kind: DeviceKind::Microphone,
            id: id.into(),
            display_name: display_name.into(),
        }
    }

    /// Create a display entry.
    pub fn display(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            kind: DeviceKind::Display,
            id: id.into(),
            display_name: display_name.into(),
        }
    }

    /// Two devices are the same selection when kind and id match, even if
    /// the engine has since renamed them.
    pub fn same_device(&self, other: &Device) -> bool {
        self.kind == other.kind && self.id == other.id
    }
}
