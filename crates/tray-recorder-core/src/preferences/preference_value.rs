use crate::{Codec, Device};

use std::fmt;

/// A selected device or codec.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PreferenceValue {
    /// A microphone or display from a catalog snapshot.
    Device(Device),
    /// One of the static codecs.
    Codec(Codec),
}

impl PreferenceValue {
    /// Whether `other` refers to the same device or codec.
    ///
    /// Devices compare by kind and id so a selection still matches after the
    /// catalog is fetched again.
    pub fn matches(&self, other: &PreferenceValue) -> bool {
        match (self, other) {
            (Self::Device(a), Self::Device(b)) => a.same_device(b),
            (Self::Codec(a), Self::Codec(b)) => a == b,
            _ => false,
        }
    }

    /// Label shown in menus.
    pub fn label(&self) -> &str {
        match self {
            Self::Device(device) => &device.display_name,
            Self::Codec(codec) => codec.as_str(),
        }
    }
}

impl From<Device> for PreferenceValue {
    fn from(device: Device) -> Self {
        Self::Device(device)
    }
}

impl From<Codec> for PreferenceValue {
    fn from(codec: Codec) -> Self {
        Self::Codec(codec)
    }
}

impl fmt::Display for PreferenceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device(device) => write!(f, "{} ({})", device.display_name, device.id),
            Self::Codec(codec) => write!(f, "{}", codec),
        }
    }
}
