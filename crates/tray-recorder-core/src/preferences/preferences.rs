//! In-memory recording preferences.
//!
//! Nothing here is persisted; a restart starts with every preference unset.
//! Selections are not re-validated against the live catalog, so a device
//! that disappears stays selected until the user picks another one.

use crate::{Codec, Device, PreferenceKind, PreferenceValue};

use std::collections::HashMap;

use tracing::{debug, instrument};

/// Current microphone, display and codec selection.
#[derive(Debug, Clone, Default)]
pub struct Preferences {
    selected: HashMap<PreferenceKind, PreferenceValue>,
}

impl Preferences {
    /// Create a store with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` as the selection for `kind`, replacing any previous one.
    #[instrument(skip(self))]
    pub fn set(&mut self, kind: PreferenceKind, value: PreferenceValue) {
        debug!(kind = %kind, value = %value, "Preference updated");
        self.selected.insert(kind, value);
    }

    /// Current selection for `kind`, or `None` when unset.
    pub fn get(&self, kind: PreferenceKind) -> Option<&PreferenceValue> {
        self.selected.get(&kind)
    }

    /// Whether `value` is the current selection for `kind`.
    pub fn is_selected(&self, kind: PreferenceKind, value: &PreferenceValue) -> bool {
        self.get(kind).is_some_and(|current| current.matches(value))
    }

    /// Selected microphone, if the microphone slot holds a device.
    pub fn microphone(&self) -> Option<&Device> {
        self.device(PreferenceKind::Microphone)
    }

    /// Selected display, if the display slot holds a device.
    pub fn display(&self) -> Option<&Device> {
        self.device(PreferenceKind::Display)
    }

    /// Selected codec, if the codec slot holds a codec.
    pub fn codec(&self) -> Option<Codec> {
        match self.get(PreferenceKind::Codec) {
            Some(PreferenceValue::Codec(codec)) => Some(*codec),
            _ => None,
        }
    }

    fn device(&self, kind: PreferenceKind) -> Option<&Device> {
        match self.get(kind) {
            Some(PreferenceValue::Device(device)) => Some(device),
            _ => None,
        }
    }
}
