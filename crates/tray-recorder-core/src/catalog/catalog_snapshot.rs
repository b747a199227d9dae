use crate::{Codec, Device};

/// Point-in-time view of what can be recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    /// Microphones in engine order.
    pub microphones: Vec<Device>,
    /// Displays in engine order.
    pub displays: Vec<Device>,
    /// Static codec set.
    pub codecs: Vec<Codec>,
}

impl CatalogSnapshot {
    /// Snapshot used when the engine could not be queried: no devices, but
    /// the codec list is static so it is still offered.
    pub fn degraded() -> Self {
        Self {
            microphones: Vec::new(),
            displays: Vec::new(),
            codecs: Codec::ALL.to_vec(),
        }
    }
}
