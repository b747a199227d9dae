use crate::{CatalogSnapshot, CoreResult, RecordingEngine};

use std::sync::Arc;

use tracing::{debug, instrument};

/// Queries the recording engine for available devices.
///
/// Nothing is cached: every call hits the engine again, so the menu always
/// reflects devices plugged in or removed since the last render.
pub struct DeviceCatalog<E: RecordingEngine + ?Sized> {
    engine: Arc<E>,
}

impl<E: RecordingEngine + ?Sized> DeviceCatalog<E> {
    /// Create a catalog over a shared engine.
    pub fn new(engine: Arc<E>) -> Self {
        Self { engine }
    }

    /// Fetch a fresh snapshot.
    ///
    /// # Errors
    ///
    /// Propagates the engine's `DeviceQueryFailed` unchanged; there is no retry.
    #[instrument(skip(self))]
    pub async fn list_devices(&self) -> CoreResult<CatalogSnapshot> {
        let snapshot = self.engine.list_devices().await?;

        debug!(
            microphones = snapshot.microphones.len(),
            displays = snapshot.displays.len(),
            codecs = snapshot.codecs.len(),
            "Device catalog fetched"
        );

        Ok(snapshot)
    }
}
