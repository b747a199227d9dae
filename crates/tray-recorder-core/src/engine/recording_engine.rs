use crate::{CatalogSnapshot, Codec, CoreResult, Device, StartOptions};

use std::path::PathBuf;

use async_trait::async_trait;

/// The component that actually captures and encodes a recording.
///
/// Every call is attempted exactly once; retries are the caller's decision.
#[async_trait]
pub trait RecordingEngine: Send + Sync {
    /// Microphones currently available.
    async fn list_audio_devices(&self) -> CoreResult<Vec<Device>>;

    /// Displays currently available.
    async fn list_screens(&self) -> CoreResult<Vec<Device>>;

    /// Codecs this engine can encode with.
    fn supported_codecs(&self) -> Vec<Codec> {
        Codec::ALL.to_vec()
    }

    /// Microphones, displays and codecs together.
    ///
    /// Engines that enumerate microphones and displays from one source
    /// override this to query it once.
    async fn list_devices(&self) -> CoreResult<CatalogSnapshot> {
        let microphones = self.list_audio_devices().await?;
        let displays = self.list_screens().await?;

        Ok(CatalogSnapshot {
            microphones,
            displays,
            codecs: self.supported_codecs(),
        })
    }

    /// Begin capturing with the given options.
    async fn start_recording(&self, options: &StartOptions) -> CoreResult<()>;

    /// Finish capturing and return the path of the finalized media file.
    async fn stop_recording(&self) -> CoreResult<PathBuf>;

    /// Kill any running capture without finalizing it. No-op when idle.
    async fn abort_recording(&self) -> CoreResult<()>;
}
