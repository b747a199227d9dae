use crate::{Codec, Preferences};

/// Frame rate every recording is captured at.
pub const DEFAULT_FPS: u32 = 30;

/// Parameters handed to [`RecordingEngine::start_recording`](crate::RecordingEngine::start_recording).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartOptions {
    /// Capture frame rate.
    pub fps: u32,
    /// Microphone id, or `None` to record without audio.
    pub audio_device_id: Option<String>,
    /// Display id, or `None` for the engine's first display.
    pub screen_id: Option<String>,
    /// Video codec.
    pub codec: Codec,
}

impl StartOptions {
    /// Build start options from the current preferences.
    ///
    /// The frame rate is fixed and never depends on the selection.
    pub fn from_preferences(preferences: &Preferences) -> Self {
        Self {
            fps: DEFAULT_FPS,
            audio_device_id: preferences.microphone().map(|device| device.id.clone()),
            screen_id: preferences.display().map(|device| device.id.clone()),
            codec: preferences.codec().unwrap_or_default(),
        }
    }
}
