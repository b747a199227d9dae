use crate::config::{default_ffmpeg_path, default_poll_interval_ms};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Recording session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// How often the session is checked for a pending stop, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Where finished recordings are moved (None = desktop).
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// ffmpeg executable used as the recording engine.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            output_dir: None,
            ffmpeg_path: default_ffmpeg_path(),
        }
    }
}
