mod ffmpeg;
mod recording_engine;
mod start_options;

#[cfg(test)]
pub(crate) use ffmpeg::{
    CaptureBackend, STDERR_TAIL_BYTES, capture_args, encoder_args, parse_avfoundation_devices,
    spawn_tail_reader,
};

pub use {
    ffmpeg::FfmpegEngine,
    recording_engine::RecordingEngine,
    start_options::{DEFAULT_FPS, StartOptions},
};
