#[allow(clippy::module_inception)]
mod config;
mod hotkey_config;
mod recorder_config;

pub(crate) use {config::Config, hotkey_config::HotkeyConfig, recorder_config::RecorderConfig};

pub(crate) const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;
pub(crate) const DEFAULT_FFMPEG_PATH: &str = "ffmpeg";
pub(crate) const DEFAULT_HOTKEY_ENABLED: bool = true;
pub(crate) const DEFAULT_SHORTCUT: &str = "ctrl+shift+KeyR";

pub(crate) fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

pub(crate) fn default_ffmpeg_path() -> std::path::PathBuf {
    std::path::PathBuf::from(DEFAULT_FFMPEG_PATH)
}

pub(crate) fn default_hotkey_enabled() -> bool {
    DEFAULT_HOTKEY_ENABLED
}

pub(crate) fn default_shortcut() -> String {
    DEFAULT_SHORTCUT.to_string()
}
