use crate::config::{default_hotkey_enabled, default_shortcut};

use serde::{Deserialize, Serialize};

/// Global start/stop shortcut.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotkeyConfig {
    /// Whether the shortcut is registered at all.
    #[serde(default = "default_hotkey_enabled")]
    pub enabled: bool,

    /// Shortcut in `global-hotkey` syntax, e.g. `ctrl+shift+KeyR`.
    #[serde(default = "default_shortcut")]
    pub shortcut: String,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            enabled: default_hotkey_enabled(),
            shortcut: default_shortcut(),
        }
    }
}
