//! Desktop notifications through notify-rust.

use std::panic::Location;

use async_trait::async_trait;
use error_location::ErrorLocation;
use tracing::debug;
use tray_recorder_core::{CoreResult, Notifier, RecorderError};

/// Sound played with non-silent notifications.
#[cfg(target_os = "macos")]
const NOTIFICATION_SOUND: &str = "Glass";
#[cfg(not(target_os = "macos"))]
const NOTIFICATION_SOUND: &str = "message-new-instant";

/// Posts session notifications to the desktop notification center.
pub struct DesktopNotifier {
    app_name: String,
}

impl DesktopNotifier {
    /// Create a notifier that posts under `app_name`.
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new("Tray Recorder")
    }
}

#[async_trait]
impl Notifier for DesktopNotifier {
    async fn notify(&self, message: &str, silent: bool) -> CoreResult<()> {
        let app_name = self.app_name.clone();
        let body = message.to_owned();
        let location = ErrorLocation::from(Location::caller());

        debug!(message, silent, "Posting notification");

        // notify-rust blocks on the platform notification service
        tokio::task::spawn_blocking(move || {
            let mut notification = notify_rust::Notification::new();
            notification.appname(&app_name).summary(&app_name).body(&body);
            if !silent {
                notification.sound_name(NOTIFICATION_SOUND);
            }

            notification
                .show()
                .map(|_| ())
                .map_err(|e| RecorderError::NotificationFailed {
                    reason: e.to_string(),
                    location,
                })
        })
        .await
        .map_err(|e| RecorderError::NotificationFailed {
            reason: format!("Task join error: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?
    }
}
