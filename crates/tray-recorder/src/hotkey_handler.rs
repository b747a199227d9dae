//! Global start/stop shortcut.
//!
//! Registers the configured shortcut and turns each press into an
//! [`AppCommand::ToggleRecording`]. Whether that starts or stops a recording
//! is decided by the session controller, not here.

use crate::{AppCommand, AppError, AppResult};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState, hotkey::HotKey};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

/// Forwards presses of the registered shortcut to the application.
pub struct HotkeyHandler {
    hotkey_id: u32,
    command_tx: mpsc::Sender<AppCommand>,
}

impl HotkeyHandler {
    /// Parse a shortcut such as `ctrl+shift+KeyR`.
    #[track_caller]
    pub fn parse_shortcut(shortcut: &str) -> AppResult<HotKey> {
        shortcut
            .parse::<HotKey>()
            .map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("Invalid shortcut {:?}: {}", shortcut, e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Register `shortcut` as the global hotkey.
    ///
    /// Must be called on a thread with a message pump (e.g. the main thread
    /// running a `tao`/`winit` event loop) so that `WM_HOTKEY` messages are
    /// dispatched on Windows. The returned [`GlobalHotKeyManager`] must be
    /// kept alive on that thread for the hotkey to remain registered.
    #[track_caller]
    #[instrument]
    pub fn register_hotkey(shortcut: &str) -> AppResult<(GlobalHotKeyManager, u32)> {
        let hotkey = Self::parse_shortcut(shortcut)?;

        let manager =
            GlobalHotKeyManager::new().map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to create manager: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        manager
            .register(hotkey)
            .map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to register {}: {}", shortcut, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(hotkey = shortcut, "Global hotkey registered");

        Ok((manager, hotkey.id()))
    }

    /// Create a handler for a previously registered hotkey.
    ///
    /// The `hotkey_id` should come from [`HotkeyHandler::register_hotkey`].
    pub fn new(hotkey_id: u32, command_tx: mpsc::Sender<AppCommand>) -> Self {
        Self {
            hotkey_id,
            command_tx,
        }
    }

    /// Run until a shutdown signal is received.
    #[instrument(skip(self))]
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        let receiver = GlobalHotKeyEvent::receiver().clone();
        let (event_tx, mut event_rx) = mpsc::channel(32);

        // Dropping event_rx makes the next blocking_send fail, ending the task.
        let handle = tokio::task::spawn_blocking(move || {
            while let Ok(event) = receiver.recv() {
                if event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Hotkey handler shutting down");
                    break;
                }
                Some(event) = event_rx.recv() => {
                    if self.is_press(event.id, event.state) {
                        self.handle_hotkey_press().await?;
                    }
                }
            }
        }

        drop(event_rx);

        // The forwarder may still be parked in recv(); the runtime reaps it on exit.
        match tokio::time::timeout(Duration::from_secs(1), handle).await {
            Ok(Ok(())) => debug!("Hotkey event forwarder stopped cleanly"),
            Ok(Err(e)) => warn!(error = ?e, "Hotkey event forwarder task panicked"),
            Err(_) => debug!(
                "Hotkey event forwarder did not stop within timeout, \
                   will be cleaned up on exit"
            ),
        }

        Ok(())
    }

    /// Releases are reported too; only presses toggle.
    pub(crate) fn is_press(&self, id: u32, state: HotKeyState) -> bool {
        id == self.hotkey_id && state == HotKeyState::Pressed
    }

    #[instrument(skip(self))]
    async fn handle_hotkey_press(&self) -> AppResult<()> {
        let location = ErrorLocation::from(Location::caller());

        self.command_tx
            .send(AppCommand::ToggleRecording)
            .await
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Failed to send ToggleRecording: {}", e),
                location,
            })?;

        debug!("Hotkey pressed, toggle sent");

        Ok(())
    }
}
