//! Tray Recorder Core Library
//!
//! Recording session lifecycle for a tray-driven screen recorder: the
//! preference store, device catalog, session state machine and the file
//! handoff that runs once a recording is finalized. Capture itself is
//! delegated to a [`RecordingEngine`]; [`FfmpegEngine`] is the bundled one.
//!
//! # Example
//!
//! ```no_run
//! use tray_recorder_core::{
//!     CoreResult, FfmpegEngine, FileHandoff, Notifier, Preferences, SessionController,
//!     SystemFileOps,
//! };
//!
//! use std::{sync::Arc, time::Duration};
//!
//! struct LogNotifier;
//!
//! #[async_trait::async_trait]
//! impl Notifier for LogNotifier {
//!     async fn notify(&self, message: &str, _silent: bool) -> CoreResult<()> {
//!         println!("{}", message);
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> CoreResult<()> {
//!     let engine = Arc::new(FfmpegEngine::new("ffmpeg"));
//!     let handoff = FileHandoff::new(SystemFileOps, "/tmp/recordings");
//!     let mut controller = SessionController::new(engine, Arc::new(LogNotifier), handoff);
//!
//!     controller.start(&Preferences::new()).await?;
//!     tokio::time::sleep(Duration::from_secs(3)).await;
//!     controller.request_stop();
//!     controller.poll().await?;
//!     Ok(())
//! }
//! ```

mod catalog;
mod device;
mod engine;
mod error;
mod handoff;
mod menu;
mod notify;
mod preferences;
mod session;

pub use {
    catalog::{CatalogSnapshot, DeviceCatalog},
    device::{Codec, Device, DeviceKind},
    engine::{DEFAULT_FPS, FfmpegEngine, RecordingEngine, StartOptions},
    error::{RecorderError, Result as CoreResult},
    handoff::{FileHandoff, FileOps, HandoffReport, SystemFileOps},
    menu::{
        ActionItem, MenuAction, MenuEntry, MenuModel, NO_DEVICES_LABEL, QUIT_ID, START_ID,
        STOP_ID, SubmenuEntry,
    },
    notify::Notifier,
    preferences::{PreferenceKind, PreferenceValue, Preferences},
    session::{
        CommandOutcome, PollOutcome, RECORDING_STARTED_MESSAGE, RECORDING_STOPPED_MESSAGE,
        START_FAILED_MESSAGE, STOP_FAILED_MESSAGE, Session, SessionController, SessionState,
    },
};

#[cfg(test)]
mod tests;
