//! In-crate fakes for the recording engine, notification sink and filesystem.

use crate::{
    CoreResult, Device, FileOps, Notifier, RecorderError, RecordingEngine, StartOptions,
    SystemFileOps,
};

use std::{
    panic::Location,
    path::{Path, PathBuf},
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use error_location::ErrorLocation;

/// Engine that records every call and fails on demand.
#[derive(Default)]
pub(crate) struct FakeEngine {
    pub(crate) microphones: Vec<Device>,
    pub(crate) screens: Vec<Device>,
    pub(crate) produced: PathBuf,
    pub(crate) fail_query: AtomicBool,
    pub(crate) fail_start: AtomicBool,
    pub(crate) fail_stop: AtomicBool,
    pub(crate) start_calls: Mutex<Vec<StartOptions>>,
    pub(crate) stop_calls: AtomicUsize,
    pub(crate) abort_calls: AtomicUsize,
}

impl FakeEngine {
    pub(crate) fn producing(path: impl Into<PathBuf>) -> Self {
        Self {
            produced: path.into(),
            ..Self::default()
        }
    }

    pub(crate) fn start_calls(&self) -> Vec<StartOptions> {
        self.start_calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub(crate) fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn abort_calls(&self) -> usize {
        self.abort_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordingEngine for FakeEngine {
    async fn list_audio_devices(&self) -> CoreResult<Vec<Device>> {
        if self.fail_query.load(Ordering::SeqCst) {
            return Err(RecorderError::DeviceQueryFailed {
                reason: "engine unavailable".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(self.microphones.clone())
    }

    async fn list_screens(&self) -> CoreResult<Vec<Device>> {
        if self.fail_query.load(Ordering::SeqCst) {
            return Err(RecorderError::DeviceQueryFailed {
                reason: "engine unavailable".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(self.screens.clone())
    }

    async fn start_recording(&self, options: &StartOptions) -> CoreResult<()> {
        self.start_calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(options.clone());

        if self.fail_start.load(Ordering::SeqCst) {
            return Err(RecorderError::RecordingStartFailed {
                reason: "permission denied".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }

    async fn stop_recording(&self) -> CoreResult<PathBuf> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_stop.load(Ordering::SeqCst) {
            return Err(RecorderError::RecordingStopFailed {
                reason: "encoder crashed".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(self.produced.clone())
    }

    async fn abort_recording(&self) -> CoreResult<()> {
        self.abort_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Notifier that keeps every `(message, silent)` pair.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    sent: Mutex<Vec<(String, bool)>>,
}

impl RecordingNotifier {
    pub(crate) fn sent(&self) -> Vec<(String, bool)> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, message: &str, silent: bool) -> CoreResult<()> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((message.to_string(), silent));
        Ok(())
    }
}

/// File operations that only record what was asked of them.
#[derive(Default)]
pub(crate) struct FakeFileOps {
    pub(crate) fail_move: AtomicBool,
    pub(crate) fail_open: AtomicBool,
    pub(crate) moves: Mutex<Vec<(PathBuf, PathBuf)>>,
    pub(crate) removes: Mutex<Vec<PathBuf>>,
    pub(crate) opens: Mutex<Vec<PathBuf>>,
}

impl FakeFileOps {
    pub(crate) fn moves(&self) -> Vec<(PathBuf, PathBuf)> {
        self.moves.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub(crate) fn removes(&self) -> Vec<PathBuf> {
        self.removes.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub(crate) fn opens(&self) -> Vec<PathBuf> {
        self.opens.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl FileOps for FakeFileOps {
    async fn move_file(&self, from: &Path, to: &Path) -> CoreResult<()> {
        self.moves
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((from.to_path_buf(), to.to_path_buf()));

        if self.fail_move.load(Ordering::SeqCst) {
            return Err(RecorderError::FileMoveFailed {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }

    async fn remove(&self, path: &Path) -> CoreResult<()> {
        self.removes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(path.to_path_buf());
        Ok(())
    }

    async fn open_with_default_app(&self, path: &Path) -> CoreResult<()> {
        self.opens
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(path.to_path_buf());

        if self.fail_open.load(Ordering::SeqCst) {
            return Err(RecorderError::FileOpenFailed {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }
}

/// Real filesystem moves, but opening is only recorded so tests never
/// launch a viewer.
#[derive(Default)]
pub(crate) struct HeadlessFileOps {
    opens: Mutex<Vec<PathBuf>>,
}

impl HeadlessFileOps {
    pub(crate) fn opens(&self) -> Vec<PathBuf> {
        self.opens.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl FileOps for HeadlessFileOps {
    async fn move_file(&self, from: &Path, to: &Path) -> CoreResult<()> {
        SystemFileOps.move_file(from, to).await
    }

    async fn remove(&self, path: &Path) -> CoreResult<()> {
        SystemFileOps.remove(path).await
    }

    async fn open_with_default_app(&self, path: &Path) -> CoreResult<()> {
        self.opens
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(path.to_path_buf());
        Ok(())
    }
}
