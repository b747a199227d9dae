//! Post-recording file handoff.
//!
//! Moves the engine's temp file into the target directory, opens it, then
//! removes whatever is left at the temp path. Every step is best effort: the
//! recording already succeeded, so failures are logged and reported but never
//! roll anything back.

use crate::{CoreResult, FileOps, RecorderError};

use std::{
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use tracing::{error, info, instrument, warn};

/// Outcome of a single handoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffReport {
    /// Path the engine produced.
    pub source: PathBuf,
    /// Where the file was meant to go. `None` if no destination could be derived.
    pub destination: Option<PathBuf>,
    /// The file reached the destination.
    pub moved: bool,
    /// The default application was launched.
    pub opened: bool,
    /// Nothing is left at the source path.
    pub cleaned_up: bool,
}

/// Relocates finished recordings into a user-visible directory.
pub struct FileHandoff<F: FileOps> {
    ops: F,
    target_dir: PathBuf,
}

impl<F: FileOps> FileHandoff<F> {
    /// Create a handoff that moves recordings into `target_dir`.
    pub fn new(ops: F, target_dir: impl Into<PathBuf>) -> Self {
        Self {
            ops,
            target_dir: target_dir.into(),
        }
    }

    /// Directory recordings are moved into.
    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// Destination for `produced`: the target directory joined with its base name.
    #[track_caller]
    pub fn destination_for(&self, produced: &Path) -> CoreResult<PathBuf> {
        let file_name = produced
            .file_name()
            .ok_or_else(|| RecorderError::InvalidRecordingPath {
                path: produced.to_path_buf(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(self.target_dir.join(file_name))
    }

    /// Move, open and clean up `produced`.
    ///
    /// When the move fails the source is left untouched, since it is then the
    /// only copy of the recording.
    #[instrument(skip(self))]
    pub async fn run(&self, produced: &Path) -> HandoffReport {
        let mut report = HandoffReport {
            source: produced.to_path_buf(),
            destination: None,
            moved: false,
            opened: false,
            cleaned_up: false,
        };

        let destination = match self.destination_for(produced) {
            Ok(destination) => destination,
            Err(e) => {
                error!(error = ?e, "Cannot derive a destination for the recording");
                return report;
            }
        };
        report.destination = Some(destination.clone());

        if let Err(e) = self.ops.move_file(produced, &destination).await {
            error!(error = ?e, "Failed to move recording, leaving it in place");
            return report;
        }
        report.moved = true;

        match self.ops.open_with_default_app(&destination).await {
            Ok(()) => report.opened = true,
            Err(e) => warn!(error = ?e, "Failed to open recording"),
        }

        match self.ops.remove(produced).await {
            Ok(()) => report.cleaned_up = true,
            Err(e) => warn!(error = ?e, "Failed to remove temp recording"),
        }

        info!(
            destination = ?destination,
            opened = report.opened,
            cleaned_up = report.cleaned_up,
            "Recording handed off"
        );

        report
    }
}
