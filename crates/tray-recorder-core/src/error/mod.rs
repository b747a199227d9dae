use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

/// Recorder errors with source location tracking.
#[derive(Error, Debug)]
pub enum RecorderError {
    /// Querying microphones or displays from the recording engine failed.
    #[error("Device query failed: {reason} {location}")]
    DeviceQueryFailed {
        /// Description of the query failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The recording engine rejected the start request.
    #[error("Failed to start recording: {reason} {location}")]
    RecordingStartFailed {
        /// Description of the start failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The recording engine could not finalize the recording.
    #[error("Failed to stop recording: {reason} {location}")]
    RecordingStopFailed {
        /// Description of the stop failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The engine reported a path without a usable file name.
    #[error("Recording path has no file name: {path:?} {location}")]
    InvalidRecordingPath {
        /// Path reported by the engine.
        path: PathBuf,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Moving the finished recording to its destination failed.
    #[error("Failed to move {from:?} to {to:?}: {source} {location}")]
    FileMoveFailed {
        /// Original path of the recording.
        from: PathBuf,
        /// Intended destination.
        to: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Opening the recording with the default application failed.
    #[error("Failed to open {path:?}: {source} {location}")]
    FileOpenFailed {
        /// Path that could not be opened.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Removing a leftover temp file failed.
    #[error("Failed to remove {path:?}: {source} {location}")]
    FileRemoveFailed {
        /// Path that could not be removed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The notification sink could not display a message.
    #[error("Notification failed: {reason} {location}")]
    NotificationFailed {
        /// Description of the notification failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`RecorderError`].
pub type Result<T> = std::result::Result<T, RecorderError>;
