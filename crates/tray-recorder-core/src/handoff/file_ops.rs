use crate::{CoreResult, RecorderError};

use std::{io, panic::Location, path::Path, sync::Arc};

use async_trait::async_trait;
use error_location::ErrorLocation;
use tracing::debug;

/// Filesystem and shell operations used to hand a finished recording to the user.
#[async_trait]
pub trait FileOps: Send + Sync {
    /// Move `from` to `to`. The source may still exist afterwards when the
    /// move had to fall back to a copy.
    async fn move_file(&self, from: &Path, to: &Path) -> CoreResult<()>;

    /// Remove `path`. A path that is already gone is not an error.
    async fn remove(&self, path: &Path) -> CoreResult<()>;

    /// Open `path` with the OS default application.
    async fn open_with_default_app(&self, path: &Path) -> CoreResult<()>;
}

/// Blanket implementation for shared file operation handles.
#[async_trait]
impl<T: FileOps + ?Sized> FileOps for Arc<T> {
    async fn move_file(&self, from: &Path, to: &Path) -> CoreResult<()> {
        self.as_ref().move_file(from, to).await
    }

    async fn remove(&self, path: &Path) -> CoreResult<()> {
        self.as_ref().remove(path).await
    }

    async fn open_with_default_app(&self, path: &Path) -> CoreResult<()> {
        self.as_ref().open_with_default_app(path).await
    }
}

/// [`FileOps`] over the real filesystem and the desktop's default handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFileOps;

#[async_trait]
impl FileOps for SystemFileOps {
    async fn move_file(&self, from: &Path, to: &Path) -> CoreResult<()> {
        if let Some(parent) = to.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| RecorderError::FileMoveFailed {
                    from: from.to_path_buf(),
                    to: to.to_path_buf(),
                    source,
                    location: ErrorLocation::from(Location::caller()),
                })?;
        }

        match tokio::fs::rename(from, to).await {
            Ok(()) => Ok(()),
            // Temp dirs are often tmpfs; the source is cleaned up by the caller.
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                debug!(from = ?from, to = ?to, "Rename crosses devices, copying");
                tokio::fs::copy(from, to)
                    .await
                    .map_err(|source| RecorderError::FileMoveFailed {
                        from: from.to_path_buf(),
                        to: to.to_path_buf(),
                        source,
                        location: ErrorLocation::from(Location::caller()),
                    })?;
                Ok(())
            }
            Err(source) => Err(RecorderError::FileMoveFailed {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
                source,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    async fn remove(&self, path: &Path) -> CoreResult<()> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(RecorderError::FileRemoveFailed {
                path: path.to_path_buf(),
                source,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    async fn open_with_default_app(&self, path: &Path) -> CoreResult<()> {
        open::that_detached(path).map_err(|source| RecorderError::FileOpenFailed {
            path: path.to_path_buf(),
            source,
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
