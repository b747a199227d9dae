use crate::SessionState;

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use uuid::Uuid;

/// One start-to-stop recording attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: Uuid,
    state: SessionState,
    started_at: Instant,
    produced_file_path: Option<PathBuf>,
}

impl Session {
    pub(crate) fn started(id: Uuid) -> Self {
        Self {
            id,
            state: SessionState::Recording,
            started_at: Instant::now(),
            produced_file_path: None,
        }
    }

    pub(crate) fn set_state(&mut self, state: SessionState) {
        self.state = state;
    }

    pub(crate) fn set_produced_file_path(&mut self, path: PathBuf) {
        self.produced_file_path = Some(path);
    }

    /// Unique id for log correlation.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// When the engine confirmed the recording started.
    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Finalized file reported by the engine, once known.
    pub fn produced_file_path(&self) -> Option<&Path> {
        self.produced_file_path.as_deref()
    }
}
