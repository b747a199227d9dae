//! Recording session state machine.
//!
//! ```text
//! idle --start--> recording --stop--> stopping --poll--> idle
//! ```
//!
//! A stop command only raises a flag. The engine is stopped on the next poll
//! tick, which keeps the command handler synchronous and guarantees a single
//! stop sequence no matter how many stop commands arrive.

use crate::{
    CommandOutcome, CoreResult, FileHandoff, FileOps, Notifier, PollOutcome, Preferences,
    RecordingEngine, Session, SessionState, StartOptions,
};

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Silent notification shown once the engine is capturing.
pub const RECORDING_STARTED_MESSAGE: &str = "Recording started!";
/// Notification shown after the file has been handed off.
pub const RECORDING_STOPPED_MESSAGE: &str = "Recording stopped!";
/// Notification shown when the engine rejects a start.
pub const START_FAILED_MESSAGE: &str = "Recording could not be started";
/// Notification shown when the engine cannot finalize a recording.
pub const STOP_FAILED_MESSAGE: &str = "Recording could not be saved";

/// Owns the single active recording session.
///
/// Built once at startup and driven from one task, so every transition runs
/// to completion before the next command is looked at.
pub struct SessionController<E, N, F>
where
    E: RecordingEngine + ?Sized,
    N: Notifier + ?Sized,
    F: FileOps,
{
    engine: Arc<E>,
    notifier: Arc<N>,
    handoff: FileHandoff<F>,
    session: Option<Session>,
    stop_requested: bool,
}

impl<E, N, F> SessionController<E, N, F>
where
    E: RecordingEngine + ?Sized,
    N: Notifier + ?Sized,
    F: FileOps,
{
    /// Create an idle controller.
    pub fn new(engine: Arc<E>, notifier: Arc<N>, handoff: FileHandoff<F>) -> Self {
        Self {
            engine,
            notifier,
            handoff,
            session: None,
            stop_requested: false,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.session
            .as_ref()
            .map_or(SessionState::Idle, Session::state)
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Whether a session is recording or stopping.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Whether quitting now would not interrupt a session.
    pub fn can_quit(&self) -> bool {
        self.state() == SessionState::Idle
    }

    /// Whether a stop is waiting for the next poll.
    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    /// Start a new session with the current preferences.
    ///
    /// Ignored unless idle. On engine failure the controller stays idle, the
    /// user is notified and the error is returned.
    #[instrument(skip(self, preferences))]
    pub async fn start(&mut self, preferences: &Preferences) -> CoreResult<CommandOutcome> {
        if let Some(session) = &self.session {
            debug!(
                session_id = %session.id(),
                state = %session.state(),
                "Start ignored, session already active"
            );
            return Ok(CommandOutcome::Ignored);
        }

        let options = StartOptions::from_preferences(preferences);
        let session_id = Uuid::new_v4();

        if let Err(e) = self.engine.start_recording(&options).await {
            error!(session_id = %session_id, error = ?e, "Engine rejected start");
            self.notify(START_FAILED_MESSAGE, false).await;
            return Err(e);
        }

        self.stop_requested = false;
        self.session = Some(Session::started(session_id));

        info!(
            session_id = %session_id,
            fps = options.fps,
            audio_device_id = ?options.audio_device_id,
            screen_id = ?options.screen_id,
            codec = %options.codec,
            "Recording started"
        );

        self.notify(RECORDING_STARTED_MESSAGE, true).await;

        Ok(CommandOutcome::Applied)
    }

    /// Ask for the active recording to stop on the next poll.
    ///
    /// Only valid while recording; repeated calls are no-ops.
    #[instrument(skip(self))]
    pub fn request_stop(&mut self) -> CommandOutcome {
        let state = self.state();

        match self.session.as_mut() {
            Some(session) if state == SessionState::Recording => {
                session.set_state(SessionState::Stopping);
                self.stop_requested = true;
                info!(
                    session_id = %session.id(),
                    duration_ms = session.started_at().elapsed().as_millis(),
                    "Stop requested"
                );
                CommandOutcome::Applied
            }
            _ => {
                debug!(state = %state, "Stop ignored");
                CommandOutcome::Ignored
            }
        }
    }

    /// One completion-detection tick.
    ///
    /// When a stop is pending: stops the engine, hands the file off, notifies
    /// the user and returns to idle. If the engine fails to stop, the session
    /// is discarded so a new recording can start, and the error is returned.
    #[instrument(skip(self))]
    pub async fn poll(&mut self) -> CoreResult<PollOutcome> {
        let Some(session_id) = self.session.as_ref().map(Session::id) else {
            return Ok(PollOutcome::Inactive);
        };

        if !self.stop_requested {
            return Ok(PollOutcome::Pending);
        }
        self.stop_requested = false;

        let produced = match self.engine.stop_recording().await {
            Ok(path) => path,
            Err(e) => {
                error!(
                    session_id = %session_id,
                    error = ?e,
                    "Engine failed to finalize recording, returning to idle"
                );
                self.session = None;
                self.notify(STOP_FAILED_MESSAGE, false).await;
                return Err(e);
            }
        };

        if let Some(session) = self.session.as_mut() {
            session.set_produced_file_path(produced.clone());
        }

        let report = self.handoff.run(&produced).await;

        self.notify(RECORDING_STOPPED_MESSAGE, false).await;

        if let Some(session) = self.session.take() {
            info!(
                session_id = %session_id,
                duration_ms = session.started_at().elapsed().as_millis(),
                produced = ?session.produced_file_path(),
                "Session complete"
            );
        }

        Ok(PollOutcome::Completed(report))
    }

    /// Tear down the active session without handing off its file.
    ///
    /// Called on application exit so no capture outlives the process. The
    /// controller is idle afterwards even if the engine reports an error.
    #[instrument(skip(self))]
    pub async fn shutdown(&mut self) -> CoreResult<()> {
        self.stop_requested = false;

        let Some(session) = self.session.take() else {
            return Ok(());
        };

        warn!(
            session_id = %session.id(),
            state = %session.state(),
            duration_ms = session.started_at().elapsed().as_millis(),
            "Aborting active session on shutdown"
        );

        self.engine.abort_recording().await
    }

    async fn notify(&self, message: &str, silent: bool) {
        if let Err(e) = self.notifier.notify(message, silent).await {
            warn!(error = ?e, message, "Notification failed");
        }
    }
}
