mod controller;
mod outcome;
#[allow(clippy::module_inception)]
mod session;
mod session_state;

pub use {
    controller::{
        RECORDING_STARTED_MESSAGE, RECORDING_STOPPED_MESSAGE, START_FAILED_MESSAGE,
        STOP_FAILED_MESSAGE, SessionController,
    },
    outcome::{CommandOutcome, PollOutcome},
    session::Session,
    session_state::SessionState,
};
