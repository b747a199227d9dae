use crate::HandoffReport;

/// Whether a command changed the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command caused a state transition.
    Applied,
    /// The command was not valid in the current state and did nothing.
    Ignored,
}

/// Result of one completion-detection tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// No session is active; the ticker can stop.
    Inactive,
    /// A session is active but no stop has been requested.
    Pending,
    /// The session finished and its file was handed off.
    Completed(HandoffReport),
}
