/// Job state definitions for tracking a crawl execution
///
/// This module defines the states a crawl job moves through. The machine is
/// `Idle -> Running -> {Completed | Exhausted | Cancelled | Failed}`; once a
/// terminal state is reached the job never leaves it.
use std::fmt;

/// Represents the current state of a crawl job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobState {
    // ===== Active States =====
    /// Job has been created but the loop has not started
    Idle,

    /// The crawl loop is running
    Running,

    // ===== Terminal States =====
    /// The page budget was reached (bounded mode) or the time ceiling was
    /// hit (unbounded mode)
    Completed,

    /// The frontier emptied before the budget was reached
    Exhausted,

    /// The consumer signalled cancellation
    Cancelled,

    /// Unrecoverable internal error; never entered for a single page's
    /// fetch or extraction failure
    Failed,
}

impl JobState {
    /// Returns true if this is a terminal state (the loop has ended)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Idle | Self::Running)
    }

    /// Returns true if the job ended by finishing its work rather than by
    /// cancellation or failure
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed | Self::Exhausted)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Exhausted => "exhausted",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}
