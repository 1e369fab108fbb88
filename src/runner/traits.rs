use std::path::Path;

/// Whether the child terminated before the wall-clock deadline.
///
/// A crash and a clean exit are both `Completed`; only outliving the deadline
/// is `TimedOut`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunVerdict {
    Completed,
    TimedOut,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum RunnerError {
    /// The input or capture file could not be opened.
    #[error("failed to open {path}: {msg}")]
    Setup { path: String, msg: String },
    #[error("failed to launch executable: {msg}")]
    Spawn { msg: String },
}

/// Executes a built artifact with redirected standard streams under a
/// wall-clock timeout.
#[mockall::automock]
#[async_trait::async_trait]
pub trait Runner: std::fmt::Debug + Send + Sync {
    /// Runs `executable` with no arguments, stdin fed from `input` and stdout
    /// captured to `capture` (truncated first).
    async fn run(
        &self,
        executable: &Path,
        input: &Path,
        capture: &Path,
        timeout_secs: u64,
    ) -> Result<RunVerdict, RunnerError>;
}
