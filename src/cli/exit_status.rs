use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Every requested file was produced
/// - `Failure` (1): Command completed but something is missing (no languages, a target failed)
/// - `Error` (2): Command failed due to internal error (config error, unreadable source, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Every requested file was produced.
    Success,
    /// Command completed but at least one target could not be produced.
    Failure,
    /// Command failed due to internal error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
