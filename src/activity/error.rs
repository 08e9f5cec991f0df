//! Activity sensor error types.
//!
//! Every error here is recoverable: the timer keeps running and the user can
//! still resume a session by hand.

use thiserror::Error;

/// Errors that can occur while reading the system idle time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActivityError {
    /// No idle-time source exists on this platform.
    #[error("idle time is not available on this platform")]
    Unsupported,

    /// The idle-time query did not finish in time.
    #[error("idle time query timed out after {0} seconds")]
    Timeout(u64),

    /// The idle-time command could not be run or exited with an error.
    #[error("idle time query failed: {0}")]
    CommandFailed(String),

    /// The command output did not contain an idle time.
    #[error("could not parse idle time from command output")]
    Parse,
}

impl ActivityError {
    /// Returns true if retrying can never succeed on this host.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        matches!(self, Self::Unsupported)
    }
}
