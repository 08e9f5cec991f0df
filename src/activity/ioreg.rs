//! Idle time from the IOKit HID registry via `ioreg`.
//!
//! `ioreg -c IOHIDSystem` prints a `"HIDIdleTime" = <nanoseconds>` entry
//! that resets on every keyboard or mouse event.

use std::process::Command;
use std::time::Duration;

use tokio::time::timeout;

use super::error::ActivityError;
use super::IdleSource;

/// Path to the ioreg command-line tool.
const IOREG_PATH: &str = "/usr/sbin/ioreg";

/// Default timeout for one ioreg query in seconds.
const DEFAULT_TIMEOUT_SECONDS: u64 = 2;

/// Reads the HID idle time by running `ioreg`.
#[derive(Debug, Clone)]
pub struct IoregIdleSource {
    timeout_seconds: u64,
}

impl Default for IoregIdleSource {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl IoregIdleSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdleSource for IoregIdleSource {
    async fn idle_time(&self) -> Result<Duration, ActivityError> {
        let output = timeout(Duration::from_secs(self.timeout_seconds), run_ioreg())
            .await
            .map_err(|_| ActivityError::Timeout(self.timeout_seconds))??;

        parse_hid_idle_time(&output).ok_or(ActivityError::Parse)
    }
}

async fn run_ioreg() -> Result<String, ActivityError> {
    let output = tokio::task::spawn_blocking(|| {
        Command::new(IOREG_PATH)
            .args(["-c", "IOHIDSystem"])
            .output()
    })
    .await
    .map_err(|e| ActivityError::CommandFailed(e.to_string()))?
    .map_err(|e| ActivityError::CommandFailed(e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ActivityError::CommandFailed(stderr.trim().to_string()));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Extracts `HIDIdleTime` from `ioreg` output.
///
/// Returns the first value found; values are nanoseconds.
#[must_use]
pub fn parse_hid_idle_time(output: &str) -> Option<Duration> {
    output.lines().find_map(|line| {
        let (key, value) = line.split_once('=')?;
        if !key.trim().trim_start_matches('|').trim().ends_with("\"HIDIdleTime\"") {
            return None;
        }
        value.trim().parse::<u64>().ok().map(Duration::from_nanos)
    })
}
