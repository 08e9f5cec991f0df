//! User-activity detection for resuming after a break.
//!
//! When a break ends the engine waits in `AwaitingActivity` until the user
//! comes back. The daemon polls an [`IdleSource`] once per tick while
//! waiting; any keyboard or mouse input within the last
//! [`ACTIVITY_THRESHOLD`] counts as an activity edge.
//!
//! # Platform support
//!
//! - macOS: [`IoregIdleSource`] reads `HIDIdleTime` from `ioreg`
//! - elsewhere: [`UnsupportedIdleSource`]; resume with `pomobar activity`
//!   or `pomobar start`
//!
//! # Error Handling
//!
//! Errors never stop the timer. [`ActivityMonitor`] logs the first failure
//! and treats every failed poll as "no activity".

pub mod error;
pub mod ioreg;

pub use error::ActivityError;
pub use ioreg::{parse_hid_idle_time, IoregIdleSource};

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Idle time below which the user counts as active.
pub const ACTIVITY_THRESHOLD: Duration = Duration::from_secs(3);

/// Idle-time source for the current platform.
#[cfg(target_os = "macos")]
pub type PlatformIdleSource = IoregIdleSource;

/// Idle-time source for the current platform.
#[cfg(not(target_os = "macos"))]
pub type PlatformIdleSource = UnsupportedIdleSource;

#[allow(async_fn_in_trait)]
pub trait IdleSource {
    /// Time since the last keyboard or mouse input.
    async fn idle_time(&self) -> Result<Duration, ActivityError>;
}

/// Always reports [`ActivityError::Unsupported`].
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedIdleSource;

impl IdleSource for UnsupportedIdleSource {
    async fn idle_time(&self) -> Result<Duration, ActivityError> {
        Err(ActivityError::Unsupported)
    }
}

// ============================================================================
// ActivityMonitor
// ============================================================================

/// Turns idle-time readings into activity edges.
#[derive(Debug)]
pub struct ActivityMonitor<S: IdleSource> {
    source: S,
    threshold: Duration,
    error_logged: AtomicBool,
    disabled: AtomicBool,
}

impl<S: IdleSource> ActivityMonitor<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            threshold: ACTIVITY_THRESHOLD,
            error_logged: AtomicBool::new(false),
            disabled: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: Duration) -> Self {
        self.threshold = threshold;
        self
    }

    /// Returns true if the user was active within the threshold.
    ///
    /// After a permanent error the source is no longer queried.
    pub async fn poll(&self) -> bool {
        if self.disabled.load(Ordering::Relaxed) {
            return false;
        }

        match self.source.idle_time().await {
            Ok(idle) => {
                tracing::trace!(idle_ms = idle.as_millis() as u64, "idle time");
                idle < self.threshold
            }
            Err(e) => {
                if !self.error_logged.swap(true, Ordering::Relaxed) {
                    tracing::warn!(
                        "activity detection unavailable ({}); resume with `pomobar start`",
                        e
                    );
                }
                if e.is_permanent() {
                    self.disabled.store(true, Ordering::Relaxed);
                }
                false
            }
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

// ============================================================================
// MockIdleSource
// ============================================================================

/// Scripted idle source for tests.
///
/// Returns queued readings in order, then repeats the fallback reading.
#[derive(Debug)]
pub struct MockIdleSource {
    readings: Mutex<Vec<Result<Duration, ActivityError>>>,
    fallback: Result<Duration, ActivityError>,
    calls: AtomicUsize,
}

impl MockIdleSource {
    /// Creates a source that always reports the given idle time.
    #[must_use]
    pub fn idle_for(idle: Duration) -> Self {
        Self {
            readings: Mutex::new(Vec::new()),
            fallback: Ok(idle),
            calls: AtomicUsize::new(0),
        }
    }

    /// Creates a source that always fails.
    #[must_use]
    pub fn failing(error: ActivityError) -> Self {
        Self {
            readings: Mutex::new(Vec::new()),
            fallback: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Queues a reading to return before the fallback.
    pub fn push(&self, reading: Result<Duration, ActivityError>) {
        self.lock().push(reading);
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Result<Duration, ActivityError>>> {
        self.readings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl IdleSource for MockIdleSource {
    async fn idle_time(&self) -> Result<Duration, ActivityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut readings = self.lock();
        if readings.is_empty() {
            self.fallback.clone()
        } else {
            readings.remove(0)
        }
    }
}

impl<T: IdleSource> IdleSource for std::sync::Arc<T> {
    async fn idle_time(&self) -> Result<Duration, ActivityError> {
        (**self).idle_time().await
    }
}
