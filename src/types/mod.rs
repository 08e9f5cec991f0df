//! Core data types for the Pomodoro timer.
//!
//! This module defines the data structures used for:
//! - Timer phases
//! - Timer configuration with validation
//! - Engine snapshots for status queries
//! - IPC request/response serialization

use serde::{Deserialize, Serialize};

// ============================================================================
// TimerPhase
// ============================================================================

/// Marker shown in front of the focus countdown and idle titles.
pub const FOCUS_MARKER: &str = "🍅";

/// Marker shown in front of the break countdown.
pub const BREAK_MARKER: &str = "☕";

/// Represents the current phase of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    /// Timer is not running
    Idle,
    /// Currently in a focus session
    Focus,
    /// Currently in a short break
    ShortBreak,
    /// Currently in a long break (after every Nth focus session)
    LongBreak,
    /// Break is over, waiting for the user to come back
    AwaitingActivity,
}

impl TimerPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Focus => "focus",
            TimerPhase::ShortBreak => "short_break",
            TimerPhase::LongBreak => "long_break",
            TimerPhase::AwaitingActivity => "awaiting_activity",
        }
    }

    /// Returns the human-readable name of the phase.
    pub fn display_name(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "Idle",
            TimerPhase::Focus => "Focus",
            TimerPhase::ShortBreak => "Short Break",
            TimerPhase::LongBreak => "Long Break",
            TimerPhase::AwaitingActivity => "Waiting for activity",
        }
    }

    /// Returns true if the phase counts down on every tick.
    pub fn is_timed(&self) -> bool {
        matches!(
            self,
            TimerPhase::Focus | TimerPhase::ShortBreak | TimerPhase::LongBreak
        )
    }

    /// Returns true for either kind of break.
    pub fn is_break(&self) -> bool {
        matches!(self, TimerPhase::ShortBreak | TimerPhase::LongBreak)
    }

    /// Returns the marker that prefixes the menu-bar title for this phase.
    pub fn marker(&self) -> &'static str {
        if self.is_break() {
            BREAK_MARKER
        } else {
            FOCUS_MARKER
        }
    }

    /// Parses the wire representation produced by [`TimerPhase::as_str`].
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "idle" => Some(TimerPhase::Idle),
            "focus" => Some(TimerPhase::Focus),
            "short_break" => Some(TimerPhase::ShortBreak),
            "long_break" => Some(TimerPhase::LongBreak),
            "awaiting_activity" => Some(TimerPhase::AwaitingActivity),
            _ => None,
        }
    }
}

impl Default for TimerPhase {
    fn default() -> Self {
        TimerPhase::Idle
    }
}

impl std::fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Longest accepted focus session (120 minutes).
pub const MAX_FOCUS_SECONDS: u32 = 120 * 60;

/// Longest accepted break (60 minutes).
pub const MAX_BREAK_SECONDS: u32 = 60 * 60;

/// Largest accepted long break cadence.
pub const MAX_SESSIONS_UNTIL_LONG_BREAK: u32 = 12;

/// Fixed timer durations, set once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerConfig {
    /// Focus session length in seconds
    pub focus_seconds: u32,
    /// Short break length in seconds
    pub short_break_seconds: u32,
    /// Long break length in seconds
    pub long_break_seconds: u32,
    /// A long break follows every Nth completed focus session
    pub sessions_until_long_break: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_seconds: 25 * 60,
            short_break_seconds: 5 * 60,
            long_break_seconds: 15 * 60,
            sessions_until_long_break: 4,
        }
    }
}

impl TimerConfig {
    /// Creates a configuration from durations given in minutes.
    pub fn from_minutes(focus: u32, short_break: u32, long_break: u32) -> Self {
        Self {
            focus_seconds: focus.saturating_mul(60),
            short_break_seconds: short_break.saturating_mul(60),
            long_break_seconds: long_break.saturating_mul(60),
            ..Self::default()
        }
    }

    /// Sets the focus duration in seconds.
    pub fn with_focus_seconds(mut self, seconds: u32) -> Self {
        self.focus_seconds = seconds;
        self
    }

    /// Sets the short break duration in seconds.
    pub fn with_short_break_seconds(mut self, seconds: u32) -> Self {
        self.short_break_seconds = seconds;
        self
    }

    /// Sets the long break duration in seconds.
    pub fn with_long_break_seconds(mut self, seconds: u32) -> Self {
        self.long_break_seconds = seconds;
        self
    }

    /// Sets how many focus sessions lead up to a long break.
    pub fn with_sessions_until_long_break(mut self, sessions: u32) -> Self {
        self.sessions_until_long_break = sessions;
        self
    }

    /// Returns the break length for the given break phase.
    ///
    /// Non-break phases have no break duration and yield 0.
    pub fn break_seconds(&self, phase: TimerPhase) -> u32 {
        match phase {
            TimerPhase::ShortBreak => self.short_break_seconds,
            TimerPhase::LongBreak => self.long_break_seconds,
            _ => 0,
        }
    }

    /// Validates the configuration.
    ///
    /// The engine itself accepts any values; hosts call this before
    /// constructing one from user input.
    pub fn validate(&self) -> Result<(), String> {
        if self.focus_seconds < 1 || self.focus_seconds > MAX_FOCUS_SECONDS {
            return Err("focus duration must be between 1 second and 120 minutes".to_string());
        }
        if self.short_break_seconds < 1 || self.short_break_seconds > MAX_BREAK_SECONDS {
            return Err(
                "short break duration must be between 1 second and 60 minutes".to_string(),
            );
        }
        if self.long_break_seconds < 1 || self.long_break_seconds > MAX_BREAK_SECONDS {
            return Err(
                "long break duration must be between 1 second and 60 minutes".to_string(),
            );
        }
        if self.sessions_until_long_break < 1
            || self.sessions_until_long_break > MAX_SESSIONS_UNTIL_LONG_BREAK
        {
            return Err("sessions until long break must be between 1 and 12".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Point-in-time copy of the engine state, used for status queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    /// Current phase
    pub phase: TimerPhase,
    /// Seconds left in the current timed phase
    pub remaining_seconds: u32,
    /// Focus sessions finished so far
    pub completed_sessions: u32,
    /// Menu-bar title for this state
    pub title: String,
}

// ============================================================================
// IPC Types
// ============================================================================

/// IPC request from client to daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum IpcRequest {
    /// Start a focus session
    Start,
    /// Skip to rest during focus, or back to focus during a break
    Skip,
    /// Stop the timer
    Stop,
    /// Query the current status
    Status,
    /// Report user activity (resumes focus after a break)
    Activity,
    /// Shut the daemon down
    Quit,
}

impl IpcRequest {
    /// Returns the command name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            IpcRequest::Start => "start",
            IpcRequest::Skip => "skip",
            IpcRequest::Stop => "stop",
            IpcRequest::Status => "status",
            IpcRequest::Activity => "activity",
            IpcRequest::Quit => "quit",
        }
    }
}

/// Response data for IPC responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseData {
    /// Current state/phase
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Remaining seconds
    #[serde(rename = "remainingSeconds", skip_serializing_if = "Option::is_none")]
    pub remaining_seconds: Option<u32>,
    /// Completed focus sessions
    #[serde(rename = "completedSessions", skip_serializing_if = "Option::is_none")]
    pub completed_sessions: Option<u32>,
    /// Menu-bar title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Durations the daemon was started with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<TimerConfig>,
}

impl ResponseData {
    /// Creates response data from an engine snapshot.
    pub fn from_snapshot(snapshot: &TimerSnapshot, config: &TimerConfig) -> Self {
        Self {
            state: Some(snapshot.phase.as_str().to_string()),
            remaining_seconds: Some(snapshot.remaining_seconds),
            completed_sessions: Some(snapshot.completed_sessions),
            title: Some(snapshot.title.clone()),
            config: Some(config.clone()),
        }
    }

    /// Rebuilds the snapshot carried by this response, if it is complete.
    pub fn snapshot(&self) -> Option<TimerSnapshot> {
        Some(TimerSnapshot {
            phase: TimerPhase::from_str_opt(self.state.as_deref()?)?,
            remaining_seconds: self.remaining_seconds?,
            completed_sessions: self.completed_sessions?,
            title: self.title.clone()?,
        })
    }
}

/// IPC response from daemon to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcResponse {
    /// Response status ("success" or "error")
    pub status: String,
    /// Human-readable message
    pub message: String,
    /// Optional response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl IpcResponse {
    /// Creates a success response.
    pub fn success(message: impl Into<String>, data: Option<ResponseData>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data,
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            data: None,
        }
    }

    /// Returns true if the daemon reported success.
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

// ============================================================================
// Tests
// ============================================================================
