//! Timer engine for the Pomodoro timer.
//!
//! This module provides the core state machine:
//! - Phase transitions (Idle → Focus → break → AwaitingActivity → Focus)
//! - Countdown driven by discrete `on_tick` calls
//! - Long break after every Nth completed focus session
//! - Event firing through the [`Notifier`] capability
//!
//! The engine performs no timing, blocking or locking of its own. The host
//! calls it from a single control thread (or behind a single-writer lock):
//! one tick per second while a timed phase is active, plus commands and
//! activity edges as they happen.

mod notifier;

pub use notifier::{Notifier, RecordingNotifier};

use crate::menubar::TitleFormatter;
use crate::types::{TimerConfig, TimerPhase, TimerSnapshot};

// ============================================================================
// TimerEvent
// ============================================================================

/// Kinds of phase transitions reported to the notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A focus session ended (countdown reached zero or skipped to rest)
    FocusCompleted,
    /// A break ended; waiting for the user to come back
    BreakCompleted,
    /// User activity started the next focus session
    NextFocusStarted,
}

impl EventKind {
    /// Returns the string representation of the event kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::FocusCompleted => "focus_completed",
            EventKind::BreakCompleted => "break_completed",
            EventKind::NextFocusStarted => "next_focus_started",
        }
    }
}

/// A phase transition, carrying the phase the engine moved into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    /// What happened
    pub kind: EventKind,
    /// Phase after the transition
    pub phase: TimerPhase,
}

impl TimerEvent {
    /// Creates a new event.
    pub fn new(kind: EventKind, phase: TimerPhase) -> Self {
        Self { kind, phase }
    }
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Pomodoro state machine.
///
/// Invalid commands for the current phase are ignored: the phase is
/// returned unchanged and no event fires.
pub struct TimerEngine<N: Notifier> {
    config: TimerConfig,
    phase: TimerPhase,
    remaining_seconds: u32,
    completed_sessions: u32,
    notifier: N,
}

impl<N: Notifier> TimerEngine<N> {
    /// Creates a new engine in `Idle` with the given durations and notifier.
    pub fn new(config: TimerConfig, notifier: N) -> Self {
        Self {
            config,
            phase: TimerPhase::Idle,
            remaining_seconds: 0,
            completed_sessions: 0,
            notifier,
        }
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    /// Starts a focus session.
    ///
    /// Valid from `Idle`, and from `AwaitingActivity` as a manual resume.
    pub fn start_focus(&mut self) -> TimerPhase {
        match self.phase {
            TimerPhase::Idle | TimerPhase::AwaitingActivity => {
                self.enter_focus();
            }
            phase => self.ignore("start_focus", phase),
        }
        self.phase
    }

    /// Ends the current focus session early and starts the break it earned.
    ///
    /// The session is credited exactly as if the countdown had finished.
    pub fn skip_to_rest(&mut self) -> TimerPhase {
        match self.phase {
            TimerPhase::Focus => self.complete_focus(),
            phase => self.ignore("skip_to_rest", phase),
        }
        self.phase
    }

    /// Cuts the current break short and starts a new focus session.
    pub fn skip_to_focus(&mut self) -> TimerPhase {
        match self.phase {
            TimerPhase::ShortBreak | TimerPhase::LongBreak => self.enter_focus(),
            phase => self.ignore("skip_to_focus", phase),
        }
        self.phase
    }

    /// Stops the timer from any phase. Idempotent.
    ///
    /// A focus session interrupted this way earns no credit.
    pub fn stop(&mut self) -> TimerPhase {
        if self.phase != TimerPhase::Idle {
            tracing::debug!(from = %self.phase, "timer stopped");
        }
        self.phase = TimerPhase::Idle;
        self.remaining_seconds = 0;
        self.phase
    }

    // ------------------------------------------------------------------------
    // Host signals
    // ------------------------------------------------------------------------

    /// Advances the countdown by one second.
    ///
    /// No-op outside the timed phases.
    pub fn on_tick(&mut self) -> TimerPhase {
        if !self.phase.is_timed() {
            return self.phase;
        }

        if self.remaining_seconds > 1 {
            self.remaining_seconds -= 1;
            return self.phase;
        }

        match self.phase {
            TimerPhase::Focus => self.complete_focus(),
            TimerPhase::ShortBreak | TimerPhase::LongBreak => self.complete_break(),
            _ => {}
        }
        self.phase
    }

    /// Reacts to a "user became active" edge from the activity sensor.
    ///
    /// Only acted on in `AwaitingActivity`; ignored everywhere else.
    pub fn on_activity_detected(&mut self) -> TimerPhase {
        if self.phase == TimerPhase::AwaitingActivity {
            self.enter_focus();
            self.emit(EventKind::NextFocusStarted);
        }
        self.phase
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Returns the current phase.
    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    /// Returns the seconds left in the current timed phase.
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Returns the number of focus sessions finished so far.
    pub fn completed_sessions(&self) -> u32 {
        self.completed_sessions
    }

    /// Returns the durations this engine was built with.
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Returns the notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Returns the menu-bar title, e.g. "🍅 24:59" or "☕ 05:00".
    pub fn current_display_text(&self) -> String {
        TitleFormatter::title(self.phase, self.remaining_seconds)
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            remaining_seconds: self.remaining_seconds,
            completed_sessions: self.completed_sessions,
            title: self.current_display_text(),
        }
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    fn enter_focus(&mut self) {
        self.phase = TimerPhase::Focus;
        self.remaining_seconds = self.config.focus_seconds;
        tracing::debug!(remaining = self.remaining_seconds, "focus session started");
    }

    fn complete_focus(&mut self) {
        self.completed_sessions = self.completed_sessions.saturating_add(1);

        let phase = if self.is_long_break_due() {
            TimerPhase::LongBreak
        } else {
            TimerPhase::ShortBreak
        };
        self.phase = phase;
        self.remaining_seconds = self.config.break_seconds(phase);

        tracing::debug!(
            completed = self.completed_sessions,
            phase = %phase,
            "focus session completed"
        );
        self.emit(EventKind::FocusCompleted);
    }

    fn complete_break(&mut self) {
        tracing::debug!(from = %self.phase, "break completed");
        self.phase = TimerPhase::AwaitingActivity;
        self.remaining_seconds = 0;
        self.emit(EventKind::BreakCompleted);
    }

    fn is_long_break_due(&self) -> bool {
        let every = self.config.sessions_until_long_break;
        every > 0 && self.completed_sessions % every == 0
    }

    fn emit(&self, kind: EventKind) {
        self.notifier.notify(TimerEvent::new(kind, self.phase));
    }

    fn ignore(&self, command: &'static str, phase: TimerPhase) {
        tracing::debug!(command, phase = %phase, "command ignored in current phase");
    }
}

impl<N: Notifier> std::fmt::Debug for TimerEngine<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("remaining_seconds", &self.remaining_seconds)
            .field("completed_sessions", &self.completed_sessions)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
