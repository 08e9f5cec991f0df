//! Title generation for the menu bar.
//!
//! This module handles generating the display text for the menu bar
//! (e.g., "🍅 15:30"). The logic is platform-independent and fully testable;
//! drawing it is left to whatever hosts the title.

use crate::types::{TimerPhase, BREAK_MARKER, FOCUS_MARKER};

/// Generates menu-bar titles from the timer phase and remaining time.
#[derive(Debug, Default, Clone, Copy)]
pub struct TitleFormatter;

impl TitleFormatter {
    /// Generates the title text for display in the menu bar.
    ///
    /// Format:
    /// - Idle: "🍅 Ready"
    /// - Focus: "🍅 MM:SS"
    /// - ShortBreak/LongBreak: "☕ MM:SS"
    /// - AwaitingActivity: "🍅 Waiting..."
    ///
    /// # Examples
    ///
    /// ```
    /// use pomobar::menubar::TitleFormatter;
    /// use pomobar::types::TimerPhase;
    ///
    /// assert_eq!(TitleFormatter::title(TimerPhase::Focus, 930), "🍅 15:30");
    /// assert_eq!(TitleFormatter::title(TimerPhase::ShortBreak, 300), "☕ 05:00");
    /// ```
    pub fn title(phase: TimerPhase, remaining_seconds: u32) -> String {
        match phase {
            TimerPhase::Idle => format!("{} Ready", FOCUS_MARKER),
            TimerPhase::Focus => {
                format!("{} {}", FOCUS_MARKER, Self::format_time(remaining_seconds))
            }
            TimerPhase::ShortBreak | TimerPhase::LongBreak => {
                format!("{} {}", BREAK_MARKER, Self::format_time(remaining_seconds))
            }
            TimerPhase::AwaitingActivity => format!("{} Waiting...", FOCUS_MARKER),
        }
    }

    /// Formats remaining time as MM:SS string.
    ///
    /// Minutes are not wrapped into hours, so 7200 seconds is "120:00".
    pub fn format_time(remaining_seconds: u32) -> String {
        let minutes = remaining_seconds / 60;
        let seconds = remaining_seconds % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}
