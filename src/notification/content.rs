//! Notification content construction.
//!
//! Maps engine events onto the title/body pairs shown to the user.

use crate::engine::{EventKind, TimerEvent};
use crate::types::{TimerConfig, TimerPhase};

/// Quotes shown when a new focus session starts, rotated per session.
pub const FOCUS_QUOTES: &[&str] = &[
    "Deep work is the superpower of the 21st century. - Cal Newport",
    "Focus is saying no to 1,000 other things. - Steve Jobs",
    "The successful warrior is the average man with laser-like focus. - Bruce Lee",
    "Concentrate all your thoughts upon the work at hand. - Alexander Graham Bell",
    "Where focus goes, energy flows. - Tony Robbins",
    "The ability to concentrate is a skill that gets valuable things done.",
    "Single-tasking is the new superpower in a world of distractions.",
    "Your focus determines your reality. - George Lucas",
    "Lack of direction, not lack of time, is the problem. - Zig Ziglar",
    "Focus on being productive instead of busy. - Tim Ferriss",
    "The shorter way to do many things is to do only one thing at a time.",
    "Starve your distractions, feed your focus.",
    "Focus is a matter of deciding what things you're not going to do. - John Carmack",
    "Multitasking is the enemy of focus and excellence.",
    "25 minutes of deep focus beats 2 hours of scattered attention.",
];

/// Title and body of a single notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
}

impl NotificationContent {
    /// Creates notification content.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Builds the notification for an engine event.
    ///
    /// `completed_sessions` selects the quote for a new focus session.
    #[must_use]
    pub fn for_event(event: &TimerEvent, config: &TimerConfig, completed_sessions: u32) -> Self {
        match event.kind {
            EventKind::FocusCompleted => {
                let title = if event.phase == TimerPhase::LongBreak {
                    "Long Break! ☕"
                } else {
                    "Short Break! ☕"
                };
                let seconds = config.break_seconds(event.phase);
                Self::new(
                    title,
                    format!("Take {} to relax. You've earned it!", describe_duration(seconds)),
                )
            }
            EventKind::BreakCompleted => Self::new(
                "Ready to focus? 🍅",
                "Move your mouse or press a key to start the next focus session.",
            ),
            EventKind::NextFocusStarted => Self::new(
                "Focus Time! 🎯",
                format!(
                    "{} of deep work. {}",
                    capitalize(&describe_duration(config.focus_seconds)),
                    quote_for(completed_sessions)
                ),
            ),
        }
    }
}

/// Picks the quote for the given session count.
pub fn quote_for(completed_sessions: u32) -> &'static str {
    FOCUS_QUOTES[completed_sessions as usize % FOCUS_QUOTES.len()]
}

fn describe_duration(seconds: u32) -> String {
    match (seconds / 60, seconds % 60) {
        (1, 0) => "1 minute".to_string(),
        (minutes, 0) => format!("{} minutes", minutes),
        _ if seconds == 1 => "1 second".to_string(),
        _ => format!("{} seconds", seconds),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(kind: EventKind, phase: TimerPhase) -> TimerEvent {
        TimerEvent::new(kind, phase)
    }

    mod for_event_tests {
        use super::*;

        #[test]
        fn test_focus_completed_short_break() {
            let content = NotificationContent::for_event(
                &event(EventKind::FocusCompleted, TimerPhase::ShortBreak),
                &TimerConfig::default(),
                1,
            );

            assert_eq!(content.title, "Short Break! ☕");
            assert_eq!(content.body, "Take 5 minutes to relax. You've earned it!");
        }

        #[test]
        fn test_focus_completed_long_break() {
            let content = NotificationContent::for_event(
                &event(EventKind::FocusCompleted, TimerPhase::LongBreak),
                &TimerConfig::default(),
                4,
            );

            assert_eq!(content.title, "Long Break! ☕");
            assert_eq!(content.body, "Take 15 minutes to relax. You've earned it!");
        }

        #[test]
        fn test_break_completed() {
            let content = NotificationContent::for_event(
                &event(EventKind::BreakCompleted, TimerPhase::AwaitingActivity),
                &TimerConfig::default(),
                1,
            );

            assert_eq!(content.title, "Ready to focus? 🍅");
            assert!(content.body.starts_with("Move your mouse"));
        }

        #[test]
        fn test_next_focus_started_includes_quote() {
            let content = NotificationContent::for_event(
                &event(EventKind::NextFocusStarted, TimerPhase::Focus),
                &TimerConfig::default(),
                0,
            );

            assert_eq!(content.title, "Focus Time! 🎯");
            assert_eq!(
                content.body,
                format!("25 minutes of deep work. {}", FOCUS_QUOTES[0])
            );
        }

        #[test]
        fn test_second_based_durations() {
            let config = TimerConfig::default()
                .with_focus_seconds(3)
                .with_short_break_seconds(1);

            let rest = NotificationContent::for_event(
                &event(EventKind::FocusCompleted, TimerPhase::ShortBreak),
                &config,
                1,
            );
            assert_eq!(rest.body, "Take 1 second to relax. You've earned it!");

            let focus = NotificationContent::for_event(
                &event(EventKind::NextFocusStarted, TimerPhase::Focus),
                &config,
                1,
            );
            assert!(focus.body.starts_with("3 seconds of deep work."));
        }
    }

    mod quote_tests {
        use super::*;

        #[test]
        fn test_quotes_rotate() {
            assert_eq!(quote_for(0), FOCUS_QUOTES[0]);
            assert_eq!(quote_for(1), FOCUS_QUOTES[1]);
            assert_ne!(quote_for(0), quote_for(1));
        }

        #[test]
        fn test_quotes_wrap_around() {
            let len = FOCUS_QUOTES.len() as u32;
            assert_eq!(quote_for(len), quote_for(0));
            assert_eq!(quote_for(len + 2), quote_for(2));
        }
    }

    #[test]
    fn test_describe_duration() {
        assert_eq!(describe_duration(60), "1 minute");
        assert_eq!(describe_duration(1500), "25 minutes");
        assert_eq!(describe_duration(90), "90 seconds");
    }
}
