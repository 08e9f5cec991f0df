//! User-facing notifications for timer events.
//!
//! This module provides:
//!
//! - [`NotificationContent`]: the title/body shown for each engine event
//! - [`TerminalNotifier`]: delivery to the daemon's terminal and log
//!
//! # Example
//!
//! ```
//! use pomobar::engine::{EventKind, TimerEvent};
//! use pomobar::notification::{NotificationContent, TerminalNotifier};
//! use pomobar::types::{TimerConfig, TimerPhase};
//!
//! let event = TimerEvent::new(EventKind::FocusCompleted, TimerPhase::ShortBreak);
//! let content = NotificationContent::for_event(&event, &TimerConfig::default(), 1);
//!
//! let mut notifier = TerminalNotifier::new(Vec::new());
//! notifier.deliver(&content).unwrap();
//! ```

mod content;

pub use content::{quote_for, NotificationContent, FOCUS_QUOTES};

use std::io::{self, Write};

/// Writes notifications as single lines to a terminal (or any writer).
#[derive(Debug)]
pub struct TerminalNotifier<W: Write> {
    out: W,
}

impl TerminalNotifier<io::Stdout> {
    /// Creates a notifier that writes to stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalNotifier<W> {
    /// Creates a notifier that writes to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Logs and prints one notification.
    pub fn deliver(&mut self, content: &NotificationContent) -> io::Result<()> {
        tracing::info!(title = %content.title, body = %content.body, "notification");
        writeln!(self.out, "{}", Self::render(content))?;
        self.out.flush()
    }

    /// Formats a notification as one line.
    pub fn render(content: &NotificationContent) -> String {
        format!("[{}] {}", content.title, content.body)
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}
