//! Display utilities for the pomobar CLI.
//!
//! This module provides formatted output for:
//! - Command results
//! - Error messages
//! - Status display, including the menu actions currently available

use crate::menubar::{MenuBuilder, TitleFormatter};
use crate::types::{IpcResponse, TimerConfig};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the result of a timer command (start, skip, stop, activity).
    pub fn show_command_result(response: &IpcResponse) {
        println!("{}", Self::format_command_result(response));
    }

    /// Shows the current timer status.
    pub fn show_status(response: &IpcResponse) {
        println!("{}", Self::format_status(response));
    }

    /// Shows the daemon's answer to `quit`.
    pub fn show_quit(response: &IpcResponse) {
        println!("{}", response.message);
    }

    /// Shows the daemon startup banner.
    pub fn show_daemon_started(config: &TimerConfig, socket: &std::path::Path) {
        println!(
            "pomobar daemon listening on {} (focus {}, short break {}, long break {} every {} sessions)",
            socket.display(),
            TitleFormatter::format_time(config.focus_seconds),
            TitleFormatter::format_time(config.short_break_seconds),
            TitleFormatter::format_time(config.long_break_seconds),
            config.sessions_until_long_break
        );
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }

    /// Formats a command result: the daemon's message and the new title.
    pub fn format_command_result(response: &IpcResponse) -> String {
        let title = response.data.as_ref().and_then(|d| d.title.as_deref());
        match title {
            Some(title) => format!("{}\n  {}", response.message, title),
            None => response.message.clone(),
        }
    }

    /// Formats the status block.
    pub fn format_status(response: &IpcResponse) -> String {
        let Some(snapshot) = response.data.as_ref().and_then(|d| d.snapshot()) else {
            return "Timer status unavailable".to_string();
        };

        let mut lines = vec![
            snapshot.title.clone(),
            "─────────────────────────────".to_string(),
            format!("Phase:     {}", snapshot.phase.display_name()),
        ];

        if snapshot.phase.is_timed() {
            lines.push(format!(
                "Remaining: {}",
                TitleFormatter::format_time(snapshot.remaining_seconds)
            ));
        }
        lines.push(format!("Sessions:  {}", snapshot.completed_sessions));

        if let Some(config) = response.data.as_ref().and_then(|d| d.config.as_ref()) {
            let menu = MenuBuilder::new().build(&snapshot, config);
            let actions: Vec<String> = menu
                .enabled_actions()
                .iter()
                .map(|action| format!("{} ({})", action, action.as_command()))
                .collect();
            lines.push(format!("Actions:   {}", actions.join(", ")));
        }

        lines.join("\n")
    }
}

// ============================================================================
// Tests
// ============================================================================
