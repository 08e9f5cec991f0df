//! Command definitions for the pomobar CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::TimerConfig;

// ============================================================================
// CLI Structure
// ============================================================================

/// pomobar - a menu-bar Pomodoro timer that waits for you after each break
#[derive(Parser, Debug)]
#[command(
    name = "pomobar",
    version,
    about = "Menu-bar Pomodoro timer with activity-based resume",
    long_about = "A Pomodoro timer daemon and its command-line client.\n\
                  Focus sessions alternate with short breaks, with a long break after\n\
                  every few sessions. When a break ends the timer waits until you\n\
                  touch the keyboard or mouse before the next session starts.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Daemon socket path [default: ~/.pomobar/pomobar.sock]
    #[arg(long, global = true, value_name = "PATH")]
    pub socket: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start a focus session
    Start,

    /// Skip to rest during focus, or back to focus during a break
    Skip,

    /// Stop the timer
    Stop,

    /// Show current timer status
    Status,

    /// Report that you are back (starts the next focus session after a break)
    Activity,

    /// Shut the daemon down
    Quit,

    /// Run the timer daemon in the foreground
    Daemon(DaemonArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Daemon Command Arguments
// ============================================================================

/// Arguments for the daemon command
#[derive(Args, Debug, Clone)]
pub struct DaemonArgs {
    /// Focus duration in minutes (1-120)
    #[arg(
        short,
        long,
        default_value = "25",
        value_parser = clap::value_parser!(u32).range(1..=120)
    )]
    pub focus: u32,

    /// Short break duration in minutes (1-60)
    #[arg(
        short,
        long,
        default_value = "5",
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    pub short_break: u32,

    /// Long break duration in minutes (1-60)
    #[arg(
        short,
        long,
        default_value = "15",
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    pub long_break: u32,

    /// Take a long break after this many focus sessions (1-12)
    #[arg(
        short = 'n',
        long,
        default_value = "4",
        value_parser = clap::value_parser!(u32).range(1..=12)
    )]
    pub long_break_every: u32,
}

impl Default for DaemonArgs {
    fn default() -> Self {
        Self {
            focus: 25,
            short_break: 5,
            long_break: 15,
            long_break_every: 4,
        }
    }
}

impl DaemonArgs {
    /// Converts the minute-based flags into a timer configuration.
    pub fn to_config(&self) -> TimerConfig {
        TimerConfig::from_minutes(self.focus, self.short_break, self.long_break)
            .with_sessions_until_long_break(self.long_break_every)
    }
}

// ============================================================================
// Tests
// ============================================================================
