//! pomobar library
//!
//! This library provides the core functionality for the pomobar timer.
//! It includes:
//! - Timer engine: the Pomodoro state machine and its notifier capability
//! - Activity detection for resuming after a break
//! - Menu-bar title and menu model
//! - Notification content for timer events
//! - IPC server/client for daemon-CLI communication
//! - CLI command parsing and display utilities
//! - Type definitions for configuration, state and the wire protocol

pub mod activity;
pub mod cli;
pub mod daemon;
pub mod engine;
pub mod menubar;
pub mod notification;
pub mod types;

// Re-export commonly used types for convenience
pub use engine::{EventKind, Notifier, RecordingNotifier, TimerEngine, TimerEvent};
pub use types::{IpcRequest, IpcResponse, ResponseData, TimerConfig, TimerPhase, TimerSnapshot};

pub use activity::{ActivityError, ActivityMonitor, IdleSource, MockIdleSource};
pub use daemon::Daemon;
pub use menubar::{MenuAction, MenuBuilder, MenuConfig, MenuItemConfig, TitleFormatter};
pub use notification::{NotificationContent, TerminalNotifier};
