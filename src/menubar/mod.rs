//! Menu bar presentation for the Pomodoro timer.
//!
//! This module provides:
//! - Title text for the status item (e.g., "🍅 15:30")
//! - The dropdown menu model with Start/Skip/Stop/Quit actions
//! - The mapping from menu actions to daemon requests
//!
//! # Architecture
//!
//! - `title.rs`: Title text generation
//! - `menu.rs`: Menu configuration derived from a [`TimerSnapshot`](crate::types::TimerSnapshot)
//! - `event.rs`: Menu actions
//!
//! Everything here is platform-independent and fully testable; drawing the
//! status item is left to the host.

pub mod event;
pub mod menu;
pub mod title;

pub use event::MenuAction;
pub use menu::{MenuBuilder, MenuConfig, MenuItemConfig};
pub use title::TitleFormatter;
