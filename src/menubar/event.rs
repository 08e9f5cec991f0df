//! Menu actions and their mapping onto daemon commands.
//!
//! The menu itself is drawn by the host; these types describe what a click
//! means so every front end (menu, CLI, tests) dispatches the same way.

use std::fmt;

use crate::types::IpcRequest;

// ============================================================================
// MenuAction
// ============================================================================

/// Actions that can be triggered from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    /// Start a focus session
    StartFocus,
    /// End the focus session early and take the earned break
    SkipToRest,
    /// End the break early and start focusing
    SkipToFocus,
    /// Stop the timer
    Stop,
    /// Quit the daemon
    Quit,
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl MenuAction {
    /// Returns the CLI subcommand that performs this action.
    pub fn as_command(&self) -> &'static str {
        self.to_request().as_str()
    }

    /// Returns the menu label for this action.
    pub fn description(&self) -> &'static str {
        match self {
            MenuAction::StartFocus => "Start Focus",
            MenuAction::SkipToRest => "Skip to Rest",
            MenuAction::SkipToFocus => "Skip to Focus",
            MenuAction::Stop => "Stop Timer",
            MenuAction::Quit => "Quit",
        }
    }

    /// Returns the IPC request the daemon needs to perform this action.
    ///
    /// Both skip directions share the `skip` request; the daemon picks the
    /// direction from the current phase.
    pub fn to_request(&self) -> IpcRequest {
        match self {
            MenuAction::StartFocus => IpcRequest::Start,
            MenuAction::SkipToRest | MenuAction::SkipToFocus => IpcRequest::Skip,
            MenuAction::Stop => IpcRequest::Stop,
            MenuAction::Quit => IpcRequest::Quit,
        }
    }
}
