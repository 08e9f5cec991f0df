//! Menu building and item state management for the menu bar.
//!
//! This module handles:
//! - Menu item configuration and state
//! - Determining which menu items should be enabled/disabled based on the timer phase
//!
//! The configuration logic is platform-independent and fully testable.

use super::MenuAction;
use crate::types::{TimerConfig, TimerPhase, TimerSnapshot};

// ============================================================================
// MenuItemConfig
// ============================================================================

/// Configuration for a menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemConfig {
    /// Display text for the menu item
    pub text: String,
    /// Whether the menu item is enabled (clickable)
    pub enabled: bool,
    /// Action dispatched when the item is clicked
    pub action: Option<MenuAction>,
}

impl MenuItemConfig {
    /// Creates an informational item that cannot be clicked.
    pub fn label(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            enabled: false,
            action: None,
        }
    }

    /// Creates a clickable item bound to an action.
    pub fn action(action: MenuAction, enabled: bool) -> Self {
        Self {
            text: action.description().to_string(),
            enabled,
            action: Some(action),
        }
    }

    /// Returns the action if the item is currently clickable.
    pub fn enabled_action(&self) -> Option<MenuAction> {
        self.action.filter(|_| self.enabled)
    }
}

// ============================================================================
// MenuConfig
// ============================================================================

/// Complete menu configuration based on the current timer snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuConfig {
    /// Start Focus button
    pub start: MenuItemConfig,
    /// Skip button ("Skip to Rest" during focus, "Skip to Focus" during breaks)
    pub skip: MenuItemConfig,
    /// Stop button
    pub stop: MenuItemConfig,
    /// Completed sessions counter
    pub stats: MenuItemConfig,
    /// Configured durations (always disabled)
    pub settings: Vec<MenuItemConfig>,
    /// Application name and version (always disabled)
    pub about: MenuItemConfig,
    /// Quit button (always enabled)
    pub quit: MenuItemConfig,
}

impl MenuConfig {
    /// Returns every item in display order.
    pub fn items(&self) -> Vec<&MenuItemConfig> {
        let mut items = vec![&self.start, &self.skip, &self.stop, &self.stats];
        items.extend(self.settings.iter());
        items.push(&self.about);
        items.push(&self.quit);
        items
    }

    /// Returns the actions that can be clicked right now, in display order.
    pub fn enabled_actions(&self) -> Vec<MenuAction> {
        self.items()
            .into_iter()
            .filter_map(MenuItemConfig::enabled_action)
            .collect()
    }
}

// ============================================================================
// MenuBuilder
// ============================================================================

/// Builds menu configuration based on the timer snapshot.
#[derive(Debug, Default)]
pub struct MenuBuilder;

impl MenuBuilder {
    /// Creates a new MenuBuilder.
    pub fn new() -> Self {
        Self
    }

    /// Builds a complete menu configuration.
    ///
    /// # Menu Item States
    ///
    /// | Phase            | Start | Skip               | Stop |
    /// |------------------|-------|--------------------|------|
    /// | Idle             | ✓     | ✗ (Skip to Rest)   | ✗    |
    /// | Focus            | ✗     | ✓ (Skip to Rest)   | ✓    |
    /// | Short/LongBreak  | ✗     | ✓ (Skip to Focus)  | ✓    |
    /// | AwaitingActivity | ✓     | ✗ (Skip to Rest)   | ✓    |
    pub fn build(&self, snapshot: &TimerSnapshot, config: &TimerConfig) -> MenuConfig {
        let phase = snapshot.phase;

        let start = MenuItemConfig::action(
            MenuAction::StartFocus,
            matches!(phase, TimerPhase::Idle | TimerPhase::AwaitingActivity),
        );

        let skip = match phase {
            TimerPhase::Focus => MenuItemConfig::action(MenuAction::SkipToRest, true),
            TimerPhase::ShortBreak | TimerPhase::LongBreak => {
                MenuItemConfig::action(MenuAction::SkipToFocus, true)
            }
            TimerPhase::Idle | TimerPhase::AwaitingActivity => {
                MenuItemConfig::action(MenuAction::SkipToRest, false)
            }
        };

        let stop = MenuItemConfig::action(MenuAction::Stop, phase != TimerPhase::Idle);

        MenuConfig {
            start,
            skip,
            stop,
            stats: MenuItemConfig::label(format!(
                "Sessions today: {}",
                snapshot.completed_sessions
            )),
            settings: Self::settings_items(config),
            about: MenuItemConfig::label(format!("Pomobar v{}", env!("CARGO_PKG_VERSION"))),
            quit: MenuItemConfig::action(MenuAction::Quit, true),
        }
    }

    fn settings_items(config: &TimerConfig) -> Vec<MenuItemConfig> {
        vec![
            MenuItemConfig::label(format!("Focus: {}", format_duration(config.focus_seconds))),
            MenuItemConfig::label(format!(
                "Short Rest: {}",
                format_duration(config.short_break_seconds)
            )),
            MenuItemConfig::label(format!(
                "Long Rest: {}",
                format_duration(config.long_break_seconds)
            )),
            MenuItemConfig::label(format!(
                "Long Rest every {} sessions",
                config.sessions_until_long_break
            )),
        ]
    }
}

/// Formats a configured duration as whole minutes, falling back to seconds.
fn format_duration(seconds: u32) -> String {
    if seconds % 60 == 0 {
        format!("{} min", seconds / 60)
    } else {
        format!("{} sec", seconds)
    }
}
