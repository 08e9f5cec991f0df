//! Component integration tests.
//!
//! These tests wire the engine to the presentation and sensor components the
//! way the daemon does, without sockets:
//! - engine events rendered as notifications
//! - menu state following the engine through a full cycle
//! - the activity monitor driving the engine out of `AwaitingActivity`

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};

use pomobar::activity::{ActivityError, ActivityMonitor, MockIdleSource};
use pomobar::engine::{EventKind, RecordingNotifier, TimerEngine, TimerEvent};
use pomobar::menubar::{MenuAction, MenuBuilder};
use pomobar::notification::{quote_for, NotificationContent, TerminalNotifier};
use pomobar::types::{TimerConfig, TimerPhase};

fn fast_config() -> TimerConfig {
    TimerConfig::default()
        .with_focus_seconds(3)
        .with_short_break_seconds(2)
        .with_long_break_seconds(4)
        .with_sessions_until_long_break(2)
}

fn tick_n<N: pomobar::engine::Notifier>(engine: &mut TimerEngine<N>, n: u32) {
    for _ in 0..n {
        engine.on_tick();
    }
}

mod notification_integration {
    use super::*;

    #[test]
    fn events_render_in_cycle_order() {
        let config = TimerConfig::default();
        let (tx, mut rx) = mpsc::unbounded_channel::<TimerEvent>();
        let mut engine = TimerEngine::new(config.clone(), tx);

        engine.start_focus();
        tick_n(&mut engine, config.focus_seconds);
        tick_n(&mut engine, config.short_break_seconds);
        engine.on_activity_detected();

        let mut notifier = TerminalNotifier::new(Vec::new());
        while let Ok(event) = rx.try_recv() {
            let content =
                NotificationContent::for_event(&event, &config, engine.completed_sessions());
            notifier.deliver(&content).unwrap();
        }

        let output = String::from_utf8(notifier.into_inner()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        let focus_line = format!("[Focus Time! 🎯] 25 minutes of deep work. {}", quote_for(1));
        assert_eq!(
            lines,
            vec![
                "[Short Break! ☕] Take 5 minutes to relax. You've earned it!",
                "[Ready to focus? 🍅] Move your mouse or press a key to start the next focus session.",
                focus_line.as_str(),
            ]
        );
    }

    #[test]
    fn long_break_notification_on_cadence() {
        let config = fast_config();
        let mut engine = TimerEngine::new(config.clone(), RecordingNotifier::new());

        engine.start_focus();
        engine.skip_to_rest();
        engine.skip_to_focus();
        engine.skip_to_rest();

        let events = engine.notifier().events();
        let titles: Vec<_> = events
            .iter()
            .map(|e| NotificationContent::for_event(e, &config, 0).title)
            .collect();
        assert_eq!(titles, vec!["Short Break! ☕", "Long Break! ☕"]);
    }
}

mod menu_integration {
    use super::*;

    fn enabled(engine: &TimerEngine<RecordingNotifier>) -> Vec<MenuAction> {
        MenuBuilder::new()
            .build(&engine.snapshot(), engine.config())
            .enabled_actions()
    }

    #[test]
    fn menu_follows_engine_through_cycle() {
        let mut engine = TimerEngine::new(fast_config(), RecordingNotifier::new());

        assert_eq!(enabled(&engine), vec![MenuAction::StartFocus, MenuAction::Quit]);

        engine.start_focus();
        assert_eq!(
            enabled(&engine),
            vec![MenuAction::SkipToRest, MenuAction::Stop, MenuAction::Quit]
        );

        tick_n(&mut engine, 3);
        assert_eq!(engine.phase(), TimerPhase::ShortBreak);
        assert_eq!(
            enabled(&engine),
            vec![MenuAction::SkipToFocus, MenuAction::Stop, MenuAction::Quit]
        );

        tick_n(&mut engine, 2);
        assert_eq!(engine.phase(), TimerPhase::AwaitingActivity);
        assert_eq!(
            enabled(&engine),
            vec![MenuAction::StartFocus, MenuAction::Stop, MenuAction::Quit]
        );

        let menu = MenuBuilder::new().build(&engine.snapshot(), engine.config());
        assert_eq!(menu.stats.text, "Sessions today: 1");
    }

    #[test]
    fn menu_title_matches_engine_title() {
        let mut engine = TimerEngine::new(TimerConfig::default(), RecordingNotifier::new());
        engine.start_focus();
        engine.on_tick();

        assert_eq!(engine.current_display_text(), "🍅 24:59");
        assert_eq!(engine.snapshot().title, engine.current_display_text());
    }
}

mod activity_integration {
    use super::*;

    async fn run_until_awaiting(engine: &Arc<Mutex<TimerEngine<RecordingNotifier>>>) {
        let mut engine = engine.lock().await;
        engine.start_focus();
        tick_n(&mut *engine, 5);
        assert_eq!(engine.phase(), TimerPhase::AwaitingActivity);
    }

    #[tokio::test]
    async fn monitor_edge_starts_next_focus() {
        let engine = Arc::new(Mutex::new(TimerEngine::new(
            fast_config(),
            RecordingNotifier::new(),
        )));
        run_until_awaiting(&engine).await;

        let source = MockIdleSource::idle_for(Duration::from_secs(120));
        source.push(Ok(Duration::from_secs(90)));
        source.push(Ok(Duration::from_millis(500)));
        let monitor = ActivityMonitor::new(source);

        // First poll: still away
        assert!(!monitor.poll().await);
        // Second poll: back at the keyboard
        assert!(monitor.poll().await);
        engine.lock().await.on_activity_detected();

        let engine = engine.lock().await;
        assert_eq!(engine.phase(), TimerPhase::Focus);
        assert_eq!(engine.remaining_seconds(), 3);
        assert_eq!(
            engine.notifier().kinds(),
            vec![
                EventKind::FocusCompleted,
                EventKind::BreakCompleted,
                EventKind::NextFocusStarted
            ]
        );
    }

    #[tokio::test]
    async fn unsupported_sensor_leaves_manual_resume() {
        let engine = Arc::new(Mutex::new(TimerEngine::new(
            fast_config(),
            RecordingNotifier::new(),
        )));
        run_until_awaiting(&engine).await;

        let monitor = ActivityMonitor::new(MockIdleSource::failing(ActivityError::Unsupported));
        for _ in 0..3 {
            assert!(!monitor.poll().await);
        }
        assert_eq!(engine.lock().await.phase(), TimerPhase::AwaitingActivity);

        // Manual start resumes without a NextFocusStarted event
        let mut engine = engine.lock().await;
        assert_eq!(engine.start_focus(), TimerPhase::Focus);
        assert_eq!(
            engine.notifier().kinds(),
            vec![EventKind::FocusCompleted, EventKind::BreakCompleted]
        );
    }
}
