//! Daemon module for the Pomodoro timer.
//!
//! The daemon owns the single [`TimerEngine`] and drives it:
//! - a one-second ticker advances the countdown
//! - the activity monitor is polled while waiting for the user
//! - IPC requests from the CLI are dispatched under the same lock
//! - engine events are rendered as notifications
//!
//! - `ipc`: Unix socket server and request dispatch

pub mod ipc;

pub use ipc::{default_socket_path, IpcError, IpcServer, RequestHandler};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, Mutex, Notify};
use tokio::time::MissedTickBehavior;

use crate::activity::{ActivityMonitor, IdleSource, PlatformIdleSource};
use crate::engine::{TimerEngine, TimerEvent};
use crate::notification::{NotificationContent, TerminalNotifier};
use crate::types::{TimerConfig, TimerPhase};

/// Engine as owned by the daemon: events go to the event loop.
pub type DaemonEngine = TimerEngine<mpsc::UnboundedSender<TimerEvent>>;

/// Engine shared between the ticker and IPC connections.
pub type SharedEngine = Arc<Mutex<DaemonEngine>>;

/// Default tick period.
const TICK_INTERVAL: Duration = Duration::from_secs(1);

// ============================================================================
// Daemon
// ============================================================================

/// Background process hosting the timer.
#[derive(Debug)]
pub struct Daemon<S: IdleSource = PlatformIdleSource> {
    config: TimerConfig,
    socket_path: PathBuf,
    monitor: ActivityMonitor<S>,
    tick_interval: Duration,
}

impl Daemon<PlatformIdleSource> {
    /// Creates a daemon using the platform's idle-time source.
    pub fn new(config: TimerConfig, socket_path: PathBuf) -> Self {
        Self {
            config,
            socket_path,
            monitor: ActivityMonitor::new(PlatformIdleSource::default()),
            tick_interval: TICK_INTERVAL,
        }
    }
}

impl<S: IdleSource> Daemon<S> {
    /// Replaces the idle-time source.
    pub fn with_idle_source<T: IdleSource>(self, source: T) -> Daemon<T> {
        Daemon {
            config: self.config,
            socket_path: self.socket_path,
            monitor: ActivityMonitor::new(source),
            tick_interval: self.tick_interval,
        }
    }

    /// Overrides the tick period.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Returns the socket path the daemon listens on.
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Runs until a `quit` request or Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the socket
    /// cannot be bound.
    pub async fn run(self) -> Result<()> {
        self.config
            .validate()
            .map_err(anyhow::Error::msg)
            .context("invalid timer configuration")?;

        let (tx, mut events) = mpsc::unbounded_channel();
        let engine: SharedEngine = Arc::new(Mutex::new(TimerEngine::new(self.config.clone(), tx)));
        let shutdown = Arc::new(Notify::new());
        let handler = Arc::new(RequestHandler::new(engine.clone(), shutdown.clone()));

        let server = IpcServer::new(&self.socket_path)?;
        let mut notifier = TerminalNotifier::stdout();

        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately
        ticker.tick().await;

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        tracing::info!(socket = ?server.socket_path(), "daemon started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick(&engine).await;
                }
                accepted = server.accept() => match accepted {
                    Ok(stream) => {
                        let handler = Arc::clone(&handler);
                        tokio::spawn(async move {
                            if let Err(e) = handler.serve_connection(stream).await {
                                tracing::warn!("IPC connection failed: {:#}", e);
                            }
                        });
                    }
                    Err(e) => tracing::warn!("{:#}", e),
                },
                Some(event) = events.recv() => {
                    let completed = engine.lock().await.completed_sessions();
                    let content = NotificationContent::for_event(&event, &self.config, completed);
                    if let Err(e) = notifier.deliver(&content) {
                        tracing::warn!("failed to deliver notification: {}", e);
                    }
                }
                _ = shutdown.notified() => {
                    tracing::info!("quit requested");
                    break;
                }
                _ = &mut ctrl_c => {
                    tracing::info!("interrupted");
                    break;
                }
            }
        }

        drop(server);
        tracing::info!("daemon stopped");
        Ok(())
    }

    async fn tick(&self, engine: &SharedEngine) {
        let phase = engine.lock().await.on_tick();
        if phase != TimerPhase::AwaitingActivity {
            return;
        }

        // The lock is released while polling; a stop in between turns the
        // activity edge into a no-op.
        if self.monitor.poll().await {
            engine.lock().await.on_activity_detected();
        }
    }
}
