//! IPC Server for the Pomodoro timer daemon.
//!
//! This module provides Unix Domain Socket IPC functionality:
//! - Server that listens on a Unix socket
//! - Request/response handling for timer commands
//! - Dispatch of commands to the shared [`TimerEngine`](crate::engine::TimerEngine)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Notify;
use tokio::time::{timeout, Duration};

use crate::types::{IpcRequest, IpcResponse, ResponseData, TimerPhase};

use super::SharedEngine;

// ============================================================================
// Constants
// ============================================================================

/// Socket location relative to the home directory
pub const DEFAULT_SOCKET_PATH: &str = ".pomobar/pomobar.sock";

/// Maximum request size in bytes (4KB)
const MAX_REQUEST_SIZE: usize = 4096;

/// Read timeout in seconds
const READ_TIMEOUT_SECS: u64 = 5;

/// Returns `~/.pomobar/pomobar.sock`.
pub fn default_socket_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("could not determine the home directory")?;
    Ok(home.join(DEFAULT_SOCKET_PATH))
}

// ============================================================================
// IpcError
// ============================================================================

/// IPC-specific error types.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    /// Read error
    #[error("Failed to read request: {0}")]
    ReadError(String),

    /// Timeout error
    #[error("Operation timed out")]
    Timeout,

    /// Client closed the connection before sending anything
    #[error("Connection closed by client")]
    ConnectionClosed,

    /// Request too large
    #[error("Request too large (max {MAX_REQUEST_SIZE} bytes)")]
    RequestTooLarge,
}

// ============================================================================
// IpcServer
// ============================================================================

/// Unix Domain Socket IPC server.
#[derive(Debug)]
pub struct IpcServer {
    /// Unix socket listener
    listener: UnixListener,
    /// Socket path (for cleanup)
    socket_path: PathBuf,
}

impl IpcServer {
    /// Creates a new IPC server bound to the specified socket path.
    ///
    /// If the socket file already exists, it will be removed before binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket cannot be bound.
    pub fn new(socket_path: &Path) -> Result<Self> {
        if socket_path.exists() {
            std::fs::remove_file(socket_path)
                .with_context(|| format!("Failed to remove existing socket: {:?}", socket_path))?;
        }

        if let Some(parent) = socket_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create socket directory: {:?}", parent))?;
        }

        let listener = UnixListener::bind(socket_path)
            .with_context(|| format!("Failed to bind Unix socket: {:?}", socket_path))?;

        Ok(Self {
            listener,
            socket_path: socket_path.to_path_buf(),
        })
    }

    /// Accepts an incoming client connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be accepted.
    pub async fn accept(&self) -> Result<UnixStream> {
        let (stream, _addr) = self
            .listener
            .accept()
            .await
            .context("Failed to accept connection")?;
        Ok(stream)
    }

    /// Receives and deserializes an IPC request from the stream.
    ///
    /// Reads until the client shuts down its write side, bounded by a read
    /// timeout and [`MAX_REQUEST_SIZE`].
    ///
    /// # Errors
    ///
    /// Returns an error if reading or deserialization fails.
    pub async fn receive_request(stream: &mut UnixStream) -> Result<IpcRequest> {
        let mut buffer = Vec::with_capacity(512);

        let read_result = timeout(
            Duration::from_secs(READ_TIMEOUT_SECS),
            stream
                .take(MAX_REQUEST_SIZE as u64 + 1)
                .read_to_end(&mut buffer),
        )
        .await;

        match read_result {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => return Err(IpcError::ReadError(e.to_string()).into()),
            Err(_) => return Err(IpcError::Timeout.into()),
        }

        if buffer.is_empty() {
            return Err(IpcError::ConnectionClosed.into());
        }
        if buffer.len() > MAX_REQUEST_SIZE {
            return Err(IpcError::RequestTooLarge.into());
        }

        let request: IpcRequest =
            serde_json::from_slice(&buffer).context("Failed to deserialize IPC request")?;

        Ok(request)
    }

    /// Serializes and sends an IPC response to the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub async fn send_response(stream: &mut UnixStream, response: &IpcResponse) -> Result<()> {
        let json = serde_json::to_vec(response).context("Failed to serialize IPC response")?;

        stream
            .write_all(&json)
            .await
            .context("Failed to write response")?;
        stream.flush().await.context("Failed to flush response")?;

        Ok(())
    }

    /// Returns the socket path.
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }
}

impl Drop for IpcServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

// ============================================================================
// RequestHandler
// ============================================================================

/// Handles IPC requests by dispatching to the shared engine.
///
/// Commands that are not valid in the current phase still answer `success`;
/// the message says nothing changed. `quit` is only acted on by
/// [`RequestHandler::serve_connection`].
#[derive(Debug)]
pub struct RequestHandler {
    /// Shared reference to the timer engine
    engine: SharedEngine,
    /// Signalled by the `quit` command
    shutdown: Arc<Notify>,
}

impl RequestHandler {
    /// Creates a new request handler.
    pub fn new(engine: SharedEngine, shutdown: Arc<Notify>) -> Self {
        Self { engine, shutdown }
    }

    /// Handles an IPC request and returns the appropriate response.
    pub async fn handle(&self, request: IpcRequest) -> IpcResponse {
        tracing::debug!(command = request.as_str(), "handling request");

        let mut engine = self.engine.lock().await;
        let before = engine.phase();

        let message = match request {
            IpcRequest::Start => {
                engine.start_focus();
                changed_or(before, engine.phase(), "Focus session started")
            }
            IpcRequest::Skip => match before {
                TimerPhase::Focus => {
                    engine.skip_to_rest();
                    format!("Skipped to {}", engine.phase().display_name())
                }
                TimerPhase::ShortBreak | TimerPhase::LongBreak => {
                    engine.skip_to_focus();
                    "Skipped to focus".to_string()
                }
                phase => unchanged(phase),
            },
            IpcRequest::Stop => {
                engine.stop();
                changed_or(before, engine.phase(), "Timer stopped")
            }
            IpcRequest::Activity => {
                engine.on_activity_detected();
                changed_or(before, engine.phase(), "Welcome back, focus session started")
            }
            IpcRequest::Status => String::new(),
            IpcRequest::Quit => "Daemon shutting down".to_string(),
        };

        let data = ResponseData::from_snapshot(&engine.snapshot(), engine.config());
        IpcResponse::success(message, Some(data))
    }

    /// Serves one connection: reads a request, answers it, and signals
    /// shutdown once a `quit` request has been answered.
    ///
    /// A request that cannot be read or parsed is answered with an error
    /// response before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be read or the response
    /// cannot be written.
    pub async fn serve_connection(&self, mut stream: UnixStream) -> Result<()> {
        let request = match IpcServer::receive_request(&mut stream).await {
            Ok(request) => request,
            Err(e) => {
                let response = IpcResponse::error(format!("{:#}", e));
                if let Err(send_err) = IpcServer::send_response(&mut stream, &response).await {
                    tracing::debug!("could not send error response: {:#}", send_err);
                }
                return Err(e);
            }
        };
        let response = self.handle(request).await;
        let sent = IpcServer::send_response(&mut stream, &response).await;

        if request == IpcRequest::Quit {
            self.shutdown.notify_one();
        }
        sent
    }
}

fn changed_or(before: TimerPhase, after: TimerPhase, message: &str) -> String {
    if before == after {
        unchanged(after)
    } else {
        message.to_string()
    }
}

fn unchanged(phase: TimerPhase) -> String {
    format!("Nothing changed: timer is {}", phase.display_name())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::{mpsc, Mutex};

    use crate::engine::{EventKind, TimerEngine, TimerEvent};
    use crate::types::TimerConfig;

    // ------------------------------------------------------------------------
    // Helper functions
    // ------------------------------------------------------------------------

    fn create_temp_socket_path() -> PathBuf {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.sock");
        // Keep the directory so it's not deleted
        std::mem::forget(dir);
        path
    }

    fn create_engine() -> (SharedEngine, mpsc::UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let engine = TimerEngine::new(TimerConfig::default(), tx);
        (Arc::new(Mutex::new(engine)), rx)
    }

    fn create_handler() -> (RequestHandler, SharedEngine, mpsc::UnboundedReceiver<TimerEvent>) {
        let (engine, rx) = create_engine();
        let handler = RequestHandler::new(engine.clone(), Arc::new(Notify::new()));
        (handler, engine, rx)
    }

    async fn send_raw(path: PathBuf, payload: &'static [u8]) -> Option<IpcResponse> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        let mut stream = UnixStream::connect(&path).await.unwrap();
        stream.write_all(payload).await.unwrap();
        stream.shutdown().await.unwrap();

        let mut buffer = Vec::new();
        stream.read_to_end(&mut buffer).await.unwrap();
        if buffer.is_empty() {
            None
        } else {
            Some(serde_json::from_slice(&buffer).unwrap())
        }
    }

    // ------------------------------------------------------------------------
    // IpcServer Tests
    // ------------------------------------------------------------------------

    mod ipc_server_tests {
        use super::*;

        #[tokio::test]
        async fn test_server_creation() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path);

            assert!(server.is_ok());
            assert!(socket_path.exists());
        }

        #[tokio::test]
        async fn test_server_removes_existing_socket() {
            let socket_path = create_temp_socket_path();
            std::fs::write(&socket_path, "stale").unwrap();

            let server = IpcServer::new(&socket_path);
            assert!(server.is_ok());
        }

        #[tokio::test]
        async fn test_server_creates_parent_directory() {
            let dir = tempfile::tempdir().unwrap();
            let socket_path = dir.path().join("subdir").join("test.sock");

            let server = IpcServer::new(&socket_path);
            assert!(server.is_ok());
            assert!(socket_path.parent().unwrap().exists());
        }

        #[tokio::test]
        async fn test_receive_request_status() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path).unwrap();

            let client = tokio::spawn(send_raw(socket_path.clone(), br#"{"command":"status"}"#));

            let mut stream = server.accept().await.unwrap();
            let request = IpcServer::receive_request(&mut stream).await.unwrap();
            assert_eq!(request, IpcRequest::Status);

            drop(stream);
            assert!(client.await.unwrap().is_none());
        }

        #[tokio::test]
        async fn test_send_response() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path).unwrap();

            let client = tokio::spawn(send_raw(socket_path.clone(), br#"{"command":"stop"}"#));

            let mut stream = server.accept().await.unwrap();
            IpcServer::receive_request(&mut stream).await.unwrap();
            let response = IpcResponse::success("Test message", None);
            IpcServer::send_response(&mut stream, &response)
                .await
                .unwrap();
            drop(stream);

            let received = client.await.unwrap().unwrap();
            assert_eq!(received.status, "success");
            assert_eq!(received.message, "Test message");
        }

        #[tokio::test]
        async fn test_receive_request_invalid_json() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path).unwrap();

            let _client = tokio::spawn(send_raw(socket_path.clone(), b"not valid json"));

            let mut stream = server.accept().await.unwrap();
            let request = IpcServer::receive_request(&mut stream).await;

            assert!(request.is_err());
        }

        #[tokio::test]
        async fn test_receive_request_unknown_command() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path).unwrap();

            let _client = tokio::spawn(send_raw(socket_path.clone(), br#"{"command":"pause"}"#));

            let mut stream = server.accept().await.unwrap();
            assert!(IpcServer::receive_request(&mut stream).await.is_err());
        }

        #[tokio::test]
        async fn test_receive_request_too_large() {
            static LARGE: [u8; MAX_REQUEST_SIZE + 10] = [b' '; MAX_REQUEST_SIZE + 10];

            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path).unwrap();

            let _client = tokio::spawn(send_raw(socket_path.clone(), &LARGE));

            let mut stream = server.accept().await.unwrap();
            let err = IpcServer::receive_request(&mut stream).await.unwrap_err();
            assert!(err.to_string().contains("too large"));
        }

        #[tokio::test]
        async fn test_socket_path_getter() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path).unwrap();

            assert_eq!(server.socket_path(), socket_path);
        }

        #[tokio::test]
        async fn test_server_drop_cleanup() {
            let socket_path = create_temp_socket_path();

            {
                let _server = IpcServer::new(&socket_path).unwrap();
                assert!(socket_path.exists());
            }

            assert!(!socket_path.exists());
        }
    }

    // ------------------------------------------------------------------------
    // RequestHandler Tests
    // ------------------------------------------------------------------------

    mod request_handler_tests {
        use super::*;

        #[tokio::test]
        async fn test_handle_status() {
            let (handler, _engine, _rx) = create_handler();

            let response = handler.handle(IpcRequest::Status).await;

            assert!(response.is_success());
            let data = response.data.unwrap();
            assert_eq!(data.state, Some("idle".to_string()));
            assert_eq!(data.remaining_seconds, Some(0));
            assert_eq!(data.completed_sessions, Some(0));
            assert_eq!(data.title, Some("🍅 Ready".to_string()));
            assert_eq!(data.config, Some(TimerConfig::default()));
        }

        #[tokio::test]
        async fn test_handle_start() {
            let (handler, _engine, _rx) = create_handler();

            let response = handler.handle(IpcRequest::Start).await;

            assert_eq!(response.message, "Focus session started");
            let data = response.data.unwrap();
            assert_eq!(data.state, Some("focus".to_string()));
            assert_eq!(data.remaining_seconds, Some(25 * 60));
        }

        #[tokio::test]
        async fn test_handle_start_twice_is_success_without_change() {
            let (handler, _engine, _rx) = create_handler();

            handler.handle(IpcRequest::Start).await;
            let response = handler.handle(IpcRequest::Start).await;

            assert!(response.is_success());
            assert_eq!(response.message, "Nothing changed: timer is Focus");
        }

        #[tokio::test]
        async fn test_handle_skip_from_focus() {
            let (handler, engine, mut rx) = create_handler();

            handler.handle(IpcRequest::Start).await;
            let response = handler.handle(IpcRequest::Skip).await;

            assert_eq!(response.message, "Skipped to Short Break");
            assert_eq!(engine.lock().await.completed_sessions(), 1);
            assert_eq!(rx.try_recv().unwrap().kind, EventKind::FocusCompleted);
        }

        #[tokio::test]
        async fn test_handle_skip_from_break() {
            let (handler, engine, _rx) = create_handler();

            handler.handle(IpcRequest::Start).await;
            handler.handle(IpcRequest::Skip).await;
            let response = handler.handle(IpcRequest::Skip).await;

            assert_eq!(response.message, "Skipped to focus");
            assert_eq!(engine.lock().await.phase(), TimerPhase::Focus);
        }

        #[tokio::test]
        async fn test_handle_skip_when_idle() {
            let (handler, _engine, _rx) = create_handler();

            let response = handler.handle(IpcRequest::Skip).await;

            assert!(response.is_success());
            assert_eq!(response.message, "Nothing changed: timer is Idle");
        }

        #[tokio::test]
        async fn test_handle_stop() {
            let (handler, _engine, _rx) = create_handler();

            handler.handle(IpcRequest::Start).await;
            let response = handler.handle(IpcRequest::Stop).await;

            assert_eq!(response.message, "Timer stopped");
            assert_eq!(response.data.unwrap().state, Some("idle".to_string()));
        }

        #[tokio::test]
        async fn test_handle_stop_when_idle() {
            let (handler, _engine, _rx) = create_handler();

            let response = handler.handle(IpcRequest::Stop).await;

            assert!(response.is_success());
            assert!(response.message.starts_with("Nothing changed"));
        }

        #[tokio::test]
        async fn test_handle_activity_when_awaiting() {
            let (tx, mut rx) = mpsc::unbounded_channel();
            let config = TimerConfig::default()
                .with_focus_seconds(1)
                .with_short_break_seconds(1);
            let engine = Arc::new(Mutex::new(TimerEngine::new(config, tx)));
            let handler = RequestHandler::new(engine.clone(), Arc::new(Notify::new()));

            {
                let mut engine = engine.lock().await;
                engine.start_focus();
                engine.on_tick();
                engine.on_tick();
                assert_eq!(engine.phase(), TimerPhase::AwaitingActivity);
            }

            let response = handler.handle(IpcRequest::Activity).await;

            assert_eq!(response.message, "Welcome back, focus session started");
            let kinds: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok())
                .map(|e| e.kind)
                .collect();
            assert_eq!(
                kinds,
                vec![
                    EventKind::FocusCompleted,
                    EventKind::BreakCompleted,
                    EventKind::NextFocusStarted
                ]
            );
        }

        #[tokio::test]
        async fn test_handle_activity_ignored_when_idle() {
            let (handler, engine, _rx) = create_handler();

            let response = handler.handle(IpcRequest::Activity).await;

            assert!(response.message.starts_with("Nothing changed"));
            assert_eq!(engine.lock().await.phase(), TimerPhase::Idle);
        }

        #[tokio::test]
        async fn test_handle_quit_does_not_signal_by_itself() {
            let (engine, _rx) = create_engine();
            let shutdown = Arc::new(Notify::new());
            let handler = RequestHandler::new(engine, shutdown.clone());

            let response = handler.handle(IpcRequest::Quit).await;
            assert_eq!(response.message, "Daemon shutting down");

            let notified = timeout(Duration::from_millis(50), shutdown.notified()).await;
            assert!(notified.is_err());
        }
    }

    // ------------------------------------------------------------------------
    // Integration Tests
    // ------------------------------------------------------------------------

    mod integration_tests {
        use super::*;

        #[tokio::test]
        async fn test_full_ipc_flow() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path).unwrap();
            let (handler, _engine, _rx) = create_handler();

            let client = tokio::spawn(send_raw(socket_path.clone(), br#"{"command":"start"}"#));

            let mut stream = server.accept().await.unwrap();
            let request = IpcServer::receive_request(&mut stream).await.unwrap();
            let response = handler.handle(request).await;
            IpcServer::send_response(&mut stream, &response)
                .await
                .unwrap();
            drop(stream);

            let client_response = client.await.unwrap().unwrap();
            assert!(client_response.is_success());
            assert_eq!(client_response.message, "Focus session started");
            assert_eq!(
                client_response.data.unwrap().title,
                Some("🍅 25:00".to_string())
            );
        }

        #[tokio::test]
        async fn test_serve_connection_quit_answers_then_signals() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path).unwrap();
            let (engine, _rx) = create_engine();
            let shutdown = Arc::new(Notify::new());
            let handler = RequestHandler::new(engine, shutdown.clone());

            let client = tokio::spawn(send_raw(socket_path.clone(), br#"{"command":"quit"}"#));

            let stream = server.accept().await.unwrap();
            handler.serve_connection(stream).await.unwrap();

            let response = client.await.unwrap().unwrap();
            assert_eq!(response.message, "Daemon shutting down");
            timeout(Duration::from_secs(1), shutdown.notified())
                .await
                .unwrap();
        }

        #[tokio::test]
        async fn test_serve_connection_answers_unknown_command_with_error() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path).unwrap();
            let (handler, engine, _rx) = create_handler();

            let client = tokio::spawn(send_raw(socket_path.clone(), br#"{"command":"pause"}"#));

            let stream = server.accept().await.unwrap();
            let err = handler.serve_connection(stream).await.unwrap_err();
            assert!(format!("{:#}", err).contains("deserialize"));

            let response = client.await.unwrap().expect("error response");
            assert_eq!(response.status, "error");
            assert!(!response.is_success());
            assert!(response.message.contains("Failed to deserialize IPC request"));
            assert!(response.data.is_none());
            assert_eq!(engine.lock().await.phase(), TimerPhase::Idle);
        }

        #[tokio::test]
        async fn test_serve_connection_answers_malformed_json_with_error() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path).unwrap();
            let (handler, _engine, _rx) = create_handler();

            let client = tokio::spawn(send_raw(socket_path.clone(), b"not valid json"));

            let stream = server.accept().await.unwrap();
            assert!(handler.serve_connection(stream).await.is_err());

            let response = client.await.unwrap().expect("error response");
            assert_eq!(response.status, "error");
        }

        #[tokio::test]
        async fn test_all_commands_flow() {
            let (handler, _engine, _rx) = create_handler();

            let commands = vec![
                (r#"{"command":"start"}"#, "focus"),
                (r#"{"command":"skip"}"#, "short_break"),
                (r#"{"command":"skip"}"#, "focus"),
                (r#"{"command":"stop"}"#, "idle"),
                (r#"{"command":"status"}"#, "idle"),
            ];

            for (cmd_json, expected_state) in commands {
                let request: IpcRequest = serde_json::from_str(cmd_json).unwrap();
                let response = handler.handle(request).await;

                assert!(response.is_success());
                assert_eq!(
                    response.data.unwrap().state,
                    Some(expected_state.to_string()),
                    "Command: {}",
                    cmd_json
                );
            }
        }
    }

    // ------------------------------------------------------------------------
    // Error Handling Tests
    // ------------------------------------------------------------------------

    mod error_tests {
        use super::*;

        #[tokio::test]
        async fn test_connection_closed() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path).unwrap();

            let client_path = socket_path.clone();
            let _client = tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                let stream = UnixStream::connect(&client_path).await.unwrap();
                drop(stream);
            });

            let mut stream = server.accept().await.unwrap();
            let err = IpcServer::receive_request(&mut stream).await.unwrap_err();

            assert!(err.to_string().contains("closed"));
        }

        #[test]
        fn test_ipc_error_display() {
            assert_eq!(IpcError::Timeout.to_string(), "Operation timed out");
            assert_eq!(
                IpcError::ReadError("reset".into()).to_string(),
                "Failed to read request: reset"
            );
            assert!(IpcError::RequestTooLarge.to_string().contains("4096"));
        }

        #[test]
        fn test_default_socket_path() {
            if let Ok(path) = default_socket_path() {
                assert!(path.ends_with(".pomobar/pomobar.sock"));
            }
        }
    }
}
