//! pomobar - a menu-bar Pomodoro timer
//!
//! This tool helps you stay focused using the Pomodoro Technique:
//! - 25 minutes of focused work
//! - 5 minutes of short break
//! - 15 minutes of long break after every 4 sessions
//! - the next session starts when you come back to the keyboard

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use pomobar::cli::{Cli, Commands, DaemonArgs, Display, IpcClient};
use pomobar::daemon::{default_socket_path, Daemon};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Start => {
            let response = client(cli.socket)?.start().await?;
            Display::show_command_result(&response);
        }
        Commands::Skip => {
            let response = client(cli.socket)?.skip().await?;
            Display::show_command_result(&response);
        }
        Commands::Stop => {
            let response = client(cli.socket)?.stop().await?;
            Display::show_command_result(&response);
        }
        Commands::Status => {
            let response = client(cli.socket)?.status().await?;
            Display::show_status(&response);
        }
        Commands::Activity => {
            let response = client(cli.socket)?.activity().await?;
            Display::show_command_result(&response);
        }
        Commands::Quit => {
            let response = client(cli.socket)?.quit().await?;
            Display::show_quit(&response);
        }
        Commands::Daemon(args) => {
            run_daemon(&args, cli.socket).await?;
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
        }
    }

    Ok(())
}

fn client(socket: Option<PathBuf>) -> Result<IpcClient> {
    match socket {
        Some(path) => Ok(IpcClient::with_socket_path(path)),
        None => IpcClient::new(),
    }
}

/// Runs the daemon in the foreground until `pomobar quit` or Ctrl-C.
async fn run_daemon(args: &DaemonArgs, socket: Option<PathBuf>) -> Result<()> {
    let socket = match socket {
        Some(path) => path,
        None => default_socket_path()?,
    };
    let config = args.to_config();

    Display::show_daemon_started(&config, &socket);
    Daemon::new(config, socket).run().await
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
