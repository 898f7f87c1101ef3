//! citadel-test - Run the test suite of one or all citadel packages

mod cli;
mod exit_codes;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use citadel_tasks::SelectionTable;
use cli::{output, Cli};

fn main() {
    let guard = init_tracing();
    let code = run();

    // process::exit skips destructors, flush the file log first
    drop(guard);
    std::process::exit(code);
}

fn run() -> i32 {
    let table = SelectionTable::citadel();

    let cli = match Cli::try_parse_for(&table, std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            return exit_codes::USAGE_ERROR;
        }
        Err(e) => {
            // --help / --version
            let _ = e.print();
            return exit_codes::SUCCESS;
        }
    };

    match cli.execute(&table) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            tracing::debug!("Dispatch failed: {:?}", e);
            output::error(&format!("{:#}", e));
            exit_codes::ERROR
        }
    }
}

/// Set up tracing with two layers:
/// - Console: controlled by RUST_LOG (default: warn)
/// - File: always debug-level JSON to ~/.citadel/logs/
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if let Some(log_dir) = log_directory() {
        let file_appender = tracing_appender::rolling::daily(&log_dir, "citadel-test.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_filter(console_filter),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_target(true)
                    .with_filter(EnvFilter::new("debug")),
            )
            .init();

        return Some(guard);
    }

    // Fallback: console only
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(console_filter),
        )
        .init();

    None
}

/// Returns the log directory path, creating it if needed.
fn log_directory() -> Option<std::path::PathBuf> {
    let log_dir = dirs::home_dir()?.join(".citadel").join("logs");
    std::fs::create_dir_all(&log_dir).ok()?;
    Some(log_dir)
}
