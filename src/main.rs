use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod error;
mod hook;
mod input;
mod message;
mod telegram;

use telegram::HttpTransport;

/// Env var holding an EnvFilter directive, e.g. `telegram_notify_hook=debug`
const LOG_ENV: &str = "TELEGRAM_HOOK_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let stdin = io::read_to_string(io::stdin());
    // Only used for the error alert's project name and as a fallback search root
    let process_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    match hook::run(stdin, &process_dir, &HttpTransport::new()) {
        Ok(delivery) => {
            tracing::debug!(?delivery, "done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            if err.is_config() {
                #[allow(clippy::print_stderr)]
                {
                    eprintln!("telegram config error: {}", err);
                }
            } else {
                tracing::debug!(error = %err, "hook failed");
            }
            ExitCode::FAILURE
        }
    }
}
