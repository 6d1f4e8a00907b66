use crate::config::TelegramConfig;
use crate::error::HookError;
use crate::input::HookInput;
use crate::message::format_event;
use crate::telegram::{alert_from_dir, Notifier, Transport};
use chrono::Local;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What a successful run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Empty stdin, nothing to report
    Skipped,
    Sent,
}

/// Runs the hook once: parse the payload, load credentials, notify.
///
/// On failure an error alert has already been attempted where one is possible;
/// config errors are returned untouched for the caller to print.
pub fn run<T: Transport>(
    stdin: io::Result<String>,
    process_dir: &Path,
    transport: &T,
) -> Result<Delivery, HookError> {
    let raw = match stdin {
        Ok(raw) => raw,
        Err(source) => return Err(alert(process_dir, transport, HookError::StdinRead(source))),
    };

    if raw.trim().is_empty() {
        debug!("empty input, nothing to send");
        return Ok(Delivery::Skipped);
    }

    let input = match HookInput::parse(&raw) {
        Ok(input) => input,
        Err(err) => return Err(alert(process_dir, transport, err)),
    };

    let search_root = input
        .working_dir()
        .map(PathBuf::from)
        .unwrap_or_else(|| process_dir.to_path_buf());
    let config = TelegramConfig::load(&search_root)?;
    debug!(env = %config.source.display(), "loaded telegram config");

    let notifier = Notifier::new(&config, transport);
    let text = format_event(&input, &Local::now());
    if let Err(source) = notifier.send_message(&text) {
        let err = HookError::Send(source);
        notifier.send_error_notification(process_dir, &err.to_string());
        return Err(err);
    }

    info!(
        event = input.event_name(),
        project = %input.project_name(),
        "notification sent"
    );
    Ok(Delivery::Sent)
}

/// Error path taken before credentials are known: look them up from the process directory.
fn alert<T: Transport>(process_dir: &Path, transport: &T, err: HookError) -> HookError {
    alert_from_dir(process_dir, transport, &err.to_string());
    err
}
