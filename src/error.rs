use std::io;
use std::path::PathBuf;

/// Everything that can stop a hook run.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("Failed to read stdin: {0}")]
    StdinRead(#[source] io::Error),

    /// The payload was not a JSON object. Keeps the raw input so the alert can show it.
    #[error("JSON Decode Error: {source}\nInput: {input}")]
    JsonDecode {
        #[source]
        source: serde_json::Error,
        input: String,
    },

    #[error(".env file not found (searched from {}, up to {depth} levels)", start.display())]
    ConfigNotFound { start: PathBuf, depth: usize },

    #[error("failed to parse .env file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID not found in {}", path.display())]
    ConfigIncomplete { path: PathBuf },

    #[error("Failed to send telegram message: {0}")]
    Send(#[from] SendError),
}

impl HookError {
    /// Config failures are reported on stderr, never through Telegram.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            HookError::ConfigNotFound { .. }
                | HookError::ConfigParse { .. }
                | HookError::ConfigIncomplete { .. }
        )
    }
}

/// Failure of a single `sendMessage` call.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("telegram credentials not configured")]
    MissingCredentials,

    #[error("telegram API returned status {0}")]
    Status(u16),

    #[error("{0:#}")]
    Transport(anyhow::Error),
}
