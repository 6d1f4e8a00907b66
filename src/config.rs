use crate::error::HookError;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const ENV_FILENAME: &str = ".env";
/// How many parent directories above the start directory are searched.
pub const MAX_SEARCH_DEPTH: usize = 2;

pub const BOT_TOKEN_KEY: &str = "TELEGRAM_BOT_TOKEN";
pub const CHAT_ID_KEY: &str = "TELEGRAM_CHAT_ID";
/// Optional override, e.g. for a self-hosted Bot API server
pub const API_URL_KEY: &str = "TELEGRAM_API_URL";
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Credentials and endpoint for the Telegram Bot API
#[derive(Debug, Clone, PartialEq)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    /// Base URL without trailing slash
    pub api_base: String,
    /// The .env file these values came from
    pub source: PathBuf,
}

impl TelegramConfig {
    /// Finds the nearest .env from `start` and reads the Telegram settings from it.
    pub fn load(start: &Path) -> Result<Self, HookError> {
        let path = find_env_file(start, MAX_SEARCH_DEPTH).ok_or_else(|| {
            HookError::ConfigNotFound {
                start: start.to_path_buf(),
                depth: MAX_SEARCH_DEPTH,
            }
        })?;
        debug!(path = %path.display(), "found .env file");

        let env = load_env_file(&path)?;
        Self::from_env_map(&env, &path)
    }

    /// Both credentials must be present and non-empty.
    pub fn from_env_map(env: &HashMap<String, String>, path: &Path) -> Result<Self, HookError> {
        let value = |key: &str| env.get(key).filter(|v| !v.is_empty()).cloned();

        match (value(BOT_TOKEN_KEY), value(CHAT_ID_KEY)) {
            (Some(bot_token), Some(chat_id)) => Ok(TelegramConfig {
                bot_token,
                chat_id,
                api_base: value(API_URL_KEY)
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
                source: path.to_path_buf(),
            }),
            _ => Err(HookError::ConfigIncomplete {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Looks for a .env file in `start_dir` and up to `max_depth` parent directories.
/// Stops early at the filesystem root.
pub fn find_env_file(start_dir: &Path, max_depth: usize) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    for _ in 0..=max_depth {
        let env_path = current.join(ENV_FILENAME);
        if env_path.is_file() {
            return Some(env_path);
        }

        // pop() is false at the root
        if !current.pop() {
            return None;
        }
    }

    None
}

pub fn load_env_file(path: &Path) -> Result<HashMap<String, String>, HookError> {
    let content = fs::read_to_string(path).map_err(|source| HookError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_env(&content))
}

/// Parses KEY=VALUE lines. Blank lines, `#` comments and lines without `=` are
/// skipped; a repeated key keeps its last value.
pub fn parse_env(content: &str) -> HashMap<String, String> {
    let mut env = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        env.insert(key.trim().to_string(), value.trim().to_string());
    }

    env
}
