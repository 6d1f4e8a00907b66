use crate::error::HookError;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::path::Path;

pub const UNKNOWN: &str = "Unknown";
pub const PERMISSION_PREFIX: &str = "Claude needs your permission";

/// Input JSON from Claude Code hook system.
///
/// Only the keys below are read; anything else in the payload is ignored.
/// A key holding a non-string value counts as absent.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct HookInput {
    #[serde(default, deserialize_with = "string_or_none")]
    pub cwd: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub hook_event_name: Option<String>,
    /// Free text, present on Notification events
    #[serde(default, deserialize_with = "string_or_none")]
    pub message: Option<String>,
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

impl HookInput {
    /// Parse a hook payload. `null` is an empty payload; any other
    /// non-object JSON value is rejected.
    pub fn parse(raw: &str) -> Result<Self, HookError> {
        let decode_error = |source| HookError::JsonDecode {
            source,
            input: raw.to_string(),
        };
        let object: Option<Map<String, Value>> =
            serde_json::from_str(raw).map_err(decode_error)?;
        match object {
            Some(object) => serde_json::from_value(Value::Object(object)).map_err(decode_error),
            None => Ok(HookInput::default()),
        }
    }

    /// Directory the event came from, if the payload names one.
    pub fn working_dir(&self) -> Option<&str> {
        self.cwd.as_deref().filter(|cwd| !cwd.is_empty())
    }

    pub fn project_name(&self) -> String {
        match self.working_dir() {
            Some(cwd) if cwd != UNKNOWN => project_name_of(Path::new(cwd)),
            _ => UNKNOWN.to_string(),
        }
    }

    pub fn event_name(&self) -> &str {
        self.hook_event_name.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn needs_permission(&self) -> bool {
        self.message().starts_with(PERMISSION_PREFIX)
    }
}

/// Last path component as written: `/a/b` gives `b`, `/a/..` gives `..`,
/// `/` gives `/`. An empty path gives `.`.
pub fn project_name_of(path: &Path) -> String {
    path.components()
        .next_back()
        .map(|last| last.as_os_str().to_string_lossy().into_owned())
        .unwrap_or_else(|| ".".to_string())
}
