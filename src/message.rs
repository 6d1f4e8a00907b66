//! Message templates for Telegram's HTML parse mode.

use crate::input::HookInput;
use chrono::{DateTime, TimeZone};
use html_escape::encode_text;
use std::fmt::Write;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Builds the notification for a hook event.
pub fn format_event<Tz>(input: &HookInput, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut text = String::new();
    let _ = writeln!(text, "🤖 <b>Project: {}</b>", encode_text(&input.project_name()));
    let _ = writeln!(text, "⏰ {}", now.format(TIMESTAMP_FORMAT));
    let _ = writeln!(text, "✅ Event: <code>{}</code>", encode_text(input.event_name()));
    if input.needs_permission() {
        let _ = writeln!(text, "📌 <b>Need Permission:</b> <code>true</code>");
    }
    text
}

/// Builds the alert sent when the hook itself failed.
pub fn format_error_alert<Tz>(project: &str, error: &str, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut text = String::from("🚨 <b>Hook Error Alert</b>\n");
    let _ = writeln!(text, "📁 <b>Project:</b> <code>{}</code>", encode_text(project));
    let _ = writeln!(text, "⏰ {}", now.format(TIMESTAMP_FORMAT));
    let _ = write!(text, "❌ <b>Error Details:</b>\n<pre>{}</pre>", encode_text(error));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Local};

    fn fixed_now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2026-03-14T09:26:53+09:00").unwrap()
    }

    fn input(cwd: Option<&str>, event: Option<&str>, message: Option<&str>) -> HookInput {
        HookInput {
            cwd: cwd.map(String::from),
            hook_event_name: event.map(String::from),
            message: message.map(String::from),
        }
    }

    #[test]
    fn test_format_event() {
        let text = format_event(
            &input(Some("/work/myproj"), Some("Stop"), Some("done")),
            &fixed_now(),
        );

        assert_eq!(
            text,
            "🤖 <b>Project: myproj</b>\n\
             ⏰ 2026-03-14 09:26:53\n\
             ✅ Event: <code>Stop</code>\n"
        );
        assert!(!text.contains("Need Permission"));
    }

    #[test]
    fn test_format_event_needs_permission() {
        let text = format_event(
            &input(
                None,
                Some("Notification"),
                Some("Claude needs your permission to run rm"),
            ),
            &fixed_now(),
        );

        assert!(text.contains("🤖 <b>Project: Unknown</b>\n"));
        assert!(text.ends_with("📌 <b>Need Permission:</b> <code>true</code>\n"));
    }

    #[test]
    fn test_format_event_is_deterministic() {
        let payload = input(Some("/a/b"), Some("Stop"), None);
        assert_eq!(
            format_event(&payload, &fixed_now()),
            format_event(&payload, &fixed_now())
        );
    }

    #[test]
    fn test_format_event_uses_given_clock() {
        let now = Local::now();
        let text = format_event(&HookInput::default(), &now);
        assert!(text.contains(&now.format(TIMESTAMP_FORMAT).to_string()));
    }

    #[test]
    fn test_format_event_escapes_html() {
        let text = format_event(&input(Some("/w/a<b>&c"), Some("<x>"), None), &fixed_now());

        assert!(text.contains("Project: a&lt;b&gt;&amp;c</b>"));
        assert!(text.contains("<code>&lt;x&gt;</code>"));
    }

    #[test]
    fn test_format_error_alert() {
        let text = format_error_alert(
            "myproj",
            "JSON Decode Error: EOF\nInput: {\"bad json\"",
            &fixed_now(),
        );

        assert_eq!(
            text,
            "🚨 <b>Hook Error Alert</b>\n\
             📁 <b>Project:</b> <code>myproj</code>\n\
             ⏰ 2026-03-14 09:26:53\n\
             ❌ <b>Error Details:</b>\n\
             <pre>JSON Decode Error: EOF\nInput: {\"bad json\"</pre>"
        );
    }
}
