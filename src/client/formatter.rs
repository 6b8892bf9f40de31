//! Terminal formatting for incoming chat frames.

use chrono::{TimeZone, Utc};

use crate::infrastructure::dto::websocket::{ChatMessageDto, ChatUserDto};

/// Formats server frames for terminal display
pub struct MessageFormatter;

impl MessageFormatter {
    /// `[HH:MM:SS] username: content`, with a `[MOD]` badge for moderators
    pub fn format_message(message: &ChatMessageDto) -> String {
        let badge = if message.is_moderator { " [MOD]" } else { "" };
        format!(
            "[{}] {}{}: {}",
            format_clock(message.timestamp),
            message.username,
            badge,
            message.content
        )
    }

    /// Private frames are marked so they are not mistaken for room traffic
    pub fn format_private(message: &ChatMessageDto) -> String {
        format!(
            "[{}] (only you can see this) {}: {}",
            format_clock(message.timestamp),
            message.username,
            message.content
        )
    }

    /// One-line roster summary
    pub fn format_roster(users: &[ChatUserDto]) -> String {
        let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
        format!("* online ({}): {}", users.len(), names.join(", "))
    }

    /// Replayed history block, oldest first
    pub fn format_history(messages: &[ChatMessageDto]) -> String {
        if messages.is_empty() {
            return "* no recent messages".to_string();
        }
        let mut lines = vec![format!("* last {} message(s):", messages.len())];
        for message in messages {
            lines.push(format!("  {}", Self::format_message(message)));
        }
        lines.join("\n")
    }
}

fn format_clock(timestamp_millis: i64) -> String {
    let seconds = timestamp_millis.div_euclid(1000);
    match Utc.timestamp_opt(seconds, 0) {
        chrono::LocalResult::Single(dt) => dt.format("%H:%M:%S").to_string(),
        _ => "--:--:--".to_string(),
    }
}
