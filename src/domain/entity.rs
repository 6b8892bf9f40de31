//! エンティティ
//!
//! チャットの参加者（`ChatUser`）とメッセージ（`ChatMessage`）。
//! `ChatMessage` は作成後に変更されない（イミュータブル）。

use super::value_object::{
    ConnectionId, MAX_CONTENT_LEN, MessageContent, MessageId, Timestamp, Username,
};

/// One live participant of the fan chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatUser {
    /// Opaque connection handle, unique for the connection's lifetime
    pub id: ConnectionId,
    /// Display name, stable for the connection's lifetime
    pub username: Username,
    /// Whether this participant moderates the room
    pub is_moderator: bool,
}

impl ChatUser {
    pub fn new(id: ConnectionId, username: Username, is_moderator: bool) -> Self {
        Self {
            id,
            username,
            is_moderator,
        }
    }
}

/// Who may observe a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Broadcast to the whole room and retained in history
    Public,
    /// Delivered to exactly one connection, invisible to all others
    PrivateTo(ConnectionId),
}

/// A unit of communication in the fan chat
///
/// 送信者の表示名は値として保持する（送信者が切断してもメッセージは残る）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub username: Username,
    pub content: MessageContent,
    pub timestamp: Timestamp,
    pub is_moderator: bool,
    pub visibility: Visibility,
}

impl ChatMessage {
    /// Create a public message submitted by a participant
    pub fn public(sender: &ChatUser, content: MessageContent, timestamp: Timestamp) -> Self {
        Self {
            id: MessageId::generate(),
            username: sender.username.clone(),
            content,
            timestamp,
            is_moderator: sender.is_moderator,
            visibility: Visibility::Public,
        }
    }

    /// Create a synthetic SafetyBot warning, visible only to `target`
    ///
    /// 警告はモデレーター発としてマークされ、履歴には残らない。
    /// 分類器由来の理由文は差し替え可能なポリシーなので長さを信頼せず、
    /// 本文が [`MAX_CONTENT_LEN`] に収まるよう切り詰める。
    pub fn safety_warning(reason: &str, target: ConnectionId, timestamp: Timestamp) -> Self {
        const WARNING_PREFIX: &str = "Your message was not shared with the room: ";
        let budget = MAX_CONTENT_LEN - WARNING_PREFIX.chars().count();
        let reason: String = reason.chars().take(budget).collect();
        let text = format!("{WARNING_PREFIX}{reason}");
        Self {
            id: MessageId::generate(),
            username: Username::safety_bot(),
            content: MessageContent::new(text)
                .expect("prefix plus truncated reason fits the content limit"),
            timestamp,
            is_moderator: true,
            visibility: Visibility::PrivateTo(target),
        }
    }

    /// Whether the message may be broadcast to the whole room
    pub fn is_public(&self) -> bool {
        matches!(self.visibility, Visibility::Public)
    }
}
