//! WebSocket のワイヤ形式
//!
//! すべてのフレームは `type` フィールドでタグ付けされた JSON テキスト。
//! クライアントは接続後、最初に `join` を送らなければなりません。

use serde::{Deserialize, Serialize};

/// Client → Server frames
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEnvelope {
    /// Join handshake; must be the first frame on a connection
    Join {
        username: String,
        /// Supplied by the authorizing front-end; the core trusts it
        #[serde(default)]
        moderator: bool,
    },
    /// A chat message submitted by the joined participant
    Message { message: OutgoingMessage },
}

/// Body of an outbound chat frame
///
/// 送信者の身元は join 時に確定しているため、本文のみを受け取る。
/// 未知のフィールド（旧クライアントが送る `username` など）は無視される。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub content: String,
}

/// Server → Client frames
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEnvelope {
    /// Replay of recent public messages, oldest first (new joiners only)
    History { messages: Vec<ChatMessageDto> },
    /// Current roster of connected participants
    Users { users: Vec<ChatUserDto> },
    /// A public chat message
    Message { message: ChatMessageDto },
    /// A message visible only to this connection (SafetyBot warnings)
    PrivateMessage { message: ChatMessageDto },
}

impl ServerEnvelope {
    /// Serialize to a JSON text frame
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("server envelope serializes to JSON")
    }
}

/// Wire form of a chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageDto {
    pub id: String,
    pub username: String,
    pub content: String,
    /// Unix timestamp, UTC milliseconds
    pub timestamp: i64,
    pub is_moderator: bool,
}

/// Wire form of one roster entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatUserDto {
    pub id: String,
    pub username: String,
    pub is_moderator: bool,
}
