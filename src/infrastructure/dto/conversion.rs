//! Conversion logic between domain entities and wire DTOs.

use crate::domain::{ChatMessage, ChatUser};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<ChatMessage> for dto::ChatMessageDto {
    fn from(model: ChatMessage) -> Self {
        Self {
            id: model.id.to_string(),
            username: model.username.into_string(),
            content: model.content.into_string(),
            timestamp: model.timestamp.value(),
            is_moderator: model.is_moderator,
        }
    }
}

impl From<ChatUser> for dto::ChatUserDto {
    fn from(model: ChatUser) -> Self {
        Self {
            id: model.id.to_string(),
            username: model.username.into_string(),
            is_moderator: model.is_moderator,
        }
    }
}
