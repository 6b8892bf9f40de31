//! Server state shared across connection handlers.

use std::sync::Arc;

use crate::usecase::{JoinChatUseCase, LeaveChatUseCase, PostMessageUseCase};

/// Shared application state
pub struct AppState {
    /// 参加のユースケース
    pub join_chat: Arc<JoinChatUseCase>,
    /// 退出のユースケース
    pub leave_chat: Arc<LeaveChatUseCase>,
    /// メッセージ投稿のユースケース
    pub post_message: Arc<PostMessageUseCase>,
}
