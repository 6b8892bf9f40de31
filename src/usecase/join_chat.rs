//! UseCase: 参加処理
//!
//! join handshake 成立後の副作用を所定の順序で実行します：
//! (1) レジストリへの追加 → (2) ロースター配信 → (3) 新規接続のみへの
//! 履歴リプレイ。この順序により、参加直後のクライアントが「自分を含む」
//! ロースターを履歴より先に受け取ることが保証されます。

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{
    ChatUser, ConnectionId, ConnectionRegistry, ConnectionSender, HistoryBuffer, Username,
};
use crate::infrastructure::dto::websocket::{ChatMessageDto, ServerEnvelope};

use super::error::JoinError;
use super::presence::PresenceBroadcaster;

/// 参加のユースケース
pub struct JoinChatUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    history: Arc<Mutex<HistoryBuffer>>,
    presence: Arc<PresenceBroadcaster>,
    /// Maximum number of messages replayed to a new connection
    replay_limit: usize,
}

impl JoinChatUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        history: Arc<Mutex<HistoryBuffer>>,
        presence: Arc<PresenceBroadcaster>,
        replay_limit: usize,
    ) -> Self {
        Self {
            registry,
            history,
            presence,
            replay_limit,
        }
    }

    /// 参加を実行
    ///
    /// 表示名は呼び出し側（認可済みのフロント）から受け取った値を信頼する。
    /// 接続 ID はサーバー側で生成されるため常に一意。
    ///
    /// # Returns
    ///
    /// * `Ok(ChatUser)` - 登録された参加者（ロースター配信済み）
    /// * `Err(JoinError)` - 登録失敗
    pub async fn execute(
        &self,
        username: Username,
        is_moderator: bool,
        sender: ConnectionSender,
    ) -> Result<ChatUser, JoinError> {
        let user = ChatUser::new(ConnectionId::generate(), username, is_moderator);

        // 1. レジストリに追加
        self.registry.register(user.clone(), sender).await?;
        tracing::info!("'{}' joined as connection '{}'", user.username, user.id);

        // 2. 自分自身を含むロースターを全員に配信
        self.presence.publish_roster().await;

        Ok(user)
    }

    /// 新規接続のみに直近の履歴をリプレイ
    ///
    /// 対象が既に切断していた場合は警告ログのみで破棄する。
    pub async fn replay_history(&self, target: &ConnectionId) {
        let messages: Vec<ChatMessageDto> = {
            let history = self.history.lock().await;
            history
                .recent(self.replay_limit)
                .into_iter()
                .map(Into::into)
                .collect()
        };
        let envelope = ServerEnvelope::History { messages };
        if let Err(e) = self.registry.send_private(target, &envelope.to_json()).await {
            tracing::warn!("Could not replay history to '{}': {}", target, e);
        }
    }
}
