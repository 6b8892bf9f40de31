//! UseCase: メッセージ投稿処理
//!
//! モデレーション層の可視性隔離を所有するのはこのユースケースです：
//! Reject されたメッセージは履歴にもブロードキャストにも一切現れず、
//! 送信者だけが SafetyBot からのプライベート警告をちょうど 1 件受け取り
//! ます。分類器自体の失敗は fail-closed（Reject と同等）に扱います。

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::common::time::Clock;
use crate::domain::{
    ChatMessage, ChatUser, ConnectionRegistry, HistoryBuffer, MessageClassifier, MessageContent,
    Timestamp, Verdict,
};
use crate::infrastructure::dto::websocket::ServerEnvelope;

/// Warning shown when the classifier itself is unavailable
const CLASSIFIER_DOWN_REASON: &str = "we couldn't check it right now, please try again";

/// What happened to a submitted message
#[derive(Debug)]
pub enum PostOutcome {
    /// Accepted: appended to history and broadcast to the room
    Broadcast(ChatMessage),
    /// Rejected (or classifier down): private warning sent to the sender
    Warned { reason: String },
}

/// メッセージ投稿のユースケース
pub struct PostMessageUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    history: Arc<Mutex<HistoryBuffer>>,
    classifier: Arc<dyn MessageClassifier>,
    clock: Arc<dyn Clock>,
}

impl PostMessageUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        history: Arc<Mutex<HistoryBuffer>>,
        classifier: Arc<dyn MessageClassifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            history,
            classifier,
            clock,
        }
    }

    /// 投稿を実行
    ///
    /// 公開ブロードキャストは送信者を除外する（クライアントは自分の
    /// メッセージを楽観的に表示するため）。
    pub async fn execute(&self, sender: &ChatUser, content: MessageContent) -> PostOutcome {
        let verdict = match self.classifier.classify(content.as_str()).await {
            Ok(verdict) => verdict,
            Err(e) => {
                // fail-closed: 分類器の失敗は Reject と同等に扱う
                tracing::warn!("Moderation classifier failed, rejecting message: {}", e);
                Verdict::Reject(CLASSIFIER_DOWN_REASON.to_string())
            }
        };
        let timestamp = Timestamp::new(self.clock.now_utc_millis());

        match verdict {
            Verdict::Accept => {
                let message = ChatMessage::public(sender, content, timestamp);
                let envelope = ServerEnvelope::Message {
                    message: message.clone().into(),
                };
                // append と配信は同一ロック区間（履歴順 ＝ 配信順）
                {
                    let mut history = self.history.lock().await;
                    history.append(message.clone());
                    self.registry
                        .broadcast(&envelope.to_json(), Some(&sender.id))
                        .await;
                }
                PostOutcome::Broadcast(message)
            }
            Verdict::Reject(reason) => {
                tracing::info!(
                    "Message from '{}' rejected by moderation: {}",
                    sender.username,
                    reason
                );
                let warning = ChatMessage::safety_warning(&reason, sender.id, timestamp);
                let envelope = ServerEnvelope::PrivateMessage {
                    message: warning.into(),
                };
                // 送信者が既に切断していた場合はログのみで破棄する
                if let Err(e) = self
                    .registry
                    .send_private(&sender.id, &envelope.to_json())
                    .await
                {
                    tracing::warn!("Could not deliver moderation warning: {}", e);
                }
                PostOutcome::Warned { reason }
            }
        }
    }
}
