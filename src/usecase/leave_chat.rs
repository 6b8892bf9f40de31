//! UseCase: 退出処理
//!
//! 切断は複数の teardown 経路（read エラー、明示的 close、サーバー主導の
//! 切断）から競合して呼ばれ得るため、冪等に実装します。ロースター配信は
//! 実際に削除が成立した場合のみ行われます。

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry};

use super::presence::PresenceBroadcaster;

/// 退出のユースケース
pub struct LeaveChatUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    presence: Arc<PresenceBroadcaster>,
}

impl LeaveChatUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>, presence: Arc<PresenceBroadcaster>) -> Self {
        Self { registry, presence }
    }

    /// 退出を実行
    ///
    /// # Returns
    ///
    /// 接続が実際に削除されたかどうか。既に削除済みの場合は `false` で、
    /// ロースターの再配信も行われない（重複した副作用を防ぐ）。
    pub async fn execute(&self, id: &ConnectionId) -> bool {
        let removed = self.registry.unregister(id).await;
        if removed {
            tracing::info!("Connection '{}' left the chat", id);
            self.presence.publish_roster().await;
        }
        removed
    }
}
