//! プレゼンス（在室者一覧）のブロードキャスト
//!
//! レジストリのメンバーシップが変わるたびに、全接続へ最新のロースターを
//! 配信します。ロースターは保存されず、毎回レジストリから再計算されます。

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::ConnectionRegistry;
use crate::infrastructure::dto::websocket::{ChatUserDto, ServerEnvelope};

/// Pushes the current connected-user list to every active connection
pub struct PresenceBroadcaster {
    registry: Arc<dyn ConnectionRegistry>,
    /// スナップショット取得と配信をひとつの publish 単位として直列化する
    publish_lock: Mutex<()>,
}

impl PresenceBroadcaster {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self {
            registry,
            publish_lock: Mutex::new(()),
        }
    }

    /// Recompute the roster snapshot and broadcast it to all connections
    ///
    /// register/unregister の成立ごとに必ず 1 回だけ呼ばれる。
    /// 参加直後のクライアント自身もロースターに含まれる（self-visibility）。
    /// スナップショットと配信の間に別の publish が割り込むと古いロースターが
    /// 新しいものの後に届くため、publish 全体をロックで直列化する。
    pub async fn publish_roster(&self) {
        let _publish = self.publish_lock.lock().await;
        let users: Vec<ChatUserDto> = self
            .registry
            .list_active()
            .await
            .into_iter()
            .map(Into::into)
            .collect();
        let count = users.len();
        let envelope = ServerEnvelope::Users { users };
        self.registry.broadcast(&envelope.to_json(), None).await;
        tracing::debug!("Published roster with {} participants", count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChatUser, ConnectionId, Username};
    use crate::infrastructure::InMemoryConnectionRegistry;
    use tokio::sync::mpsc;

    fn test_user(name: &str) -> ChatUser {
        ChatUser::new(
            ConnectionId::generate(),
            Username::new(name.to_string()).unwrap(),
            false,
        )
    }

    #[tokio::test]
    async fn test_publish_roster_reaches_every_connection() {
        // テスト項目: ロースターが参加者全員（自分自身を含む）に配信される
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let broadcaster = PresenceBroadcaster::new(registry.clone());
        let alice = test_user("alice");
        let bob = test_user("bob");
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        registry.register(alice.clone(), tx1).await.unwrap();
        registry.register(bob.clone(), tx2).await.unwrap();

        // when (操作):
        broadcaster.publish_roster().await;

        // then (期待する結果): 両者が alice と bob を含むロースターを受信する
        for rx in [&mut rx1, &mut rx2] {
            let raw = rx.recv().await.unwrap();
            let envelope: ServerEnvelope = serde_json::from_str(&raw).unwrap();
            match envelope {
                ServerEnvelope::Users { users } => {
                    let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
                    assert_eq!(names, vec!["alice", "bob"]);
                }
                other => panic!("expected Users, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_concurrent_publishes_never_leave_a_stale_roster() {
        // テスト項目: 並行する参加＋配信の完了後、最後に届いたロースターが
        //            全参加者を含む（古いスナップショットが後から届かない）
        for _ in 0..200 {
            // given (前提条件): 観測者が先に接続している
            let registry = Arc::new(InMemoryConnectionRegistry::new());
            let broadcaster = Arc::new(PresenceBroadcaster::new(registry.clone()));
            let observer = test_user("observer");
            let (tx, mut rx) = mpsc::unbounded_channel();
            registry.register(observer.clone(), tx).await.unwrap();

            // when (操作): 2 つの参加＋配信が並行して走る
            let mut handles = Vec::new();
            for name in ["alice", "bob"] {
                let registry = registry.clone();
                let broadcaster = broadcaster.clone();
                let name = name.to_string();
                handles.push(tokio::spawn(async move {
                    let (member_tx, _member_rx) = mpsc::unbounded_channel();
                    registry
                        .register(test_user(&name), member_tx)
                        .await
                        .unwrap();
                    broadcaster.publish_roster().await;
                }));
            }
            for handle in handles {
                handle.await.unwrap();
            }

            // then (期待する結果): 観測者の最後のフレームが 3 人全員を含む
            let mut last = None;
            while let Ok(raw) = rx.try_recv() {
                last = Some(raw);
            }
            let envelope: ServerEnvelope = serde_json::from_str(&last.unwrap()).unwrap();
            match envelope {
                ServerEnvelope::Users { users } => assert_eq!(users.len(), 3),
                other => panic!("expected Users, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_publish_roster_with_no_connections() {
        // テスト項目: 接続が無い状態でもエラーにならない
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let broadcaster = PresenceBroadcaster::new(registry);

        // when (操作):
        broadcaster.publish_roster().await;

        // then (期待する結果): パニックしない
    }
}
