//! インメモリ接続レジストリ実装
//!
//! ## 責務
//!
//! - 接続中のクライアントと対応する送信チャンネルの管理
//! - クライアントへのメッセージ送信（send_private, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メンバーシップ管理と
//! メッセージ送信に使用します。メンバーシップを変更するのはこの実装のみ。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatUser, ConnectionId, ConnectionRegistry, ConnectionSender, RegistryError,
};

struct RegisteredConnection {
    user: ChatUser,
    sender: ConnectionSender,
}

/// In-memory [`ConnectionRegistry`] backed by a mutex-guarded map
pub struct InMemoryConnectionRegistry {
    connections: Mutex<HashMap<ConnectionId, RegisteredConnection>>,
}

impl InMemoryConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register(
        &self,
        user: ChatUser,
        sender: ConnectionSender,
    ) -> Result<(), RegistryError> {
        let mut connections = self.connections.lock().await;
        if connections.contains_key(&user.id) {
            return Err(RegistryError::DuplicateConnection(user.id));
        }
        tracing::debug!("Connection '{}' ('{}') registered", user.id, user.username);
        connections.insert(user.id, RegisteredConnection { user, sender });
        Ok(())
    }

    async fn unregister(&self, id: &ConnectionId) -> bool {
        let mut connections = self.connections.lock().await;
        let removed = connections.remove(id);
        match &removed {
            Some(connection) => {
                tracing::debug!(
                    "Connection '{}' ('{}') unregistered",
                    id,
                    connection.user.username
                );
            }
            None => {
                tracing::debug!("Connection '{}' already absent, unregister is a no-op", id);
            }
        }
        removed.is_some()
    }

    async fn list_active(&self) -> Vec<ChatUser> {
        let connections = self.connections.lock().await;
        let mut users: Vec<ChatUser> = connections
            .values()
            .map(|connection| connection.user.clone())
            .collect();
        // Sort by username for consistent ordering; connection id breaks ties
        users.sort_by(|a, b| {
            a.username
                .cmp(&b.username)
                .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
        });
        users
    }

    async fn broadcast(&self, payload: &str, exclude: Option<&ConnectionId>) {
        let connections = self.connections.lock().await;
        for (id, connection) in connections.iter() {
            if Some(id) == exclude {
                continue;
            }
            // A closed receiver means the connection is tearing down; skip it
            if connection.sender.send(payload.to_string()).is_err() {
                tracing::warn!("Dropped broadcast to closed connection '{}'", id);
            }
        }
    }

    async fn send_private(&self, id: &ConnectionId, payload: &str) -> Result<(), RegistryError> {
        let connections = self.connections.lock().await;
        let connection = connections
            .get(id)
            .ok_or(RegistryError::ConnectionNotFound(*id))?;
        connection
            .sender
            .send(payload.to_string())
            .map_err(|_| RegistryError::ConnectionNotFound(*id))?;
        tracing::debug!("Pushed private message to connection '{}'", id);
        Ok(())
    }

    async fn close_all(&self) {
        let mut connections = self.connections.lock().await;
        let count = connections.len();
        // Dropping the senders closes each connection's outbound channel
        connections.clear();
        tracing::info!("Closed all {} connections", count);
    }
}
