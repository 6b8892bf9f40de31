//! 接続レジストリのインターフェース
//!
//! 「いま誰が接続しているか」の唯一の情報源。メンバーシップの変更は
//! この trait の実装だけが行います。具体的な実装（インメモリ）は
//! Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::entity::ChatUser;
use super::value_object::ConnectionId;

/// Per-connection outbound channel
///
/// 送信は決してブロックしない。受信側が閉じている場合の send 失敗は
/// 黙って破棄される（他の接続へのブロードキャストを妨げない）。
pub type ConnectionSender = mpsc::UnboundedSender<String>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The same connection handle was registered twice
    #[error("connection '{0}' is already registered")]
    DuplicateConnection(ConnectionId),

    /// Target of a private send has already disconnected
    #[error("connection '{0}' not found")]
    ConnectionNotFound(ConnectionId),
}

/// Single source of truth for live connections, and the delivery fan-out
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Add a connection with its outbound channel
    ///
    /// Fails with [`RegistryError::DuplicateConnection`] if the handle is
    /// already registered.
    async fn register(
        &self,
        user: ChatUser,
        sender: ConnectionSender,
    ) -> Result<(), RegistryError>;

    /// Remove a connection; returns whether it was present
    ///
    /// 既に存在しない接続の削除はエラーではなく no-op（切断処理は
    /// 複数の teardown 経路と競合し得るため）。
    async fn unregister(&self, id: &ConnectionId) -> bool;

    /// Snapshot of all active connections, sorted by username
    ///
    /// Copy-on-read: safe to iterate while mutations happen concurrently.
    async fn list_active(&self) -> Vec<ChatUser>;

    /// Deliver `payload` to every active connection except `exclude`
    ///
    /// Delivery to a connection that has since closed is silently dropped.
    async fn broadcast(&self, payload: &str, exclude: Option<&ConnectionId>);

    /// Deliver `payload` to exactly one connection
    async fn send_private(&self, id: &ConnectionId, payload: &str) -> Result<(), RegistryError>;

    /// Drop every connection (server shutdown)
    async fn close_all(&self);
}
