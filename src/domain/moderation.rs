//! モデレーション分類器のインターフェース
//!
//! 分類ロジック（キーワード照合・外部サービス呼び出しなど）は差し替え
//! 可能なポリシー。可視性の隔離（リジェクトされたメッセージを他の接続に
//! 一切見せない）は UseCase 層が所有し、この trait は内容の判定のみを
//! 担当します。

use async_trait::async_trait;
use thiserror::Error;

/// Classification result for one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Safe to append and broadcast
    Accept,
    /// Must not reach the room; reason is shown privately to the sender
    Reject(String),
}

/// Failure of the classifier itself (e.g. external service timeout)
///
/// 呼び出し側は fail-closed（Reject と同等に扱う）でなければならない。
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("moderation classifier unavailable: {0}")]
    Unavailable(String),
}

/// Content judgment over outgoing messages
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageClassifier: Send + Sync {
    /// Classify message text before broadcast
    async fn classify(&self, text: &str) -> Result<Verdict, ClassifierError>;
}
