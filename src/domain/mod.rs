//! ドメイン層
//!
//! ファンチャットの中核となるエンティティ・値オブジェクト・状態機械と、
//! Infrastructure 層が実装するインターフェース（trait）を定義します。
//! この層は axum や WebSocket などの技術詳細に依存しません。

pub mod entity;
pub mod history;
pub mod moderation;
pub mod registry;
pub mod session;
pub mod value_object;

pub use entity::{ChatMessage, ChatUser, Visibility};
pub use history::HistoryBuffer;
pub use moderation::{ClassifierError, MessageClassifier, Verdict};
pub use registry::{ConnectionRegistry, ConnectionSender, RegistryError};
pub use session::{ChatSession, FrameVerdict, SessionError, SessionState};
pub use value_object::{ConnectionId, MessageContent, MessageId, Timestamp, Username};
