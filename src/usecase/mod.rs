//! UseCase 層
//!
//! 1 接続のライフサイクルに対応するオーケストレーション。
//! レジストリや分類器の具体実装には依存せず、ドメイン層の trait にのみ
//! 依存します。

pub mod error;
pub mod join_chat;
pub mod leave_chat;
pub mod post_message;
pub mod presence;

pub use error::JoinError;
pub use join_chat::JoinChatUseCase;
pub use leave_chat::LeaveChatUseCase;
pub use post_message::{PostMessageUseCase, PostOutcome};
pub use presence::PresenceBroadcaster;
