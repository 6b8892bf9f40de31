//! 値オブジェクト
//!
//! 不正な値を型レベルで排除するための newtype 群。
//! コンストラクタでバリデーションを行い、以降は常に正しい値であることを保証します。

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Maximum length of a display name (characters)
pub const MAX_USERNAME_LEN: usize = 32;

/// Maximum length of a chat message (characters)
pub const MAX_CONTENT_LEN: usize = 2000;

/// Validation errors for value object construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("username must not be empty")]
    EmptyUsername,

    #[error("username exceeds {MAX_USERNAME_LEN} characters (got {0})")]
    UsernameTooLong(usize),

    #[error("message content must not be empty")]
    EmptyContent,

    #[error("message content exceeds {MAX_CONTENT_LEN} characters (got {0})")]
    ContentTooLong(usize),
}

/// Display name of a fan (or of the moderation bot)
///
/// 接続時に割り当てられ、接続が生きている間は不変。
/// 一意性はベストエフォート（接続 ID が常に一意なため衝突は許容される）。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Username(String);

impl Username {
    /// Sender identity used for synthetic moderation warnings
    pub const SAFETY_BOT: &'static str = "SafetyBot";

    pub fn new(value: String) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyUsername);
        }
        let len = trimmed.chars().count();
        if len > MAX_USERNAME_LEN {
            return Err(ValidationError::UsernameTooLong(len));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The well-known moderation bot identity
    pub fn safety_bot() -> Self {
        Self(Self::SAFETY_BOT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Text body of a chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        let len = value.chars().count();
        if len > MAX_CONTENT_LEN {
            return Err(ValidationError::ContentTooLong(len));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Unix timestamp in UTC milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Opaque handle identifying one live connection
///
/// サーバー側で生成されるため、表示名と異なり常に一意。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_valid() {
        // テスト項目: 有効な表示名が作成できる
        // given (前提条件):
        let value = "Fan_1".to_string();

        // when (操作):
        let result = Username::new(value);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "Fan_1");
    }

    #[test]
    fn test_username_trims_whitespace() {
        // テスト項目: 表示名の前後の空白が除去される
        // given (前提条件):
        let value = "  Fan_1  ".to_string();

        // when (操作):
        let result = Username::new(value);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "Fan_1");
    }

    #[test]
    fn test_username_empty_is_rejected() {
        // テスト項目: 空の表示名はエラーになる
        // given (前提条件):
        let value = "   ".to_string();

        // when (操作):
        let result = Username::new(value);

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValidationError::EmptyUsername);
    }

    #[test]
    fn test_username_too_long_is_rejected() {
        // テスト項目: 長すぎる表示名はエラーになる
        // given (前提条件):
        let value = "x".repeat(MAX_USERNAME_LEN + 1);

        // when (操作):
        let result = Username::new(value);

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValidationError::UsernameTooLong(MAX_USERNAME_LEN + 1)
        );
    }

    #[test]
    fn test_safety_bot_identity() {
        // テスト項目: SafetyBot の表示名が固定値で作成できる
        // given (前提条件):

        // when (操作):
        let bot = Username::safety_bot();

        // then (期待する結果):
        assert_eq!(bot.as_str(), "SafetyBot");
    }

    #[test]
    fn test_message_content_valid() {
        // テスト項目: 有効なメッセージ本文が作成できる
        // given (前提条件):
        let value = "hello".to_string();

        // when (操作):
        let result = MessageContent::new(value);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "hello");
    }

    #[test]
    fn test_message_content_empty_is_rejected() {
        // テスト項目: 空のメッセージ本文はエラーになる
        // given (前提条件):
        let value = "".to_string();

        // when (操作):
        let result = MessageContent::new(value);

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValidationError::EmptyContent);
    }

    #[test]
    fn test_message_content_too_long_is_rejected() {
        // テスト項目: 長すぎるメッセージ本文はエラーになる
        // given (前提条件):
        let value = "y".repeat(MAX_CONTENT_LEN + 1);

        // when (操作):
        let result = MessageContent::new(value);

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValidationError::ContentTooLong(MAX_CONTENT_LEN + 1)
        );
    }

    #[test]
    fn test_connection_ids_are_unique() {
        // テスト項目: 生成される接続 ID は一意である
        // given (前提条件):

        // when (操作):
        let a = ConnectionId::generate();
        let b = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(a, b);
    }
}
