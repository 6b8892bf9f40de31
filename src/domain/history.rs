//! メッセージ履歴バッファ
//!
//! 新規参加者へのリプレイに使う、容量制限付きの時系列ログ。
//! 容量を超えた場合は先頭（最古）から削除される（FIFO）。

use std::collections::VecDeque;

use super::entity::ChatMessage;

/// Default number of messages retained for replay
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Bounded, append-mostly log of accepted public messages
///
/// Eviction is FIFO: once `capacity` is reached, appending drops the oldest
/// message. Retention is process-lifetime only; nothing is persisted.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    messages: VecDeque<ChatMessage>,
    capacity: usize,
}

impl HistoryBuffer {
    /// Create a buffer retaining at most `capacity` messages
    ///
    /// `capacity` of 0 is clamped to 1 so that `recent` stays well-defined.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a message to the tail, evicting the oldest when full
    pub fn append(&mut self, message: ChatMessage) {
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    /// Up to `limit` most recent messages, oldest first
    pub fn recent(&self, limit: usize) -> Vec<ChatMessage> {
        let skip = self.messages.len().saturating_sub(limit);
        self.messages.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
