//! ブロックリストによる分類器実装
//!
//! 設定されたブロック語の大文字小文字を区別しない部分一致で判定する、
//! もっとも単純な `MessageClassifier` 実装。語のリストは設定から注入され、
//! コードには一切ハードコードされません（空リストは全件 Accept）。

use std::path::Path;

use async_trait::async_trait;

use crate::domain::{ClassifierError, MessageClassifier, Verdict};

/// Reason attached to rejections from the blocklist
const BLOCKLIST_REASON: &str = "it contains language that isn't allowed in the fan chat";

/// Case-insensitive substring matcher over a configured term list
pub struct BlocklistClassifier {
    terms: Vec<String>,
}

impl BlocklistClassifier {
    /// Build from a list of terms; blank entries are dropped
    pub fn new(terms: Vec<String>) -> Self {
        let terms = terms
            .into_iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    /// Load terms from a file, one per line; `#` lines are comments
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let terms = raw
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .map(|line| line.to_string())
            .collect();
        Ok(Self::new(terms))
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }
}

#[async_trait]
impl MessageClassifier for BlocklistClassifier {
    async fn classify(&self, text: &str) -> Result<Verdict, ClassifierError> {
        let lowered = text.to_lowercase();
        if self.terms.iter().any(|term| lowered.contains(term)) {
            return Ok(Verdict::Reject(BLOCKLIST_REASON.to_string()));
        }
        Ok(Verdict::Accept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_blocklist_accepts_everything() {
        // テスト項目: 空のブロックリストは全てのメッセージを Accept する
        // given (前提条件):
        let classifier = BlocklistClassifier::new(vec![]);

        // when (操作):
        let verdict = classifier.classify("anything at all").await.unwrap();

        // then (期待する結果):
        assert_eq!(verdict, Verdict::Accept);
    }

    #[tokio::test]
    async fn test_blocked_term_is_rejected() {
        // テスト項目: ブロック語を含むメッセージが Reject される
        // given (前提条件):
        let classifier = BlocklistClassifier::new(vec!["badword".to_string()]);

        // when (操作):
        let verdict = classifier.classify("this has a badword inside").await.unwrap();

        // then (期待する結果):
        assert!(matches!(verdict, Verdict::Reject(_)));
    }

    #[tokio::test]
    async fn test_matching_is_case_insensitive() {
        // テスト項目: 大文字小文字を区別せずに照合される
        // given (前提条件):
        let classifier = BlocklistClassifier::new(vec!["BadWord".to_string()]);

        // when (操作):
        let verdict = classifier.classify("BADWORD!!").await.unwrap();

        // then (期待する結果):
        assert!(matches!(verdict, Verdict::Reject(_)));
    }

    #[tokio::test]
    async fn test_clean_message_is_accepted() {
        // テスト項目: ブロック語を含まないメッセージが Accept される
        // given (前提条件):
        let classifier = BlocklistClassifier::new(vec!["badword".to_string()]);

        // when (操作):
        let verdict = classifier.classify("totally fine message").await.unwrap();

        // then (期待する結果):
        assert_eq!(verdict, Verdict::Accept);
    }

    #[test]
    fn test_blank_and_comment_lines_are_dropped() {
        // テスト項目: 空行とコメント行がブロックリストから除外される
        // given (前提条件):
        let terms = vec![
            "badword".to_string(),
            "".to_string(),
            "   ".to_string(),
        ];

        // when (操作):
        let classifier = BlocklistClassifier::new(terms);

        // then (期待する結果):
        assert_eq!(classifier.term_count(), 1);
    }
}
