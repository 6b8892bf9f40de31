//! Infrastructure 層
//!
//! ドメイン層が定義する trait の具体的な実装と、ワイヤ形式（DTO）。

pub mod classifier;
pub mod dto;
pub mod registry;

pub use classifier::BlocklistClassifier;
pub use registry::InMemoryConnectionRegistry;
