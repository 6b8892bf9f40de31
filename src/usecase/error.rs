//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::RegistryError;

/// Failure of the join handshake
#[derive(Debug, Error)]
pub enum JoinError {
    #[error("failed to register connection: {0}")]
    Registration(#[from] RegistryError),
}
