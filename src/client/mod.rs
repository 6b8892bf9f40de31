//! CLI chat client implementation.

mod error;
mod formatter;
mod runner;
mod session;

pub use error::ClientError;
pub use runner::run_client;
