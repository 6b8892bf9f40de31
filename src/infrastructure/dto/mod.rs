//! Data Transfer Objects (DTOs) for the fan chat wire protocol.
//!
//! - `websocket`: WebSocket message envelopes
//! - `conversion`: domain entity → DTO mapping

pub mod conversion;
pub mod websocket;
