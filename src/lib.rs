//! Real-time fan chat core.
//!
//! This library provides the server and client implementations for the
//! fan-community chat channel: presence tracking, message history replay,
//! and a moderation layer that delivers private warnings to individual
//! fans without exposing them to the room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// CLI chat client
pub mod client;

// shared library
pub mod common;
