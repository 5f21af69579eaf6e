//! Domain layer for Daybook.
//!
//! Daybook is the client core of a day-scoped chat diary: each calendar date
//! has at most one chat with an AI counterpart, and generating the day's
//! diary seals that chat as read-only.

pub mod api;
pub mod chat;
pub mod config;
pub mod credential;
pub mod error;
pub mod session;

// Re-export common error type
pub use error::{DaybookError, Result};
