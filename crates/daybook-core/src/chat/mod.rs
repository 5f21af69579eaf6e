//! Chat domain module.
//!
//! This module contains the day-scoped chat entities exchanged with the backend.
//!
//! # Module Structure
//!
//! - `model`: The chat entity (`Chat`) and its calendar key (`ChatDate`)
//! - `message`: Chat messages (`Message`, `MessageRole`)
//! - `diary`: The diary that seals a chat (`Diary`, `DiaryRevision`)
//! - `chain`: Message chain ordering and invariant checks
//!
//! # Usage
//!
//! ```ignore
//! use daybook_core::chat::{Chat, ChatDate, ChatDetail, Diary, Message, MessageRole};
//! ```

mod chain;
mod diary;
mod message;
mod model;

// Re-export public API
pub use chain::{ChainViolation, order_chain, verify_chain};
pub use diary::{Diary, DiaryRevision};
pub use message::{Message, MessageRole};
pub use model::{Chat, ChatDate, ChatDetail};
