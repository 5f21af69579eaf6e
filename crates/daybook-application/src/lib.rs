//! Application layer for Daybook.
//!
//! This crate provides use case implementations that coordinate the domain
//! state transitions with the backend collaborators.

pub mod auth_usecase;
pub mod chat_session_usecase;
pub mod session;

pub use auth_usecase::AuthUseCase;
pub use chat_session_usecase::ChatSessionUseCase;
