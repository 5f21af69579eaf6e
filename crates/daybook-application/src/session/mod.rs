//! Session application services.
//!
//! This module contains the services that drive a date's chat session:
//! lookup, initial load, message exchange, and sealing.

mod directory;
mod exchange;
mod initializer;
mod sealing;

pub use directory::SessionDirectory;
pub use exchange::MessageExchange;
pub use initializer::ChatInitializer;
pub use sealing::DiarySealer;
