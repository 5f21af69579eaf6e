//! Session domain module.
//!
//! This module contains the per-visit view state of a date's chat and the
//! transitions that drive it.
//!
//! # Module Structure
//!
//! - `state`: The view state (`SessionViewState`) and its phase (`SessionPhase`)
//! - `transition`: Precondition checks and begin/complete transitions
//!
//! # Usage
//!
//! ```ignore
//! use daybook_core::session::{SessionViewState, SessionPhase, PendingSend};
//! ```

mod state;
mod transition;

// Re-export public API
pub use state::{SessionPhase, SessionView, SessionViewState};
pub use transition::{
    LOCAL_USER_ID_PREFIX, LoadedSession, PROVISIONAL_ID_PREFIX, PendingSend, SessionAction,
};
