//! Session view state.
//!
//! The observable state of one chat screen visit. Fields are private: the
//! only way to change them is through the transitions in `transition.rs`,
//! each of which owns one slice of the state (initial load, message
//! exchange, sealing, diary revision).

use crate::chat::{ChatDate, Diary, Message};
use serde::Serialize;

/// What the session is doing right now.
///
/// At most one network operation is in flight per session; the phase is
/// the latch that enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SessionPhase {
    /// Nothing in flight.
    Idle,
    /// Looking up or creating the chat and fetching its history.
    Loading,
    /// A user message is awaiting its reply.
    Sending {
        /// Temporary id of the unconfirmed message in the sequence.
        provisional_id: String,
    },
    /// The diary is being generated.
    Sealing,
    /// A diary edit is being saved.
    Revising,
    /// The session failed to load; only a new load can leave this phase.
    Errored,
}

impl SessionPhase {
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Self::Loading | Self::Sending { .. } | Self::Sealing | Self::Revising
        )
    }

    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "load",
            Self::Sending { .. } => "send",
            Self::Sealing => "seal",
            Self::Revising => "diary revision",
            Self::Errored => "errored",
        }
    }
}

/// Which page the presentation layer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionView {
    #[default]
    Messages,
    Diary,
}

/// Per-visit state of a date's chat.
///
/// Created when the screen is entered, discarded when it closes, never
/// persisted. Operations take the state by value and hand back the updated
/// state, so a response that arrives after the screen is gone has nothing
/// left to mutate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionViewState {
    pub(crate) date: ChatDate,
    pub(crate) chat_id: Option<String>,
    pub(crate) messages: Vec<Message>,
    pub(crate) diary: Option<Diary>,
    pub(crate) phase: SessionPhase,
    pub(crate) error: Option<String>,
    pub(crate) view: SessionView,
}

impl SessionViewState {
    /// Creates an empty state for `date`; nothing is loaded yet.
    pub fn new(date: ChatDate) -> Self {
        Self {
            date,
            chat_id: None,
            messages: Vec::new(),
            diary: None,
            phase: SessionPhase::Idle,
            error: None,
            view: SessionView::Messages,
        }
    }

    pub fn date(&self) -> ChatDate {
        self.date
    }

    pub fn chat_id(&self) -> Option<&str> {
        self.chat_id.as_deref()
    }

    /// Messages in chain order, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn diary(&self) -> Option<&Diary> {
        self.diary.as_ref()
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn view(&self) -> SessionView {
        self.view
    }

    /// The last message of the chain.
    pub fn tail(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SessionPhase::Loading
    }

    pub fn is_sending(&self) -> bool {
        matches!(self.phase, SessionPhase::Sending { .. })
    }

    pub fn is_sealing(&self) -> bool {
        self.phase == SessionPhase::Sealing
    }

    /// A chat is sealed iff it has a diary.
    pub fn is_sealed(&self) -> bool {
        self.diary.is_some()
    }

    /// The provisional message awaiting confirmation, if any.
    pub fn provisional(&self) -> Option<&Message> {
        match &self.phase {
            SessionPhase::Sending { provisional_id } => {
                self.messages.iter().find(|m| &m.id == provisional_id)
            }
            _ => None,
        }
    }

    /// Switches the presented page.
    pub fn show(&mut self, view: SessionView) {
        self.view = view;
    }

    /// Clears the error slot once the presentation has shown it.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}
