//! Session state transitions.
//!
//! Every network-bound operation is split into a `begin_*` step, which
//! validates preconditions and applies any optimistic change, and a
//! `complete_*` step, which folds the response (or failure) back in. Both
//! run synchronously, so the state is never observed half-updated.
//!
//! A violated precondition yields [`DaybookError::ValidationNoop`] and
//! leaves the state untouched.

use super::state::{SessionPhase, SessionView, SessionViewState};
use crate::chat::{Chat, ChatDetail, Diary, DiaryRevision, Message, MessageRole, order_chain};
use crate::error::{DaybookError, Result};
use uuid::Uuid;

/// Prefix of locally generated ids for unconfirmed messages.
pub const PROVISIONAL_ID_PREFIX: &str = "temp-";

/// Prefix of locally generated ids for confirmed user messages whose server
/// id was not echoed back.
pub const LOCAL_USER_ID_PREFIX: &str = "user-";

/// Operations gated by the session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Load,
    Send,
    Seal,
    Revise,
}

/// Result of a successful initial load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSession {
    pub chat_id: String,
    pub messages: Vec<Message>,
    pub diary: Option<Diary>,
}

impl LoadedSession {
    /// An existing chat with its fetched history.
    pub fn resumed(chat: &Chat, detail: ChatDetail) -> Self {
        Self {
            chat_id: chat.id.clone(),
            messages: detail.messages,
            diary: detail.diary,
        }
    }

    /// A freshly created chat holding only the counterpart's seed message.
    pub fn created(seed: Message) -> Self {
        Self {
            chat_id: seed.chat_id.clone(),
            messages: vec![seed],
            diary: None,
        }
    }
}

/// A send that passed its preconditions and is waiting for the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    pub chat_id: String,
    pub parent_id: String,
    pub content: String,
    pub provisional_id: String,
}

impl SessionViewState {
    /// Checks whether `action` may start from the current state.
    pub fn admits(&self, action: SessionAction) -> Result<()> {
        if self.phase.is_busy() {
            return Err(DaybookError::noop(format!(
                "a {} is already in progress",
                self.phase.describe()
            )));
        }

        match action {
            SessionAction::Load => Ok(()),
            SessionAction::Send => {
                if self.chat_id.is_none() {
                    return Err(DaybookError::noop("no chat is open"));
                }
                if self.diary.is_some() {
                    return Err(DaybookError::noop("chat is sealed"));
                }
                if self.messages.is_empty() {
                    return Err(DaybookError::noop("no message to chain from"));
                }
                Ok(())
            }
            SessionAction::Seal => {
                if self.chat_id.is_none() {
                    return Err(DaybookError::noop("no chat is open"));
                }
                if self.diary.is_some() {
                    return Err(DaybookError::noop("chat already has a diary"));
                }
                Ok(())
            }
            SessionAction::Revise => {
                if self.diary.is_none() {
                    return Err(DaybookError::noop("chat has no diary to revise"));
                }
                Ok(())
            }
        }
    }

    // ============================================================================
    // Initial load
    // ============================================================================

    /// Enters `Loading`, dropping whatever the state held before.
    pub fn begin_load(&mut self) -> Result<()> {
        self.admits(SessionAction::Load)?;
        self.chat_id = None;
        self.messages.clear();
        self.diary = None;
        self.error = None;
        self.view = SessionView::Messages;
        self.phase = SessionPhase::Loading;
        Ok(())
    }

    /// Applies the outcome of a load.
    ///
    /// On success the history is put into chain order and, when a diary
    /// exists, the diary page becomes the presented view. On failure no
    /// partial data is kept and the session enters `Errored`.
    pub fn complete_load(&mut self, outcome: Result<LoadedSession>) {
        if self.phase != SessionPhase::Loading {
            tracing::debug!("[SessionState] Ignoring load result outside of Loading");
            return;
        }

        match outcome {
            Ok(loaded) => {
                self.view = if loaded.diary.is_some() {
                    SessionView::Diary
                } else {
                    SessionView::Messages
                };
                self.chat_id = Some(loaded.chat_id);
                self.messages = order_chain(loaded.messages);
                self.diary = loaded.diary;
                self.error = None;
                self.phase = SessionPhase::Idle;
            }
            Err(e) => {
                self.chat_id = None;
                self.messages.clear();
                self.diary = None;
                self.error = Some(e.user_message());
                self.phase = SessionPhase::Errored;
            }
        }
    }

    // ============================================================================
    // Message exchange
    // ============================================================================

    /// Appends a provisional user message chained onto the current tail and
    /// enters `Sending`.
    ///
    /// Content is trimmed; blank content is a no-op.
    pub fn begin_send(&mut self, content: &str) -> Result<PendingSend> {
        self.admits(SessionAction::Send)?;

        let content = content.trim();
        if content.is_empty() {
            return Err(DaybookError::noop("message is empty"));
        }

        let (Some(chat_id), Some(tail)) = (self.chat_id.clone(), self.tail()) else {
            return Err(DaybookError::noop("no chat is open"));
        };
        let parent_id = tail.id.clone();
        let provisional_id = format!("{}{}", PROVISIONAL_ID_PREFIX, Uuid::new_v4());
        let now = chrono::Utc::now().to_rfc3339();

        self.messages.push(Message {
            id: provisional_id.clone(),
            chat_id: chat_id.clone(),
            parent_id: Some(parent_id.clone()),
            content: content.to_string(),
            role: MessageRole::User,
            created_at: now.clone(),
            updated_at: now,
        });
        self.phase = SessionPhase::Sending {
            provisional_id: provisional_id.clone(),
        };

        Ok(PendingSend {
            chat_id,
            parent_id,
            content: content.to_string(),
            provisional_id,
        })
    }

    /// Replaces or removes the provisional message of `pending`.
    ///
    /// On success the provisional message becomes a confirmed user message
    /// and the reply is placed right after it. On failure the provisional
    /// message is removed, leaving the sequence as it was before the send.
    pub fn complete_send(&mut self, pending: PendingSend, outcome: Result<Message>) {
        let in_flight = matches!(
            &self.phase,
            SessionPhase::Sending { provisional_id } if *provisional_id == pending.provisional_id
        );
        if !in_flight {
            tracing::debug!(
                "[SessionState] Ignoring stale send result for {}",
                pending.provisional_id
            );
            return;
        }

        let position = self
            .messages
            .iter()
            .position(|m| m.id == pending.provisional_id);
        let provisional = position.map(|index| self.messages.remove(index));
        let insert_at = position.unwrap_or(self.messages.len());

        match outcome {
            Ok(mut reply) => {
                let messages = &self.messages;
                let confirmed_id = reply
                    .parent_id
                    .clone()
                    .filter(|id| *id != pending.parent_id && *id != reply.id)
                    .filter(|id| !messages.iter().any(|m| m.id == *id))
                    .unwrap_or_else(|| format!("{}{}", LOCAL_USER_ID_PREFIX, Uuid::new_v4()));

                if reply.parent_id.as_deref() != Some(confirmed_id.as_str()) {
                    tracing::warn!(
                        "[SessionState] Reply {} did not reference the sent message; relinking locally",
                        reply.id
                    );
                    reply.parent_id = Some(confirmed_id.clone());
                }

                let now = chrono::Utc::now().to_rfc3339();
                let confirmed = Message {
                    id: confirmed_id,
                    chat_id: pending.chat_id,
                    parent_id: Some(pending.parent_id),
                    content: pending.content,
                    role: MessageRole::User,
                    created_at: provisional
                        .map(|m| m.created_at)
                        .unwrap_or_else(|| now.clone()),
                    updated_at: now,
                };

                self.messages.insert(insert_at, confirmed);
                self.messages.insert(insert_at + 1, reply);
                self.error = None;
            }
            Err(e) => {
                self.error = Some(e.user_message());
            }
        }

        self.phase = SessionPhase::Idle;
    }

    // ============================================================================
    // Sealing
    // ============================================================================

    /// Enters `Sealing` and returns the chat to seal.
    pub fn begin_seal(&mut self) -> Result<String> {
        self.admits(SessionAction::Seal)?;
        let chat_id = self
            .chat_id
            .clone()
            .ok_or_else(|| DaybookError::noop("no chat is open"))?;
        self.error = None;
        self.phase = SessionPhase::Sealing;
        Ok(chat_id)
    }

    /// Stores the created diary, permanently freezing the message chain.
    ///
    /// A failure leaves the chat open so sealing can be retried.
    pub fn complete_seal(&mut self, outcome: Result<Diary>) {
        if self.phase != SessionPhase::Sealing {
            tracing::debug!("[SessionState] Ignoring seal result outside of Sealing");
            return;
        }

        match outcome {
            Ok(diary) => {
                self.diary = Some(diary);
                self.view = SessionView::Diary;
                self.error = None;
            }
            Err(e) => {
                self.error = Some(e.user_message());
            }
        }

        self.phase = SessionPhase::Idle;
    }

    // ============================================================================
    // Diary revision
    // ============================================================================

    /// Enters `Revising` and returns the edit to submit.
    pub fn begin_revise(&mut self, title: &str, body: &str) -> Result<DiaryRevision> {
        self.admits(SessionAction::Revise)?;
        let diary_id = self
            .diary
            .as_ref()
            .map(|d| d.id.clone())
            .ok_or_else(|| DaybookError::noop("chat has no diary to revise"))?;
        self.error = None;
        self.phase = SessionPhase::Revising;
        Ok(DiaryRevision {
            diary_id,
            title: title.to_string(),
            body: body.to_string(),
        })
    }

    /// Applies a saved revision, or records why it failed.
    pub fn complete_revise(&mut self, revision: DiaryRevision, outcome: Result<()>) {
        if self.phase != SessionPhase::Revising {
            tracing::debug!("[SessionState] Ignoring revision result outside of Revising");
            return;
        }

        match outcome {
            Ok(()) => {
                if let Some(diary) = self.diary.as_mut()
                    && diary.id == revision.diary_id
                {
                    diary.apply(&revision);
                }
                self.error = None;
            }
            Err(e) => {
                self.error = Some(e.user_message());
            }
        }

        self.phase = SessionPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChatDate, verify_chain};

    fn date() -> ChatDate {
        ChatDate::from_ymd(2024, 3, 1).unwrap()
    }

    fn message(id: &str, parent: Option<&str>, role: MessageRole) -> Message {
        Message {
            id: id.to_string(),
            chat_id: "c1".to_string(),
            parent_id: parent.map(str::to_string),
            content: format!("content of {}", id),
            role,
            created_at: "2024-03-01T09:00:00".to_string(),
            updated_at: "2024-03-01T09:00:00".to_string(),
        }
    }

    fn diary() -> Diary {
        Diary {
            id: "d1".to_string(),
            chat_id: "c1".to_string(),
            title: "A quiet day".to_string(),
            body: "Nothing much happened.".to_string(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn open_state(messages: Vec<Message>, diary: Option<Diary>) -> SessionViewState {
        let mut state = SessionViewState::new(date());
        state.begin_load().unwrap();
        state.complete_load(Ok(LoadedSession {
            chat_id: "c1".to_string(),
            messages,
            diary,
        }));
        state
    }

    #[test]
    fn test_load_failure_keeps_nothing() {
        let mut state = SessionViewState::new(date());
        state.begin_load().unwrap();
        assert!(state.is_loading());

        state.complete_load(Err(DaybookError::network(500, "boom")));

        assert_eq!(state.phase(), &SessionPhase::Errored);
        assert!(state.messages().is_empty());
        assert!(state.chat_id().is_none());
        assert_eq!(state.error(), Some("boom"));
    }

    #[test]
    fn test_load_with_diary_defaults_to_diary_view() {
        let state = open_state(
            vec![message("m1", None, MessageRole::Counterpart)],
            Some(diary()),
        );
        assert_eq!(state.view(), SessionView::Diary);
        assert!(state.is_sealed());
    }

    #[test]
    fn test_begin_send_appends_provisional_message() {
        let mut state = open_state(vec![message("m1", None, MessageRole::Counterpart)], None);

        let pending = state.begin_send("hello").unwrap();

        assert_eq!(pending.parent_id, "m1");
        assert!(pending.provisional_id.starts_with(PROVISIONAL_ID_PREFIX));
        assert!(state.is_sending());
        assert_eq!(state.messages().len(), 2);
        let provisional = state.provisional().unwrap();
        assert_eq!(provisional.role, MessageRole::User);
        assert_eq!(provisional.parent_id.as_deref(), Some("m1"));
    }

    #[test]
    fn test_second_send_while_sending_is_noop() {
        let mut state = open_state(vec![message("m1", None, MessageRole::Counterpart)], None);
        state.begin_send("first").unwrap();
        let before = state.clone();

        let err = state.begin_send("second").unwrap_err();

        assert!(err.is_noop());
        assert_eq!(state, before);
    }

    #[test]
    fn test_send_on_sealed_chat_is_noop() {
        let mut state = open_state(
            vec![message("m1", None, MessageRole::Counterpart)],
            Some(diary()),
        );
        let before = state.clone();

        assert!(state.begin_send("hello").unwrap_err().is_noop());
        assert_eq!(state, before);
    }

    #[test]
    fn test_blank_send_is_noop() {
        let mut state = open_state(vec![message("m1", None, MessageRole::Counterpart)], None);
        assert!(state.begin_send("   ").unwrap_err().is_noop());
        assert_eq!(state.messages().len(), 1);
        assert_eq!(state.phase(), &SessionPhase::Idle);
    }

    #[test]
    fn test_send_without_chat_is_noop() {
        let mut state = SessionViewState::new(date());
        assert!(state.begin_send("hello").unwrap_err().is_noop());
        assert!(state.messages().is_empty());
    }

    #[test]
    fn test_send_success_confirms_and_appends_reply() {
        let mut state = open_state(vec![message("m1", None, MessageRole::Counterpart)], None);
        let pending = state.begin_send("hello").unwrap();

        let reply = message("m3", Some("m2"), MessageRole::Counterpart);
        state.complete_send(pending, Ok(reply));

        let ids: Vec<&str> = state.messages().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2", "m3"]);
        assert_eq!(state.messages()[1].parent_id.as_deref(), Some("m1"));
        assert_eq!(state.messages()[1].content, "hello");
        assert_eq!(state.phase(), &SessionPhase::Idle);
        assert!(verify_chain(state.messages()).is_ok());
    }

    #[test]
    fn test_send_success_without_echoed_parent_relinks_reply() {
        let mut state = open_state(vec![message("m1", None, MessageRole::Counterpart)], None);
        let pending = state.begin_send("hello").unwrap();

        let reply = message("m3", None, MessageRole::Counterpart);
        state.complete_send(pending, Ok(reply));

        let confirmed = &state.messages()[1];
        assert!(confirmed.id.starts_with(LOCAL_USER_ID_PREFIX));
        assert_eq!(state.messages()[2].parent_id.as_deref(), Some(confirmed.id.as_str()));
        assert!(verify_chain(state.messages()).is_ok());
    }

    #[test]
    fn test_send_reply_pointing_into_history_gets_local_id() {
        let mut state = open_state(
            vec![
                message("m1", None, MessageRole::Counterpart),
                message("m2", Some("m1"), MessageRole::User),
                message("m3", Some("m2"), MessageRole::Counterpart),
            ],
            None,
        );
        let pending = state.begin_send("hello").unwrap();

        let reply = message("m5", Some("m1"), MessageRole::Counterpart);
        state.complete_send(pending, Ok(reply));

        let confirmed = &state.messages()[3];
        assert!(confirmed.id.starts_with(LOCAL_USER_ID_PREFIX));
        assert_eq!(confirmed.parent_id.as_deref(), Some("m3"));
        assert_eq!(state.messages()[4].parent_id.as_deref(), Some(confirmed.id.as_str()));
        assert!(verify_chain(state.messages()).is_ok());
    }

    #[test]
    fn test_send_failure_rolls_back() {
        let mut state = open_state(vec![message("m1", None, MessageRole::Counterpart)], None);
        let before: Vec<Message> = state.messages().to_vec();
        let pending = state.begin_send("hello").unwrap();

        state.complete_send(pending, Err(DaybookError::transport("connection reset")));

        assert_eq!(state.messages(), before.as_slice());
        assert_eq!(state.error(), Some("connection reset"));
        assert_eq!(state.phase(), &SessionPhase::Idle);
    }

    #[test]
    fn test_stale_send_result_is_ignored() {
        let mut state = open_state(vec![message("m1", None, MessageRole::Counterpart)], None);
        let pending = state.begin_send("hello").unwrap();
        let mut stale = pending.clone();
        stale.provisional_id = "temp-other".to_string();

        state.complete_send(stale, Err(DaybookError::transport("late")));

        assert!(state.is_sending());
        assert_eq!(state.messages().len(), 2);
        assert!(state.error().is_none());
    }

    #[test]
    fn test_seal_freezes_chat() {
        let mut state = open_state(vec![message("m1", None, MessageRole::Counterpart)], None);
        let chat_id = state.begin_seal().unwrap();
        assert_eq!(chat_id, "c1");
        assert!(state.is_sealing());
        assert!(state.begin_seal().unwrap_err().is_noop());

        state.complete_seal(Ok(diary()));

        assert!(state.is_sealed());
        assert_eq!(state.view(), SessionView::Diary);
        assert!(state.begin_send("more").unwrap_err().is_noop());
        assert!(state.begin_seal().unwrap_err().is_noop());
    }

    #[test]
    fn test_seal_failure_leaves_chat_open() {
        let mut state = open_state(vec![message("m1", None, MessageRole::Counterpart)], None);
        state.begin_seal().unwrap();

        state.complete_seal(Err(DaybookError::network(503, "busy")));

        assert!(!state.is_sealed());
        assert_eq!(state.error(), Some("busy"));
        assert!(state.admits(SessionAction::Seal).is_ok());
        assert!(state.admits(SessionAction::Send).is_ok());
    }

    #[test]
    fn test_revise_requires_diary() {
        let mut state = open_state(vec![message("m1", None, MessageRole::Counterpart)], None);
        assert!(state.begin_revise("t", "b").unwrap_err().is_noop());
    }

    #[test]
    fn test_revise_applies_title_and_body() {
        let mut state = open_state(
            vec![message("m1", None, MessageRole::Counterpart)],
            Some(diary()),
        );
        let revision = state.begin_revise("Better title", "Better body").unwrap();
        assert_eq!(revision.diary_id, "d1");

        state.complete_revise(revision, Ok(()));

        let diary = state.diary().unwrap();
        assert_eq!(diary.title, "Better title");
        assert_eq!(diary.body, "Better body");
        assert_eq!(state.messages().len(), 1);
    }
}
