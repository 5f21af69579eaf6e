//! Chat initializer: resumes or creates the chat for a date.

use super::directory::SessionDirectory;
use daybook_core::api::DiaryApi;
use daybook_core::chat::ChatDate;
use daybook_core::error::Result;
use daybook_core::session::{LoadedSession, SessionViewState};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Opens the session for a date.
///
/// The lookup-then-create sequence for a date runs under a per-date gate,
/// so two opens of the same unseen date through one initializer cannot both
/// create a chat. Opens from other processes or devices still rely on the
/// backend's uniqueness of (user, date).
pub struct ChatInitializer {
    api: Arc<dyn DiaryApi>,
    directory: SessionDirectory,
    gates: Mutex<HashMap<ChatDate, Arc<Mutex<()>>>>,
}

impl ChatInitializer {
    pub fn new(api: Arc<dyn DiaryApi>, directory: SessionDirectory) -> Self {
        Self {
            api,
            directory,
            gates: Mutex::new(HashMap::new()),
        }
    }

    /// Builds a fresh session for `date` and loads it.
    pub async fn open_session(&self, date: ChatDate) -> SessionViewState {
        self.reload(SessionViewState::new(date)).await
    }

    /// Runs the lookup-or-create sequence again for the state's date.
    ///
    /// Any failure leaves the state `Errored` with an empty message list and
    /// the error slot populated. Nothing is retried.
    pub async fn reload(&self, mut state: SessionViewState) -> SessionViewState {
        if let Err(e) = state.begin_load() {
            tracing::debug!("[ChatInitializer] Load skipped: {}", e);
            return state;
        }

        let date = state.date();
        let outcome = self.load(date).await;
        match &outcome {
            Ok(loaded) => tracing::info!(
                "[ChatInitializer] Session for {} ready: chat={}, messages={}, sealed={}",
                date,
                loaded.chat_id,
                loaded.messages.len(),
                loaded.diary.is_some()
            ),
            Err(e) => tracing::error!("[ChatInitializer] Failed to open session for {}: {}", date, e),
        }

        state.complete_load(outcome);
        state
    }

    async fn load(&self, date: ChatDate) -> Result<LoadedSession> {
        let gate = self.gate_for(date).await;
        let outcome = {
            let _guard = gate.lock().await;
            self.lookup_or_create(date).await
        };
        self.release_gate(date, gate).await;
        outcome
    }

    async fn lookup_or_create(&self, date: ChatDate) -> Result<LoadedSession> {
        match self.directory.find_chat_for_date(date).await? {
            Some(chat) => {
                tracing::debug!("[ChatInitializer] Resuming chat {}", chat.id);
                let detail = self.api.fetch_chat_detail(&chat.id).await?;
                Ok(LoadedSession::resumed(&chat, detail))
            }
            None => {
                tracing::debug!("[ChatInitializer] No chat for {}, creating one", date);
                let seed = self.api.create_chat(date).await?;
                Ok(LoadedSession::created(seed))
            }
        }
    }

    async fn gate_for(&self, date: ChatDate) -> Arc<Mutex<()>> {
        let mut gates = self.gates.lock().await;
        gates.entry(date).or_default().clone()
    }

    /// Drops the gate for `date` once no other open is holding or waiting on it.
    async fn release_gate(&self, date: ChatDate, gate: Arc<Mutex<()>>) {
        let mut gates = self.gates.lock().await;
        drop(gate);
        if gates.get(&date).is_some_and(|g| Arc::strong_count(g) == 1) {
            gates.remove(&date);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use daybook_core::chat::{Chat, ChatDetail, Diary, DiaryRevision, Message, MessageRole};
    use daybook_core::error::DaybookError;

    /// Backend with no chats whose creations all fail after a yield.
    struct FailingCreate;

    #[async_trait]
    impl DiaryApi for FailingCreate {
        async fn list_chats(&self) -> Result<Vec<Chat>> {
            tokio::task::yield_now().await;
            Ok(Vec::new())
        }

        async fn create_chat(&self, _date: ChatDate) -> Result<Message> {
            tokio::task::yield_now().await;
            Err(DaybookError::network(500, "down"))
        }

        async fn fetch_chat_detail(&self, chat_id: &str) -> Result<ChatDetail> {
            Err(DaybookError::not_found("Chat", chat_id))
        }

        async fn send_message(&self, chat_id: &str, _parent: &str, _content: &str) -> Result<Message> {
            Ok(Message {
                id: "r1".to_string(),
                chat_id: chat_id.to_string(),
                parent_id: None,
                content: String::new(),
                role: MessageRole::Counterpart,
                created_at: String::new(),
                updated_at: String::new(),
            })
        }

        async fn create_diary(&self, chat_id: &str) -> Result<Diary> {
            Err(DaybookError::not_found("Chat", chat_id))
        }

        async fn update_diary(&self, revision: &DiaryRevision) -> Result<()> {
            Err(DaybookError::not_found("Diary", revision.diary_id.clone()))
        }
    }

    #[tokio::test]
    async fn test_gates_are_released_after_opens_finish() {
        let api: Arc<dyn DiaryApi> = Arc::new(FailingCreate);
        let initializer = ChatInitializer::new(api.clone(), SessionDirectory::new(api));
        let day = ChatDate::from_ymd(2024, 3, 1).unwrap();
        let next_day = ChatDate::from_ymd(2024, 3, 2).unwrap();

        let (a, b, c) = tokio::join!(
            initializer.open_session(day),
            initializer.open_session(day),
            initializer.open_session(next_day)
        );

        assert!(a.error().is_some() && b.error().is_some() && c.error().is_some());
        assert!(initializer.gates.lock().await.is_empty());
    }
}
