//! Chat session use case.
//!
//! Single entry point the presentation layer uses for a date's chat. Each
//! method takes the current [`SessionViewState`] by value and returns the
//! updated one.

use crate::session::{ChatInitializer, DiarySealer, MessageExchange, SessionDirectory};
use daybook_core::api::DiaryApi;
use daybook_core::chat::{Chat, ChatDate};
use daybook_core::error::Result;
use daybook_core::session::SessionViewState;
use std::collections::BTreeSet;
use std::sync::Arc;

pub struct ChatSessionUseCase {
    directory: SessionDirectory,
    initializer: ChatInitializer,
    exchange: MessageExchange,
    sealer: DiarySealer,
}

impl ChatSessionUseCase {
    pub fn new(api: Arc<dyn DiaryApi>) -> Self {
        let directory = SessionDirectory::new(api.clone());
        Self {
            initializer: ChatInitializer::new(api.clone(), directory.clone()),
            exchange: MessageExchange::new(api.clone()),
            sealer: DiarySealer::new(api),
            directory,
        }
    }

    /// Dates that have a chat, for the calendar.
    pub async fn chat_dates(&self) -> Result<BTreeSet<ChatDate>> {
        self.directory.chat_dates().await
    }

    pub async fn find_chat_for_date(&self, date: ChatDate) -> Result<Option<Chat>> {
        self.directory.find_chat_for_date(date).await
    }

    pub async fn open_session(&self, date: ChatDate) -> SessionViewState {
        self.initializer.open_session(date).await
    }

    pub async fn reload(&self, state: SessionViewState) -> SessionViewState {
        self.initializer.reload(state).await
    }

    pub async fn send_user_message(
        &self,
        state: SessionViewState,
        content: &str,
    ) -> SessionViewState {
        self.exchange.send_user_message(state, content).await
    }

    pub async fn seal_chat(&self, state: SessionViewState) -> SessionViewState {
        self.sealer.seal_chat(state).await
    }

    pub async fn revise_diary(
        &self,
        state: SessionViewState,
        title: &str,
        body: &str,
    ) -> SessionViewState {
        self.sealer.revise_diary(state, title, body).await
    }
}
