//! Session directory: resolves calendar dates to chats.

use daybook_core::api::DiaryApi;
use daybook_core::chat::{Chat, ChatDate};
use daybook_core::error::Result;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Looks up chats by date from the user's full chat listing.
///
/// Nothing is cached: every call lists the chats again, so repeated calls
/// observe the backend's current state and have no side effects.
#[derive(Clone)]
pub struct SessionDirectory {
    api: Arc<dyn DiaryApi>,
}

impl SessionDirectory {
    pub fn new(api: Arc<dyn DiaryApi>) -> Self {
        Self { api }
    }

    /// Returns the chat for `date`, or `None` when the user has none.
    ///
    /// # Errors
    ///
    /// Propagates the listing failure; a failed lookup never reads as
    /// "no chat".
    pub async fn find_chat_for_date(&self, date: ChatDate) -> Result<Option<Chat>> {
        let chats = self.api.list_chats().await?;
        let found = chats.into_iter().find(|chat| chat.date == date);

        tracing::debug!(
            "[SessionDirectory] Lookup for {}: {}",
            date,
            found.as_ref().map(|c| c.id.as_str()).unwrap_or("none")
        );

        Ok(found)
    }

    /// Returns every date that has a chat, for the calendar.
    pub async fn chat_dates(&self) -> Result<BTreeSet<ChatDate>> {
        let chats = self.api.list_chats().await?;
        Ok(chats.into_iter().map(|chat| chat.date).collect())
    }
}
