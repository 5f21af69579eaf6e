//! Diary sealing and revision.

use daybook_core::api::DiaryApi;
use daybook_core::session::SessionViewState;
use std::sync::Arc;

/// Turns an open chat into a sealed one by generating its diary, and saves
/// later edits to that diary.
#[derive(Clone)]
pub struct DiarySealer {
    api: Arc<dyn DiaryApi>,
}

impl DiarySealer {
    pub fn new(api: Arc<dyn DiaryApi>) -> Self {
        Self { api }
    }

    /// Requests the diary for the session's chat.
    ///
    /// The backend writes the diary from its own copy of the history; no
    /// message content is sent. Skipped silently when no chat is open, a
    /// diary already exists, or an operation is in flight. On failure the
    /// chat stays open and sealing can be retried.
    pub async fn seal_chat(&self, mut state: SessionViewState) -> SessionViewState {
        let chat_id = match state.begin_seal() {
            Ok(chat_id) => chat_id,
            Err(e) => {
                tracing::debug!("[DiarySealer] Seal skipped: {}", e);
                return state;
            }
        };

        let outcome = self.api.create_diary(&chat_id).await;
        match &outcome {
            Ok(diary) => tracing::info!("[DiarySealer] Chat {} sealed with diary {}", chat_id, diary.id),
            Err(e) => tracing::warn!("[DiarySealer] Diary creation failed for chat {}: {}", chat_id, e),
        }

        state.complete_seal(outcome);
        state
    }

    /// Saves a new title and body for the session's diary.
    pub async fn revise_diary(
        &self,
        mut state: SessionViewState,
        title: &str,
        body: &str,
    ) -> SessionViewState {
        let revision = match state.begin_revise(title, body) {
            Ok(revision) => revision,
            Err(e) => {
                tracing::debug!("[DiarySealer] Revision skipped: {}", e);
                return state;
            }
        };

        let outcome = self.api.update_diary(&revision).await;
        if let Err(e) = &outcome {
            tracing::warn!("[DiarySealer] Diary {} update failed: {}", revision.diary_id, e);
        }

        state.complete_revise(revision, outcome);
        state
    }
}
