//! Message exchange engine.

use daybook_core::api::DiaryApi;
use daybook_core::session::SessionViewState;
use std::sync::Arc;

/// Sends user messages with an optimistic append.
///
/// Callers that render while the request is in flight can drive
/// [`SessionViewState::begin_send`] and [`SessionViewState::complete_send`]
/// themselves; [`MessageExchange::send_user_message`] runs both around the
/// network call.
#[derive(Clone)]
pub struct MessageExchange {
    api: Arc<dyn DiaryApi>,
}

impl MessageExchange {
    pub fn new(api: Arc<dyn DiaryApi>) -> Self {
        Self { api }
    }

    /// Sends `content` as the next message of the session's chain.
    ///
    /// Silently returns the state unchanged, without a network call, when no
    /// chat is open, a send or other operation is in flight, the chat is
    /// sealed, there is no message to chain from, or the content is blank.
    /// A failed send is rolled back and recorded in the error slot.
    pub async fn send_user_message(
        &self,
        mut state: SessionViewState,
        content: &str,
    ) -> SessionViewState {
        let pending = match state.begin_send(content) {
            Ok(pending) => pending,
            Err(e) => {
                tracing::debug!("[MessageExchange] Send skipped: {}", e);
                return state;
            }
        };

        let outcome = self
            .api
            .send_message(&pending.chat_id, &pending.parent_id, &pending.content)
            .await;

        match &outcome {
            Ok(reply) => tracing::debug!(
                "[MessageExchange] Reply {} received for chat {}",
                reply.id,
                pending.chat_id
            ),
            Err(e) => tracing::warn!(
                "[MessageExchange] Send failed for chat {}, rolling back: {}",
                pending.chat_id,
                e
            ),
        }

        state.complete_send(pending, outcome);
        state
    }
}
