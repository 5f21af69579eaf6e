//! Backend API contracts.
//!
//! The HTTP API is an external collaborator: the core consumes it through
//! these traits and never depends on a concrete transport. Implementations
//! attach the stored bearer credential to every call and, on a 401, clear
//! stored credentials before returning [`DaybookError::AuthExpired`].
//!
//! [`DaybookError::AuthExpired`]: crate::error::DaybookError::AuthExpired

use crate::chat::{Chat, ChatDate, ChatDetail, Diary, DiaryRevision, Message};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Chat, message and diary endpoints.
#[async_trait]
pub trait DiaryApi: Send + Sync {
    /// Lists every chat of the current user.
    async fn list_chats(&self) -> Result<Vec<Chat>>;

    /// Creates the chat for `date` and returns the counterpart's seed
    /// message, which becomes the chain root.
    async fn create_chat(&self, date: ChatDate) -> Result<Message>;

    /// Fetches a chat's full message history and its diary in one call.
    async fn fetch_chat_detail(&self, chat_id: &str) -> Result<ChatDetail>;

    /// Sends a user message chained onto `parent_message_id` and returns the
    /// counterpart's reply.
    async fn send_message(
        &self,
        chat_id: &str,
        parent_message_id: &str,
        content: &str,
    ) -> Result<Message>;

    /// Asks the backend to write the diary for a chat from its server-side
    /// history.
    async fn create_diary(&self, chat_id: &str) -> Result<Diary>;

    /// Replaces an existing diary's title and body.
    async fn update_diary(&self, revision: &DiaryRevision) -> Result<()>;
}

/// Sign-up form accepted by the user endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
}

/// Account endpoints.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for an access token.
    async fn login(&self, email: &str, password: &str) -> Result<String>;

    /// Registers a new account. Does not log in.
    async fn signup(&self, request: &SignupRequest) -> Result<()>;
}
