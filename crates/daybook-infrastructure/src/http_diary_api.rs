//! HTTP implementation of the backend contracts.

use crate::api_client::ApiClient;
use async_trait::async_trait;
use daybook_core::api::{AuthApi, DiaryApi, SignupRequest};
use daybook_core::chat::{Chat, ChatDate, ChatDetail, Diary, DiaryRevision, Message};
use daybook_core::error::Result;
use reqwest::Method;
use serde_json::{Value, json};

const CHAT_PATH: &str = "/api/chat/v1/";
const CHAT_DETAIL_PATH: &str = "/api/chat/v1/get-all-messages-and-diary";
const MESSAGE_PATH: &str = "/api/message/v1/";
const DIARY_PATH: &str = "/api/diary/v1/";
const LOGIN_PATH: &str = "/api/user/v1/login";
const USER_PATH: &str = "/api/user/v1/";

/// Talks to the Daybook backend over HTTP.
#[derive(Clone)]
pub struct HttpDiaryApi {
    client: ApiClient,
}

impl HttpDiaryApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DiaryApi for HttpDiaryApi {
    async fn list_chats(&self) -> Result<Vec<Chat>> {
        let value: Value = self
            .client
            .request_json(Method::GET, CHAT_PATH, &[], None)
            .await?;

        // Anything other than an array means "no chats".
        let Value::Array(entries) = value else {
            tracing::debug!("[HttpDiaryApi] Chat listing was not an array, treating as empty");
            return Ok(Vec::new());
        };

        let chats = entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<Chat>(entry) {
                Ok(chat) => Some(chat),
                Err(e) => {
                    tracing::warn!("[HttpDiaryApi] Skipping unreadable chat entry: {}", e);
                    None
                }
            })
            .collect();
        Ok(chats)
    }

    async fn create_chat(&self, date: ChatDate) -> Result<Message> {
        self.client
            .request_json(
                Method::POST,
                CHAT_PATH,
                &[],
                Some(json!({ "chat_date": date.to_string() })),
            )
            .await
    }

    async fn fetch_chat_detail(&self, chat_id: &str) -> Result<ChatDetail> {
        self.client
            .request_json(Method::GET, CHAT_DETAIL_PATH, &[("chat_id", chat_id)], None)
            .await
    }

    async fn send_message(
        &self,
        chat_id: &str,
        parent_message_id: &str,
        content: &str,
    ) -> Result<Message> {
        self.client
            .request_json(
                Method::POST,
                MESSAGE_PATH,
                &[],
                Some(json!({
                    "chat_id": chat_id,
                    "parent_message_id": parent_message_id,
                    "content": content,
                })),
            )
            .await
    }

    async fn create_diary(&self, chat_id: &str) -> Result<Diary> {
        self.client
            .request_json(Method::POST, DIARY_PATH, &[("chat_id", chat_id)], None)
            .await
    }

    async fn update_diary(&self, revision: &DiaryRevision) -> Result<()> {
        self.client
            .request_empty(
                Method::PATCH,
                DIARY_PATH,
                &[],
                Some(serde_json::to_value(revision)?),
            )
            .await
    }
}

#[async_trait]
impl AuthApi for HttpDiaryApi {
    async fn login(&self, email: &str, password: &str) -> Result<String> {
        // The backend answers with the access token as a JSON string.
        self.client
            .request_json(
                Method::POST,
                LOGIN_PATH,
                &[],
                Some(json!({ "email": email, "password": password })),
            )
            .await
    }

    async fn signup(&self, request: &SignupRequest) -> Result<()> {
        self.client
            .request_empty(
                Method::POST,
                USER_PATH,
                &[],
                Some(serde_json::to_value(request)?),
            )
            .await
    }
}
