//! In-memory backend used by the application tests.

#![allow(dead_code)]

use async_trait::async_trait;
use daybook_core::api::DiaryApi;
use daybook_core::chat::{Chat, ChatDate, ChatDetail, Diary, DiaryRevision, Message, MessageRole};
use daybook_core::error::{DaybookError, Result};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Mock backend keeping chats, histories and diaries in memory.
///
/// Every call yields to the scheduler once, so concurrent callers interleave
/// the way they would over a real network.
#[derive(Default)]
pub struct MockDiaryApi {
    chats: Mutex<Vec<Chat>>,
    details: Mutex<HashMap<String, ChatDetail>>,
    next_id: AtomicUsize,

    pub fail_list: AtomicBool,
    pub fail_create_chat: AtomicBool,
    pub fail_detail: AtomicBool,
    pub fail_send: AtomicBool,
    pub expire_auth_on_send: AtomicBool,
    pub fail_create_diary: AtomicBool,
    pub fail_update_diary: AtomicBool,

    pub list_calls: AtomicUsize,
    pub create_chat_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    pub send_calls: AtomicUsize,
    pub create_diary_calls: AtomicUsize,
    pub update_diary_calls: AtomicUsize,
}

pub fn date(s: &str) -> ChatDate {
    s.parse().unwrap()
}

pub fn message(chat_id: &str, id: &str, parent: Option<&str>, role: MessageRole) -> Message {
    Message {
        id: id.to_string(),
        chat_id: chat_id.to_string(),
        parent_id: parent.map(str::to_string),
        content: format!("content of {}", id),
        role,
        created_at: "2024-03-01T09:00:00".to_string(),
        updated_at: "2024-03-01T09:00:00".to_string(),
    }
}

pub fn diary(chat_id: &str) -> Diary {
    Diary {
        id: format!("diary-{}", chat_id),
        chat_id: chat_id.to_string(),
        title: "A long walk".to_string(),
        body: "We talked about the walk by the river.".to_string(),
        created_at: "2024-03-03T21:00:00".to_string(),
        updated_at: "2024-03-03T21:00:00".to_string(),
    }
}

impl MockDiaryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an existing chat with the given history and diary.
    pub fn with_chat(self, date: ChatDate, messages: Vec<Message>, diary: Option<Diary>) -> Self {
        let chat_id = format!("chat-{}", date);
        let root_message_id = messages
            .iter()
            .find(|m| m.is_root())
            .map(|m| m.id.clone())
            .unwrap_or_default();
        self.chats.lock().unwrap().push(Chat {
            id: chat_id.clone(),
            user_id: "user-1".to_string(),
            root_message_id,
            date,
            created_at: String::new(),
            updated_at: String::new(),
        });
        self.details
            .lock()
            .unwrap()
            .insert(chat_id, ChatDetail { messages, diary });
        self
    }

    pub fn chat_count(&self) -> usize {
        self.chats.lock().unwrap().len()
    }

    pub fn server_messages(&self, chat_id: &str) -> Vec<Message> {
        self.details
            .lock()
            .unwrap()
            .get(chat_id)
            .map(|d| d.messages.clone())
            .unwrap_or_default()
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn next(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[async_trait]
impl DiaryApi for MockDiaryApi {
    async fn list_chats(&self) -> Result<Vec<Chat>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(DaybookError::network(502, "listing unavailable"));
        }
        Ok(self.chats.lock().unwrap().clone())
    }

    async fn create_chat(&self, date: ChatDate) -> Result<Message> {
        self.create_chat_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        if self.fail_create_chat.load(Ordering::SeqCst) {
            return Err(DaybookError::network(500, "could not start chat"));
        }

        let chat_id = self.next("chat-");
        let seed = Message {
            content: "How was your day?".to_string(),
            ..message(&chat_id, &self.next("m"), None, MessageRole::Counterpart)
        };
        self.chats.lock().unwrap().push(Chat {
            id: chat_id.clone(),
            user_id: "user-1".to_string(),
            root_message_id: seed.id.clone(),
            date,
            created_at: String::new(),
            updated_at: String::new(),
        });
        self.details.lock().unwrap().insert(
            chat_id,
            ChatDetail {
                messages: vec![seed.clone()],
                diary: None,
            },
        );
        Ok(seed)
    }

    async fn fetch_chat_detail(&self, chat_id: &str) -> Result<ChatDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        if self.fail_detail.load(Ordering::SeqCst) {
            return Err(DaybookError::network(500, "detail unavailable"));
        }
        self.details
            .lock()
            .unwrap()
            .get(chat_id)
            .cloned()
            .ok_or_else(|| DaybookError::not_found("Chat", chat_id))
    }

    async fn send_message(
        &self,
        chat_id: &str,
        parent_message_id: &str,
        content: &str,
    ) -> Result<Message> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        if self.expire_auth_on_send.load(Ordering::SeqCst) {
            return Err(DaybookError::auth_expired("token expired"));
        }
        if self.fail_send.load(Ordering::SeqCst) {
            return Err(DaybookError::transport("connection reset by peer"));
        }

        let user_message = Message {
            content: content.to_string(),
            ..message(chat_id, &self.next("u"), Some(parent_message_id), MessageRole::User)
        };
        let reply = Message {
            content: format!("You said: {}", content),
            ..message(chat_id, &self.next("r"), Some(&user_message.id), MessageRole::Counterpart)
        };

        if let Some(detail) = self.details.lock().unwrap().get_mut(chat_id) {
            detail.messages.push(user_message);
            detail.messages.push(reply.clone());
        }
        Ok(reply)
    }

    async fn create_diary(&self, chat_id: &str) -> Result<Diary> {
        self.create_diary_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        if self.fail_create_diary.load(Ordering::SeqCst) {
            return Err(DaybookError::network(503, "diary writer busy"));
        }

        let mut details = self.details.lock().unwrap();
        let detail = details
            .get_mut(chat_id)
            .ok_or_else(|| DaybookError::not_found("Chat", chat_id))?;
        if detail.diary.is_some() {
            return Err(DaybookError::network(409, "diary already exists"));
        }
        let created = diary(chat_id);
        detail.diary = Some(created.clone());
        Ok(created)
    }

    async fn update_diary(&self, revision: &DiaryRevision) -> Result<()> {
        self.update_diary_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        if self.fail_update_diary.load(Ordering::SeqCst) {
            return Err(DaybookError::network(500, "diary not saved"));
        }

        let mut details = self.details.lock().unwrap();
        let diary = details
            .values_mut()
            .filter_map(|d| d.diary.as_mut())
            .find(|d| d.id == revision.diary_id)
            .ok_or_else(|| DaybookError::not_found("Diary", revision.diary_id.clone()))?;
        diary.title = revision.title.clone();
        diary.body = revision.body.clone();
        Ok(())
    }
}
