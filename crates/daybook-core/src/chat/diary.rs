//! Diary entity.

use serde::{Deserialize, Serialize};

/// The diary produced from a chat's history.
///
/// At most one diary exists per chat, and its existence makes the chat
/// read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diary {
    #[serde(rename = "diary_id")]
    pub id: String,
    pub chat_id: String,
    pub title: String,
    pub body: String,
    /// Timestamp when the diary was created (ISO 8601 format)
    #[serde(rename = "created_dt")]
    pub created_at: String,
    /// Timestamp when the diary was last updated (ISO 8601 format)
    #[serde(rename = "updated_dt")]
    pub updated_at: String,
}

/// An edit to an existing diary's title and body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryRevision {
    pub diary_id: String,
    pub title: String,
    pub body: String,
}

impl Diary {
    /// Applies a revision in place, stamping `updated_at` with the current time.
    pub fn apply(&mut self, revision: &DiaryRevision) {
        self.title = revision.title.clone();
        self.body = revision.body.clone();
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}
