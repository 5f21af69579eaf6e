//! Chat message types.

use serde::{Deserialize, Serialize};

/// Which participant authored a message.
///
/// Encoded on the wire as an integer: `0` for the counterpart (AI), `1` for
/// the user. Rendering is decided by this tag, never by message position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MessageRole {
    /// Message from the AI counterpart.
    Counterpart,
    /// Message from the user.
    User,
}

impl From<MessageRole> for u8 {
    fn from(role: MessageRole) -> Self {
        match role {
            MessageRole::Counterpart => 0,
            MessageRole::User => 1,
        }
    }
}

impl TryFrom<u8> for MessageRole {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Counterpart),
            1 => Ok(Self::User),
            other => Err(format!("unknown message role: {}", other)),
        }
    }
}

/// A single message in a chat's message chain.
///
/// `parent_id` is `None` only for the chat's root message; every other
/// message points at the message directly before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "message_id")]
    pub id: String,
    pub chat_id: String,
    #[serde(rename = "parent_message_id", default)]
    pub parent_id: Option<String>,
    pub content: String,
    pub role: MessageRole,
    /// Timestamp when the message was created (ISO 8601 format)
    #[serde(rename = "created_dt")]
    pub created_at: String,
    /// Timestamp when the message was last updated (ISO 8601 format)
    #[serde(rename = "updated_dt")]
    pub updated_at: String,
}

impl Message {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_from_user(&self) -> bool {
        self.role == MessageRole::User
    }

    /// Compares everything except the timestamps.
    pub fn same_content(&self, other: &Message) -> bool {
        self.id == other.id
            && self.chat_id == other.chat_id
            && self.parent_id == other.parent_id
            && self.content == other.content
            && self.role == other.role
    }
}
