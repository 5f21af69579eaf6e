//! Chat domain model.

use super::diary::Diary;
use super::message::Message;
use crate::error::{DaybookError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar date used to key chats (`YYYY-MM-DD`, no time component).
///
/// The backend sometimes returns the date with a time suffix
/// (`2024-03-01T00:00:00`); parsing keeps only the date part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChatDate(NaiveDate);

impl ChatDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today's date in the local timezone.
    pub fn today() -> Self {
        Self(chrono::Local::now().date_naive())
    }
}

impl fmt::Display for ChatDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for ChatDate {
    type Err = DaybookError;

    fn from_str(s: &str) -> Result<Self> {
        let date_part = s.trim().split('T').next().unwrap_or_default();
        NaiveDate::parse_from_str(date_part, DATE_FORMAT)
            .map(Self)
            .map_err(|e| DaybookError::Serialization {
                format: "date".to_string(),
                message: format!("invalid chat date '{}': {}", s, e),
            })
    }
}

impl Serialize for ChatDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ChatDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A day-scoped conversation between the user and the counterpart.
///
/// There is at most one chat per (user, date). A chat is sealed iff a
/// [`Diary`] exists for it; that status is not stored on the chat itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    #[serde(rename = "chat_id")]
    pub id: String,
    pub user_id: String,
    pub root_message_id: String,
    #[serde(rename = "chat_date")]
    pub date: ChatDate,
    /// Timestamp when the chat was created (ISO 8601 format)
    #[serde(rename = "created_dt")]
    pub created_at: String,
    /// Timestamp when the chat was last updated (ISO 8601 format)
    #[serde(rename = "updated_dt")]
    pub updated_at: String,
}

/// Full history of a chat as returned by the combined detail fetch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChatDetail {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub diary: Option<Diary>,
}
