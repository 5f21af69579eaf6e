//! Infrastructure layer for Daybook.
//!
//! Concrete implementations of the collaborators the core depends on: the
//! HTTP backend client, credential storage, and local configuration.

pub mod api_client;
pub mod config_service;
pub mod credential_store;
pub mod http_diary_api;
pub mod paths;
pub mod storage;

pub use crate::api_client::ApiClient;
pub use crate::config_service::ConfigService;
pub use crate::credential_store::{FileCredentialStore, MemoryCredentialStore};
pub use crate::http_diary_api::HttpDiaryApi;
pub use crate::paths::DaybookPaths;
