//! On-disk storage helpers.

mod secure_toml;

pub use secure_toml::SecureTomlFile;
