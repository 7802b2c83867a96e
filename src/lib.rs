//! Coffre: a deadline-aware document-vault mirror
//!
//! This crate implements a retrieval agent for a single external document
//! vault: it logs a user in through the vendor's web flow, acquires the chain
//! of session tokens, walks the remote folder tree and mirrors every folder's
//! documents into a destination filesystem hierarchy within a fixed
//! wall-clock budget.

pub mod auth;
pub mod config;
pub mod mirror;
pub mod session;
pub mod storage;
pub mod vault;

use thiserror::Error;

/// Main error type for coffre operations
#[derive(Debug, Error)]
pub enum CoffreError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid credentials: the identity provider did not hand the session back")]
    InvalidCredentials,

    #[error("User action required: the account needs a one-time manual setup on the vendor site")]
    UserActionRequired,

    #[error("Vault service unavailable: {reason}")]
    ServiceUnavailable { reason: String },

    #[error("Login page did not contain a usable form: {0}")]
    LoginForm(String),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoffreError {
    /// Builds a `ServiceUnavailable` from anything printable
    pub fn vendor_down(reason: impl Into<String>) -> Self {
        CoffreError::ServiceUnavailable {
            reason: reason.into(),
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for coffre operations
pub type Result<T> = std::result::Result<T, CoffreError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use mirror::{sanitize_folder_name, Coordinator, MirrorReport};
pub use session::{SessionTokens, VaultSession};
pub use vault::{DocumentDescriptor, FolderNode};
