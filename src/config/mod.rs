//! Configuration module for coffre
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files: the vault account, the endpoint base URLs, the destination path and
//! the overall run budget.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{AccountConfig, Config, OutputConfig, RunConfig, VaultConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
