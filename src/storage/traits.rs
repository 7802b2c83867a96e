//! Persistence traits and error types
//!
//! This module defines the trait interface for the destination-side
//! persistence collaborator and its associated error types. The traversal
//! only ever talks to this trait; the concrete backend lives next door.

use crate::vault::DocumentDescriptor;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

/// Errors that can occur during persistence operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Download failed for {name}: {source}")]
    Download {
        name: String,
        source: reqwest::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for persistence operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Outcome of a directory creation
///
/// `AlreadyExists` is a benign outcome, not an error: directory creation is
/// idempotent and a concurrent creator winning the race is fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirOutcome {
    Created,
    AlreadyExists,
}

/// Trait for the destination-side persistence backend
#[async_trait]
pub trait Persistence {
    /// Creates `parent/name` if it does not already exist
    async fn create_directory(&self, parent: &Path, name: &str) -> StorageResult<DirOutcome>;

    /// Persists the given documents under `destination`
    ///
    /// The deadline is advisory: implementations should stop starting new
    /// downloads once it has passed, but an already-started transfer is not
    /// aborted. An empty document list is a valid call and a no-op.
    async fn save_documents(
        &self,
        documents: &[DocumentDescriptor],
        destination: &Path,
        deadline: Instant,
    ) -> StorageResult<()>;
}
