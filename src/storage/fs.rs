//! Filesystem persistence backend
//!
//! Mirrors documents into the destination hierarchy: downloads each document
//! through its descriptor's download request (the shared-cookie-jar client is
//! required, bearer auth alone does not authorize content retrieval), writes
//! the body under the derived display name and drops a JSON sidecar next to
//! files that carry vendor metadata.

use crate::storage::traits::{DirOutcome, Persistence, StorageError, StorageResult};
use crate::vault::DocumentDescriptor;
use async_trait::async_trait;
use reqwest::Client;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Filesystem-backed persistence
///
/// Holds a clone of the session's HTTP client so downloads go through the
/// same cookie jar the login flow populated.
pub struct FsStore {
    client: Client,
}

impl FsStore {
    /// Creates a store downloading through the given client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Downloads one document and writes it under `destination`
    async fn save_one(
        &self,
        document: &DocumentDescriptor,
        destination: &Path,
    ) -> StorageResult<PathBuf> {
        let request = &document.download_request;
        let bytes = self
            .client
            .post(request.url.clone())
            .form(&request.form)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|source| StorageError::Download {
                name: document.display_name.clone(),
                source,
            })?
            .bytes()
            .await
            .map_err(|source| StorageError::Download {
                name: document.display_name.clone(),
                source,
            })?;

        let path = destination.join(&document.display_name);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|source| StorageError::WriteFile {
                path: path.clone(),
                source,
            })?;

        if let Some(metadata) = &document.metadata {
            let sidecar = destination.join(format!("{}.metadata.json", document.display_name));
            let body = serde_json::to_vec_pretty(metadata)?;
            tokio::fs::write(&sidecar, body)
                .await
                .map_err(|source| StorageError::WriteFile {
                    path: sidecar.clone(),
                    source,
                })?;
        }

        Ok(path)
    }
}

#[async_trait]
impl Persistence for FsStore {
    async fn create_directory(&self, parent: &Path, name: &str) -> StorageResult<DirOutcome> {
        let path = parent.join(name);
        match tokio::fs::create_dir(&path).await {
            Ok(()) => Ok(DirOutcome::Created),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(DirOutcome::AlreadyExists),
            Err(source) => Err(StorageError::CreateDirectory { path, source }),
        }
    }

    async fn save_documents(
        &self,
        documents: &[DocumentDescriptor],
        destination: &Path,
        deadline: Instant,
    ) -> StorageResult<()> {
        let mut saved = 0usize;

        for (index, document) in documents.iter().enumerate() {
            if Instant::now() >= deadline {
                tracing::warn!(
                    "Deadline passed, skipping {} remaining download(s) in {}",
                    documents.len() - index,
                    destination.display()
                );
                break;
            }

            match self.save_one(document, destination).await {
                Ok(path) => {
                    tracing::debug!("Saved {}", path.display());
                    saved += 1;
                }
                Err(e) => {
                    // One broken document does not stop the rest of the folder
                    tracing::error!("Failed to save {}: {}", document.display_name, e);
                }
            }
        }

        tracing::info!(
            "Saved {}/{} document(s) into {}",
            saved,
            documents.len(),
            destination.display()
        );
        Ok(())
    }
}
