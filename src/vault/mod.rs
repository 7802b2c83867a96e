//! Vault API surface: folder listing, document search, metadata enrichment
//!
//! This module talks to the vendor's JSON API once the session carries the
//! token chain:
//! - Folder tree skeleton (one call, access-token-authenticated)
//! - Per-folder document search (health-token-authenticated, single page)
//! - Projection of raw documents into download-ready descriptors
//! - Vendor-specific metadata for recognized document types

mod documents;
mod folders;
mod metadata;

pub use documents::{fetch_documents, DocumentDescriptor, DownloadRequest};
pub use folders::{list_folders, FolderNode};
pub use metadata::{
    month_bounds, payslip_metadata, DocumentMetadata, PAYSLIP_CATEGORY, RECOGNIZED_AUTHOR,
};
