//! Mirroring logic: traversal scheduling and run orchestration
//!
//! This module contains the core mirroring machinery:
//! - Folder-name sanitization shared by directory creation and path building
//! - The deadline-aware depth-first traversal with per-level time redivision
//! - The coordinator driving login, tokens, listing and traversal

mod coordinator;
mod sanitize;
mod scheduler;

pub use coordinator::{run_mirror, Coordinator};
pub use sanitize::sanitize_folder_name;
pub use scheduler::{share_for, FolderFailure, MirrorReport, Traverser};
