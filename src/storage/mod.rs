//! Destination-side persistence
//!
//! The traversal delegates all destination I/O to the [`Persistence`] trait:
//! idempotent directory creation and best-effort, deadline-bounded document
//! saving. [`FsStore`] is the filesystem implementation.

mod fs;
mod traits;

pub use fs::FsStore;
pub use traits::{DirOutcome, Persistence, StorageError, StorageResult};
