//! Deadline-aware folder tree traversal
//!
//! This module walks the remote folder tree depth-first and divides the
//! remaining wall-clock budget among the folders it has not started yet:
//! - Every visited node's documents are fetched exactly once, the synthetic
//!   root's through a self entry at the top level
//! - Siblings are ordered ascending by document count, so cheap folders
//!   finish quickly and the bulky ones inherit whatever time is left
//! - Before each sibling starts, the remaining time to the deadline is
//!   redivided equally among the not-yet-started siblings
//! - Failures on one folder are recorded and its siblings continue

use crate::mirror::sanitize::sanitize_folder_name;
use crate::session::VaultSession;
use crate::storage::{DirOutcome, Persistence};
use crate::vault::{fetch_documents, DocumentDescriptor, FolderNode};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::{Duration, Instant};

/// One folder the traversal could not fully process
#[derive(Debug)]
pub struct FolderFailure {
    /// Folder name as the vendor reports it; empty for the root
    pub folder: String,

    /// Destination path the folder was being mirrored to
    pub path: PathBuf,

    /// What went wrong
    pub error: String,
}

/// Aggregated outcome of one traversal
#[derive(Debug, Default)]
pub struct MirrorReport {
    /// Folders whose documents were listed and handed to persistence
    pub folders_visited: usize,

    /// Documents listed across all visited folders
    pub documents_listed: usize,

    /// Folders skipped after a fetch or directory failure
    pub failures: Vec<FolderFailure>,
}

impl MirrorReport {
    /// Whether every folder was processed without failure
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Computes one sibling's time share: an equal redivision of whatever time
/// is left among the not-yet-started siblings
///
/// Clamped: once the deadline has passed the share is zero, so the
/// structural traversal continues while persistence stops starting
/// downloads.
///
/// # Arguments
///
/// * `deadline` - The absolute deadline shared by the remaining siblings
/// * `now` - The moment this sibling starts
/// * `remaining` - How many siblings have not started yet, this one included
pub fn share_for(deadline: Instant, now: Instant, remaining: usize) -> Duration {
    if remaining == 0 {
        return Duration::ZERO;
    }
    deadline.saturating_duration_since(now) / remaining as u32
}

/// Walks the folder tree and drives persistence for every folder
pub struct Traverser<'a, P: Persistence> {
    session: &'a VaultSession,
    store: &'a P,
    report: MirrorReport,
}

impl<'a, P: Persistence> Traverser<'a, P> {
    /// Creates a traverser reading through `session` and writing through `store`
    pub fn new(session: &'a VaultSession, store: &'a P) -> Self {
        Self {
            session,
            store,
            report: MirrorReport::default(),
        }
    }

    /// Mirrors the tree under `node` into `destination`, within `deadline`
    ///
    /// `destination` must already exist; the traversal creates every level
    /// below it. Failures are aggregated into the report rather than aborting
    /// the remaining siblings.
    pub async fn traverse(&mut self, node: &FolderNode, destination: &Path, deadline: Instant) {
        self.traverse_level(node, destination, deadline).await;
    }

    /// Consumes the traverser and yields the aggregated report
    pub fn into_report(self) -> MirrorReport {
        self.report
    }

    /// Processes one tree level: fetch, order, redivide, persist, recurse
    fn traverse_level<'s>(
        &'s mut self,
        node: &'s FolderNode,
        destination: &'s Path,
        deadline: Instant,
    ) -> Pin<Box<dyn Future<Output = ()> + 's>> {
        Box::pin(async move {
            tracing::info!(
                "Deadline in {}s",
                deadline.saturating_duration_since(Instant::now()).as_secs()
            );

            // The root's own documents are fetched through a synthetic self
            // entry, like any child's
            let self_entry = FolderNode::root(vec![]);
            let mut entries: Vec<&FolderNode> = Vec::new();
            if node.is_root() {
                entries.push(&self_entry);
            }
            entries.extend(node.children.iter());

            tracing::info!("Getting the list of documents for {} folder(s)", entries.len());

            let mut fetched: Vec<(&FolderNode, Vec<DocumentDescriptor>)> = Vec::new();
            for entry in entries {
                let label = if entry.name.is_empty() {
                    "root"
                } else {
                    entry.name.as_str()
                };
                tracing::info!("{}...", label);

                match fetch_documents(self.session, &entry.id).await {
                    Ok(documents) => {
                        tracing::info!("{} document(s)", documents.len());
                        fetched.push((entry, documents));
                    }
                    Err(e) => {
                        tracing::error!("Failed to list documents of {}: {}", label, e);
                        self.report.failures.push(FolderFailure {
                            folder: entry.name.clone(),
                            path: destination.to_path_buf(),
                            error: e.to_string(),
                        });
                    }
                }
            }

            // Cheap folders first, so they cannot be starved by the big ones
            fetched.sort_by_key(|(_, documents)| documents.len());

            let total = fetched.len();
            for (index, (folder, documents)) in fetched.into_iter().enumerate() {
                let now = Instant::now();
                let share = share_for(deadline, now, total - index);
                let folder_deadline = now + share;

                tracing::info!(
                    "Mirroring {:?}: {}s left, {}s for this folder",
                    if folder.name.is_empty() {
                        "root"
                    } else {
                        folder.name.as_str()
                    },
                    deadline.saturating_duration_since(now).as_secs(),
                    share.as_secs()
                );

                let safe_name = sanitize_folder_name(&folder.name);
                let target = if safe_name.is_empty() {
                    destination.to_path_buf()
                } else {
                    destination.join(&safe_name)
                };

                if !safe_name.is_empty() {
                    match self.store.create_directory(destination, &safe_name).await {
                        Ok(DirOutcome::Created) => {}
                        Ok(DirOutcome::AlreadyExists) => {
                            tracing::debug!("{} already exists", target.display());
                        }
                        Err(e) => {
                            tracing::error!("Failed to create {}: {}", target.display(), e);
                            self.report.failures.push(FolderFailure {
                                folder: folder.name.clone(),
                                path: target,
                                error: e.to_string(),
                            });
                            continue;
                        }
                    }
                }

                self.report.folders_visited += 1;
                self.report.documents_listed += documents.len();

                if let Err(e) = self
                    .store
                    .save_documents(&documents, &target, folder_deadline)
                    .await
                {
                    tracing::error!("Failed to persist into {}: {}", target.display(), e);
                    self.report.failures.push(FolderFailure {
                        folder: folder.name.clone(),
                        path: target.clone(),
                        error: e.to_string(),
                    });
                }

                // The root's self entry has no name to descend into; its
                // documents were just handled in place
                if !folder.name.is_empty() {
                    self.traverse_level(folder, &target, folder_deadline).await;
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_is_an_equal_split() {
        let now = Instant::now();
        let deadline = now + Duration::from_secs(90);

        assert_eq!(share_for(deadline, now, 3), Duration::from_secs(30));
        assert_eq!(share_for(deadline, now, 1), Duration::from_secs(90));
    }

    #[test]
    fn test_shares_sum_to_the_remaining_budget() {
        // Handing out one share per sibling and advancing the clock by
        // exactly that share must consume the whole budget
        let now = Instant::now();
        let deadline = now + Duration::from_secs(120);
        let total = 4;

        let mut clock = now;
        let mut allocated = Duration::ZERO;
        for index in 0..total {
            let share = share_for(deadline, clock, total - index);
            allocated += share;
            // Each sibling consumes exactly its share
            clock += share;
        }

        assert_eq!(allocated, Duration::from_secs(120));
    }

    #[test]
    fn test_overrun_shrinks_later_shares() {
        let now = Instant::now();
        let deadline = now + Duration::from_secs(60);

        let first = share_for(deadline, now, 3);
        assert_eq!(first, Duration::from_secs(20));

        // The first sibling overran its 20s share by 10s
        let late = now + Duration::from_secs(30);
        let second = share_for(deadline, late, 2);
        assert_eq!(second, Duration::from_secs(15));
        assert!(second < first);
    }

    #[test]
    fn test_underrun_grows_later_shares() {
        let now = Instant::now();
        let deadline = now + Duration::from_secs(60);

        let first = share_for(deadline, now, 3);
        assert_eq!(first, Duration::from_secs(20));

        // The first sibling finished in 5s instead of 20s
        let early = now + Duration::from_secs(5);
        let second = share_for(deadline, early, 2);
        assert_eq!(second, Duration::from_millis(27_500));
        assert!(second > first);
    }

    #[test]
    fn test_past_deadline_clamps_to_zero() {
        let now = Instant::now();
        let deadline = now;

        assert_eq!(share_for(deadline, now + Duration::from_secs(5), 2), Duration::ZERO);
    }

    #[test]
    fn test_zero_remaining_is_zero() {
        let now = Instant::now();
        assert_eq!(share_for(now + Duration::from_secs(10), now, 0), Duration::ZERO);
    }

    #[test]
    fn test_report_is_clean_without_failures() {
        let report = MirrorReport::default();
        assert!(report.is_clean());
    }
}
