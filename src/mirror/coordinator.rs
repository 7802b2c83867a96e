//! Mirror run orchestration
//!
//! The coordinator owns one run end to end: it builds the session, drives
//! login and the token chain, fetches the folder tree skeleton and hands it
//! to the traversal, then reports the aggregated outcome. Authentication and
//! token failures are fatal to the run; everything after that point follows
//! the traversal's skip-and-continue policy.

use crate::auth::{login, Credentials};
use crate::config::Config;
use crate::mirror::scheduler::{MirrorReport, Traverser};
use crate::session::{acquire_tokens, VaultSession};
use crate::storage::FsStore;
use crate::vault::list_folders;
use crate::Result;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Drives one complete mirror run
pub struct Coordinator {
    config: Config,
    session: VaultSession,
    deadline: Instant,
}

impl Coordinator {
    /// Creates a coordinator for the given configuration
    ///
    /// The run deadline is fixed here, a constant offset from construction,
    /// and threaded down through the traversal as a shrinking budget.
    pub fn new(config: Config) -> Result<Self> {
        let session = VaultSession::new(&config.vault)?;
        let deadline = Instant::now() + Duration::from_secs(config.run.overall_budget_secs);

        Ok(Self {
            config,
            session,
            deadline,
        })
    }

    /// Runs login, token acquisition and the full traversal
    pub async fn run(mut self) -> Result<MirrorReport> {
        let credentials = Credentials {
            email: &self.config.account.email,
            password: &self.config.account.password,
        };
        login(&self.session, &credentials).await?;

        acquire_tokens(&mut self.session, &self.config.account.password).await?;

        let root = list_folders(&self.session).await?;

        let destination = PathBuf::from(&self.config.output.destination_path);
        tokio::fs::create_dir_all(&destination).await?;

        let store = FsStore::new(self.session.client().clone());
        let mut traverser = Traverser::new(&self.session, &store);
        traverser.traverse(&root, &destination, self.deadline).await;
        let report = traverser.into_report();

        tracing::info!(
            "Mirror finished: {} folder(s), {} document(s) listed, {} failure(s)",
            report.folders_visited,
            report.documents_listed,
            report.failures.len()
        );

        Ok(report)
    }
}

/// Runs one complete mirror operation
///
/// This is the main entry point: build the session, authenticate, acquire
/// the token chain, list the folder tree and mirror it into the destination
/// within the configured budget.
///
/// # Arguments
///
/// * `config` - The run configuration
///
/// # Returns
///
/// * `Ok(MirrorReport)` - The traversal completed; the report may still
///   carry per-folder failures
/// * `Err(CoffreError)` - Authentication, token chain or setup failed
pub async fn run_mirror(config: Config) -> Result<MirrorReport> {
    Coordinator::new(config)?.run().await
}
