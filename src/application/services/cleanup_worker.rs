//! Background removal of local files after delete and clear-all.
//!
//! Operations enqueue a [`CleanupJob`] once the saved set has been mutated; the worker
//! removes the files detached from the caller. A failed removal is logged and never
//! rolls back the state change.

use std::path::PathBuf;
use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::domain::entities::ImageId;

use super::local_image_cache::{LocalDeletion, LocalImageCache};

/// File removal work produced by a successful delete or clear-all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupJob {
    /// Remove the local copy of one deleted image.
    Remove {
        /// Deleted image.
        image_id: ImageId,
        /// Local path recorded before the deletion.
        path: PathBuf,
    },
    /// Remove every local copy that existed before a clear-all.
    RemoveMany {
        /// Local paths recorded before the clear.
        paths: Vec<PathBuf>,
    },
}

impl CleanupJob {
    /// Returns the paths this job removes.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        match self {
            Self::Remove { path, .. } => vec![path.clone()],
            Self::RemoveMany { paths } => paths.clone(),
        }
    }
}

/// Outcome of removing one path, published when reports are enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupReport {
    /// Path the worker tried to remove.
    pub path: PathBuf,
    /// What happened.
    pub outcome: LocalDeletion,
}

/// Sending half used by operations to schedule cleanup.
#[derive(Debug, Clone)]
pub struct CleanupQueue {
    tx: mpsc::UnboundedSender<CleanupJob>,
}

impl CleanupQueue {
    /// Schedules a job. Logs and drops the job if the worker has stopped.
    pub fn enqueue(&self, job: CleanupJob) {
        debug!(paths = job.paths().len(), "Queueing local file cleanup");
        if let Err(e) = self.tx.send(job) {
            error!("Failed to queue cleanup job: {}", e);
        }
    }
}

/// Consumes cleanup jobs until every [`CleanupQueue`] is dropped.
pub struct CleanupWorker {
    cache: Arc<LocalImageCache>,
    rx: mpsc::UnboundedReceiver<CleanupJob>,
    report_tx: Option<mpsc::UnboundedSender<CleanupReport>>,
}

impl std::fmt::Debug for CleanupWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CleanupWorker")
            .field("reports", &self.report_tx.is_some())
            .finish_non_exhaustive()
    }
}

impl CleanupWorker {
    /// Creates a worker and its queue.
    #[must_use]
    pub fn new(cache: Arc<LocalImageCache>) -> (Self, CleanupQueue) {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = Self {
            cache,
            rx,
            report_tx: None,
        };
        (worker, CleanupQueue { tx })
    }

    /// Publishes a report for every path the worker handles.
    #[must_use]
    pub fn with_reports(mut self, report_tx: mpsc::UnboundedSender<CleanupReport>) -> Self {
        self.report_tx = Some(report_tx);
        self
    }

    /// Spawns the worker loop on the current runtime.
    #[must_use]
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Runs until the queue closes.
    pub async fn run(mut self) {
        debug!("Cleanup worker started");
        while let Some(job) = self.rx.recv().await {
            self.process(job).await;
        }
        debug!("Cleanup worker stopped");
    }

    async fn process(&self, job: CleanupJob) {
        if let CleanupJob::Remove { image_id, path } = &job {
            debug!(id = %image_id, path = %path.display(), "Removing local copy of deleted image");
        }

        let paths = job.paths();
        let total = paths.len();
        let outcomes = join_all(paths.into_iter().map(|path| async move {
            let outcome = self.cache.delete_local(&path).await;
            (path, outcome)
        }))
        .await;

        let mut failed = 0usize;
        for (path, outcome) in outcomes {
            if let LocalDeletion::Failed(reason) = &outcome {
                failed += 1;
                warn!(path = %path.display(), error = %reason, "Local file cleanup failed");
            }
            if let Some(tx) = &self.report_tx {
                let _ = tx.send(CleanupReport { path, outcome });
            }
        }

        info!(total, failed, "Local file cleanup finished");
    }
}
