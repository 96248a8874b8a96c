//! Batch runner - executes a plan one work item at a time
//!
//! Each item is fully processed (directory, exporter invocation, wait)
//! before the next starts. Exporter failures are recorded and skipped past.
//! A directory that cannot be created stops the whole batch.

use crate::core::exporter::{ExportRequest, ExportStatus, Exporter};
use crate::core::plan::{BatchPlan, RunSettings};
use crate::core::summary::{ItemFailure, RunSummary};
use crate::domain::{BatchError, Result};
use crate::{log_batch_progress, log_item_failed, log_item_start};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Sequential batch runner
pub struct BatchRunner {
    exporter: Arc<dyn Exporter>,
    settings: RunSettings,
    dry_run: bool,
    shutdown_signal: watch::Receiver<bool>,
}

impl BatchRunner {
    /// Create a new runner
    ///
    /// In dry-run mode no directories are created; pair it with a
    /// [`DryRunExporter`](crate::core::exporter::DryRunExporter).
    pub fn new(
        exporter: Arc<dyn Exporter>,
        settings: RunSettings,
        dry_run: bool,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Self {
        Self {
            exporter,
            settings,
            dry_run,
            shutdown_signal,
        }
    }

    fn is_shutdown_requested(&self) -> bool {
        *self.shutdown_signal.borrow()
    }

    /// Run every item of the plan in order
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Directory`] when an output directory cannot be
    /// created. Exporter failures never end the run; they are counted in
    /// the returned summary.
    pub async fn run(&self, plan: &BatchPlan) -> Result<RunSummary> {
        let start_time = Instant::now();
        let total = plan.len();
        let mut summary = RunSummary::new(total);

        tracing::info!(
            variant = ?plan.variant,
            items = total,
            dry_run = self.dry_run,
            "Starting batch"
        );

        for (index, item) in plan.items.iter().enumerate() {
            if self.is_shutdown_requested() {
                summary.skipped = total - index;
                summary.interrupted = true;
                tracing::warn!(
                    completed = index,
                    skipped = summary.skipped,
                    "Shutdown requested, stopping before next item"
                );
                break;
            }

            let output = item.output_dir.display();
            log_item_start!(index + 1, total, output);

            if !self.dry_run {
                ensure_output_dir(&item.output_dir).await?;
            }

            let request = ExportRequest::new(item, &self.settings);
            match self.exporter.export(&request).await {
                Ok(ExportStatus::Succeeded) => summary.succeeded += 1,
                Ok(ExportStatus::DryRun) => summary.simulated += 1,
                Ok(ExportStatus::Failed { exit_code }) => {
                    let reason = match exit_code {
                        Some(code) => format!("exporter exited with status {code}"),
                        None => "exporter terminated by signal".to_string(),
                    };
                    log_item_failed!(output, reason);
                    summary.add_failure(ItemFailure::new(&item.output_dir, reason));
                }
                Err(e) => {
                    log_item_failed!(output, e);
                    summary.add_failure(ItemFailure::new(&item.output_dir, e.to_string()));
                }
            }

            log_batch_progress!(index + 1, total);
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }
}

/// Create `path` and any missing parents; an existing directory is fine
///
/// # Errors
///
/// Returns [`BatchError::Directory`] if the directory cannot be created.
pub async fn ensure_output_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| BatchError::directory(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_ensure_output_dir_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data/NIR/20230301_20230401");

        ensure_output_dir(&path).await.unwrap();
        ensure_output_dir(&path).await.unwrap();

        assert!(path.is_dir());
    }

    #[tokio::test]
    async fn test_ensure_output_dir_fails_under_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("data");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let err = ensure_output_dir(&blocker.join("20230101_20230201"))
            .await
            .unwrap_err();
        assert!(matches!(err, BatchError::Directory { .. }));
    }
}
