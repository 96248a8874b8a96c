//! Run summary and reporting

use std::path::PathBuf;
use std::time::Duration;

/// Summary of a batch run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of work items in the plan
    pub planned: usize,

    /// Exporter exited successfully
    pub succeeded: usize,

    /// Exporter failed or could not be started
    pub failed: usize,

    /// Items only logged because of dry-run mode
    pub simulated: usize,

    /// Items never reached because the run was interrupted
    pub skipped: usize,

    /// Wall-clock duration of the run
    pub duration: Duration,

    /// One record per failed item
    pub failures: Vec<ItemFailure>,

    /// Set when a shutdown signal stopped the run early
    pub interrupted: bool,
}

impl RunSummary {
    /// Create an empty summary for a plan of `planned` items
    pub fn new(planned: usize) -> Self {
        Self {
            planned,
            ..Self::default()
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a failed item
    pub fn add_failure(&mut self, failure: ItemFailure) {
        self.failed += 1;
        self.failures.push(failure);
    }

    /// Items the exporter was actually asked to handle
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Check if every attempted item succeeded and nothing was skipped
    pub fn is_successful(&self) -> bool {
        self.failed == 0 && !self.interrupted
    }

    /// Success rate over attempted items as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.attempted() == 0 {
            return 100.0;
        }
        (self.succeeded as f64 / self.attempted() as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            planned = self.planned,
            succeeded = self.succeeded,
            failed = self.failed,
            simulated = self.simulated,
            skipped = self.skipped,
            interrupted = self.interrupted,
            duration_secs = self.duration.as_secs_f64(),
            success_rate = format!("{:.2}%", self.success_rate()),
            "Batch completed"
        );

        for failure in &self.failures {
            tracing::warn!(
                output = %failure.output_dir.display(),
                message = %failure.message,
                "Failed work item"
            );
        }
    }
}

/// A work item the exporter did not complete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    /// Output directory of the item, which identifies band and window
    pub output_dir: PathBuf,

    /// What went wrong
    pub message: String,
}

impl ItemFailure {
    pub fn new(output_dir: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            message: message.into(),
        }
    }
}
