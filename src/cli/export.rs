//! Batch export command
//!
//! Plans the run, picks the exporter, drives the runner and reports the
//! outcome on stdout.

use super::{Cli, EXIT_CONFIG_ERROR, EXIT_FATAL, EXIT_INTERRUPTED};
use crate::config::BatchConfig;
use crate::core::exporter::{DryRunExporter, Exporter, ProcessExporter};
use crate::core::plan::{BatchPlan, Variant};
use crate::core::runner::BatchRunner;
use crate::core::summary::RunSummary;
use crate::domain::BatchError;
use std::sync::Arc;
use tokio::sync::watch;

/// Number of failures listed in the printed summary
const MAX_LISTED_FAILURES: usize = 10;

impl Cli {
    /// Execute the batch for `variant`
    ///
    /// Exporter failures do not change the exit code. A directory that
    /// cannot be created stops the batch with [`EXIT_FATAL`].
    pub async fn execute(
        &self,
        variant: Variant,
        config: BatchConfig,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let settings = self.run_settings();

        let schedule = match config.schedule.to_schedule() {
            Ok(schedule) => schedule,
            Err(e) => {
                tracing::error!(error = %e, "Invalid schedule");
                eprintln!("Configuration validation failed: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        if settings.has_requested_size() && !variant.honors_requested_size() {
            tracing::warn!(
                height = ?settings.height,
                width = ?settings.width,
                "-h/-w are replaced by each band's resolution (2048 for RGB/NIR/IR, 1024 otherwise)"
            );
        }
        if variant == Variant::SingleBand {
            tracing::info!("Running single-band layout, no -b passed (exporter default band)");
        }

        let plan = BatchPlan::build(variant, &settings, &schedule, &config.output.root);
        tracing::info!(
            items = plan.len(),
            start = %schedule.anchor(),
            end = %schedule.terminal(),
            root = %config.output.root.display(),
            dataset = %settings.dataset,
            input_file = %settings.input_file.display(),
            "Batch planned"
        );

        let process_exporter = ProcessExporter::from_config(&config.exporter);
        let exporter: Arc<dyn Exporter> = if self.dry_run {
            println!("DRY RUN - no directories will be created and the exporter will not run");
            Arc::new(DryRunExporter::new(process_exporter))
        } else {
            Arc::new(process_exporter)
        };

        let runner = BatchRunner::new(exporter, settings, self.dry_run, shutdown_signal);
        let summary = match runner.run(&plan).await {
            Ok(summary) => summary,
            Err(e @ BatchError::Directory { .. }) => {
                tracing::error!(error = %e, "Batch halted");
                eprintln!("Batch halted: {e}");
                return Ok(EXIT_FATAL);
            }
            Err(e) => return Err(e.into()),
        };

        print_summary(&summary);

        if summary.interrupted {
            println!("Batch interrupted; {} item(s) not started.", summary.skipped);
            return Ok(EXIT_INTERRUPTED);
        }

        // Exporter failures are reported but never fail the batch
        Ok(0)
    }
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("Batch Summary:");
    println!("  Planned: {}", summary.planned);
    println!("  Succeeded: {}", summary.succeeded);
    println!("  Failed: {}", summary.failed);
    if summary.simulated > 0 {
        println!("  Dry run: {}", summary.simulated);
    }
    if summary.skipped > 0 {
        println!("  Skipped: {}", summary.skipped);
    }
    println!(
        "  Duration: {:.2}s ({:.2} min)",
        summary.duration.as_secs_f64(),
        summary.duration.as_secs_f64() / 60.0
    );

    if summary.is_successful() {
        println!();
        println!("  All {} work item(s) completed.", summary.attempted() + summary.simulated);
    } else if !summary.failures.is_empty() {
        println!();
        println!("  Failed items:");
        for failure in summary.failures.iter().take(MAX_LISTED_FAILURES) {
            println!("    - {}: {}", failure.output_dir.display(), failure.message);
        }
        if summary.failures.len() > MAX_LISTED_FAILURES {
            println!(
                "    ... and {} more",
                summary.failures.len() - MAX_LISTED_FAILURES
            );
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BatchConfig;
    use tempfile::TempDir;

    fn config_in(root: &std::path::Path) -> BatchConfig {
        let mut config = BatchConfig::default();
        config.output.root = root.join("data");
        config.exporter.program = "/nonexistent/gee-batch-exporter".to_string();
        config.exporter.args = Vec::new();
        config
    }

    #[tokio::test]
    async fn test_dry_run_creates_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(temp_dir.path());
        let cli = Cli::parse_permissive(["export-monthly", "--dry-run"]);
        let (_tx, rx) = watch::channel(false);

        let code = cli.execute(Variant::SingleBand, config, rx).await.unwrap();

        assert_eq!(code, 0);
        assert!(!temp_dir.path().join("data").exists());
    }

    #[tokio::test]
    async fn test_missing_exporter_still_exits_zero() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(temp_dir.path());
        let cli = Cli::parse_permissive(["export-monthly"]);
        let (_tx, rx) = watch::channel(false);

        let code = cli.execute(Variant::SingleBand, config, rx).await.unwrap();

        assert_eq!(code, 0);
        assert!(temp_dir.path().join("data/20231201_20240101").is_dir());
    }

    #[tokio::test]
    async fn test_directory_failure_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("data"), b"file in the way").unwrap();
        let config = config_in(temp_dir.path());
        let cli = Cli::parse_permissive(["export-monthly"]);
        let (_tx, rx) = watch::channel(false);

        let code = cli.execute(Variant::SingleBand, config, rx).await.unwrap();

        assert_eq!(code, EXIT_FATAL);
    }

    #[tokio::test]
    async fn test_interrupted_exit_code() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(temp_dir.path());
        let cli = Cli::parse_permissive(["export-monthly", "--dry-run"]);
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();

        let code = cli.execute(Variant::SingleBand, config, rx).await.unwrap();

        assert_eq!(code, EXIT_INTERRUPTED);
    }
}
