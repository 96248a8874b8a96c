//! Integration tests for the batch runner
//!
//! The exporter is replaced with in-process doubles so these tests can check
//! ordering, failure handling, directory creation and interruption without
//! an external program.

use async_trait::async_trait;
use gee_batch::core::exporter::{ExportRequest, ExportStatus, Exporter};
use gee_batch::core::plan::{BatchPlan, RunSettings, Variant};
use gee_batch::core::runner::BatchRunner;
use gee_batch::domain::{BatchError, MonthlySchedule, Result};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::sync::watch;

/// Records every request and answers with a fixed status
struct RecordingExporter {
    requests: Mutex<Vec<ExportRequest>>,
    status: ExportStatus,
}

impl RecordingExporter {
    fn new(status: ExportStatus) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            status,
        })
    }

    fn requests(&self) -> Vec<ExportRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Exporter for RecordingExporter {
    async fn export(&self, request: &ExportRequest) -> Result<ExportStatus> {
        assert!(
            request.output_dir.is_dir(),
            "directory must exist before the exporter runs"
        );
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.status.clone())
    }
}

/// Cannot even start
struct UnstartableExporter;

#[async_trait]
impl Exporter for UnstartableExporter {
    async fn export(&self, _request: &ExportRequest) -> Result<ExportStatus> {
        Err(BatchError::Export("No such file or directory".to_string()))
    }
}

/// Requests shutdown while the n-th item is being exported
struct InterruptingExporter {
    calls: Mutex<usize>,
    interrupt_after: usize,
    shutdown_tx: watch::Sender<bool>,
}

#[async_trait]
impl Exporter for InterruptingExporter {
    async fn export(&self, _request: &ExportRequest) -> Result<ExportStatus> {
        let mut calls = self.calls.lock().unwrap();
        *calls += 1;
        if *calls == self.interrupt_after {
            let _ = self.shutdown_tx.send(true);
        }
        Ok(ExportStatus::Succeeded)
    }
}

fn plan_in(variant: Variant, root: &Path) -> BatchPlan {
    BatchPlan::build(
        variant,
        &RunSettings::default(),
        &MonthlySchedule::default(),
        root,
    )
}

fn runner(exporter: Arc<dyn Exporter>) -> (BatchRunner, watch::Sender<bool>) {
    let (tx, rx) = watch::channel(false);
    (
        BatchRunner::new(exporter, RunSettings::default(), false, rx),
        tx,
    )
}

#[tokio::test]
async fn test_failing_exporter_does_not_stop_the_batch() {
    let temp_dir = TempDir::new().unwrap();
    let plan = plan_in(Variant::BandSweep, &temp_dir.path().join("data"));
    let exporter = RecordingExporter::new(ExportStatus::Failed { exit_code: Some(1) });
    let (runner, _tx) = runner(exporter.clone());

    let summary = runner.run(&plan).await.unwrap();

    assert_eq!(exporter.requests().len(), 84);
    assert_eq!(summary.failed, 84);
    assert_eq!(summary.succeeded, 0);
    assert_eq!(summary.failures.len(), 84);
    assert!(summary.failures[0].message.contains("status 1"));
}

#[tokio::test]
async fn test_unstartable_exporter_does_not_stop_the_batch() {
    let temp_dir = TempDir::new().unwrap();
    let plan = plan_in(Variant::SingleBand, &temp_dir.path().join("data"));
    let (runner, _tx) = runner(Arc::new(UnstartableExporter));

    let summary = runner.run(&plan).await.unwrap();

    assert_eq!(summary.failed, 12);
    assert!(summary.failures[11].message.contains("No such file"));
}

#[tokio::test]
async fn test_requests_follow_plan_order() {
    let temp_dir = TempDir::new().unwrap();
    let plan = plan_in(Variant::BandSweep, &temp_dir.path().join("data"));
    let exporter = RecordingExporter::new(ExportStatus::Succeeded);
    let (runner, _tx) = runner(exporter.clone());

    let summary = runner.run(&plan).await.unwrap();
    let requests = exporter.requests();

    assert_eq!(summary.succeeded, 84);
    assert!(summary.is_successful());
    for (request, item) in requests.iter().zip(&plan.items) {
        assert_eq!(request.output_dir, item.output_dir);
        assert_eq!(request.band, item.band);
        assert_eq!(request.height, item.dimensions.height);
    }
    assert_eq!(requests[0].start_date, "2023-01-01");
    assert_eq!(requests[0].end_date, "2023-02-01");
    assert_eq!(requests[0].dataset, "sentinel");
}

#[tokio::test]
async fn test_rerun_over_existing_directories() {
    let temp_dir = TempDir::new().unwrap();
    let plan = plan_in(Variant::SingleBand, &temp_dir.path().join("data"));

    for _ in 0..2 {
        let exporter = RecordingExporter::new(ExportStatus::Succeeded);
        let (runner, _tx) = runner(exporter.clone());
        let summary = runner.run(&plan).await.unwrap();
        assert_eq!(summary.succeeded, 12);
    }

    for item in &plan.items {
        assert!(item.output_dir.is_dir());
    }
}

#[tokio::test]
async fn test_directory_failure_halts_the_batch() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("data");
    std::fs::write(&root, b"not a directory").unwrap();
    let plan = plan_in(Variant::SingleBand, &root);
    let exporter = RecordingExporter::new(ExportStatus::Succeeded);
    let (runner, _tx) = runner(exporter.clone());

    let err = runner.run(&plan).await.unwrap_err();

    assert!(matches!(err, BatchError::Directory { .. }));
    assert!(exporter.requests().is_empty());
}

#[tokio::test]
async fn test_shutdown_finishes_current_item_and_skips_the_rest() {
    let temp_dir = TempDir::new().unwrap();
    let plan = plan_in(Variant::SingleBand, &temp_dir.path().join("data"));
    let (tx, rx) = watch::channel(false);
    let exporter = Arc::new(InterruptingExporter {
        calls: Mutex::new(0),
        interrupt_after: 4,
        shutdown_tx: tx,
    });
    let runner = BatchRunner::new(exporter, RunSettings::default(), false, rx);

    let summary = runner.run(&plan).await.unwrap();

    assert!(summary.interrupted);
    assert_eq!(summary.succeeded, 4);
    assert_eq!(summary.skipped, 8);
    assert!(!summary.is_successful());
}

#[tokio::test]
async fn test_dry_run_skips_directory_creation() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("data");
    let plan = plan_in(Variant::SingleBand, &root);
    let (_tx, rx) = watch::channel(false);
    let exporter = gee_batch::core::exporter::DryRunExporter::new(
        gee_batch::core::exporter::ProcessExporter::new("python", vec!["imageExporter.py".into()]),
    );
    let runner = BatchRunner::new(Arc::new(exporter), RunSettings::default(), true, rx);

    let summary = runner.run(&plan).await.unwrap();

    assert_eq!(summary.simulated, 12);
    assert_eq!(summary.attempted(), 0);
    assert!(!root.exists());
}
