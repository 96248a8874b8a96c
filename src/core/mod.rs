//! Core batch logic for gee-batch.
//!
//! # Modules
//!
//! - [`plan`] - Variants, run settings and pure work-item planning
//! - [`exporter`] - The [`Exporter`](exporter::Exporter) seam and its implementations
//! - [`runner`] - Sequential execution of a plan
//! - [`summary`] - Run summary and reporting
//!
//! # Workflow
//!
//! 1. **Plan**: expand bands x monthly windows into [`WorkItem`](plan::WorkItem)s
//! 2. **Prepare**: create each item's output directory
//! 3. **Export**: invoke the exporter and wait for it
//! 4. **Report**: summarize successes and failures
//!
//! # Example
//!
//! ```rust,no_run
//! use gee_batch::core::exporter::ProcessExporter;
//! use gee_batch::core::plan::{BatchPlan, RunSettings, Variant};
//! use gee_batch::core::runner::BatchRunner;
//! use gee_batch::domain::MonthlySchedule;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = RunSettings::default();
//! let plan = BatchPlan::build(
//!     Variant::SingleBand,
//!     &settings,
//!     &MonthlySchedule::default(),
//!     Path::new("data"),
//! );
//!
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! let exporter = Arc::new(ProcessExporter::new("python", vec!["imageExporter.py".into()]));
//! let runner = BatchRunner::new(exporter, settings, false, shutdown_rx);
//!
//! let summary = runner.run(&plan).await?;
//! println!("Succeeded: {}, Failed: {}", summary.succeeded, summary.failed);
//! # Ok(())
//! # }
//! ```

pub mod exporter;
pub mod plan;
pub mod runner;
pub mod summary;

pub use exporter::{DryRunExporter, ExportRequest, ExportStatus, Exporter, ProcessExporter};
pub use plan::{BatchPlan, RunSettings, Variant, WorkItem};
pub use runner::{ensure_output_dir, BatchRunner};
pub use summary::{ItemFailure, RunSummary};
