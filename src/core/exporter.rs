//! Exporter capability
//!
//! The image exporter is an external program. [`Exporter`] is the seam the
//! runner talks to, so the real process invocation ([`ProcessExporter`]) can
//! be swapped for [`DryRunExporter`] or a test double.

use crate::config::ExporterConfig;
use crate::core::plan::{RunSettings, WorkItem};
use crate::domain::{Band, BatchError, Result};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::PathBuf;
use tokio::process::Command;

/// Fully resolved arguments for one exporter invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub input_file: PathBuf,
    pub height: String,
    pub width: String,
    pub dataset: String,
    /// Window start, YYYY-MM-DD
    pub start_date: String,
    /// Window end, YYYY-MM-DD
    pub end_date: String,
    pub output_dir: PathBuf,
    pub band: Option<Band>,
}

impl ExportRequest {
    pub fn new(item: &WorkItem, settings: &RunSettings) -> Self {
        Self {
            input_file: settings.input_file.clone(),
            height: item.dimensions.height.clone(),
            width: item.dimensions.width.clone(),
            dataset: settings.dataset.clone(),
            start_date: item.window.start_iso(),
            end_date: item.window.end_iso(),
            output_dir: item.output_dir.clone(),
            band: item.band,
        }
    }

    /// Command-line flags understood by the exporter
    ///
    /// `-b` is only emitted when the request carries a band. Paths are
    /// passed as raw OS strings.
    pub fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-f".into(),
            self.input_file.clone().into_os_string(),
            "-he".into(),
            self.height.as_str().into(),
            "-w".into(),
            self.width.as_str().into(),
            "-d".into(),
            self.dataset.as_str().into(),
            "-s".into(),
            self.start_date.as_str().into(),
            "-e".into(),
            self.end_date.as_str().into(),
            "-o".into(),
            self.output_dir.clone().into_os_string(),
        ];
        if let Some(band) = self.band {
            args.push("-b".into());
            args.push(band.as_str().into());
        }
        args
    }
}

/// How a single invocation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    /// Exporter exited with status 0
    Succeeded,
    /// Exporter exited non-zero; `exit_code` is `None` when killed by a signal
    Failed { exit_code: Option<i32> },
    /// Nothing was executed
    DryRun,
}

/// Something that can export one work item
#[async_trait]
pub trait Exporter: Send + Sync {
    /// Runs the export and waits for it to finish
    ///
    /// # Errors
    ///
    /// Returns an error when the export could not be started at all.
    /// An export that started and failed is reported as
    /// [`ExportStatus::Failed`].
    async fn export(&self, request: &ExportRequest) -> Result<ExportStatus>;
}

/// Runs the external exporter as a child process
#[derive(Debug, Clone)]
pub struct ProcessExporter {
    program: String,
    leading_args: Vec<String>,
}

impl ProcessExporter {
    pub fn new(program: impl Into<String>, leading_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            leading_args,
        }
    }

    pub fn from_config(config: &ExporterConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }

    /// Full argument vector after the program name
    pub fn command_args(&self, request: &ExportRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.leading_args.iter().map(OsString::from).collect();
        args.extend(request.to_args());
        args
    }
}

#[async_trait]
impl Exporter for ProcessExporter {
    async fn export(&self, request: &ExportRequest) -> Result<ExportStatus> {
        let args = self.command_args(request);
        tracing::debug!(program = %self.program, args = ?args, "Spawning exporter");

        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .await
            .map_err(|e| {
                BatchError::Export(format!("Failed to run '{}': {}", self.program, e))
            })?;

        if status.success() {
            Ok(ExportStatus::Succeeded)
        } else {
            Ok(ExportStatus::Failed {
                exit_code: status.code(),
            })
        }
    }
}

/// Logs the command that would run instead of running it
#[derive(Debug, Clone)]
pub struct DryRunExporter {
    inner: ProcessExporter,
}

impl DryRunExporter {
    pub fn new(inner: ProcessExporter) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Exporter for DryRunExporter {
    async fn export(&self, request: &ExportRequest) -> Result<ExportStatus> {
        tracing::info!(
            program = %self.inner.program,
            args = %self
                .inner
                .command_args(request)
                .iter()
                .map(|arg| arg.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" "),
            "Dry run, exporter not invoked"
        );
        Ok(ExportStatus::DryRun)
    }
}
