//! Configuration schema types
//!
//! Every section is optional in the TOML file; a missing section falls back
//! to the defaults below, which reproduce the stock batch layout.

use crate::domain::window::{default_anchor, default_terminal};
use crate::domain::{MonthlySchedule, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main gee-batch configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchConfig {
    /// External exporter invocation
    #[serde(default)]
    pub exporter: ExporterConfig,

    /// Date range swept by the batch
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Output directory layout
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BatchConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.exporter.validate()?;
        self.schedule.validate()?;
        self.output.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// External exporter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Program to execute
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments placed before the per-item flags (typically the script path)
    #[serde(default = "default_program_args")]
    pub args: Vec<String>,
}

impl ExporterConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.program.trim().is_empty() {
            return Err("exporter.program cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_program_args(),
        }
    }
}

/// Date range configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// First window start (YYYY-MM-DD)
    #[serde(default = "default_anchor")]
    pub start: NaiveDate,

    /// Terminal date; generation stops once a window starts here (YYYY-MM-DD)
    #[serde(default = "default_terminal")]
    pub end: NaiveDate,
}

impl ScheduleConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.start >= self.end {
            return Err(format!(
                "schedule.start ({}) must be before schedule.end ({})",
                self.start, self.end
            ));
        }
        Ok(())
    }

    /// Builds the monthly schedule for this range
    pub fn to_schedule(&self) -> Result<MonthlySchedule> {
        MonthlySchedule::new(self.start, self.end)
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            start: default_anchor(),
            end: default_terminal(),
        }
    }
}

/// Output layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root under which band and window directories are created
    #[serde(default = "default_output_root")]
    pub root: PathBuf,
}

impl OutputConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.root.as_os_str().is_empty() {
            return Err("output.root cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: default_output_root(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when file logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_program() -> String {
    "python".to_string()
}

fn default_program_args() -> Vec<String> {
    vec!["imageExporter.py".to_string()]
}

fn default_output_root() -> PathBuf {
    PathBuf::from("data")
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
