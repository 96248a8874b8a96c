//! Configuration management for gee-batch.
//!
//! The per-run flags (`-f`, `-h`, `-w`, `-d`) come from the command line. The
//! settings that rarely change between runs live in an optional TOML file:
//!
//! - [`ExporterConfig`] - program and leading arguments of the exporter
//! - [`ScheduleConfig`] - date range swept in monthly windows
//! - [`OutputConfig`] - root of the output directory tree
//! - [`LoggingConfig`] - optional JSON file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [exporter]
//! program = "python"
//! args = ["${EXPORTER_HOME}/imageExporter.py"]
//!
//! [schedule]
//! start = "2023-01-01"
//! end = "2024-01-01"
//!
//! [output]
//! root = "data"
//! ```
//!
//! `${VAR_NAME}` placeholders are substituted from the environment, and
//! `GEE_BATCH_<SECTION>_<KEY>` variables override file values.
//!
//! ```rust,no_run
//! use gee_batch::config::resolve_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = resolve_config(None)?;
//! println!("Exporter: {}", config.exporter.program);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, resolve_config, DEFAULT_CONFIG_FILE};
pub use schema::{BatchConfig, ExporterConfig, LoggingConfig, OutputConfig, ScheduleConfig};
