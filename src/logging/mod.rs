//! Logging and observability
//!
//! Structured logging through `tracing`, with:
//! - Configurable log levels (`--log-level`, `RUST_LOG`)
//! - Optional JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use gee_batch::logging::init_logging;
//! use gee_batch::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of a work item
///
/// # Example
///
/// ```no_run
/// use gee_batch::log_item_start;
///
/// log_item_start!(3, 84, "data/RGB/20230301_20230401");
/// ```
#[macro_export]
macro_rules! log_item_start {
    ($position:expr, $total:expr, $output:expr) => {
        tracing::info!(
            item = $position,
            total = $total,
            output = %$output,
            "Exporting work item"
        );
    };
}

/// Log an exporter failure that the batch is skipping past
///
/// # Example
///
/// ```no_run
/// use gee_batch::log_item_failed;
///
/// log_item_failed!("data/20230101_20230201", "exited with status 1");
/// ```
#[macro_export]
macro_rules! log_item_failed {
    ($output:expr, $reason:expr) => {
        tracing::warn!(
            output = %$output,
            reason = %$reason,
            "Exporter failed, continuing with next item"
        );
    };
}

/// Log batch progress
///
/// # Example
///
/// ```no_run
/// use gee_batch::log_batch_progress;
///
/// log_batch_progress!(12, 84);
/// ```
#[macro_export]
macro_rules! log_batch_progress {
    ($current:expr, $total:expr) => {
        tracing::debug!(
            current = $current,
            total = $total,
            progress_pct = ($current as f64 / $total as f64 * 100.0),
            "Batch progress"
        );
    };
}
