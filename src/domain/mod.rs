//! Domain models and types for gee-batch.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Bands** ([`Band`]) and their output resolution ([`ResolutionClass`], [`Dimensions`])
//! - **Date windows** ([`DateWindow`]) generated by a [`MonthlySchedule`]
//! - **Error types** ([`BatchError`])
//! - **Result type alias** ([`Result`])
//!
//! # Example
//!
//! ```rust
//! use gee_batch::domain::{Band, MonthlySchedule};
//!
//! let schedule = MonthlySchedule::default();
//! assert_eq!(schedule.windows().count(), 12);
//! assert_eq!(Band::Nir.resolution_class().pixels(), 2048);
//! ```

pub mod band;
pub mod errors;
pub mod result;
pub mod window;

// Re-export commonly used types for convenience
pub use band::{Band, Dimensions, ResolutionClass};
pub use errors::BatchError;
pub use result::Result;
pub use window::{DateWindow, MonthlySchedule, MonthlyWindows};
