// gee-batch - monthly satellite image export batches
// Copyright (c) 2025 gee-batch Contributors
// Licensed under the MIT License

//! # gee-batch
//!
//! gee-batch runs an external satellite image exporter once per
//! (spectral band, monthly date window) pair and arranges the results in a
//! directory tree keyed by band and window.
//!
//! ## Overview
//!
//! The library provides:
//! - **Planning** of work items from a band set and a monthly schedule
//! - **Preparing** one output directory per work item
//! - **Invoking** the exporter through the [`core::exporter::Exporter`] seam
//! - **Reporting** a run summary
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Planning, exporter invocation, runner and summary
//! - [`domain`] - Bands, date windows and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Layouts
//!
//! Two binaries share the library:
//!
//! - `export-bands` sweeps RGB, RE, RE4, NIR, SWIR1, SWIR2 and IR, writing to
//!   `data/{band}/{start}_{end}`. RGB, NIR and IR are exported at 2048x2048,
//!   the other bands at 1024x1024, whatever `-h`/`-w` say.
//! - `export-monthly` runs a single implicit band at the requested size
//!   (1024x1024 by default), writing to `data/{start}_{end}`.
//!
//! ## Quick Start
//!
//! ```rust
//! use gee_batch::core::plan::{BatchPlan, RunSettings, Variant};
//! use gee_batch::domain::MonthlySchedule;
//! use std::path::Path;
//!
//! let plan = BatchPlan::build(
//!     Variant::BandSweep,
//!     &RunSettings::default(),
//!     &MonthlySchedule::default(),
//!     Path::new("data"),
//! );
//! assert_eq!(plan.len(), 84);
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`domain::Result`], whose error type is
//! [`domain::BatchError`]. Exporter failures are not errors: they are
//! recorded in the [`core::summary::RunSummary`] and the batch moves on.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
