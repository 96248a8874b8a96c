// gee-batch - monthly satellite image export batches
// Copyright (c) 2025 gee-batch Contributors
// Licensed under the MIT License

//! `export-bands`: every band, every monthly window.

use gee_batch::cli;
use gee_batch::core::plan::Variant;
use std::process;

#[tokio::main]
async fn main() {
    let exit_code = cli::run(Variant::BandSweep).await;
    process::exit(exit_code);
}
