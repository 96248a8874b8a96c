//! CLI interface and argument parsing
//!
//! Both binaries share one flag set (`-f`, `-h`, `-w`, `-d` plus a few long
//! options). Parsing is permissive: unknown flags and positional arguments
//! are dropped by [`retain_known_flags`] before clap sees them, and a flag
//! given twice keeps its last value.

pub mod export;

use crate::config::resolve_config;
use crate::core::plan::{RunSettings, Variant, DEFAULT_DATASET, DEFAULT_INPUT_FILE};
use crate::logging::init_logging;
use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::path::PathBuf;
use tokio::sync::watch;

/// Exit code for configuration errors
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Exit code for fatal errors (output directory could not be created)
pub const EXIT_FATAL: i32 = 5;

/// Exit code after a shutdown signal
pub const EXIT_INTERRUPTED: i32 = 130;

/// Short flags that take a value
const SHORT_WITH_VALUE: [char; 4] = ['f', 'h', 'w', 'd'];

/// Long options that take a value
const LONG_WITH_VALUE: [&str; 2] = ["--config", "--log-level"];

/// Long options without a value
const LONG_SWITCHES: [&str; 3] = ["--dry-run", "--help", "--version"];

/// Flags whose values are paths and reach clap as raw OS strings
const PATH_FLAGS: [&str; 2] = ["-f", "--config"];

/// gee-batch - run the image exporter over monthly windows
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Coordinate file passed to the exporter
    #[arg(short = 'f', value_name = "FILE", default_value = DEFAULT_INPUT_FILE, allow_hyphen_values = true)]
    pub file: PathBuf,

    /// Image height in pixels (forwarded unvalidated)
    #[arg(short = 'h', value_name = "HEIGHT", allow_hyphen_values = true)]
    pub height: Option<String>,

    /// Image width in pixels (forwarded unvalidated)
    #[arg(short = 'w', value_name = "WIDTH", allow_hyphen_values = true)]
    pub width: Option<String>,

    /// Dataset identifier (sentinel, landsat, naip, ...)
    #[arg(short = 'd', value_name = "DATASET", default_value = DEFAULT_DATASET, allow_hyphen_values = true)]
    pub dataset: String,

    /// Path to configuration file
    #[arg(long, env = "GEE_BATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "GEE_BATCH_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log each exporter invocation without creating directories or running anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print help
    #[allow(dead_code)]
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,

    /// Print version
    #[allow(dead_code)]
    #[arg(long, action = ArgAction::Version)]
    version: Option<bool>,
}

impl Cli {
    /// Parses arguments after dropping anything unrecognized
    ///
    /// Help and version requests print and exit the process, as with
    /// [`Parser::parse`].
    pub fn parse_permissive<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let filtered = retain_known_flags(args);
        match Cli::try_parse_from(filtered) {
            Ok(cli) => cli,
            Err(e) => e.exit(),
        }
    }

    /// Per-run settings for the planner
    pub fn run_settings(&self) -> RunSettings {
        RunSettings {
            input_file: self.file.clone(),
            height: self.height.clone(),
            width: self.width.clone(),
            dataset: self.dataset.clone(),
        }
    }
}

/// Drops every argument the batch does not understand
///
/// The first element (program name) is always kept. Value-taking flags keep
/// their value whether attached (`-f coords.csv`, `-fcoords.csv`,
/// `--config=x.toml`) or separate. A value-taking flag with no value left is
/// dropped. Everything after `--` is ignored.
///
/// Path values (`-f`, `--config`) are kept byte for byte. Other values are
/// text; invalid UTF-8 in them is replaced rather than rejected.
pub fn retain_known_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut kept: Vec<OsString> = args.next().into_iter().collect();

    while let Some(arg) = args.next() {
        let text = arg.to_string_lossy().into_owned();
        if text == "--" {
            break;
        }

        if let Some(long) = text.strip_prefix("--") {
            let (name, attached) = match long.split_once('=') {
                Some((name, _)) => (format!("--{name}"), true),
                None => (text.clone(), false),
            };
            if LONG_WITH_VALUE.contains(&name.as_str()) {
                if attached {
                    kept.push(flag_value(&name, arg));
                } else if let Some(value) = args.next() {
                    kept.push(arg);
                    kept.push(flag_value(&name, value));
                }
            } else if LONG_SWITCHES.contains(&name.as_str()) && !attached {
                kept.push(arg);
            } else {
                tracing::trace!(arg = %text, "Ignoring unrecognized option");
            }
            continue;
        }

        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some('-'), Some(flag)) if SHORT_WITH_VALUE.contains(&flag) => {
                let name = format!("-{flag}");
                if text.len() > 2 {
                    kept.push(flag_value(&name, arg));
                } else if let Some(value) = args.next() {
                    kept.push(arg);
                    kept.push(flag_value(&name, value));
                }
            }
            _ => tracing::trace!(arg = %text, "Ignoring unrecognized argument"),
        }
    }

    kept
}

fn flag_value(flag: &str, value: OsString) -> OsString {
    if PATH_FLAGS.contains(&flag) {
        value
    } else {
        value.to_string_lossy().into_owned().into()
    }
}

/// Shared entry point of the binaries; returns the process exit code
pub async fn run(variant: Variant) -> i32 {
    // Optional; a missing .env is ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse_permissive(std::env::args_os());

    let config = match resolve_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return EXIT_CONFIG_ERROR;
        }
    };

    let _logging_guard = match init_logging(&cli.log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return EXIT_CONFIG_ERROR;
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        variant = ?variant,
        "gee-batch starting"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    spawn_shutdown_listener(shutdown_tx);

    match cli.execute(variant, config, shutdown_rx).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Batch failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    }
}

/// Flips the shutdown flag on SIGINT or SIGTERM
///
/// The runner finishes the item in progress and stops before the next one.
fn spawn_shutdown_listener(shutdown_tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm = match signal(SignalKind::terminate()) {
                Ok(sigterm) => sigterm,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to install SIGTERM handler");
                    return;
                }
            };

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Received SIGINT (Ctrl+C), finishing current item...");
                }
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, finishing current item...");
                }
            }
            let _ = shutdown_tx.send(true);
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            } else {
                tracing::info!("Received Ctrl+C, finishing current item...");
                let _ = shutdown_tx.send(true);
            }
        }
    });
}
