//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::BatchConfig;
use crate::domain::errors::BatchError;
use crate::domain::result::Result;
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Configuration file picked up when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "gee-batch.toml";

/// Prefix of the environment variables that override file values
pub const ENV_PREFIX: &str = "GEE_BATCH_";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into BatchConfig
/// 4. Applies environment variable overrides (GEE_BATCH_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, a referenced
/// variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use gee_batch::config::loader::load_config;
///
/// let config = load_config("gee-batch.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<BatchConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(BatchError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        BatchError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: BatchConfig = toml::from_str(&contents)?;

    finish(config)
}

/// Resolves the configuration for a run
///
/// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] is used
/// when present in the working directory, otherwise the built-in defaults.
/// Environment overrides apply in every case.
pub fn resolve_config(explicit: Option<&Path>) -> Result<BatchConfig> {
    match explicit {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => load_config(DEFAULT_CONFIG_FILE),
        None => {
            tracing::debug!("No configuration file found, using defaults");
            finish(BatchConfig::default())
        }
    }
}

fn finish(mut config: BatchConfig) -> Result<BatchConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        BatchError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// `${VAR_NAME}` placeholder
fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder pattern is valid")
    })
}

/// Replaces `${VAR_NAME}` placeholders with environment values
///
/// Comment lines are copied through untouched. Every unset variable is
/// reported at once.
fn substitute_env_vars(input: &str) -> Result<String> {
    let mut missing: Vec<String> = Vec::new();
    let mut output = String::with_capacity(input.len());

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            output.push_str(line);
        } else {
            let replaced = placeholder_pattern().replace_all(line, |caps: &Captures| {
                std::env::var(&caps[1]).unwrap_or_else(|_| {
                    if !missing.iter().any(|name| name == &caps[1]) {
                        missing.push(caps[1].to_string());
                    }
                    caps[0].to_string()
                })
            });
            output.push_str(&replaced);
        }
        output.push('\n');
    }

    if missing.is_empty() {
        Ok(output)
    } else {
        Err(BatchError::Configuration(format!(
            "Missing required environment variables: {}",
            missing.join(", ")
        )))
    }
}

/// Applies environment variable overrides using the GEE_BATCH_* prefix
///
/// Variables follow the pattern GEE_BATCH_<SECTION>_<KEY>, for example
/// GEE_BATCH_EXPORTER_PROGRAM or GEE_BATCH_SCHEDULE_START.
fn apply_env_overrides(config: &mut BatchConfig) -> Result<()> {
    if let Some(val) = env_override("EXPORTER_PROGRAM") {
        config.exporter.program = val;
    }

    if let Some(val) = env_override("SCHEDULE_START") {
        config.schedule.start = parse_date_override("SCHEDULE_START", &val)?;
    }
    if let Some(val) = env_override("SCHEDULE_END") {
        config.schedule.end = parse_date_override("SCHEDULE_END", &val)?;
    }

    if let Some(val) = env_override("OUTPUT_ROOT") {
        config.output.root = val.into();
    }

    if let Some(val) = env_override("LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Some(val) = env_override("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

fn env_override(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{key}")).ok()
}

fn parse_date_override(key: &str, value: &str) -> Result<chrono::NaiveDate> {
    value.trim().parse().map_err(|e| {
        BatchError::Configuration(format!(
            "{ENV_PREFIX}{key} must be a YYYY-MM-DD date, got '{value}': {e}"
        ))
    })
}
