//! Logging System
//!
//! Structured logging via the `tracing` crate: configurable level, text or
//! JSON format, and stdout/stderr/file destinations. Defaults to stderr so
//! stdout stays clean for build reports.

use crate::error::BuildError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output is "file"; None means use runtime default
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format, terminal destinations only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
        }
    }
}

/// Resolve the log file path with precedence: CLI, BLUEPRINT_LOG_FILE env,
/// config file, platform default.
pub fn resolve_log_file_path(
    cli_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
) -> Result<PathBuf, BuildError> {
    if let Some(p) = cli_file {
        if !p.as_os_str().is_empty() {
            return Ok(p);
        }
    }
    if let Ok(env_path) = std::env::var("BLUEPRINT_LOG_FILE") {
        if !env_path.is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }
    if let Some(p) = config_file {
        if !p.as_os_str().is_empty() {
            return Ok(p);
        }
    }
    default_log_file_path()
}

fn default_log_file_path() -> Result<PathBuf, BuildError> {
    let project_dirs = directories::ProjectDirs::from("", "blueprint", "blueprint")
        .ok_or_else(|| {
            BuildError::Config(
                "could not determine platform state directory for log file".to_string(),
            )
        })?;
    let state_dir = project_dirs
        .state_dir()
        .unwrap_or_else(|| project_dirs.data_dir())
        .to_path_buf();
    Ok(state_dir.join("blueprint.log"))
}

/// Initialize the logging system.
///
/// The `BLUEPRINT_LOG` environment variable overrides the configured level
/// (standard EnvFilter directive syntax).
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), BuildError> {
    let disabled = config.map(|c| !c.enabled).unwrap_or(false);
    if disabled {
        Registry::default()
            .with(EnvFilter::new("off"))
            .with(fmt::layer().with_writer(|| std::io::sink()))
            .init();
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format = config.map(|c| c.format.as_str()).unwrap_or("text");
    if format != "json" && format != "text" {
        return Err(BuildError::Config(format!(
            "invalid log format: {} (must be 'json' or 'text')",
            format
        )));
    }
    let use_color = config.map(|c| c.color).unwrap_or(true);

    let output = config.map(|c| c.output.as_str()).unwrap_or("stderr");
    let (writer, ansi) = match output {
        "stdout" => (BoxMakeWriter::new(std::io::stdout), use_color),
        "stderr" => (BoxMakeWriter::new(std::io::stderr), use_color),
        "file" => {
            let path = resolve_log_file_path(None, config.and_then(|c| c.file.clone()))?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    BuildError::Config(format!("failed to create log directory: {}", e))
                })?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| {
                    BuildError::Config(format!("failed to open log file {:?}: {}", path, e))
                })?;
            (BoxMakeWriter::new(Arc::new(file)), false)
        }
        other => {
            return Err(BuildError::Config(format!(
                "invalid log output: {} (must be 'stdout', 'stderr', or 'file')",
                other
            )))
        }
    };

    let base_subscriber = Registry::default().with(filter);
    if format == "json" {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .init();
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(ansi)
                    .with_writer(writer),
            )
            .init();
    }

    Ok(())
}

fn build_env_filter(config: Option<&LoggingConfig>) -> Result<EnvFilter, BuildError> {
    if let Ok(filter) = EnvFilter::try_from_env("BLUEPRINT_LOG") {
        return Ok(filter);
    }

    let level = config.map(|c| c.level.as_str()).unwrap_or("info");
    match level {
        "trace" | "debug" | "info" | "warn" | "error" | "off" => Ok(EnvFilter::new(level)),
        other => Err(BuildError::Config(format!(
            "invalid log level: {} (must be trace, debug, info, warn, error, or off)",
            other
        ))),
    }
}

/// Apply CLI logging overrides on top of a configured baseline.
pub fn apply_cli_overrides(
    config: &mut LoggingConfig,
    level: Option<&str>,
    format: Option<&str>,
    output: Option<&str>,
    file: Option<&Path>,
) {
    if let Some(level) = level {
        config.level = level.to_string();
    }
    if let Some(format) = format {
        config.format = format.to_string();
    }
    if let Some(output) = output {
        config.output = output.to_string();
    }
    if let Some(file) = file {
        config.file = Some(file.to_path_buf());
        config.output = "file".to_string();
    }
}
