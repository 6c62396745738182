//! # Observability
//!
//! Centralized logging for the template flow crates.
//!
//! Library crates only use `tracing` macros. Binaries call
//! `observability::init_with_config` once at startup; every
//! event is then written as one JSON object per line to
//! `~/.template/logs/dev.jsonl`, and optionally mirrored to stderr.
//!
//! ```rust,ignore
//! fn main() {
//!     observability::init_with_config(observability::LogConfig {
//!         service_name: "template-cli".into(),
//!         default_level: "debug".into(),
//!         also_stderr: true,
//!         ..Default::default()
//!     });
//!
//!     tracing::info!("ready");
//! }
//! ```

mod file_writer;
mod json_layer;

use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub use file_writer::{CentralLogWriter, WriterFactory};
pub use json_layer::{JsonLayer, LogEntry, REDACTED};

/// Configuration for the logging system.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Name of the service (e.g., "template-cli").
    /// Included in every log line for filtering.
    pub service_name: String,

    /// Default log level filter (e.g., "debug", "info", "warn").
    /// Can be overridden by `RUST_LOG` environment variable.
    pub default_level: String,

    /// Optional custom log file path.
    /// Defaults to `~/.template/logs/dev.jsonl`.
    pub log_path: Option<PathBuf>,

    /// Also emit compact human-readable logs to stderr.
    pub also_stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            service_name: "unknown".into(),
            default_level: "info".into(),
            log_path: None,
            also_stderr: false,
        }
    }
}

/// Central log file location.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".template").join("logs").join("dev.jsonl"))
}

/// Initialize logging with custom configuration.
///
/// Falls back to stderr-only output when the log file cannot be opened.
/// Calling this twice is harmless; the second call is ignored.
pub fn init_with_config(config: LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_level));

    let file_layer = config
        .log_path
        .clone()
        .or_else(default_log_path)
        .and_then(|path| match CentralLogWriter::new(&path) {
            Ok(writer) => Some(JsonLayer::new(
                config.service_name.clone(),
                WriterFactory::new(writer),
            )),
            Err(err) => {
                eprintln!(
                    "observability: cannot open {}: {}; logging to stderr only",
                    path.display(),
                    err
                );
                None
            }
        });

    let stderr_layer = (config.also_stderr || file_layer.is_none()).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .compact()
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init();
}
