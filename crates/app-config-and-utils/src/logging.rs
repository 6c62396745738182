//! Logging initialization.
//!
//! Thin wrapper over the observability crate. Every tool writes structured
//! JSONL to `~/.template/logs/dev.jsonl`.

use observability::LogConfig;

/// Initialize logging for the `template` CLI.
///
/// `TEMPLATE_LOG_STDERR=1` mirrors events to stderr.
pub fn init_logging(level: &str) {
    init_logging_for_service("template-cli", level);
}

/// Initialize logging with a custom service name.
pub fn init_logging_for_service(service_name: &str, level: &str) {
    observability::init_with_config(LogConfig {
        service_name: service_name.into(),
        default_level: level.into(),
        also_stderr: stderr_requested(std::env::var("TEMPLATE_LOG_STDERR").ok()),
        ..Default::default()
    });
}

fn stderr_requested(raw: Option<String>) -> bool {
    raw.map(|value| {
        matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
    .unwrap_or(false)
}
