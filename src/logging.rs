use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, LogRotation};

const LOG_FILE_NAME: &str = "giphy-debug.log";

#[allow(dead_code)]
pub struct LogGuard(WorkerGuard);

/// Initialize debug logging.
///
/// When `debug` is enabled, logs are written next to the config file by default.
/// When `debug` is disabled, this is a no-op.
pub fn init(config: &Config) -> Result<Option<LogGuard>> {
    if !config.debug {
        return Ok(None);
    }

    let rotation = config.debug_log_rotation.unwrap_or(LogRotation::Never);
    let log_path = resolve_log_path(config.debug_log_path.as_deref())?;
    let (dir, file_name) = split_dir_and_name(&log_path)?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let (writer, guard): (NonBlocking, WorkerGuard) = match rotation {
        LogRotation::Never => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;
            tracing_appender::non_blocking(file)
        }
        // Files are named `{file_name}.{YYYY-MM-DD}`.
        LogRotation::Daily => tracing_appender::non_blocking(tracing_appender::rolling::daily(&dir, &file_name)),
    };

    let filter = EnvFilter::try_new("giphy=debug,warn").unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer)
        .try_init()
        .ok(); // Already initialized (tests) is fine.

    tracing::info!(log_file = %log_path.display(), rotation = ?rotation, "debug logging enabled");

    Ok(Some(LogGuard(guard)))
}

fn resolve_log_path(config_value: Option<&str>) -> Result<PathBuf> {
    let Some(raw) = config_value else {
        let config_path = crate::config::config_path()?;
        return Ok(config_path.with_file_name(LOG_FILE_NAME));
    };

    let path = PathBuf::from(expand_tilde(raw));
    if raw.ends_with(std::path::MAIN_SEPARATOR) || path.is_dir() {
        return Ok(path.join(LOG_FILE_NAME));
    }
    Ok(path)
}

fn expand_tilde(raw: &str) -> String {
    if raw == "~" || raw.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            let suffix = raw.strip_prefix('~').unwrap_or("");
            return format!("{}{}", home.display(), suffix);
        }
    }
    raw.to_string()
}

fn split_dir_and_name(path: &Path) -> Result<(PathBuf, String)> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .context("Invalid debug_log_path: not valid UTF-8")?
        .to_string();
    Ok((dir, name))
}

/// Mask the value of every `api_key=` parameter in `input`.
pub fn redact_api_key(input: &str) -> String {
    const NEEDLE: &str = "api_key=";

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(NEEDLE) {
        let value_start = pos + NEEDLE.len();
        out.push_str(&rest[..value_start]);

        let tail = &rest[value_start..];
        let value_len = tail
            .find(|c: char| c == '&' || c == '"' || c == '\'' || c.is_whitespace())
            .unwrap_or(tail.len());

        if value_len > 0 {
            out.push_str("***REDACTED***");
        }
        rest = &tail[value_len..];
    }

    out.push_str(rest);
    out
}
