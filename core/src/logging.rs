//! File logging bootstrap.
//!
//! Logs go to rotating files under the data directory so the terminal UI keeps
//! the screen to itself. Initialization is idempotent for the same directory and
//! refuses to switch directories once active.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

pub const LOG_LEVEL_ENV_VAR: &str = "BURNDOWN_LOG";
pub const DEFAULT_LOG_LEVEL: &str = "info";

const LOG_FILE_BASENAME: &str = "burndown";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Starts file logging at `level` in `log_dir`.
///
/// # Errors
/// - unsupported level
/// - already initialized with another directory or level
/// - directory creation or logger backend failure
pub fn init_logging(level: &str, log_dir: &Path) -> Result<()> {
    let level = normalize_level(level)?;

    if let Some(state) = LOGGING_STATE.get() {
        if state.log_dir != log_dir {
            return Err(anyhow!(
                "logging already initialized at `{}`; refusing to switch to `{}`",
                state.log_dir.display(),
                log_dir.display()
            ));
        }
        if state.level != level {
            return Err(anyhow!(
                "logging already initialized with level `{}`; refusing to switch to `{}`",
                state.level,
                level
            ));
        }
        return Ok(());
    }

    LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState> {
        std::fs::create_dir_all(log_dir)?;

        let logger = Logger::try_with_str(level)?
            .log_to_file(FileSpec::default().directory(log_dir).basename(LOG_FILE_BASENAME))
            .rotate(
                Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(MAX_LOG_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()?;

        info!(
            "event=app_start module=core status=ok version={} level={} log_dir={}",
            env!("CARGO_PKG_VERSION"),
            level,
            log_dir.display()
        );

        Ok(LoggingState {
            level,
            log_dir: log_dir.to_path_buf(),
            _logger: logger,
        })
    })?;

    Ok(())
}

/// Level from `BURNDOWN_LOG`, `info` when unset.
pub fn level_from_env() -> String {
    std::env::var(LOG_LEVEL_ENV_VAR).unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
}

fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(anyhow!("unsupported log level `{}`", other)),
    }
}
