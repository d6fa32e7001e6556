//! File logging bootstrap
//!
//! Logs go to size-rotated files under `<base>/logs/`, never to the terminal,
//! so the interactive menu output stays clean. Messages use a flat
//! `event=<name> module=<module> status=<ok|error>` shape.
//!
//! Initialization happens at most once per process. A second call with the
//! same directory is a no-op; a different directory is rejected.

use std::path::{Path, PathBuf};

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;

use crate::error::{LivrariaError, LivrariaResult};

const LOG_FILE_BASENAME: &str = "livraria";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Start the file logger at `level`, writing into `log_dir`.
///
/// # Errors
/// - Unsupported level name.
/// - Log directory cannot be created, or the backend fails to start.
/// - Logging was already started in a different directory.
pub fn init_logging(level: &str, log_dir: &Path) -> LivrariaResult<()> {
    let level = normalize_level(level)?;

    let state = LOGGING_STATE.get_or_try_init(|| -> LivrariaResult<LoggingState> {
        std::fs::create_dir_all(log_dir).map_err(|e| {
            LivrariaError::Io(format!(
                "Failed to create log directory {}: {}",
                log_dir.display(),
                e
            ))
        })?;

        let logger = Logger::try_with_str(level)
            .map_err(|e| LivrariaError::Config(format!("Invalid log level `{}`: {}", level, e)))?
            .log_to_file(
                FileSpec::default()
                    .directory(log_dir)
                    .basename(LOG_FILE_BASENAME),
            )
            .rotate(
                Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(MAX_LOG_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .map_err(|e| LivrariaError::Config(format!("Failed to start logger: {}", e)))?;

        info!(
            "event=app_start module=logging status=ok version={} level={} log_dir={}",
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

    if state.log_dir != log_dir {
        return Err(LivrariaError::Config(format!(
            "Logging already initialized at {}; refusing to switch to {}",
            state.log_dir.display(),
            log_dir.display()
        )));
    }

    Ok(())
}

/// Active `(level, directory)`, or `None` before initialization
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.log_dir.clone()))
}

fn normalize_level(level: &str) -> LivrariaResult<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(LivrariaError::Config(format!(
            "Unsupported log level `{}`; expected trace|debug|info|warn|error|off",
            other
        ))),
    }
}
