use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the `tracing` filter directive.
pub const LOG_FILTER_ENV: &str = "MOONTRACE_LOG";
const DEFAULT_LOG_FILTER: &str = "info";

/// Routes `tracing` output to `log_path` with timestamps and no ANSI colors.
///
/// The terminal belongs to the UI, so nothing is ever logged to stdout or
/// stderr. The file is opened once in append mode and never rotated.
///
/// # Errors
/// Returns an error when the log file cannot be opened or a global
/// subscriber is already installed.
pub fn init_file_logging(log_path: &Path) -> io::Result<()> {
    let log_file = open_log_file(log_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_FILTER_ENV)
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .try_init()
        .map_err(io::Error::other)
}

/// Opens `log_path` for appending, creating missing parent directories.
fn open_log_file(log_path: &Path) -> io::Result<File> {
    if let Some(parent) = log_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    OpenOptions::new().create(true).append(true).open(log_path)
}
