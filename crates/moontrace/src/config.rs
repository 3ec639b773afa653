//! Command-line and environment configuration.

use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::file_list::clean_path;

/// Directory name for moontrace's defaults under the user's home.
pub const MOONTRACE_DIR: &str = ".moontrace";
pub const DEFAULT_INTERPRETER: &str = "python3";
pub const DEFAULT_SCRIPT_FILE: &str = "app.py";
pub const DEFAULT_LOG_FILE: &str = "debug.log";

/// Returns the moontrace home directory (`~/.moontrace`).
pub fn moontrace_home() -> PathBuf {
    if let Some(home_dir) = dirs::home_dir() {
        return home_dir.join(MOONTRACE_DIR);
    }

    PathBuf::from(MOONTRACE_DIR)
}

/// Terminal front-end for an external hardware-design assistant.
#[derive(Debug, Default, Parser)]
#[command(name = "moontrace", version, about)]
pub struct Cli {
    /// Directory the file browser opens in [default: current directory]
    #[arg(long, env = "MOONTRACE_START_DIR")]
    pub start_dir: Option<PathBuf>,
    /// Assistant script passed to the interpreter [default: ~/.moontrace/app.py]
    #[arg(long, env = "MOONTRACE_SCRIPT")]
    pub script: Option<PathBuf>,
    /// Interpreter that runs the assistant script
    #[arg(long, env = "MOONTRACE_INTERPRETER")]
    pub interpreter: Option<String>,
    /// Append-only diagnostic log [default: ~/.moontrace/debug.log]
    #[arg(long, env = "MOONTRACE_LOG_FILE")]
    pub log_file: Option<PathBuf>,
    /// Image rendered as ASCII art in the header panel
    #[arg(long, env = "MOONTRACE_BANNER")]
    pub banner: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to resolve the current directory: {0}")]
    CurrentDir(#[source] io::Error),
    #[error("start directory `{}` is not accessible: {source}", .path.display())]
    StartDirUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("start directory `{}` is not a directory", .0.display())]
    StartDirNotDirectory(PathBuf),
}

/// Resolved settings used to build the app.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub banner_image: Option<PathBuf>,
    pub interpreter: String,
    pub log_path: PathBuf,
    pub script_path: PathBuf,
    pub start_dir: PathBuf,
}

impl AppConfig {
    /// Resolves the parsed command line against the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the current directory is unavailable or
    /// the start directory is not a readable directory.
    pub fn load(cli: Cli) -> Result<Self, ConfigError> {
        let current_dir = std::env::current_dir().map_err(ConfigError::CurrentDir)?;

        Self::from_cli(cli, &current_dir, &moontrace_home())
    }

    /// Resolves `cli` with relative paths anchored at `current_dir` and
    /// defaults placed under `home`.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the start directory is not a readable
    /// directory.
    pub fn from_cli(cli: Cli, current_dir: &Path, home: &Path) -> Result<Self, ConfigError> {
        let start_dir = cli
            .start_dir
            .map_or_else(|| current_dir.to_path_buf(), |path| absolute(&path, current_dir));
        let metadata =
            std::fs::metadata(&start_dir).map_err(|source| ConfigError::StartDirUnreadable {
                path: start_dir.clone(),
                source,
            })?;
        if !metadata.is_dir() {
            return Err(ConfigError::StartDirNotDirectory(start_dir));
        }

        let script_path = cli.script.map_or_else(
            || home.join(DEFAULT_SCRIPT_FILE),
            |path| absolute(&path, current_dir),
        );
        let log_path = cli.log_file.map_or_else(
            || home.join(DEFAULT_LOG_FILE),
            |path| absolute(&path, current_dir),
        );

        Ok(Self {
            banner_image: cli.banner.map(|path| absolute(&path, current_dir)),
            interpreter: cli
                .interpreter
                .unwrap_or_else(|| DEFAULT_INTERPRETER.to_string()),
            log_path,
            script_path,
            start_dir,
        })
    }
}

fn absolute(path: &Path, current_dir: &Path) -> PathBuf {
    clean_path(&current_dir.join(path))
}
