//! Where bracket-indent keeps its files
//!
//! Everything sits in one per-user directory: `config.yaml` for
//! [`IndentConfig`](crate::config::IndentConfig) and `logs/` for the rolling
//! log written by [`crate::tracing::init`].

use std::{env, fs, io, path::PathBuf};

const APP_DIR: &str = "bracket-indent";

/// Per-user directory holding the config file and logs.
///
/// Honours `$XDG_CONFIG_HOME`, then falls back to `~/.config`; on Windows it
/// lives under `%APPDATA%`. `None` when no home directory can be found.
pub fn config_dir() -> Option<PathBuf> {
    user_config_root().map(|root| root.join(APP_DIR))
}

#[cfg(target_os = "windows")]
fn user_config_root() -> Option<PathBuf> {
    env::var_os("APPDATA").map(PathBuf::from)
}

#[cfg(not(target_os = "windows"))]
fn user_config_root() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
}

/// The YAML file [`IndentConfig::load`](crate::config::IndentConfig::load) reads
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Make sure the log directory exists before a file appender opens it
pub fn ensure_logs_dir() -> io::Result<PathBuf> {
    let dir = logs_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "cannot locate a config directory")
    })?;
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
