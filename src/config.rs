//! Runtime configuration resolved from the environment, with defaults that
//! put everything under a dot-folder in the user's home.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".rhythm-game-picker";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "songs.sqlite";
/// Log file written next to the database; the TUI owns stdout.
const LOG_FILE_NAME: &str = "rhythm-game-picker.log";

const HOME_ENV: &str = "RHYTHM_PICKER_HOME";
const SIDECAR_ENABLED_ENV: &str = "RHYTHM_PICKER_SIDECAR_ENABLED";
const SIDECAR_KEEP_ENV: &str = "RHYTHM_PICKER_SIDECAR_KEEP_ON_SHUTDOWN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidecarConfig {
    /// Whether the helper process is started at all.
    pub enabled: bool,
    /// Leave the helper running (and its temp file on disk) when the app exits.
    pub keep_on_shutdown: bool,
}

impl Default for SidecarConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            keep_on_shutdown: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub sidecar: SidecarConfig,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn resolve() -> Result<Self> {
        Self::resolve_with(|key| env::var(key).ok())
    }

    /// Resolve using an arbitrary lookup so tests need not touch the real
    /// environment.
    pub fn resolve_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SidecarConfig::default();

        let data_dir = match lookup(HOME_ENV).filter(|value| !value.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        Ok(Self {
            data_dir,
            sidecar: SidecarConfig {
                enabled: parse_bool(&lookup, SIDECAR_ENABLED_ENV, defaults.enabled)?,
                keep_on_shutdown: parse_bool(&lookup, SIDECAR_KEEP_ENV, defaults.keep_on_shutdown)?,
            },
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }
}

fn parse_bool<F>(lookup: &F, key: &str, default: bool) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .to_ascii_lowercase()
            .parse::<bool>()
            .map_err(|err| anyhow!("{key} must be 'true' or 'false': {err}")),
    }
}

/// Resolve the data directory inside the user's home.
fn default_data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}
