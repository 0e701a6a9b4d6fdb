//! Environment-driven configuration for the CLI.

use std::env;
use std::io;
use std::path::PathBuf;

const HOME_ENV: &str = "WATERMELON_HOME";
const LOG_LEVEL_ENV: &str = "WATERMELON_LOG_LEVEL";
const DB_FILE_NAME: &str = "watermelon.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub home: PathBuf,
    pub log_level: String,
}

impl CliConfig {
    /// Reads `WATERMELON_HOME` (default `$HOME/.watermelon`) and
    /// `WATERMELON_LOG_LEVEL` (default per build mode).
    pub fn from_env() -> io::Result<Self> {
        let home = match env::var_os(HOME_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => {
                let user_home = env::var_os("HOME").ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("HOME not set; set {HOME_ENV} explicitly"),
                    )
                })?;
                PathBuf::from(user_home).join(".watermelon")
            }
        };
        let home = if home.is_absolute() {
            home
        } else {
            env::current_dir()?.join(home)
        };

        let log_level = env::var(LOG_LEVEL_ENV)
            .ok()
            .filter(|level| !level.trim().is_empty())
            .unwrap_or_else(|| watermelon_core::default_log_level().to_string());

        Ok(Self { home, log_level })
    }

    pub fn db_path(&self) -> PathBuf {
        self.home.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.home.join(LOG_DIR_NAME)
    }
}
