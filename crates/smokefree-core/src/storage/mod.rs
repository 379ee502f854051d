mod config;
pub mod database;
pub mod legacy;
pub mod migrations;

pub use config::{Config, DisplayConfig, LoggingConfig};
pub use database::Database;
pub use legacy::{parse_legacy, ImportSummary, LegacyData};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Environment variable that pins the data directory (tests, portable installs).
pub const DATA_DIR_ENV: &str = "SMOKEFREE_DATA_DIR";

/// Returns the directory holding `smokefree.db` and `config.toml`.
///
/// `SMOKEFREE_DATA_DIR` wins when set. Otherwise `~/.config/smokefree[-dev]/`
/// based on `SMOKEFREE_ENV`; set `SMOKEFREE_ENV=dev` to use the development
/// data directory. The directory is created if missing.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("SMOKEFREE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("smokefree-dev")
            } else {
                base_dir.join("smokefree")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
