mod config;
pub mod local;
pub mod remote;
pub mod repository;

pub use config::{Config, ProfileSettings, RemoteConfig, SessionDefaults};
pub use local::LocalStore;
pub use remote::{RemoteStore, Subscription};
pub use repository::{ProfileRepository, ProfileStore};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/taskmon[-dev]/` based on TASKMON_ENV.
///
/// Set TASKMON_ENV=dev to use development data directory.
/// TASKMON_DATA_DIR overrides the location entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("TASKMON_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("TASKMON_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("taskmon-dev")
            } else {
                base_dir.join("taskmon")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
