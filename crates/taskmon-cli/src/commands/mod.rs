pub mod catalog;
pub mod collection;
pub mod config;
pub mod encounter;
pub mod profile;
pub mod session;

use taskmon_core::storage::{Config, LocalStore, ProfileRepository};
use taskmon_core::{Profile, ValidationError};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Config plus the profile repository every profile-touching command needs.
pub struct Context {
    pub config: Config,
    pub repo: ProfileRepository,
}

impl Context {
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load()?;
        let repo = ProfileRepository::from_config(LocalStore::open()?, &config)?;
        Ok(Self { config, repo })
    }

    pub async fn profile(&self) -> Result<Profile, Box<dyn std::error::Error>> {
        Ok(self.repo.load_live().await?)
    }

    /// Profile that has finished starter selection.
    pub async fn complete_profile(&self) -> Result<Profile, Box<dyn std::error::Error>> {
        let profile = self.profile().await?;
        if !profile.is_profile_complete {
            return Err(ValidationError::ProfileIncomplete.into());
        }
        Ok(profile)
    }

    /// Save locally and wait for the remote mirror, if any, to finish.
    pub async fn persist(&self, profile: &Profile) -> CmdResult {
        if let Some(handle) = self.repo.persist(profile)? {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "remote write task failed");
            }
        }
        Ok(())
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
