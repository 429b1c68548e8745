//! Profile persistence across the local store and the optional remote store.
//!
//! The local store is authoritative for offline use and is always written
//! first. When a remote store is configured, reads prefer the remote document
//! and writes are mirrored to it in the background.

use std::sync::Arc;

use tokio::task::JoinHandle;

use super::config::Config;
use super::local::LocalStore;
use super::remote::{RemoteStore, Subscription};
use crate::error::Result;
use crate::profile::Profile;

/// Anything that can hold the single profile document.
pub trait ProfileStore {
    fn load(&self) -> Result<Option<Profile>>;
    /// Full overwrite.
    fn save(&self, profile: &Profile) -> Result<()>;
}

pub struct ProfileRepository {
    local: LocalStore,
    remote: Option<Arc<RemoteStore>>,
    user_id: Option<String>,
    trainer_name: String,
}

impl ProfileRepository {
    pub fn new(local: LocalStore, trainer_name: impl Into<String>) -> Self {
        Self {
            local,
            remote: None,
            user_id: None,
            trainer_name: trainer_name.into(),
        }
    }

    pub fn with_remote(mut self, remote: RemoteStore, user_id: impl Into<String>) -> Self {
        self.remote = Some(Arc::new(remote));
        self.user_id = Some(user_id.into());
        self
    }

    /// Build from config. The remote store is enabled only when both a
    /// `[remote]` section and `profile.user_id` are present.
    pub fn from_config(local: LocalStore, config: &Config) -> Result<Self> {
        let repo = Self::new(local, config.profile.trainer_name.clone());
        match (&config.remote, &config.profile.user_id) {
            (Some(remote), Some(user_id)) => {
                let store = RemoteStore::from_config(remote)?;
                Ok(repo.with_remote(store, user_id.clone()))
            }
            (Some(_), None) => {
                tracing::warn!("remote store configured without profile.user_id; staying local");
                Ok(repo)
            }
            _ => Ok(repo),
        }
    }

    pub fn local(&self) -> &LocalStore {
        &self.local
    }

    pub fn is_remote_enabled(&self) -> bool {
        self.remote.is_some()
    }

    /// Load the local profile, creating and saving the zero-value one if absent.
    pub fn initialize_default(&self) -> Result<Profile> {
        if let Some(profile) = self.local.load()? {
            return Ok(profile);
        }
        let profile = Profile::new(self.trainer_name.clone(), self.user_id.clone());
        self.local.save(&profile)?;
        tracing::info!(trainer = %profile.trainer_name, "created default profile");
        Ok(profile)
    }

    /// Current profile, preferring the remote document.
    ///
    /// A remote document is mirrored into the local store. Remote failures
    /// fall back to the local profile.
    pub async fn load_live(&self) -> Result<Profile> {
        if let (Some(remote), Some(user_id)) = (&self.remote, &self.user_id) {
            match remote.fetch(user_id).await {
                Ok(Some(profile)) => {
                    self.local.save(&profile)?;
                    return Ok(profile);
                }
                Ok(None) => {
                    tracing::debug!(user_id = %user_id, "no remote profile yet");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "remote load failed; using local profile");
                }
            }
        }
        self.initialize_default()
    }

    /// Write locally, then mirror to the remote store in the background.
    ///
    /// The returned handle finishes when the remote write is done; remote
    /// failures are logged, never returned. No handle is returned without a
    /// remote store or outside a tokio runtime.
    pub fn persist(&self, profile: &Profile) -> Result<Option<JoinHandle<()>>> {
        self.local.save(profile)?;

        let (Some(remote), Some(user_id)) = (&self.remote, &self.user_id) else {
            return Ok(None);
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("no async runtime; remote write skipped");
            return Ok(None);
        };

        let remote = Arc::clone(remote);
        let user_id = user_id.clone();
        let profile = profile.clone();
        Ok(Some(runtime.spawn(async move {
            if let Err(e) = remote.save(&user_id, &profile).await {
                tracing::warn!(error = %e, "remote write failed; local copy kept");
            }
        })))
    }

    /// Live updates from the remote store. `None` when no remote store is
    /// configured or no async runtime is running.
    pub fn subscribe<F>(&self, on_change: F) -> Option<Subscription>
    where
        F: FnMut(Profile) + Send + 'static,
    {
        let remote = self.remote.as_ref()?;
        let user_id = self.user_id.clone()?;
        remote.subscribe(user_id, on_change)
    }
}
