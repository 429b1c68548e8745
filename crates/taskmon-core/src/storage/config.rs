//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Default session type and phase lengths
//! - Trainer name and remote user id
//! - Remote document store connection (optional)
//! - RNG seed for reproducible encounters (optional)
//!
//! Configuration is stored at `<data dir>/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::catalog::ElementType;
use crate::error::{ConfigError, Result};
use crate::timer::SessionConfig;

/// Defaults offered when setting up a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDefaults {
    #[serde(default = "default_session_type")]
    pub default_type: ElementType,
    #[serde(default = "default_study_minutes")]
    pub study_minutes: u32,
    #[serde(default = "default_rest_minutes")]
    pub rest_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSettings {
    #[serde(default = "default_trainer_name")]
    pub trainer_name: String,
    /// Remote user id. Without it the remote store stays disabled.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Remote document store connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_app_id")]
    pub app_id: String,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data dir>/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Fixed seed for encounter rolls.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub session: SessionDefaults,
    #[serde(default)]
    pub profile: ProfileSettings,
    #[serde(default)]
    pub remote: Option<RemoteConfig>,
}

// Default functions
fn default_session_type() -> ElementType {
    ElementType::Psychic
}
fn default_study_minutes() -> u32 {
    30
}
fn default_rest_minutes() -> u32 {
    5
}
fn default_trainer_name() -> String {
    crate::profile::DEFAULT_TRAINER_NAME.into()
}
fn default_app_id() -> String {
    "default-app-id".into()
}
fn default_poll_interval_secs() -> u64 {
    5
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            default_type: default_session_type(),
            study_minutes: default_study_minutes(),
            rest_minutes: default_rest_minutes(),
        }
    }
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            trainer_name: default_trainer_name(),
            user_id: None,
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            app_id: default_app_id(),
            api_token: None,
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            session: SessionDefaults::default(),
            profile: ProfileSettings::default(),
            remote: None,
        }
    }
}

/// How a value written into an unset optional is typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnsetAs {
    Number,
    Text,
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
        unset_as: UnsetAs,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Null => match (unset_as, value.parse::<u64>()) {
                        (UnsetAs::Number, Ok(n)) => serde_json::Value::Number(n.into()),
                        _ => serde_json::Value::String(value.into()),
                    },
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or create and persist the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing the default there only if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    /// The file is left untouched in that case.
    pub fn load_from(path: &Path) -> Result<Self> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(load_failed(e.to_string()).into()),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving. Returns error if key is unknown.
    ///
    /// Setting any `remote.*` key creates the `[remote]` section. An unset
    /// optional takes a digits-only value as a number when the field is
    /// numeric and as text otherwise.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let mut base = serde_json::to_value(&*self)?;
        if key.starts_with("remote.") && self.remote.is_none() {
            base["remote"] = serde_json::to_value(RemoteConfig::default())?;
        }

        let mut last_error = None;
        for unset_as in [UnsetAs::Number, UnsetAs::Text] {
            let mut json = base.clone();
            Self::set_json_value_by_path(&mut json, key, value, unset_as)?;
            match serde_json::from_value(json) {
                Ok(cfg) => {
                    *self = cfg;
                    return Ok(());
                }
                Err(e) => last_error = Some(e),
            }
        }
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: last_error.map(|e| e.to_string()).unwrap_or_default(),
        }
        .into())
    }

    /// Set a config value by key and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// Session settings from the configured defaults.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new(
            self.session.default_type,
            self.session.study_minutes,
            self.session.rest_minutes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.session.study_minutes, 30);
        assert_eq!(parsed.session.default_type, ElementType::Psychic);
        assert!(parsed.remote.is_none());
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.session.rest_minutes, 5);
        assert_eq!(cfg.profile.trainer_name, "Trainer");
        assert!(cfg.profile.user_id.is_none());
        assert!(cfg.seed.is_none());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("session.study_minutes").as_deref(), Some("30"));
        assert_eq!(cfg.get("session.default_type").as_deref(), Some("Psychic"));
        assert!(cfg.get("session.missing_key").is_none());
    }

    #[test]
    fn apply_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.apply("session.study_minutes", "45").unwrap();
        cfg.apply("session.default_type", "Ghost").unwrap();
        cfg.apply("profile.trainer_name", "Red").unwrap();
        assert_eq!(cfg.session.study_minutes, 45);
        assert_eq!(cfg.session.default_type, ElementType::Ghost);
        assert_eq!(cfg.profile.trainer_name, "Red");
    }

    #[test]
    fn apply_fills_unset_optionals() {
        let mut cfg = Config::default();
        cfg.apply("seed", "1234").unwrap();
        cfg.apply("profile.user_id", "uid-1").unwrap();
        cfg.apply("remote.base_url", "http://localhost:8080").unwrap();
        assert_eq!(cfg.seed, Some(1234));
        assert_eq!(cfg.profile.user_id.as_deref(), Some("uid-1"));
        let remote = cfg.remote.unwrap();
        assert_eq!(remote.base_url, "http://localhost:8080");
        assert_eq!(remote.app_id, "default-app-id");
    }

    #[test]
    fn apply_keeps_numeric_looking_text_as_text() {
        let mut cfg = Config::default();
        cfg.apply("profile.user_id", "1234567").unwrap();
        cfg.apply("remote.api_token", "987654").unwrap();
        assert_eq!(cfg.profile.user_id.as_deref(), Some("1234567"));
        assert_eq!(cfg.remote.as_ref().unwrap().api_token.as_deref(), Some("987654"));
        assert_eq!(cfg.get("profile.user_id").as_deref(), Some("1234567"));
    }

    #[test]
    fn apply_rejects_text_for_unset_seed() {
        let mut cfg = Config::default();
        assert!(cfg.apply("seed", "lucky").is_err());
        assert!(cfg.seed.is_none());
    }

    #[test]
    fn apply_rejects_unknown_keys_and_bad_values() {
        let mut cfg = Config::default();
        assert!(cfg.apply("session.nonexistent", "1").is_err());
        assert!(cfg.apply("session.study_minutes", "lots").is_err());
        assert!(cfg.apply("session.default_type", "Ice").is_err());
        assert_eq!(cfg.session.study_minutes, 30);
    }

    #[test]
    fn load_from_missing_file_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.session.study_minutes, 30);
        assert!(path.exists());

        let mut cfg = cfg;
        cfg.apply("session.rest_minutes", "0").unwrap();
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().session.rest_minutes, 0);
    }

    #[test]
    fn unparsable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "session = 12").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn unreadable_file_is_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let bytes = b"[remote]\nbase_url = \"\xff\xfe\"\n".to_vec();
        std::fs::write(&path, &bytes).unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(
            err,
            crate::error::CoreError::Config(ConfigError::LoadFailed { .. })
        ));
        assert_eq!(std::fs::read(&path).unwrap(), bytes);
    }
}
