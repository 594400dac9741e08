//! Configuration management for passcheck
//!
//! Settings come from built-in defaults, an optional `passcheck.toml` in the
//! working directory and `PASSCHECK_*` environment variables, in increasing
//! order of priority.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::auth::Policy;

/// Default location of the account table
pub const DEFAULT_USERS_FILE: &str = "users.csv";

/// Config file looked up in the working directory (extension optional)
pub const CONFIG_FILE: &str = "passcheck";

/// Prefix of the environment overrides, e.g. `PASSCHECK_USERS_FILE`
pub const ENV_PREFIX: &str = "PASSCHECK";

/// Credential store configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path of the account table.
    /// Environment: PASSCHECK_USERS_FILE
    pub users_file: String,

    /// Validation policy, `strict` or `lenient`.
    /// Environment: PASSCHECK_POLICY
    pub policy: Policy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            users_file: DEFAULT_USERS_FILE.to_string(),
            policy: Policy::Strict,
        }
    }
}

impl StoreConfig {
    /// Load configuration from `passcheck.toml` (if present) with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(File::with_name(CONFIG_FILE).required(false))
    }

    /// Load configuration from an explicit file, with environment overrides
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(File::from(path).required(true))
    }

    fn build<F>(file: F) -> Result<Self, ConfigError>
    where
        F: config::Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .set_default("users_file", DEFAULT_USERS_FILE)?
            .set_default("policy", "strict")?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let config: StoreConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.users_file.trim().is_empty() {
            return Err(ConfigError::Message("users_file cannot be empty".into()));
        }

        Ok(())
    }

    /// Get the account table location as PathBuf
    pub fn users_file_path(&self) -> PathBuf {
        PathBuf::from(&self.users_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn file_values_are_applied() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("passcheck.toml");
        fs::write(&path, "users_file = \"data/accounts.csv\"\npolicy = \"lenient\"\n").unwrap();

        let config = StoreConfig::load_from(&path).unwrap();
        assert_eq!(config.users_file_path(), PathBuf::from("data/accounts.csv"));
        assert_eq!(config.policy, Policy::Lenient);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("passcheck.toml");
        fs::write(&path, "policy = \"strict\"\n").unwrap();

        let config = StoreConfig::load_from(&path).unwrap();
        assert_eq!(config.users_file, DEFAULT_USERS_FILE);
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn empty_users_file_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("passcheck.toml");
        fs::write(&path, "users_file = \"  \"\n").unwrap();

        assert!(StoreConfig::load_from(&path).is_err());
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("passcheck.toml");
        fs::write(&path, "policy = \"paranoid\"\n").unwrap();

        assert!(StoreConfig::load_from(&path).is_err());
    }
}
