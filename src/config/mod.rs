//! Configuration management for the inlay engine.
//!
//! Provides hierarchical configuration loading and validation with:
//! - Default values as code base
//! - Configuration file support (`CONFIG_PATH`)
//! - Environment variable overrides (`INLAY__` prefix)
//! - Component-wise validation
mod authority;
mod cache;
mod observer;
mod storage;
pub use authority::*;
pub use cache::*;
pub use observer::*;
pub use storage::*;


use std::env;
use std::fmt::Debug;
use std::path::Path;

use config::Config;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// Main configuration container for the inlay engine components
///
/// Combines all subsystem configurations with hierarchical override support:
/// 1. Default values from code implementation
/// 2. Configuration file specified by `CONFIG_PATH`
/// 3. Environment variables (highest priority)
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct InlayConfig {
    /// Resource cache sizing
    #[serde(default)]
    pub cache: CacheConfig,
    /// Metadata persistence
    #[serde(default)]
    pub storage: StorageConfig,
    /// Directory-backed authoritative store used by `inlay-sync`
    #[serde(default)]
    pub authority: AuthorityConfig,
    /// Content observer behaviour
    #[serde(default)]
    pub observer: ObserverConfig,
}

impl Debug for InlayConfig {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("InlayConfig")
            .field("cache", &self.cache)
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("INLAY")
        .separator("__")
        .ignore_empty(true)
        .try_parsing(true)
}

impl InlayConfig {
    /// Loads configuration from hierarchical sources without validation.
    ///
    /// Sources are merged in the following order (later sources override earlier):
    /// 1. Type defaults (lowest priority)
    /// 2. Configuration file from `CONFIG_PATH` environment variable (if set)
    /// 3. Environment variables with `INLAY__` prefix (highest priority)
    ///
    /// Callers MUST call `validate()` before using the configuration.
    ///
    /// # Examples
    /// ```ignore
    /// std::env::set_var("INLAY__CACHE__CAPACITY", "250");
    /// let cfg = InlayConfig::new()?.validate()?;
    /// ```
    pub fn new() -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Ok(config_path) = env::var("CONFIG_PATH") {
            builder = builder.add_source(File::with_name(&config_path).required(true));
        }

        builder = builder.add_source(env_source());

        let config: Self = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Applies additional configuration overrides from file without validation.
    ///
    /// Merging order (later sources override earlier):
    /// 1. Current configuration values
    /// 2. New configuration file
    /// 3. Latest environment variables (highest priority)
    pub fn with_override_config(
        &self,
        path: &str,
    ) -> Result<Self> {
        let config: Self = Config::builder()
            .add_source(Config::try_from(self)?)
            .add_source(File::with_name(path))
            .add_source(env_source())
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Validates every subsystem and returns the validated instance
    pub fn validate(self) -> Result<Self> {
        self.cache.validate()?;
        self.storage.validate()?;
        self.authority.validate()?;
        self.observer.validate()?;
        Ok(self)
    }
}

pub(super) fn validate_directory(
    path: &Path,
    name: &str,
) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Error::Config(ConfigError::Message(format!(
            "{name} path cannot be empty"
        ))));
    }

    if path.exists() && !path.is_dir() {
        return Err(Error::Config(ConfigError::Message(format!(
            "{name} path {} is not a directory",
            path.display()
        ))));
    }

    Ok(())
}
