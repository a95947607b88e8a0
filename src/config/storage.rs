//! Metadata persistence configuration
use std::path::PathBuf;

use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use super::validate_directory;
use crate::Error;
use crate::Result;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    /// Root directory; the metadata database lives in `<db_root_dir>/inlay_meta`
    #[serde(default = "default_db_root_dir")]
    pub db_root_dir: PathBuf,

    /// Sled page cache size in bytes
    #[serde(default = "default_cache_capacity_bytes")]
    pub cache_capacity_bytes: u64,

    /// Background flush interval; `None` disables periodic flushing
    #[serde(default = "default_flush_every_ms")]
    pub flush_every_ms: Option<u64>,

    #[serde(default = "default_use_compression")]
    pub use_compression: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_root_dir: default_db_root_dir(),
            cache_capacity_bytes: default_cache_capacity_bytes(),
            flush_every_ms: default_flush_every_ms(),
            use_compression: default_use_compression(),
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        validate_directory(&self.db_root_dir, "storage.db_root_dir")?;

        if self.cache_capacity_bytes == 0 {
            return Err(Error::Config(ConfigError::Message(
                "storage.cache_capacity_bytes must be greater than 0".into(),
            )));
        }

        if self.flush_every_ms == Some(0) {
            return Err(Error::Config(ConfigError::Message(
                "storage.flush_every_ms must be at least 1ms when set".into(),
            )));
        }
        Ok(())
    }
}

fn default_db_root_dir() -> PathBuf {
    PathBuf::from("./db")
}
fn default_cache_capacity_bytes() -> u64 {
    10 * 1024 * 1024 //10MB
}
// in ms
fn default_flush_every_ms() -> Option<u64> {
    Some(3)
}
fn default_use_compression() -> bool {
    true
}
