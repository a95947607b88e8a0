use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::constants::DEFAULT_CACHE_CAPACITY;
use crate::Error;
use crate::Result;

/// Resource cache sizing
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheConfig {
    /// Maximum number of live handles; the oldest is evicted past this
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

impl CacheConfig {
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::Config(ConfigError::Message(
                "cache.capacity must be greater than 0".into(),
            )));
        }
        Ok(())
    }
}

fn default_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}
