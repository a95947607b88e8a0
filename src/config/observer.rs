use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::constants::DEFAULT_OBSERVER_SOURCE;
use crate::Error;
use crate::Result;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ObserverConfig {
    /// `source` tag on `DataAdded` events raised by the content observer
    #[serde(default = "default_sync_source")]
    pub sync_source: String,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            sync_source: default_sync_source(),
        }
    }
}

impl ObserverConfig {
    pub fn validate(&self) -> Result<()> {
        if self.sync_source.trim().is_empty() {
            return Err(Error::Config(ConfigError::Message(
                "observer.sync_source cannot be empty".into(),
            )));
        }
        Ok(())
    }
}

fn default_sync_source() -> String {
    DEFAULT_OBSERVER_SOURCE.to_string()
}
