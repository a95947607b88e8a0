use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use super::validate_directory;
use crate::Result;

/// Location of the directory-backed inlay store
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthorityConfig {
    #[serde(default = "default_inlay_dir")]
    pub inlay_dir: PathBuf,
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            inlay_dir: default_inlay_dir(),
        }
    }
}

impl AuthorityConfig {
    pub fn validate(&self) -> Result<()> {
        validate_directory(&self.inlay_dir, "authority.inlay_dir")
    }
}

fn default_inlay_dir() -> PathBuf {
    PathBuf::from("./inlays")
}
