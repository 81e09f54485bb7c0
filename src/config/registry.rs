use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;
use crate::DEFAULT_SNAPSHOT_ID;

/// Registry persistence settings
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RegistryConfig {
    /// Identifier used when `serialize_builders` / `deserialize_builders`
    /// are called without one
    #[serde(default = "default_snapshot_id")]
    pub snapshot_id: String,

    /// Suffix the default identifier with a random session id so that
    /// parallel runs sharing one storage do not overwrite each other
    #[serde(default)]
    pub per_session_ids: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            snapshot_id: default_snapshot_id(),
            per_session_ids: false,
        }
    }
}

impl RegistryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.snapshot_id.trim().is_empty() {
            return Err(Error::Config(ConfigError::Message(
                "registry.snapshot_id cannot be empty".into(),
            )));
        }
        Ok(())
    }
}

fn default_snapshot_id() -> String {
    DEFAULT_SNAPSHOT_ID.to_string()
}
