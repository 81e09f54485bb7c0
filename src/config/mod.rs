//! Settings for the builder registry and its snapshot storage.
//!
//! Loaded hierarchically:
//! - Default values as code base
//! - Configuration file pointed to by `CONFIG_PATH`
//! - Environment variables prefixed with `CALLFAKE__`
mod registry;
mod storage;
pub use registry::*;
pub use storage::*;

use std::env;

use config::Config;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Serialize;

use crate::Result;

const ENV_PREFIX: &str = "CALLFAKE";

/// Root settings container
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct FakeSettings {
    /// Snapshot identifiers used by registry persistence
    #[serde(default)]
    pub registry: RegistryConfig,
    /// Snapshot storage backend
    #[serde(default)]
    pub storage: StorageConfig,
}

impl FakeSettings {
    /// Loads settings from hierarchical sources without validation.
    ///
    /// Sources merge in this order (later overrides earlier):
    /// 1. Type defaults
    /// 2. File from the `CONFIG_PATH` environment variable (if set)
    /// 3. Environment variables with the `CALLFAKE__` prefix
    ///
    /// Callers must call `validate()` once all overrides are applied.
    ///
    /// # Examples
    /// ```ignore
    /// std::env::set_var("CALLFAKE__STORAGE__BACKEND", "sled");
    /// let settings = FakeSettings::new()?.validate()?;
    /// ```
    pub fn new() -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Ok(config_path) = env::var("CONFIG_PATH") {
            builder = builder.add_source(File::with_name(&config_path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .ignore_empty(true)
                .try_parsing(true),
        );

        let settings: Self = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    /// Applies overrides from `path`, then the environment again, without validation.
    pub fn with_override_config(
        &self,
        path: &str,
    ) -> Result<Self> {
        let settings: Self = Config::builder()
            .add_source(Config::try_from(self)?)
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Validates every section and returns the validated settings.
    pub fn validate(self) -> Result<Self> {
        self.registry.validate()?;
        self.storage.validate()?;
        Ok(self)
    }
}
