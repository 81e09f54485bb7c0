use std::sync::Arc;

use nanoid::nanoid;
use tracing::debug;
use tracing::info;

use super::BuilderConverter;
use super::BuilderEntry;
use super::BuilderRegistry;
use super::FakeBuilder;
use super::PersistentBuilder;
use crate::open_snapshot_storage;
use crate::FakeSettings;
use crate::Result;
use crate::SnapshotStorage;
use crate::DEFAULT_SNAPSHOT_ID;
use crate::SESSION_ID_LEN;

/// Identifier a registry snapshot is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SnapshotId(String);

impl SnapshotId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// `base` suffixed with a random session id, so concurrent runs sharing
    /// one storage keep apart.
    pub fn unique(base: &str) -> Self {
        Self(format!("{}.{}", base, nanoid!(SESSION_ID_LEN)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SnapshotId {
    fn default() -> Self {
        Self(DEFAULT_SNAPSHOT_ID.to_string())
    }
}

impl std::fmt::Display for SnapshotId {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Holds the active registry of a test run and persists it.
///
/// Passed explicitly to whoever needs it; there is no process-wide instance.
pub struct BuilderRegistryContext {
    registry: BuilderRegistry,
    storage: Arc<dyn SnapshotStorage>,
    converter: BuilderConverter,
    default_id: SnapshotId,
}

impl BuilderRegistryContext {
    pub fn new(
        storage: Arc<dyn SnapshotStorage>,
        converter: BuilderConverter,
    ) -> Self {
        Self {
            registry: BuilderRegistry::new(),
            storage,
            converter,
            default_id: SnapshotId::default(),
        }
    }

    /// Opens the configured storage and picks the default snapshot id from `settings`.
    pub fn from_settings(
        settings: &FakeSettings,
        converter: BuilderConverter,
    ) -> Result<Self> {
        let storage = open_snapshot_storage(&settings.storage)?;
        let default_id = if settings.registry.per_session_ids {
            SnapshotId::unique(&settings.registry.snapshot_id)
        } else {
            SnapshotId::new(settings.registry.snapshot_id.clone())
        };
        debug!("registry context uses default snapshot id {}", default_id);
        Ok(Self::new(storage, converter).with_default_snapshot_id(default_id))
    }

    pub fn with_default_snapshot_id(
        mut self,
        id: SnapshotId,
    ) -> Self {
        self.default_id = id;
        self
    }

    pub fn default_snapshot_id(&self) -> &SnapshotId {
        &self.default_id
    }

    pub fn registry(&self) -> &BuilderRegistry {
        &self.registry
    }

    pub fn converter(&self) -> &BuilderConverter {
        &self.converter
    }

    pub fn get_builders<S: ?Sized + 'static>(&self) -> Vec<Arc<dyn FakeBuilder<Service = S>>> {
        self.registry.get_builders::<S>()
    }

    pub fn get_builders_of_kind(
        &self,
        kind: &str,
    ) -> Vec<&BuilderEntry> {
        self.registry.get_builders_of_kind(kind)
    }

    pub fn get_builders_for_service(
        &self,
        service_type: &str,
    ) -> Vec<&BuilderEntry> {
        self.registry.get_builders_for_service(service_type)
    }

    pub fn get_all_builders(&self) -> &[BuilderEntry] {
        self.registry.get_all_builders()
    }

    pub fn add_builder<B: PersistentBuilder>(
        &mut self,
        builder: B,
    ) {
        self.registry.add_builder(builder);
    }

    /// Persists the active registry under `id`, or the default identifier.
    pub fn serialize_builders(
        &self,
        id: Option<&str>,
    ) -> Result<()> {
        let id = id.unwrap_or(self.default_id.as_str());
        let snapshot = self.converter.to_snapshot(&self.registry)?;
        self.storage.store(id, &snapshot)?;
        info!("serialized {} builder(s) under {}", snapshot.len(), id);
        Ok(())
    }

    /// Replaces the active registry with the one stored under `id`, or the
    /// default identifier.
    ///
    /// On failure the active registry is left untouched.
    pub fn deserialize_builders(
        &mut self,
        id: Option<&str>,
    ) -> Result<()> {
        let id = id.unwrap_or(self.default_id.as_str()).to_string();
        let snapshot = self.storage.load(&id)?;
        let registry = self.converter.from_snapshot(&snapshot)?;
        info!("deserialized {} builder(s) from {}", registry.len(), id);
        self.registry = registry;
        Ok(())
    }

    /// Drops the snapshot stored under `id`, or the default identifier.
    pub fn remove_snapshot(
        &self,
        id: Option<&str>,
    ) -> Result<bool> {
        self.storage.remove(id.unwrap_or(self.default_id.as_str()))
    }

    /// Replaces the active registry.
    pub fn reset(
        &mut self,
        registry: BuilderRegistry,
    ) {
        self.registry = registry;
    }

    pub fn clear(&mut self) {
        debug!("clear {} registered builder(s)", self.registry.len());
        self.registry.clear();
    }
}

impl std::fmt::Debug for BuilderRegistryContext {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("BuilderRegistryContext")
            .field("registry", &self.registry)
            .field("default_id", &self.default_id)
            .finish()
    }
}
