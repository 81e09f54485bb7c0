use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::trace;

use crate::RegistrySnapshot;
use crate::Result;
use crate::SnapshotStorage;
use crate::StorageError;

/// In-process snapshot storage; contents die with the process.
#[derive(Debug, Default)]
pub struct MemorySnapshotStorage {
    snapshots: RwLock<HashMap<String, RegistrySnapshot>>,
}

impl MemorySnapshotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.read().is_empty()
    }
}

impl SnapshotStorage for MemorySnapshotStorage {
    fn store(
        &self,
        id: &str,
        snapshot: &RegistrySnapshot,
    ) -> Result<()> {
        trace!("store snapshot {} with {} builder(s)", id, snapshot.len());
        self.snapshots.write().insert(id.to_string(), snapshot.clone());
        Ok(())
    }

    fn load(
        &self,
        id: &str,
    ) -> Result<RegistrySnapshot> {
        self.snapshots
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::SnapshotNotFound { id: id.to_string() }.into())
    }

    fn remove(
        &self,
        id: &str,
    ) -> Result<bool> {
        Ok(self.snapshots.write().remove(id).is_some())
    }
}
