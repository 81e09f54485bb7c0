use std::sync::Arc;

use tracing::debug;
use tracing::error;
use tracing::info;

use crate::RegistrySnapshot;
use crate::Result;
use crate::SnapshotStorage;
use crate::StorageError;
use crate::BUILDER_SNAPSHOT_TREE;

/// Snapshot storage backed by a sled tree, shared across processes through
/// the database directory.
#[derive(Clone)]
pub struct SledSnapshotStorage {
    db: Arc<sled::Db>,
    tree: Arc<sled::Tree>,
}

impl std::fmt::Debug for SledSnapshotStorage {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("SledSnapshotStorage")
            .field("tree_len", &self.tree.len())
            .finish()
    }
}

impl SledSnapshotStorage {
    pub fn new(db: Arc<sled::Db>) -> Result<Self> {
        let tree = db.open_tree(BUILDER_SNAPSHOT_TREE).map_err(|e| {
            error!("Failed to open builder snapshot tree: {}", e);
            StorageError::Sled(e)
        })?;
        Ok(Self {
            db,
            tree: Arc::new(tree),
        })
    }

    pub fn db(&self) -> &Arc<sled::Db> {
        &self.db
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

impl SnapshotStorage for SledSnapshotStorage {
    fn store(
        &self,
        id: &str,
        snapshot: &RegistrySnapshot,
    ) -> Result<()> {
        let value = bincode::serialize(snapshot)?;
        self.tree.insert(id.as_bytes(), value)?;
        let bytes = self.tree.flush()?;
        info!(
            "stored snapshot {} ({} builder(s), {} bytes flushed)",
            id,
            snapshot.len(),
            bytes
        );
        Ok(())
    }

    fn load(
        &self,
        id: &str,
    ) -> Result<RegistrySnapshot> {
        debug!("load snapshot {}", id);
        match self.tree.get(id.as_bytes())? {
            Some(ivec) => Ok(bincode::deserialize::<RegistrySnapshot>(&ivec)?),
            None => Err(StorageError::SnapshotNotFound { id: id.to_string() }.into()),
        }
    }

    fn remove(
        &self,
        id: &str,
    ) -> Result<bool> {
        let removed = self.tree.remove(id.as_bytes())?.is_some();
        self.tree.flush()?;
        Ok(removed)
    }
}
