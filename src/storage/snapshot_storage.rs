//! Storage capability for builder snapshots.
//!
use crate::RegistrySnapshot;
use crate::Result;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
pub trait SnapshotStorage: Send + Sync + 'static {
    /// Stores `snapshot` under `id`, replacing what was stored before.
    fn store(
        &self,
        id: &str,
        snapshot: &RegistrySnapshot,
    ) -> Result<()>;

    /// Loads the snapshot stored under `id`.
    ///
    /// Fails with `StorageError::SnapshotNotFound` when nothing is stored.
    fn load(
        &self,
        id: &str,
    ) -> Result<RegistrySnapshot>;

    /// Drops the snapshot stored under `id`; returns whether one existed.
    fn remove(
        &self,
        id: &str,
    ) -> Result<bool>;
}
