mod memory_storage;
mod sled_storage;
mod snapshot_storage;


use std::path::Path;
use std::sync::Arc;

#[doc(hidden)]
pub use memory_storage::*;
#[doc(hidden)]
pub use sled_storage::*;
#[doc(hidden)]
pub use snapshot_storage::*;
use tracing::debug;
use tracing::warn;

use crate::Result;
use crate::StorageBackend;
use crate::StorageConfig;
use crate::StorageError;

/// Opens the snapshot backend selected by `config`.
pub fn open_snapshot_storage(config: &StorageConfig) -> Result<Arc<dyn SnapshotStorage>> {
    match config.backend {
        StorageBackend::Memory => Ok(Arc::new(MemorySnapshotStorage::new())),
        StorageBackend::Sled => {
            let db = init_sled_snapshot_db(&config.db_root_dir).map_err(StorageError::from)?;
            Ok(Arc::new(SledSnapshotStorage::new(Arc::new(db))?))
        }
    }
}

pub fn init_sled_snapshot_db(
    sled_db_root_path: impl AsRef<Path> + std::fmt::Debug
) -> std::result::Result<sled::Db, std::io::Error> {
    debug!("init_sled_snapshot_db from path: {:?}", &sled_db_root_path);

    let path = sled_db_root_path.as_ref();
    let snapshot_db_path = path.join("builder_snapshots");

    sled::Config::default()
        .path(&snapshot_db_path)
        .cache_capacity(10 * 1024 * 1024) //10MB
        .use_compression(true)
        .compression_factor(1)
        .open()
        .map_err(|e| {
            warn!(
                "Try to open DB at this location: {:?} and failed: {:?}",
                snapshot_db_path, e
            );
            std::io::Error::other(e)
        })
}
