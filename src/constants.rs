// -
// Builder snapshots

/// Snapshot identifier used when the caller does not supply one.
///
/// Parallel scenario runs sharing this id overwrite each other; use
/// [`crate::SnapshotId::unique`] per session instead.
pub const DEFAULT_SNAPSHOT_ID: &str = "serialized_builders_collection.data";

/// Sled tree holding serialized builder snapshots
pub(crate) const BUILDER_SNAPSHOT_TREE: &str = "_builder_snapshots";

/// Length of the random suffix of session-scoped snapshot ids
pub(crate) const SESSION_ID_LEN: usize = 12;

// -
// Method calls

/// Largest number of parameters a described method may take
pub const MAX_ARITY: usize = 5;
