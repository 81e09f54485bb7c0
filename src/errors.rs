//! Test-Double Engine Error Hierarchy
//!
//! Configuration and dispatch errors surface to the calling test immediately.
//! Storage and adapter failures are nested transparently so their message
//! and source reach the caller unchanged.

use config::ConfigError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A descriptor (or its container) was configured more than once
    #[error("Method call {method} is already configured: {detail}")]
    AlreadyConfigured { method: String, detail: &'static str },

    /// Dispatch attempted without any terminal callback
    #[error("No behavior configured for {method}")]
    NoBehaviorConfigured { method: String },

    /// More than five parameters requested
    #[error("Unsupported arity {arity}: at most {max} parameters are supported")]
    UnsupportedArity { arity: usize, max: usize },

    /// Callback or configuration form not available for the method's shape
    #[error("Invalid callback shape for {method}: {reason}")]
    InvalidShape { method: String, reason: &'static str },

    /// Snapshot persistence failures
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Fake/mock adapter failures during setup, invocation or verification
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// Settings loading or validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Embedded database errors
    #[error(transparent)]
    Sled(#[from] sled::Error),

    /// Serialization failures for persisted data
    #[error(transparent)]
    BincodeError(#[from] bincode::Error),

    /// Nothing stored under the requested identifier
    #[error("No builders snapshot stored under id {id}")]
    SnapshotNotFound { id: String },

    /// Builder payload conversion failures
    #[error("Builder conversion failed")]
    Convert(#[from] ConvertError),

    /// Disk I/O failures while opening a backend
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Error type for builder snapshot conversion
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Snapshot references a builder kind the converter does not know
    #[error("unknown builder kind: {0}")]
    UnknownBuilderKind(String),

    /// Registered entry does not hold the builder type its kind claims
    #[error("builder entry of kind {kind} does not hold the expected type")]
    TypeMismatch { kind: String },

    /// Payload decoding failure with context
    #[error("failed to decode builder of kind {kind}: {source}")]
    Decode {
        kind: String,
        #[source]
        source: bincode::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// Method invoked on a fake without an installed behavior
    #[error("Unexpected call to {method}: no behavior installed")]
    UnexpectedCall { method: String },

    /// Handle belongs to another service than the fake
    #[error("Method {method} does not belong to faked service {service}")]
    ForeignMethod { method: String, service: &'static str },

    /// Installed behavior has other parameter or result types than requested
    #[error("Behavior installed for {method} does not match the invoked signature")]
    SignatureMismatch { method: String },

    /// Synchronous invocation hit a pending behavior
    #[error("Method {method} is set up as pending and cannot be invoked synchronously")]
    PendingOnSynchronousCall { method: String },

    /// Call count verification failure
    #[error("Expected {method} to be called {expected}, but it was called {actual} time(s)")]
    CallCountMismatch {
        method: String,
        expected: String,
        actual: usize,
    },
}

impl From<ConvertError> for Error {
    fn from(e: ConvertError) -> Self {
        Error::Storage(StorageError::Convert(e))
    }
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Error::Storage(StorageError::BincodeError(e))
    }
}

impl From<sled::Error> for Error {
    fn from(e: sled::Error) -> Self {
        Error::Storage(StorageError::Sled(e))
    }
}
