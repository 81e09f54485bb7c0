use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::BuilderEntry;
use super::BuilderRegistry;
use super::PersistentBuilder;
use crate::ConvertError;
use crate::Result;

/// One persisted builder.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SerializedBuilder {
    pub service_type: String,
    pub kind: String,
    pub payload: Vec<u8>,
}

/// Storage-neutral image of a [`BuilderRegistry`], in registration order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistrySnapshot {
    pub builders: Vec<SerializedBuilder>,
}

impl RegistrySnapshot {
    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }
}

type Decoder = fn(&[u8]) -> Result<BuilderEntry>;

/// Converts registries to snapshots and back.
///
/// Every builder type that may appear in a snapshot has to be registered
/// so its payload can be decoded.
#[derive(Clone, Default)]
pub struct BuilderConverter {
    decoders: HashMap<&'static str, Decoder>,
}

impl BuilderConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<B: PersistentBuilder>(mut self) -> Self {
        self.decoders.insert(B::KIND, decode_builder::<B>);
        self
    }

    pub fn knows(
        &self,
        kind: &str,
    ) -> bool {
        self.decoders.contains_key(kind)
    }

    pub fn to_snapshot(
        &self,
        registry: &BuilderRegistry,
    ) -> Result<RegistrySnapshot> {
        let builders = registry
            .get_all_builders()
            .iter()
            .map(|entry| {
                Ok(SerializedBuilder {
                    service_type: entry.service_type().to_string(),
                    kind: entry.kind().to_string(),
                    payload: entry.encode()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        debug!("converted {} builder(s) to snapshot", builders.len());
        Ok(RegistrySnapshot { builders })
    }

    pub fn from_snapshot(
        &self,
        snapshot: &RegistrySnapshot,
    ) -> Result<BuilderRegistry> {
        let entries = snapshot
            .builders
            .iter()
            .map(|serialized| {
                let decode = self
                    .decoders
                    .get(serialized.kind.as_str())
                    .ok_or_else(|| ConvertError::UnknownBuilderKind(serialized.kind.clone()))?;
                decode(&serialized.payload)
            })
            .collect::<Result<Vec<_>>>()?;
        debug!("restored {} builder(s) from snapshot", entries.len());
        Ok(BuilderRegistry::from_entries(entries))
    }
}

impl std::fmt::Debug for BuilderConverter {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("BuilderConverter")
            .field("kinds", &self.decoders.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn decode_builder<B: PersistentBuilder>(payload: &[u8]) -> Result<BuilderEntry> {
    let builder: B = bincode::deserialize(payload).map_err(|source| ConvertError::Decode {
        kind: B::KIND.to_string(),
        source,
    })?;
    Ok(BuilderEntry::new(builder))
}
