use std::any::Any;
use std::sync::Arc;

use tracing::debug;

use super::FakeBuilder;
use super::PersistentBuilder;
use crate::ConvertError;
use crate::Result;

type Encoder = fn(&(dyn Any + Send + Sync)) -> Result<Vec<u8>>;

/// Type-erased registry slot holding one builder.
#[derive(Clone)]
pub struct BuilderEntry {
    service_type: &'static str,
    kind: &'static str,
    builder: Arc<dyn Any + Send + Sync>,
    // Arc<dyn FakeBuilder<Service = S>>, boxed once more to be `Any`
    typed: Arc<dyn Any + Send + Sync>,
    encode: Encoder,
}

impl BuilderEntry {
    pub fn new<B: PersistentBuilder>(builder: B) -> Self {
        let builder = Arc::new(builder);
        let typed: Arc<dyn FakeBuilder<Service = B::Service>> = builder.clone();
        Self {
            service_type: std::any::type_name::<B::Service>(),
            kind: B::KIND,
            builder,
            typed: Arc::new(typed),
            encode: encode_builder::<B>,
        }
    }

    pub fn service_type(&self) -> &'static str {
        self.service_type
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Concrete builder, if this entry holds a `B`.
    pub fn downcast<B: PersistentBuilder>(&self) -> Option<Arc<B>> {
        self.builder.clone().downcast::<B>().ok()
    }

    pub fn as_builder_of<S: ?Sized + 'static>(&self) -> Option<Arc<dyn FakeBuilder<Service = S>>> {
        self.typed
            .downcast_ref::<Arc<dyn FakeBuilder<Service = S>>>()
            .cloned()
    }

    pub(crate) fn encode(&self) -> Result<Vec<u8>> {
        (self.encode)(self.builder.as_ref())
    }
}

impl std::fmt::Debug for BuilderEntry {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("BuilderEntry")
            .field("service_type", &self.service_type)
            .field("kind", &self.kind)
            .finish()
    }
}

fn encode_builder<B: PersistentBuilder>(builder: &(dyn Any + Send + Sync)) -> Result<Vec<u8>> {
    let builder = builder
        .downcast_ref::<B>()
        .ok_or_else(|| ConvertError::TypeMismatch {
            kind: B::KIND.to_string(),
        })?;
    Ok(bincode::serialize(builder)?)
}

/// Ordered collection of builders keyed by the service they fake.
///
/// Declaration order is kept across services: flows registering several
/// builders for one contract read them back in that order.
#[derive(Debug, Clone, Default)]
pub struct BuilderRegistry {
    entries: Vec<BuilderEntry>,
}

impl BuilderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<BuilderEntry>) -> Self {
        Self { entries }
    }

    pub fn add_builder<B: PersistentBuilder>(
        &mut self,
        builder: B,
    ) {
        self.add_entry(BuilderEntry::new(builder));
    }

    pub fn add_entry(
        &mut self,
        entry: BuilderEntry,
    ) {
        debug!("register {} builder for {}", entry.kind, entry.service_type);
        self.entries.push(entry);
    }

    /// Builders of the service `S`, in registration order.
    pub fn get_builders<S: ?Sized + 'static>(&self) -> Vec<Arc<dyn FakeBuilder<Service = S>>> {
        self.entries
            .iter()
            .filter_map(|entry| entry.as_builder_of::<S>())
            .collect()
    }

    /// Builders of one concrete builder type, identified by its kind tag.
    pub fn get_builders_of_kind(
        &self,
        kind: &str,
    ) -> Vec<&BuilderEntry> {
        self.entries.iter().filter(|entry| entry.kind == kind).collect()
    }

    /// Builders whose service type name is `service_type`, for callers that
    /// only know the service at runtime.
    pub fn get_builders_for_service(
        &self,
        service_type: &str,
    ) -> Vec<&BuilderEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.service_type == service_type)
            .collect()
    }

    pub fn get_all_builders(&self) -> &[BuilderEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
