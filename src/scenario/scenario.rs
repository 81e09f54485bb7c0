use std::sync::Arc;

use tracing::debug;
use tracing::warn;

use super::TeardownService;
use crate::BuilderRegistryContext;
use crate::Result;

/// One scenario run owning its registry context.
///
/// `setup` optionally restores the builders a previous process stored,
/// `teardown` releases registered services and empties the registry.
pub struct Scenario {
    context: BuilderRegistryContext,
    teardown_services: Vec<Arc<dyn TeardownService>>,
    restore_from: Option<Option<String>>,
}

impl Scenario {
    pub fn new(context: BuilderRegistryContext) -> Self {
        Self {
            context,
            teardown_services: Vec::new(),
            restore_from: None,
        }
    }

    /// Restores the registry from the context's default snapshot on setup.
    pub fn restoring(mut self) -> Self {
        self.restore_from = Some(None);
        self
    }

    /// Restores the registry from the snapshot stored under `id` on setup.
    pub fn restoring_from(
        mut self,
        id: impl Into<String>,
    ) -> Self {
        self.restore_from = Some(Some(id.into()));
        self
    }

    pub fn register_teardown(
        &mut self,
        service: Arc<dyn TeardownService>,
    ) {
        self.teardown_services.push(service);
    }

    pub fn context(&self) -> &BuilderRegistryContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut BuilderRegistryContext {
        &mut self.context
    }

    pub fn setup(&mut self) -> Result<()> {
        if let Some(id) = &self.restore_from {
            self.context.deserialize_builders(id.as_deref())?;
        }
        debug!(
            "scenario set up with {} builder(s)",
            self.context.get_all_builders().len()
        );
        Ok(())
    }

    /// Tears down every registered service in registration order, then
    /// clears the registry.
    ///
    /// All services run even if one fails; the first failure is returned.
    pub fn teardown(&mut self) -> Result<()> {
        let mut first_error = None;
        for service in &self.teardown_services {
            if let Err(e) = service.tear_down() {
                warn!("teardown service failed: {}", e);
                first_error.get_or_insert(e);
            }
        }
        self.context.clear();
        debug!("scenario torn down");
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Gives the context back, e.g. to hand it to the next scenario.
    pub fn into_context(self) -> BuilderRegistryContext {
        self.context
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("context", &self.context)
            .field("teardown_services", &self.teardown_services.len())
            .finish()
    }
}
