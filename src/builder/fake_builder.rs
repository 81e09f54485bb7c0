use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::Fake;
use crate::MethodHandle;
use crate::Result;

/// Produces a ready-to-use faked `Service` from prior configuration.
///
/// Implementors keep the data their fake answers with (items, flags, ...)
/// and turn it into method calls in [`FakeBuilder::setup_fake`].
pub trait FakeBuilder: Send + Sync + 'static {
    type Service: ?Sized + 'static;

    /// Fake the builder configures
    fn fake(&self) -> &Fake<Self::Service>;

    /// Installs this builder's method calls on [`FakeBuilder::fake`].
    fn setup_fake(&self) -> Result<()>;

    /// Service object backed by the fake
    fn service(&self) -> Arc<Self::Service>;

    /// Sets up the fake and hands out the faked service.
    fn build(&self) -> Result<Arc<Self::Service>> {
        self.setup_fake()?;
        Ok(self.service())
    }

    fn verify_call(
        &self,
        method: &MethodHandle,
    ) -> Result<()> {
        self.fake().verify_call(method)
    }

    fn verify_no_call(
        &self,
        method: &MethodHandle,
    ) -> Result<()> {
        self.fake().verify_no_call(method)
    }

    fn verify_single_call(
        &self,
        method: &MethodHandle,
    ) -> Result<()> {
        self.fake().verify_single_call(method)
    }
}

/// Builder that can be stored in a registry snapshot and restored later,
/// possibly in another process.
pub trait PersistentBuilder: FakeBuilder + Serialize + DeserializeOwned {
    /// Stable tag identifying the builder type inside snapshots
    const KIND: &'static str;
}
