use std::borrow::Cow;
use std::fmt;

use crate::callback::check_arity;
use crate::Result;

/// Opaque identity of a faked method.
///
/// Which concrete call a handle stands for is decided by the fake adapter;
/// the engine only carries it around and compares it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodHandle {
    service: &'static str,
    method: Cow<'static, str>,
}

impl MethodHandle {
    /// Handle for `method` on the service type `S` (usually a `dyn Trait`).
    pub fn of<S: ?Sized + 'static>(method: &'static str) -> Self {
        Self {
            service: std::any::type_name::<S>(),
            method: Cow::Borrowed(method),
        }
    }

    /// Handle built from names only, for adapters resolving methods at runtime.
    pub fn named(
        service: &'static str,
        method: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            service,
            method: method.into(),
        }
    }

    /// Handle for a method discovered at runtime together with its parameter
    /// count. Fails with `UnsupportedArity` above five parameters.
    pub fn dynamic(
        service: &'static str,
        method: impl Into<Cow<'static, str>>,
        arity: usize,
    ) -> Result<Self> {
        check_arity(arity)?;
        Ok(Self::named(service, method))
    }

    pub fn service(&self) -> &'static str {
        self.service
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn belongs_to<S: ?Sized + 'static>(&self) -> bool {
        self.service == std::any::type_name::<S>()
    }
}

impl fmt::Display for MethodHandle {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}::{}", self.service, self.method)
    }
}

/// Closed set of method shapes a descriptor can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    /// Fire-and-forget call returning nothing
    SyncVoid,
    /// Synchronous call returning a value
    SyncResult,
    /// Future-returning call without a value
    AsyncVoid,
    /// Future-returning call resolving to a value
    AsyncResult,
}

impl DescriptorKind {
    pub fn is_async(self) -> bool {
        matches!(self, DescriptorKind::AsyncVoid | DescriptorKind::AsyncResult)
    }

    pub fn returns_value(self) -> bool {
        matches!(self, DescriptorKind::SyncResult | DescriptorKind::AsyncResult)
    }
}
