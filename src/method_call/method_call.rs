use std::sync::Arc;

use tracing::debug;

use super::LazyCallbacks;
use crate::CallArgs;
use crate::CallResult;
use crate::CallbackContainer;
use crate::CallbackTemplate;
use crate::Callbacks;
use crate::DescriptorKind;
use crate::Error;
use crate::HasCallbacks;
use crate::MethodCallVisitor;
use crate::MethodHandle;
use crate::NoCallbacks;
use crate::Result;

/// Configured call of one faked method: which method, in which shape, and
/// the callbacks deciding how it resolves.
pub struct MethodCall<A, R = ()> {
    handle: MethodHandle,
    kind: DescriptorKind,
    template: CallbackTemplate,
    callbacks: Option<CallbackContainer<A, R>>,
    lazy: Option<Arc<LazyCallbacks<A, R>>>,
}

impl<A: CallArgs> MethodCall<A, ()> {
    /// Synchronous call returning nothing.
    pub fn sync_void(handle: MethodHandle) -> Self {
        Self::with_kind(handle, DescriptorKind::SyncVoid)
    }

    /// Future-returning call without a value.
    pub fn async_void(handle: MethodHandle) -> Self {
        Self::with_kind(handle, DescriptorKind::AsyncVoid)
    }
}

impl<A: CallArgs, R: CallResult> MethodCall<A, R> {
    /// Synchronous call returning an `R`.
    pub fn sync_with_result(handle: MethodHandle) -> Self {
        Self::with_kind(handle, DescriptorKind::SyncResult)
    }

    /// Future-returning call resolving to an `R`.
    pub fn async_with_result(handle: MethodHandle) -> Self {
        Self::with_kind(handle, DescriptorKind::AsyncResult)
    }

    fn with_kind(
        handle: MethodHandle,
        kind: DescriptorKind,
    ) -> Self {
        let mut template = CallbackTemplate::of::<A>();
        if kind.returns_value() {
            template = template.with_result_type(std::any::type_name::<R>());
        }
        Self {
            handle,
            kind,
            template,
            callbacks: None,
            lazy: None,
        }
    }

    pub fn handle(&self) -> &MethodHandle {
        &self.handle
    }

    pub fn kind(&self) -> DescriptorKind {
        self.kind
    }

    pub fn template(&self) -> &CallbackTemplate {
        &self.template
    }

    /// Human readable identity used in failure messages.
    pub fn description(&self) -> String {
        let parameters = self.template.parameter_types.join(", ");
        match self.template.result_type {
            Some(result) => format!("{}({}) -> {}", self.handle, parameters, result),
            None => format!("{}({})", self.handle, parameters),
        }
    }

    /// Callbacks declared up front, if any.
    pub fn callbacks(&self) -> Option<&CallbackContainer<A, R>> {
        self.callbacks.as_ref()
    }

    pub(crate) fn lazy(&self) -> Option<&Arc<LazyCallbacks<A, R>>> {
        self.lazy.as_ref()
    }

    pub fn is_configured(&self) -> bool {
        self.callbacks.is_some() || self.lazy.is_some()
    }

    /// Runs `build` against this call's empty container.
    ///
    /// # Errors
    /// `AlreadyConfigured` when the call was configured before or `build`
    /// added a second terminal callback; `InvalidShape` for a pending
    /// callback on a synchronous call.
    pub fn build_callbacks<F>(
        mut self,
        build: F,
    ) -> Result<Self>
    where
        F: FnOnce(Callbacks<A, R, NoCallbacks>) -> Callbacks<A, R, HasCallbacks>,
    {
        self.ensure_unconfigured()?;
        let container = build(Callbacks::new(self.empty_container()))
            .into_container()
            .seal()?;
        debug!(
            "{}: configured {} callback(s)",
            self.handle,
            container.callbacks().len()
        );
        self.callbacks = Some(container);
        Ok(self)
    }

    /// Double-dispatch entry point.
    pub fn accept<V: MethodCallVisitor>(
        &self,
        visitor: &V,
    ) -> Result<V::Output> {
        visitor.visit(self)
    }

    fn empty_container(&self) -> CallbackContainer<A, R> {
        CallbackContainer::new(self.description(), self.kind)
    }

    fn ensure_unconfigured(&self) -> Result<()> {
        if self.is_configured() {
            return Err(Error::AlreadyConfigured {
                method: self.description(),
                detail: "callbacks were already built",
            });
        }
        Ok(())
    }
}

impl<T: Clone + Send + 'static, R: CallResult> MethodCall<(T,), R> {
    /// Defers configuration until the method is called, so callbacks can be
    /// derived from the live argument (e.g. echoing it back). The producer
    /// runs again for every call.
    ///
    /// Only available on asynchronous calls.
    pub fn build_callbacks_with<F>(
        mut self,
        producer: F,
    ) -> Result<Self>
    where
        F: Fn(Callbacks<(T,), R, NoCallbacks>, T) -> Callbacks<(T,), R, HasCallbacks>
            + Send
            + Sync
            + 'static,
    {
        self.ensure_unconfigured()?;
        if !self.kind.is_async() {
            return Err(Error::InvalidShape {
                method: self.description(),
                reason: "deferred callbacks are only available for asynchronous calls",
            });
        }
        debug!("{}: callbacks deferred until called", self.handle);
        let producer = Arc::new(move |callbacks, (arg,): (T,)| producer(callbacks, arg));
        self.lazy = Some(Arc::new(LazyCallbacks::new(
            self.description(),
            self.kind,
            producer,
        )));
        Ok(self)
    }

    /// True once a producer was registered and no callbacks were generated yet.
    pub fn can_generate_callback(&self) -> bool {
        self.lazy.as_ref().is_some_and(|lazy| lazy.can_generate())
    }

    /// Finishes configuration from the live argument. One-shot.
    pub fn generate_callback(
        &self,
        arg: T,
    ) -> Result<()> {
        let lazy = self.lazy.as_ref().ok_or_else(|| Error::NoBehaviorConfigured {
            method: self.description(),
        })?;
        lazy.generate((arg,)).map(|_| ())
    }
}

impl<A: CallArgs, R: CallResult> std::fmt::Debug for MethodCall<A, R> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("MethodCall")
            .field("handle", &self.handle)
            .field("kind", &self.kind)
            .field("callbacks", &self.callbacks)
            .field("lazy", &self.lazy.is_some())
            .finish()
    }
}
