use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use dashmap::DashMap;
use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::debug;
use tracing::trace;

use super::FakeAdapter;
use super::FakeFactory;
use super::Times;
use crate::AdapterError;
use crate::Behavior;
use crate::CallArgs;
use crate::CallError;
use crate::CallResult;
use crate::Error;
use crate::InvocationMode;
use crate::MethodHandle;
use crate::Outcome;
use crate::Result;

#[derive(Default)]
struct FakeState {
    behaviors: DashMap<MethodHandle, Box<dyn Any + Send + Sync>>,
    calls: DashMap<MethodHandle, usize>,
}

/// In-process fake of the service `S`.
///
/// Clones share the installed behaviors and call counts, so a builder and
/// the service object it hands out observe the same state. Service
/// implementations forward each method to [`Fake::invoke`] or
/// [`Fake::invoke_async`].
pub struct Fake<S: ?Sized> {
    state: Arc<FakeState>,
    _service: PhantomData<fn() -> Box<S>>,
}

impl<S: ?Sized + 'static> Fake<S> {
    pub fn new() -> Self {
        Self {
            state: Arc::new(FakeState::default()),
            _service: PhantomData,
        }
    }

    /// Invokes a synchronous method. Behaviors installed for an
    /// asynchronous shape are rejected with a signature mismatch.
    pub fn invoke<A: CallArgs, R: CallResult>(
        &self,
        method: &MethodHandle,
        args: A,
    ) -> std::result::Result<R, CallError> {
        match self.resolve(method, args, InvocationMode::Immediate)? {
            Outcome::Ready(result) => result,
            Outcome::Pending => Err(adapter_failure(AdapterError::PendingOnSynchronousCall {
                method: method.to_string(),
            })),
        }
    }

    /// Invokes an asynchronous method. Callbacks run now; the returned
    /// future carries the outcome and never settles for pending calls.
    pub fn invoke_async<A: CallArgs, R: CallResult>(
        &self,
        method: &MethodHandle,
        args: A,
    ) -> BoxFuture<'static, std::result::Result<R, CallError>> {
        match self.resolve(method, args, InvocationMode::Eventual) {
            Ok(Outcome::Ready(result)) => futures::future::ready(result).boxed(),
            Ok(Outcome::Pending) => {
                debug!("{} stays pending", method);
                futures::future::pending().boxed()
            }
            Err(e) => futures::future::ready(Err(e)).boxed(),
        }
    }

    pub fn call_count(
        &self,
        method: &MethodHandle,
    ) -> usize {
        self.state.calls.get(method).map(|c| *c).unwrap_or(0)
    }

    pub fn verify_call(
        &self,
        method: &MethodHandle,
    ) -> Result<()> {
        self.verify_called(method, Times::AtLeastOnce)
    }

    pub fn verify_no_call(
        &self,
        method: &MethodHandle,
    ) -> Result<()> {
        self.verify_called(method, Times::Never)
    }

    pub fn verify_single_call(
        &self,
        method: &MethodHandle,
    ) -> Result<()> {
        self.verify_called(method, Times::Once)
    }

    /// Forgets recorded calls; installed behaviors stay.
    pub fn reset_calls(&self) {
        self.state.calls.clear();
    }

    fn resolve<A: CallArgs, R: CallResult>(
        &self,
        method: &MethodHandle,
        args: A,
        mode: InvocationMode,
    ) -> std::result::Result<Outcome<R>, CallError> {
        self.ensure_own(method).map_err(|e| Arc::new(e) as CallError)?;
        *self.state.calls.entry(method.clone()).or_insert(0) += 1;
        trace!("call #{} of {}", self.call_count(method), method);

        // Clone out of the map so callbacks may re-enter this fake.
        let behavior = {
            let installed = self.state.behaviors.get(method).ok_or_else(|| {
                adapter_failure(AdapterError::UnexpectedCall {
                    method: method.to_string(),
                })
            })?;
            installed
                .downcast_ref::<Behavior<A, R>>()
                .cloned()
                .ok_or_else(|| {
                    adapter_failure(AdapterError::SignatureMismatch {
                        method: method.to_string(),
                    })
                })?
        };
        if behavior.mode() != mode {
            return Err(adapter_failure(AdapterError::SignatureMismatch {
                method: method.to_string(),
            }));
        }
        Ok(behavior.invoke(args))
    }

    fn ensure_own(
        &self,
        method: &MethodHandle,
    ) -> Result<()> {
        if !method.belongs_to::<S>() {
            return Err(AdapterError::ForeignMethod {
                method: method.to_string(),
                service: std::any::type_name::<S>(),
            }
            .into());
        }
        Ok(())
    }
}

fn adapter_failure(e: AdapterError) -> CallError {
    Arc::new(Error::Adapter(e))
}

impl<S: ?Sized + 'static> FakeAdapter for Fake<S> {
    fn setup_behavior<A: CallArgs, R: CallResult>(
        &self,
        method: &MethodHandle,
        behavior: Behavior<A, R>,
    ) -> Result<()> {
        self.ensure_own(method)?;
        debug!("install behavior for {}", method);
        self.state.behaviors.insert(method.clone(), Box::new(behavior));
        Ok(())
    }

    fn verify_called(
        &self,
        method: &MethodHandle,
        times: Times,
    ) -> Result<()> {
        self.ensure_own(method)?;
        let actual = self.call_count(method);
        if !times.matches(actual) {
            return Err(AdapterError::CallCountMismatch {
                method: method.to_string(),
                expected: times.to_string(),
                actual,
            }
            .into());
        }
        Ok(())
    }
}

impl<S: ?Sized + 'static> Default for Fake<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized> Clone for Fake<S> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            _service: PhantomData,
        }
    }
}

impl<S: ?Sized> std::fmt::Debug for Fake<S> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("Fake")
            .field("behaviors", &self.state.behaviors.len())
            .field("calls", &self.state.calls.len())
            .finish()
    }
}

/// Factory of in-process [`Fake`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryFakeFactory;

impl FakeFactory for MemoryFakeFactory {
    type Fake<S: ?Sized + 'static> = Fake<S>;

    fn create_fake<S: ?Sized + 'static>(&self) -> Fake<S> {
        Fake::new()
    }
}
