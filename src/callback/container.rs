//! Callback container and the typestate builder that fills it.
//!
//! A container starts in [`NoCallbacks`]; every add operation moves it to
//! [`HasCallbacks`], the only state a descriptor accepts back from its
//! configuration function. Shape or ordering violations are recorded on the
//! container and reported once configuration returns.

use std::marker::PhantomData;
use std::sync::Arc;

use tracing::trace;

use super::ActionWrapper;
use super::CallArgs;
use super::CallError;
use super::FuncWrapper;
use super::IntoAction;
use super::IntoResultFn;
use super::MethodCallback;
use super::OnComplete;
use crate::DescriptorKind;
use crate::Error;
use crate::Result;

/// Ordered callbacks declared for one method call.
pub struct CallbackContainer<A, R> {
    description: String,
    kind: DescriptorKind,
    callbacks: Vec<MethodCallback<A, R>>,
    violation: Option<Error>,
}

impl<A: CallArgs, R: Send + 'static> CallbackContainer<A, R> {
    pub(crate) fn new(
        description: String,
        kind: DescriptorKind,
    ) -> Self {
        Self {
            description,
            kind,
            callbacks: Vec::new(),
            violation: None,
        }
    }

    /// Textual identity of the configured method, for failure messages.
    pub fn to_description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> DescriptorKind {
        self.kind
    }

    pub fn callbacks(&self) -> &[MethodCallback<A, R>] {
        &self.callbacks
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn terminal(&self) -> Option<&MethodCallback<A, R>> {
        self.callbacks.iter().find(|c| c.is_terminal())
    }

    fn push(
        &mut self,
        callback: MethodCallback<A, R>,
    ) {
        // Keep the first violation; later ones are usually consequences.
        if self.violation.is_some() {
            return;
        }
        if matches!(callback, MethodCallback::Pending) && !self.kind.is_async() {
            self.violation = Some(Error::InvalidShape {
                method: self.description.clone(),
                reason: "pending callbacks are only available for asynchronous calls",
            });
            return;
        }
        if callback.is_terminal() && self.terminal().is_some() {
            self.violation = Some(Error::AlreadyConfigured {
                method: self.description.clone(),
                detail: "a terminal callback was already added",
            });
            return;
        }
        trace!("{}: add {} callback", self.description, callback.name());
        self.callbacks.push(callback);
    }

    /// Surfaces the first violation recorded while callbacks were added.
    pub(crate) fn seal(mut self) -> Result<Self> {
        match self.violation.take() {
            Some(e) => Err(e),
            None => Ok(self),
        }
    }
}

impl<A, R> Clone for CallbackContainer<A, R> {
    fn clone(&self) -> Self {
        Self {
            description: self.description.clone(),
            kind: self.kind,
            callbacks: self.callbacks.clone(),
            // Only sealed containers are cloned.
            violation: None,
        }
    }
}

impl<A, R> std::fmt::Debug for CallbackContainer<A, R> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("CallbackContainer")
            .field("description", &self.description)
            .field("kind", &self.kind)
            .field("callbacks", &self.callbacks)
            .finish()
    }
}

/// Container state before any callback was added
#[derive(Debug)]
pub struct NoCallbacks;

/// Container state once at least one callback was added
#[derive(Debug)]
pub struct HasCallbacks;

/// Fluent handle over a [`CallbackContainer`].
pub struct Callbacks<A, R, State = NoCallbacks> {
    container: CallbackContainer<A, R>,
    _state: PhantomData<State>,
}

impl<A: CallArgs, R: Send + 'static> Callbacks<A, R, NoCallbacks> {
    pub(crate) fn new(container: CallbackContainer<A, R>) -> Self {
        Self {
            container,
            _state: PhantomData,
        }
    }
}

impl<A: CallArgs, R: Send + 'static> Callbacks<A, R, HasCallbacks> {
    pub(crate) fn into_container(self) -> CallbackContainer<A, R> {
        self.container
    }
}

impl<A: CallArgs, R: Send + 'static, State> Callbacks<A, R, State> {
    pub fn to_description(&self) -> &str {
        self.container.to_description()
    }

    /// Appends any callback variant.
    pub fn add_callback(
        mut self,
        callback: MethodCallback<A, R>,
    ) -> Callbacks<A, R, HasCallbacks> {
        self.container.push(callback);
        Callbacks {
            container: self.container,
            _state: PhantomData,
        }
    }

    /// Appends a side effect run when the method is invoked.
    pub fn custom(
        self,
        effect: impl IntoAction<A>,
    ) -> Callbacks<A, R, HasCallbacks> {
        self.add_callback(MethodCallback::Custom(ActionWrapper::new(effect)))
    }

    /// Fails the call with `error`.
    pub fn throw_error(
        self,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Callbacks<A, R, HasCallbacks> {
        self.add_callback(MethodCallback::Throw(Arc::new(error)))
    }

    /// Fails the call with an already shared error object.
    pub fn throw_shared(
        self,
        error: CallError,
    ) -> Callbacks<A, R, HasCallbacks> {
        self.add_callback(MethodCallback::Throw(error))
    }

    /// Leaves the call suspended forever.
    pub fn without_callback(self) -> Callbacks<A, R, HasCallbacks> {
        self.add_callback(MethodCallback::Pending)
    }
}

impl<A: CallArgs, State> Callbacks<A, (), State> {
    pub fn complete(self) -> Callbacks<A, (), HasCallbacks> {
        self.add_callback(MethodCallback::complete())
    }

    /// Completes after handing the call's arguments to `on_complete`.
    pub fn complete_with(
        self,
        on_complete: impl IntoAction<A>,
    ) -> Callbacks<A, (), HasCallbacks> {
        self.add_callback(MethodCallback::complete_with(ActionWrapper::new(on_complete)))
    }
}

impl<A: CallArgs, R: Send + 'static, State> Callbacks<A, R, State> {
    /// Completes with a clone of `value`.
    pub fn returns(
        self,
        value: R,
    ) -> Callbacks<A, R, HasCallbacks>
    where
        R: Clone + Sync,
    {
        self.add_callback(MethodCallback::complete_with_result(FuncWrapper::constant(value)))
    }

    /// Completes with a value computed from the call's arguments.
    pub fn returns_with(
        self,
        result: impl IntoResultFn<A, R>,
    ) -> Callbacks<A, R, HasCallbacks> {
        self.add_callback(MethodCallback::complete_with_result(FuncWrapper::new(result)))
    }

    /// Completes with `value` after handing the arguments to `on_complete`.
    pub fn returns_and(
        self,
        value: R,
        on_complete: impl IntoAction<A>,
    ) -> Callbacks<A, R, HasCallbacks>
    where
        R: Clone + Sync,
    {
        self.add_callback(MethodCallback::Complete(OnComplete {
            on_complete: Some(ActionWrapper::new(on_complete)),
            result: FuncWrapper::constant(value),
        }))
    }
}
