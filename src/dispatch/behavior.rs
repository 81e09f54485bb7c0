use std::sync::Arc;

use tracing::trace;

use crate::CallArgs;
use crate::CallError;
use crate::CallResult;
use crate::CallbackContainer;
use crate::DescriptorKind;
use crate::Error;
use crate::LazyCallbacks;
use crate::MethodCall;
use crate::MethodCallback;
use crate::Result;

/// How a faked call resolved.
#[derive(Debug)]
pub enum Outcome<R> {
    /// Returned a value or failed with the configured error
    Ready(std::result::Result<R, CallError>),
    /// Must never settle
    Pending,
}

impl<R> Outcome<R> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Outcome::Pending)
    }
}

/// When the effect reaches the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationMode {
    /// Returned directly from the call
    Immediate,
    /// Delivered through the future the call returns
    Eventual,
}

enum Source<A, R> {
    Declared(CallbackContainer<A, R>),
    Deferred(Arc<LazyCallbacks<A, R>>),
}

impl<A, R> Clone for Source<A, R> {
    fn clone(&self) -> Self {
        match self {
            Source::Declared(c) => Source::Declared(c.clone()),
            Source::Deferred(l) => Source::Deferred(l.clone()),
        }
    }
}

/// Immutable effect compiled from a configured [`MethodCall`], installed on
/// a fake and run every time the faked method is invoked.
pub struct Behavior<A, R> {
    description: String,
    mode: InvocationMode,
    source: Source<A, R>,
}

impl<A: CallArgs, R: CallResult> Behavior<A, R> {
    /// # Errors
    /// `NoBehaviorConfigured` if the call has no terminal callback (or was
    /// never configured); `InvalidShape` if a synchronous call would pend.
    pub fn compile(call: &MethodCall<A, R>) -> Result<Self> {
        let description = call.description();
        let source = match (call.callbacks(), call.lazy()) {
            (Some(container), _) => {
                if container.terminal().is_none() {
                    return Err(Error::NoBehaviorConfigured { method: description });
                }
                Source::Declared(container.clone())
            }
            (None, Some(lazy)) => Source::Deferred(lazy.clone()),
            (None, None) => return Err(Error::NoBehaviorConfigured { method: description }),
        };

        let mode = match call.kind() {
            DescriptorKind::SyncVoid | DescriptorKind::SyncResult => {
                let pends = match &source {
                    Source::Declared(c) => c
                        .callbacks()
                        .iter()
                        .any(|cb| matches!(cb, MethodCallback::Pending)),
                    Source::Deferred(_) => true,
                };
                if pends {
                    return Err(Error::InvalidShape {
                        method: description,
                        reason: "synchronous calls cannot stay pending or defer their callbacks",
                    });
                }
                InvocationMode::Immediate
            }
            DescriptorKind::AsyncVoid | DescriptorKind::AsyncResult => InvocationMode::Eventual,
        };

        Ok(Self {
            description,
            mode,
            source,
        })
    }

    pub fn mode(&self) -> InvocationMode {
        self.mode
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Runs the declared callbacks in order against `args`.
    ///
    /// Custom side effects and completion actions all run before the
    /// outcome is handed back, so they are observable before the call
    /// settles.
    pub fn invoke(
        &self,
        args: A,
    ) -> Outcome<R> {
        trace!("invoke {}", self.description);
        match &self.source {
            Source::Declared(container) => resolve(&self.description, container, args),
            Source::Deferred(lazy) => match lazy.generate_for_call(args.clone()) {
                Ok(container) => resolve(&self.description, &container, args),
                Err(e) => Outcome::Ready(Err(Arc::new(e))),
            },
        }
    }
}

fn resolve<A: CallArgs, R: CallResult>(
    description: &str,
    container: &CallbackContainer<A, R>,
    args: A,
) -> Outcome<R> {
    let mut outcome = None;
    for callback in container.callbacks() {
        match callback {
            MethodCallback::Custom(effect) => effect.invoke(args.clone()),
            MethodCallback::Complete(complete) => {
                if let Some(on_complete) = &complete.on_complete {
                    on_complete.invoke(args.clone());
                }
                outcome = Some(Outcome::Ready(Ok(complete.result.invoke(args.clone()))));
            }
            MethodCallback::Throw(error) => outcome = Some(Outcome::Ready(Err(error.clone()))),
            MethodCallback::Pending => outcome = Some(Outcome::Pending),
        }
    }
    outcome.unwrap_or_else(|| {
        let error: CallError = Arc::new(Error::NoBehaviorConfigured {
            method: description.to_string(),
        });
        Outcome::Ready(Err(error))
    })
}

impl<A, R> Clone for Behavior<A, R> {
    fn clone(&self) -> Self {
        Self {
            description: self.description.clone(),
            mode: self.mode,
            source: self.source.clone(),
        }
    }
}

impl<A, R> std::fmt::Debug for Behavior<A, R> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("Behavior")
            .field("description", &self.description)
            .field("mode", &self.mode)
            .finish()
    }
}
