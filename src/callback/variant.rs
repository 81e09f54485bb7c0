use std::fmt;
use std::sync::Arc;

use super::ActionWrapper;
use super::CallArgs;
use super::FuncWrapper;

/// Error surfaced by a faked call.
///
/// Shared so the caller observes the very object that was configured.
pub type CallError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Successful completion: optional observer of the call's arguments plus the
/// producer of the returned value (`()` for void shapes).
pub struct OnComplete<A, R> {
    pub on_complete: Option<ActionWrapper<A>>,
    pub result: FuncWrapper<A, R>,
}

impl<A, R> Clone for OnComplete<A, R> {
    fn clone(&self) -> Self {
        Self {
            on_complete: self.on_complete.clone(),
            result: self.result.clone(),
        }
    }
}

/// Resolution policy declared for one method call.
pub enum MethodCallback<A, R = ()> {
    /// Succeeds, after running the optional completion action
    Complete(OnComplete<A, R>),
    /// Fails with exactly this error
    Throw(CallError),
    /// Never settles; asynchronous shapes only
    Pending,
    /// Side effect run alongside the terminal callback
    Custom(ActionWrapper<A>),
}

impl<A: CallArgs, R: Send + 'static> MethodCallback<A, R> {
    pub fn complete_with_result(result: FuncWrapper<A, R>) -> Self {
        MethodCallback::Complete(OnComplete {
            on_complete: None,
            result,
        })
    }

    pub fn throw(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        MethodCallback::Throw(Arc::new(error))
    }

    pub fn custom(effect: ActionWrapper<A>) -> Self {
        MethodCallback::Custom(effect)
    }
}

impl<A: CallArgs> MethodCallback<A, ()> {
    pub fn complete() -> Self {
        Self::complete_with_result(FuncWrapper::from_tuple_fn(|_: A| ()))
    }

    pub fn complete_with(on_complete: ActionWrapper<A>) -> Self {
        MethodCallback::Complete(OnComplete {
            on_complete: Some(on_complete),
            result: FuncWrapper::from_tuple_fn(|_: A| ()),
        })
    }
}

impl<A, R> MethodCallback<A, R> {
    /// Complete, Throw and Pending decide how the call resolves; Custom does not.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, MethodCallback::Custom(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            MethodCallback::Complete(_) => "complete",
            MethodCallback::Throw(_) => "throw",
            MethodCallback::Pending => "pending",
            MethodCallback::Custom(_) => "custom",
        }
    }
}

impl<A, R> Clone for MethodCallback<A, R> {
    fn clone(&self) -> Self {
        match self {
            MethodCallback::Complete(c) => MethodCallback::Complete(c.clone()),
            MethodCallback::Throw(e) => MethodCallback::Throw(e.clone()),
            MethodCallback::Pending => MethodCallback::Pending,
            MethodCallback::Custom(a) => MethodCallback::Custom(a.clone()),
        }
    }
}

impl<A, R> fmt::Debug for MethodCallback<A, R> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            MethodCallback::Throw(e) => f.debug_tuple("Throw").field(&e.to_string()).finish(),
            other => f.write_str(other.name()),
        }
    }
}
