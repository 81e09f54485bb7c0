use std::fmt;
use std::sync::Arc;

use super::CallArgs;
use super::CallbackTemplate;
use super::IntoAction;
use super::IntoResultFn;

/// Visitor turning a wrapped callback into a description of its shape.
pub trait TemplateVisitor {
    type Template;

    fn visit_action(
        &self,
        arity: usize,
        parameter_types: Vec<&'static str>,
    ) -> Self::Template;

    fn visit_function(
        &self,
        arity: usize,
        parameter_types: Vec<&'static str>,
        result_type: &'static str,
    ) -> Self::Template;
}

/// Default visitor: collects the shape into a [`CallbackTemplate`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateCollector;

impl TemplateVisitor for TemplateCollector {
    type Template = CallbackTemplate;

    fn visit_action(
        &self,
        arity: usize,
        parameter_types: Vec<&'static str>,
    ) -> CallbackTemplate {
        CallbackTemplate {
            arity,
            parameter_types,
            result_type: None,
        }
    }

    fn visit_function(
        &self,
        arity: usize,
        parameter_types: Vec<&'static str>,
        result_type: &'static str,
    ) -> CallbackTemplate {
        CallbackTemplate {
            arity,
            parameter_types,
            result_type: Some(result_type),
        }
    }
}

/// Side-effecting callback of arity `A::ARITY`.
pub struct ActionWrapper<A> {
    action: Arc<dyn Fn(A) + Send + Sync>,
}

impl<A: CallArgs> ActionWrapper<A> {
    pub fn new(action: impl IntoAction<A>) -> Self {
        Self {
            action: Arc::new(move |args: A| action.call_with(args)),
        }
    }

    /// Wraps a callback taking the whole parameter tuple.
    pub fn from_tuple_fn(action: impl Fn(A) + Send + Sync + 'static) -> Self {
        Self {
            action: Arc::new(action),
        }
    }

    /// Callback that does nothing; used by plain completions.
    pub fn noop() -> Self {
        Self::from_tuple_fn(|_: A| {})
    }

    pub fn invoke(
        &self,
        args: A,
    ) {
        (self.action)(args)
    }

    pub fn accept<V: TemplateVisitor>(
        &self,
        visitor: &V,
    ) -> V::Template {
        visitor.visit_action(A::ARITY, A::parameter_types())
    }

    pub fn template(&self) -> CallbackTemplate {
        self.accept(&TemplateCollector)
    }
}

impl<A> Clone for ActionWrapper<A> {
    fn clone(&self) -> Self {
        Self {
            action: self.action.clone(),
        }
    }
}

impl<A: CallArgs> fmt::Debug for ActionWrapper<A> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("ActionWrapper")
            .field("arity", &A::ARITY)
            .finish()
    }
}

/// Result-producing callback of arity `A::ARITY`.
pub struct FuncWrapper<A, R> {
    func: Arc<dyn Fn(A) -> R + Send + Sync>,
}

impl<A: CallArgs, R: Send + 'static> FuncWrapper<A, R> {
    pub fn new(func: impl IntoResultFn<A, R>) -> Self {
        Self {
            func: Arc::new(move |args: A| func.call_with(args)),
        }
    }

    /// Wraps a function taking the whole parameter tuple.
    pub fn from_tuple_fn(func: impl Fn(A) -> R + Send + Sync + 'static) -> Self {
        Self { func: Arc::new(func) }
    }

    /// Function handing out clones of a fixed value, whatever the arguments.
    pub fn constant(value: R) -> Self
    where
        R: Clone + Sync,
    {
        Self::from_tuple_fn(move |_: A| value.clone())
    }

    pub fn invoke(
        &self,
        args: A,
    ) -> R {
        (self.func)(args)
    }

    pub fn accept<V: TemplateVisitor>(
        &self,
        visitor: &V,
    ) -> V::Template {
        visitor.visit_function(A::ARITY, A::parameter_types(), std::any::type_name::<R>())
    }

    pub fn template(&self) -> CallbackTemplate {
        self.accept(&TemplateCollector)
    }
}

impl<A, R> Clone for FuncWrapper<A, R> {
    fn clone(&self) -> Self {
        Self {
            func: self.func.clone(),
        }
    }
}

impl<A: CallArgs, R> fmt::Debug for FuncWrapper<A, R> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("FuncWrapper")
            .field("arity", &A::ARITY)
            .field("result", &std::any::type_name::<R>())
            .finish()
    }
}
