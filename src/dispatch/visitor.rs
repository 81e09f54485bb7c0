use tracing::debug;

use super::Behavior;
use crate::CallArgs;
use crate::CallResult;
use crate::FakeAdapter;
use crate::MethodCall;
use crate::Result;

/// Visitor over configured method calls of any arity and shape.
pub trait MethodCallVisitor {
    type Output;

    fn visit<A: CallArgs, R: CallResult>(
        &self,
        call: &MethodCall<A, R>,
    ) -> Result<Self::Output>;
}

/// Installs a call's effect on a live fake through its adapter.
///
/// The only caller of [`FakeAdapter::setup_behavior`]; a new mocking
/// backend plugs in by implementing that trait.
pub struct FakeDispatcher<'a, F> {
    adapter: &'a F,
}

impl<'a, F: FakeAdapter> FakeDispatcher<'a, F> {
    pub fn new(adapter: &'a F) -> Self {
        Self { adapter }
    }
}

impl<F: FakeAdapter> MethodCallVisitor for FakeDispatcher<'_, F> {
    type Output = ();

    fn visit<A: CallArgs, R: CallResult>(
        &self,
        call: &MethodCall<A, R>,
    ) -> Result<()> {
        let behavior = Behavior::compile(call)?;
        debug!("dispatch {} as {:?}", behavior.description(), behavior.mode());
        self.adapter.setup_behavior(call.handle(), behavior)
    }
}

/// Renders a call and its callbacks for assertion messages.
#[derive(Debug, Default, Clone, Copy)]
pub struct DescribeVisitor;

impl MethodCallVisitor for DescribeVisitor {
    type Output = String;

    fn visit<A: CallArgs, R: CallResult>(
        &self,
        call: &MethodCall<A, R>,
    ) -> Result<String> {
        let callbacks = match (call.callbacks(), call.lazy()) {
            (Some(container), _) => container
                .callbacks()
                .iter()
                .map(|c| c.name())
                .collect::<Vec<_>>()
                .join(", "),
            (None, Some(_)) => "deferred".to_string(),
            (None, None) => "unconfigured".to_string(),
        };
        Ok(format!("{:?} {} [{}]", call.kind(), call.description(), callbacks))
    }
}
