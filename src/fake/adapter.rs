//! Capability set the engine needs from a mocking backend.

use std::fmt;

use crate::Behavior;
use crate::CallArgs;
use crate::CallResult;
use crate::FakeDispatcher;
use crate::MethodCall;
use crate::MethodHandle;
use crate::Result;

/// Expected number of calls in a verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Times {
    Never,
    Once,
    AtLeastOnce,
    Exactly(usize),
    AtLeast(usize),
}

impl Times {
    pub fn matches(
        self,
        count: usize,
    ) -> bool {
        match self {
            Times::Never => count == 0,
            Times::Once => count == 1,
            Times::AtLeastOnce => count >= 1,
            Times::Exactly(n) => count == n,
            Times::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Times {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Times::Never => write!(f, "never"),
            Times::Once => write!(f, "exactly once"),
            Times::AtLeastOnce => write!(f, "at least once"),
            Times::Exactly(n) => write!(f, "exactly {n} time(s)"),
            Times::AtLeast(n) => write!(f, "at least {n} time(s)"),
        }
    }
}

/// A live fake the engine can install behaviors on and verify calls against.
pub trait FakeAdapter: Send + Sync {
    /// Installs `behavior` for `method`, replacing any previous one.
    fn setup_behavior<A: CallArgs, R: CallResult>(
        &self,
        method: &MethodHandle,
        behavior: Behavior<A, R>,
    ) -> Result<()>;

    fn verify_called(
        &self,
        method: &MethodHandle,
        times: Times,
    ) -> Result<()>;

    /// Compiles `call` and installs it through a [`FakeDispatcher`].
    fn setup<A: CallArgs, R: CallResult>(
        &self,
        call: &MethodCall<A, R>,
    ) -> Result<()>
    where
        Self: Sized,
    {
        call.accept(&FakeDispatcher::new(self))
    }
}

/// Creates fakes of arbitrary service types.
pub trait FakeFactory: Send + Sync {
    type Fake<S: ?Sized + 'static>: FakeAdapter;

    fn create_fake<S: ?Sized + 'static>(&self) -> Self::Fake<S>;
}
