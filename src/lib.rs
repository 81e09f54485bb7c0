//! Strongly typed test doubles.
//!
//! Declare how a faked method resolves (complete, throw, stay pending or run
//! custom side effects) through a [`MethodCall`], install it on a fake via
//! [`FakeAdapter::setup`], and keep whole sets of [`FakeBuilder`]s in a
//! [`BuilderRegistryContext`] that can be persisted and restored between
//! scenario runs.

mod builder;
mod callback;
mod config;
mod constants;
mod dispatch;
mod errors;
mod fake;
mod method_call;
mod scenario;
mod storage;

pub use builder::*;
pub use callback::*;
pub use config::*;
pub use constants::*;
pub use dispatch::*;
pub use errors::*;
pub use fake::*;
pub use method_call::*;
pub use scenario::*;
pub use storage::*;

//-----------------------------------------------------------
// Test utils
