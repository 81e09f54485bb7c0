//! Fake builders, the registry holding them, and its persistence.

mod context;
mod converter;
mod fake_builder;
mod registry;

pub use context::*;
pub use converter::*;
pub use fake_builder::*;
pub use registry::*;
