//! Fake adapters: the capability traits the engine consumes plus an
//! in-process implementation used by builders and tests.

mod adapter;
mod memory_fake;

pub use adapter::*;
pub use memory_fake::*;
