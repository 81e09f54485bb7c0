//! Callback layer: arity-generic wrappers, the resolution variants declared
//! for a method call, and the container those variants are collected in.

mod args;
mod container;
mod variant;
mod wrapper;

pub use args::*;
pub use container::*;
pub use variant::*;
pub use wrapper::*;
