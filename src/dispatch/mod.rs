//! Dispatch: compiles configured method calls into behaviors and installs
//! them on a fake.

mod behavior;
mod visitor;

pub use behavior::*;
pub use visitor::*;
