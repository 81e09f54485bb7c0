//! Scenario lifecycle: one registry context threaded through setup and teardown.

mod scenario;
mod teardown;

pub use scenario::*;
pub use teardown::*;
