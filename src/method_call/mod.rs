mod handle;
mod lazy;
mod method_call;

pub use handle::*;
pub use lazy::*;
pub use method_call::*;
