//! Dependency readiness: probe classification and the all-of-group gate

mod gate;
mod probe;

pub use gate::*;
pub use probe::*;
