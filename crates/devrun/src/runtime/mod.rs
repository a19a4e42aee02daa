//! Runtime components: output sink, process runner, service tasks, supervisor

pub mod output;
pub mod process;
pub mod service;
pub mod supervisor;

pub use output::*;
pub use process::*;
pub use service::*;
pub use supervisor::*;
