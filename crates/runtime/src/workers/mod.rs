//! Worker tasks that back the runtime orchestration.
//!
//! The session worker owns the coordinator and executes commands one at a
//! time, firing delayed phase transitions between them.

mod session;

pub use session::{Command, SessionWorker};
