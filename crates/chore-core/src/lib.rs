//! chore-core: the task engine of the chore automation toolkit
//!
//! A [`Runner`] owns a concurrency-safe registry of named tasks (async,
//! cancellable units of work) and provides composition of registered names
//! into series (strict order, first error aborts), parallel groups (all
//! members run to completion, failures aggregated losslessly), and
//! conditional units. Failure is always a value: the engine never panics on
//! a missing task or a failed action, and never exits the host process.
//!
//! Running external commands from task bodies is the job of the companion
//! `chore-shell` crate; the engine itself has no opinion about what an
//! action does.

pub mod error;
pub mod fsutil;
pub mod registry;
pub mod runner;
pub mod task;

mod compose;

pub use error::{BoxError, ChoreResult, ParallelError, TaskError};
pub use registry::TaskRegistry;
pub use runner::{Runner, DEFAULT_TASK};
pub use task::{action, Action, ActionResult, TaskInfo};
