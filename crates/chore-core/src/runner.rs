//! Runner façade owning the task registry
//!
//! There is deliberately no module-level default runner: every entry point
//! takes an explicit instance, so tests and embedders get isolated
//! registries with no cross-test leakage.

use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{ChoreResult, TaskError};
use crate::registry::TaskRegistry;
use crate::task::{action, Action, ActionResult, TaskInfo};

/// Reserved name of the default task, pre-registered as a no-op so a caller
/// with nothing selected always has something valid to run
pub const DEFAULT_TASK: &str = "_";

/// The task runner: registration, lookup, and execution of named tasks.
///
/// Cloning a `Runner` is cheap and yields a handle to the same registry,
/// which is how composed actions keep resolving names at invocation time.
#[derive(Clone)]
pub struct Runner {
    registry: Arc<TaskRegistry>,
}

impl Runner {
    /// Create a runner with an empty registry (plus the reserved [`DEFAULT_TASK`])
    pub fn new() -> Self {
        let runner = Self {
            registry: Arc::new(TaskRegistry::new()),
        };
        runner
            .registry
            .register(DEFAULT_TASK, action(|_| async { Ok(()) }));
        runner
    }

    /// Register `f` as the task named `name`. Registering the same name again
    /// replaces the previous action; the last registration wins.
    pub fn task<F, Fut>(&self, name: &str, f: F)
    where
        F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ActionResult> + Send + 'static,
    {
        self.registry.register(name, action(f));
    }

    /// Register a prebuilt [`Action`] under `name`, typically one produced by
    /// [`series`](Runner::series), [`parallel`](Runner::parallel),
    /// [`when`](Runner::when) or [`unless`](Runner::unless).
    pub fn task_action(&self, name: &str, action: Action) {
        self.registry.register(name, action);
    }

    /// Attach a human-readable description to a registered task
    pub fn describe(&self, name: &str, description: impl Into<String>) {
        self.registry.annotate(name, Some(description.into()), None);
    }

    /// Declare presentation-only dependencies for a registered task. The
    /// engine does not resolve these; Series/Parallel orderings are always
    /// explicit.
    pub fn depends(&self, name: &str, deps: &[&str]) {
        self.registry
            .annotate(name, None, Some(deps.iter().map(|d| d.to_string()).collect()));
    }

    /// Look up and execute the task named `name`, invoking its action exactly
    /// once with `cancel`.
    ///
    /// A missing task and a failed action are both ordinary error returns;
    /// the runner never panics and never exits the process.
    pub async fn run(&self, cancel: CancellationToken, name: &str) -> ChoreResult<()> {
        let Some(task_action) = self.registry.lookup(name) else {
            return Err(TaskError::not_found(name));
        };
        debug!(task = name, "task started");
        match task_action(cancel).await {
            Ok(()) => {
                debug!(task = name, "task finished");
                Ok(())
            }
            Err(source) => Err(TaskError::failed(name, source)),
        }
    }

    /// Unordered snapshot of registered tasks for presentation
    pub fn list_tasks(&self) -> Vec<TaskInfo> {
        self.registry.snapshot()
    }

    /// Whether a task is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains(name)
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}
