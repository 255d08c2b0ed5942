//! Concurrency-safe task registry
//!
//! One mutex-guarded mapping from task name to registered task per runner
//! instance. Every read and write is serialized by the lock; the lock is
//! never held across an await point, so lookups during a run cannot race
//! registrations made by concurrently running tasks.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::task::{Action, TaskInfo};

pub(crate) struct RegisteredTask {
    pub action: Action,
    pub description: Option<String>,
    pub deps: Vec<String>,
}

/// Registry of named tasks
#[derive(Default)]
pub struct TaskRegistry {
    tasks: Mutex<HashMap<String, RegisteredTask>>,
}

impl TaskRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or replace the task under `name`. Replacement is last-write-wins
    /// and is not an error. Empty names violate the naming contract and are
    /// ignored with a warning rather than poisoning the mapping.
    pub fn register(&self, name: &str, action: Action) {
        if name.is_empty() {
            warn!("ignoring task registration with an empty name");
            return;
        }
        let replaced = self
            .tasks
            .lock()
            .insert(
                name.to_string(),
                RegisteredTask {
                    action,
                    description: None,
                    deps: Vec::new(),
                },
            )
            .is_some();
        if replaced {
            debug!(task = name, "replaced existing task registration");
        }
    }

    /// The action registered under `name`, if any. Clones the action handle
    /// out so the lock is released before the action is invoked.
    pub fn lookup(&self, name: &str) -> Option<Action> {
        self.tasks.lock().get(name).map(|task| Arc::clone(&task.action))
    }

    /// Whether a task is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.tasks.lock().contains_key(name)
    }

    /// Attach presentation metadata to an already-registered task. Annotating
    /// an unknown name is a no-op with a warning: annotations never create
    /// half-registered tasks.
    pub fn annotate(
        &self,
        name: &str,
        description: Option<String>,
        deps: Option<Vec<String>>,
    ) {
        let mut tasks = self.tasks.lock();
        match tasks.get_mut(name) {
            Some(task) => {
                if let Some(description) = description {
                    task.description = Some(description);
                }
                if let Some(deps) = deps {
                    task.deps = deps;
                }
            }
            None => warn!(task = name, "cannot annotate unregistered task"),
        }
    }

    /// Unordered snapshot of every registered task's metadata, for the
    /// presentation layer to sort and filter
    pub fn snapshot(&self) -> Vec<TaskInfo> {
        self.tasks
            .lock()
            .iter()
            .map(|(name, task)| TaskInfo {
                name: name.clone(),
                description: task.description.clone(),
                deps: task.deps.clone(),
            })
            .collect()
    }
}
