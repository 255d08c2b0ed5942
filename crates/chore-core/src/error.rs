//! Error types for the task engine

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Boxed error type task actions return, so actions can surface any failure
/// (shell errors, IO, domain errors) without the engine flattening it
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for task engine operations
pub type ChoreResult<T> = Result<T, TaskError>;

/// Main error type for the task engine
#[derive(Debug, Error)]
pub enum TaskError {
    /// No task is registered under the requested name
    #[error("task not found: {name}")]
    NotFound { name: String },

    /// A task's action returned an error; the cause is preserved intact
    #[error("task {name} failed: {source}")]
    Failed {
        name: String,
        #[source]
        source: BoxError,
    },

    /// A series stopped at its first failing step. `index` is the zero-based
    /// position of the failing task, so callers know how many steps ran.
    #[error("series aborted at step {index} ({name}): {source}")]
    SeriesStep {
        name: String,
        index: usize,
        #[source]
        source: Box<TaskError>,
    },

    /// One or more members of a parallel group failed
    #[error(transparent)]
    Parallel(#[from] ParallelError),

    /// The task was skipped or stopped because its cancellation context fired
    #[error("task {name} cancelled")]
    Cancelled { name: String },

    /// A filesystem helper failed on the given path
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TaskError {
    /// Create a new not-found error
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Create a new task-failure error wrapping its cause
    pub fn failed(name: impl Into<String>, source: BoxError) -> Self {
        Self::Failed {
            name: name.into(),
            source,
        }
    }

    /// Create a new cancellation error
    pub fn cancelled(name: impl Into<String>) -> Self {
        Self::Cancelled { name: name.into() }
    }

    /// Create a new IO error for a filesystem helper
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error means the run was stopped rather than failed
    pub fn is_cancellation(&self) -> bool {
        match self {
            Self::Cancelled { .. } => true,
            Self::SeriesStep { source, .. } => source.is_cancellation(),
            _ => false,
        }
    }
}

/// Aggregate failure of a parallel group.
///
/// Holds every member failure in listing order; no failure is ever dropped,
/// however many members fail concurrently.
#[derive(Debug)]
pub struct ParallelError {
    failures: Vec<(String, TaskError)>,
}

impl ParallelError {
    pub(crate) fn new(failures: Vec<(String, TaskError)>) -> Self {
        Self { failures }
    }

    /// Every member failure, as (task name, cause), in listing order
    pub fn failures(&self) -> &[(String, TaskError)] {
        &self.failures
    }

    /// Number of failed members
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Consume the aggregate, yielding the per-task failures
    pub fn into_failures(self) -> Vec<(String, TaskError)> {
        self.failures
    }
}

impl fmt::Display for ParallelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} parallel task{} failed: ",
            self.failures.len(),
            if self.failures.len() == 1 { "" } else { "s" }
        )?;
        for (i, (name, cause)) in self.failures.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", name, cause)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParallelError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        assert_eq!(
            TaskError::not_found("deploy").to_string(),
            "task not found: deploy"
        );
    }

    #[test]
    fn test_series_step_reports_position() {
        let inner = TaskError::failed("lint", "exit status 1".into());
        let err = TaskError::SeriesStep {
            name: "lint".to_string(),
            index: 2,
            source: Box::new(inner),
        };
        assert!(err.to_string().contains("step 2"));
        assert!(err.to_string().contains("lint"));
    }

    #[test]
    fn test_parallel_display_lists_every_failure() {
        let err = ParallelError::new(vec![
            ("a".to_string(), TaskError::not_found("a")),
            ("b".to_string(), TaskError::cancelled("b")),
        ]);
        let text = err.to_string();
        assert!(text.starts_with("2 parallel tasks failed"));
        assert!(text.contains("a: task not found: a"));
        assert!(text.contains("b: task b cancelled"));
    }

    #[test]
    fn test_cancellation_propagates_through_series() {
        let err = TaskError::SeriesStep {
            name: "slow".to_string(),
            index: 0,
            source: Box::new(TaskError::cancelled("slow")),
        };
        assert!(err.is_cancellation());
        assert!(!TaskError::not_found("x").is_cancellation());
    }
}
