//! Execution options for spawned commands

use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// What happens to the child's stdout and stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Child streams are connected to the caller's own stdout/stderr
    #[default]
    Stream,
    /// Stdout is buffered and returned; stderr stays visible on the caller's
    /// stderr
    CaptureStdout,
    /// Stdout and stderr are interleaved into one buffered result
    CaptureCombined,
    /// Neither stream is connected or captured
    Silent,
}

/// Configuration for a single command execution.
///
/// Defaults: no environment overrides, [`OutputMode::Stream`], automatic
/// interpreter selection, a fresh (never-cancelled) token, no deadline.
#[derive(Debug, Clone, Default)]
pub struct ExecOptions {
    /// Key/value pairs appended to the inherited environment. For a duplicate
    /// key the later entry wins, matching shell-export override behavior.
    pub env: Vec<(String, String)>,
    /// Output wiring for the child's streams
    pub output: OutputMode,
    /// Interpreter to delegate to, forcing shell delegation even for commands
    /// that would otherwise spawn directly
    pub shell: Option<String>,
    /// Cancellation context the execution is bound to
    pub cancel: CancellationToken,
    /// Deadline for the child to exit
    pub timeout: Option<Duration>,
}

impl ExecOptions {
    /// Create options with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one environment override
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Append several environment overrides
    pub fn with_env_pairs<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set the output mode
    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    /// Force delegation to a specific interpreter
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = Some(shell.into());
        self
    }

    /// Bind the execution to a cancellation token
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Set a deadline for the child to exit
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
