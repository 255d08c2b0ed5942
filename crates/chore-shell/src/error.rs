//! Error types for the shell execution layer

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Result type alias for shell layer operations
pub type ShellResult<T> = Result<T, ShellError>;

/// How a raw command string failed to tokenize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizeErrorKind {
    /// A single or double quote was opened but never closed
    UnmatchedQuote,
    /// The input ended with a dangling backslash
    UnfinishedEscape,
}

impl fmt::Display for TokenizeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmatchedQuote => write!(f, "unmatched quote"),
            Self::UnfinishedEscape => write!(f, "unfinished escape sequence"),
        }
    }
}

/// Main error type for command execution
#[derive(Debug, Error)]
pub enum ShellError {
    /// The raw command string could not be split into words
    #[error("{kind} in command: {input}")]
    Tokenize {
        kind: TokenizeErrorKind,
        input: String,
    },

    /// The child process could not be started at all
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The child ran but finished unsuccessfully
    #[error("command `{command}` failed with {}", describe_exit(.code))]
    NonZeroExit {
        command: String,
        /// `None` when the child was killed by a signal
        code: Option<i32>,
    },

    /// The cancellation token fired before the child exited
    #[error("command `{command}` was cancelled")]
    Cancelled { command: String },

    /// The execution deadline elapsed before the child exited
    #[error("command `{command}` timed out after {elapsed:?}")]
    Timeout { command: String, elapsed: Duration },
}

impl ShellError {
    /// Create a new tokenization error
    pub fn tokenize(kind: TokenizeErrorKind, input: impl Into<String>) -> Self {
        Self::Tokenize {
            kind,
            input: input.into(),
        }
    }

    /// Create a new spawn error
    pub fn spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            command: command.into(),
            source,
        }
    }

    /// Create a new nonzero-exit error
    pub fn non_zero_exit(command: impl Into<String>, code: Option<i32>) -> Self {
        Self::NonZeroExit {
            command: command.into(),
            code,
        }
    }

    /// Create a new cancellation error
    pub fn cancelled(command: impl Into<String>) -> Self {
        Self::Cancelled {
            command: command.into(),
        }
    }

    /// The exit code of the child, if it exited with one
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::NonZeroExit { code, .. } => *code,
            _ => None,
        }
    }

    /// Whether this error means the caller stopped the command rather than
    /// the command failing on its own
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled { .. } | Self::Timeout { .. })
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "a signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_nonzero_exit() {
        let err = ShellError::non_zero_exit("make all", Some(2));
        assert_eq!(err.to_string(), "command `make all` failed with exit code 2");
        assert_eq!(err.exit_code(), Some(2));
    }

    #[test]
    fn test_display_signal_death() {
        let err = ShellError::non_zero_exit("sleep 100", None);
        assert!(err.to_string().contains("a signal"));
        assert_eq!(err.exit_code(), None);
    }

    #[test]
    fn test_cancellation_is_distinguished() {
        assert!(ShellError::cancelled("sleep 100").is_cancellation());
        assert!(ShellError::Timeout {
            command: "sleep 100".to_string(),
            elapsed: Duration::from_secs(1),
        }
        .is_cancellation());
        assert!(!ShellError::non_zero_exit("false", Some(1)).is_cancellation());
    }
}
