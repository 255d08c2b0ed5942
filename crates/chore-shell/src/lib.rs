//! chore-shell: the command execution layer of the chore task engine
//!
//! Decides how to invoke external programs (direct process spawn for plain
//! commands, delegation to a shell interpreter when the command string uses
//! shell syntax) and how to handle their input/output streams. Execution is
//! bound to a [`CancellationToken`](tokio_util::sync::CancellationToken) so
//! in-flight children can be terminated promptly.
//!
//! The two real entry points are [`exec`] (raw string) and [`exec_argv`]
//! (program + literal arguments); everything in [`sh`] is a preset over them.

pub mod error;
pub mod exec;
pub mod options;
pub mod sh;
pub mod token;

mod detect;

pub use detect::needs_shell;
pub use error::{ShellError, ShellResult, TokenizeErrorKind};
pub use exec::{exec, exec_argv};
pub use options::{ExecOptions, OutputMode};
pub use sh::{
    sh, sh_combined_out, sh_env, sh_out, sh_out_env, shell, shell_combined_out,
    shell_combined_out_env, shell_env, shell_out, shell_out_env, silent, silent_argv,
};
pub use token::tokenize;
