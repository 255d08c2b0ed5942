//! Convenience entry points over the executor
//!
//! Every function here is a parameter preset over [`exec`] or [`exec_argv`]:
//! the `sh*` family takes a raw command string (tokenized or shell-delegated
//! as needed), the `shell*` family takes a program plus literal arguments.
//! All of them take the cancellation token first, the way task actions
//! receive it.

use tokio_util::sync::CancellationToken;

use crate::error::ShellResult;
use crate::exec::{exec, exec_argv};
use crate::options::{ExecOptions, OutputMode};

fn env_pairs(env: &[(&str, &str)]) -> Vec<(String, String)> {
    env.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn base(cancel: &CancellationToken) -> ExecOptions {
    ExecOptions::new().with_cancel(cancel.clone())
}

/// Run a raw command string, streaming its output to the caller's terminal.
pub async fn sh(cancel: &CancellationToken, command: &str) -> ShellResult<()> {
    exec(command, &base(cancel)).await.map(|_| ())
}

/// Like [`sh`], with environment overrides.
pub async fn sh_env(
    cancel: &CancellationToken,
    env: &[(&str, &str)],
    command: &str,
) -> ShellResult<()> {
    let opts = base(cancel).with_env_pairs(env_pairs(env));
    exec(command, &opts).await.map(|_| ())
}

/// Run a raw command string and return its stdout.
pub async fn sh_out(cancel: &CancellationToken, command: &str) -> ShellResult<String> {
    exec(command, &base(cancel).with_output(OutputMode::CaptureStdout)).await
}

/// Like [`sh_out`], with environment overrides.
pub async fn sh_out_env(
    cancel: &CancellationToken,
    env: &[(&str, &str)],
    command: &str,
) -> ShellResult<String> {
    let opts = base(cancel)
        .with_output(OutputMode::CaptureStdout)
        .with_env_pairs(env_pairs(env));
    exec(command, &opts).await
}

/// Run a raw command string and return stdout and stderr interleaved.
pub async fn sh_combined_out(cancel: &CancellationToken, command: &str) -> ShellResult<String> {
    exec(
        command,
        &base(cancel).with_output(OutputMode::CaptureCombined),
    )
    .await
}

/// Run a raw command string, discarding all output.
pub async fn silent(cancel: &CancellationToken, command: &str) -> ShellResult<()> {
    exec(command, &base(cancel).with_output(OutputMode::Silent))
        .await
        .map(|_| ())
}

/// Run a program with literal arguments, streaming output.
pub async fn shell(cancel: &CancellationToken, program: &str, args: &[&str]) -> ShellResult<()> {
    exec_argv(&argv(program, args), &base(cancel)).await.map(|_| ())
}

/// Like [`shell`], with environment overrides.
pub async fn shell_env(
    cancel: &CancellationToken,
    env: &[(&str, &str)],
    program: &str,
    args: &[&str],
) -> ShellResult<()> {
    let opts = base(cancel).with_env_pairs(env_pairs(env));
    exec_argv(&argv(program, args), &opts).await.map(|_| ())
}

/// Run a program with literal arguments and return its stdout.
pub async fn shell_out(
    cancel: &CancellationToken,
    program: &str,
    args: &[&str],
) -> ShellResult<String> {
    exec_argv(
        &argv(program, args),
        &base(cancel).with_output(OutputMode::CaptureStdout),
    )
    .await
}

/// Like [`shell_out`], with environment overrides.
pub async fn shell_out_env(
    cancel: &CancellationToken,
    env: &[(&str, &str)],
    program: &str,
    args: &[&str],
) -> ShellResult<String> {
    let opts = base(cancel)
        .with_output(OutputMode::CaptureStdout)
        .with_env_pairs(env_pairs(env));
    exec_argv(&argv(program, args), &opts).await
}

/// Run a program with literal arguments and return stdout and stderr
/// interleaved.
pub async fn shell_combined_out(
    cancel: &CancellationToken,
    program: &str,
    args: &[&str],
) -> ShellResult<String> {
    exec_argv(
        &argv(program, args),
        &base(cancel).with_output(OutputMode::CaptureCombined),
    )
    .await
}

/// Like [`shell_combined_out`], with environment overrides.
pub async fn shell_combined_out_env(
    cancel: &CancellationToken,
    env: &[(&str, &str)],
    program: &str,
    args: &[&str],
) -> ShellResult<String> {
    let opts = base(cancel)
        .with_output(OutputMode::CaptureCombined)
        .with_env_pairs(env_pairs(env));
    exec_argv(&argv(program, args), &opts).await
}

/// Run a program with literal arguments, discarding all output.
pub async fn silent_argv(
    cancel: &CancellationToken,
    program: &str,
    args: &[&str],
) -> ShellResult<()> {
    exec_argv(
        &argv(program, args),
        &base(cancel).with_output(OutputMode::Silent),
    )
    .await
    .map(|_| ())
}

fn argv<'a>(program: &'a str, args: &[&'a str]) -> Vec<&'a str> {
    let mut argv = Vec::with_capacity(args.len() + 1);
    argv.push(program);
    argv.extend_from_slice(args);
    argv
}
