//! Command executor: shell delegation vs. direct process spawn
//!
//! Raw command strings are inspected for shell metacharacters; commands that
//! need interpretation run under `interpreter -c`, everything else is
//! tokenized and spawned directly with literal arguments. Both paths share
//! the same environment merging, output wiring, and cancellation handling.

use std::process::Stdio;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

use crate::detect::{needs_shell, resolve_shell};
use crate::error::{ShellError, ShellResult};
use crate::options::{ExecOptions, OutputMode};
use crate::token::tokenize;

/// Execute a raw command string.
///
/// Commands containing shell metacharacters (or with an interpreter override
/// set) are delegated to a shell as a single `-c` argument; the shell owns
/// all quoting and substitution. Otherwise the string is tokenized and the
/// first word spawned directly with the rest as literal arguments.
///
/// Returns the captured output, which is empty unless a capture mode was
/// requested. An empty command is a success with empty output.
#[instrument(skip(opts), fields(output = ?opts.output))]
pub async fn exec(command: &str, opts: &ExecOptions) -> ShellResult<String> {
    let cmd = if needs_shell(command) || opts.shell.is_some() {
        let interpreter = resolve_shell(opts.shell.as_deref());
        debug!(%interpreter, "delegating command to shell");
        let mut cmd = Command::new(interpreter);
        cmd.arg("-c").arg(command);
        cmd
    } else {
        let words = tokenize(command)?;
        let Some((program, args)) = words.split_first() else {
            return Ok(String::new());
        };
        let mut cmd = Command::new(program);
        cmd.args(args);
        cmd
    };
    run_child(cmd, command, opts).await
}

/// Execute a program with literal arguments, bypassing detection and
/// tokenization entirely.
///
/// An empty `argv` is a success with empty output.
#[instrument(skip(argv, opts), fields(output = ?opts.output))]
pub async fn exec_argv<S: AsRef<str>>(argv: &[S], opts: &ExecOptions) -> ShellResult<String> {
    let Some((program, args)) = argv.split_first() else {
        return Ok(String::new());
    };
    let display = argv
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(" ");
    let mut cmd = Command::new(program.as_ref());
    for arg in args {
        cmd.arg(arg.as_ref());
    }
    run_child(cmd, &display, opts).await
}

/// Readers draining captured pipes into one shared buffer. Stdout and stderr
/// interleave in arrival order for [`OutputMode::CaptureCombined`].
struct CaptureState {
    buffer: Arc<Mutex<Vec<u8>>>,
    readers: Vec<JoinHandle<()>>,
}

async fn run_child(mut cmd: Command, command: &str, opts: &ExecOptions) -> ShellResult<String> {
    // Later entries for a duplicate key overwrite earlier ones in the
    // Command's env map, giving last-wins merge over the inherited
    // environment.
    for (key, value) in &opts.env {
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::null());
    match opts.output {
        OutputMode::Stream => {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }
        OutputMode::CaptureStdout => {
            cmd.stdout(Stdio::piped()).stderr(Stdio::inherit());
        }
        OutputMode::CaptureCombined => {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        }
        OutputMode::Silent => {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }
    }

    let mut child = cmd
        .spawn()
        .map_err(|source| ShellError::spawn(command, source))?;
    debug!(command, pid = ?child.id(), "spawned child process");

    let capture = start_capture(&mut child, opts.output);

    let deadline = async {
        match opts.timeout {
            Some(timeout) => tokio::time::sleep(timeout).await,
            None => std::future::pending::<()>().await,
        }
    };

    let status = tokio::select! {
        result = child.wait() => {
            result.map_err(|source| ShellError::spawn(command, source))?
        }
        _ = opts.cancel.cancelled() => {
            warn!(command, "cancellation requested, killing child process");
            kill_child(&mut child, command).await;
            return Err(ShellError::cancelled(command));
        }
        _ = deadline => {
            let elapsed = opts.timeout.unwrap_or_default();
            warn!(command, ?elapsed, "deadline elapsed, killing child process");
            kill_child(&mut child, command).await;
            return Err(ShellError::Timeout {
                command: command.to_string(),
                elapsed,
            });
        }
    };

    if !status.success() {
        return Err(ShellError::non_zero_exit(command, status.code()));
    }

    let output = match capture {
        Some(capture) => {
            for reader in capture.readers {
                let _ = reader.await;
            }
            let bytes = capture.buffer.lock().await;
            String::from_utf8_lossy(&bytes).into_owned()
        }
        None => String::new(),
    };
    Ok(output)
}

fn start_capture(child: &mut Child, output: OutputMode) -> Option<CaptureState> {
    if !matches!(
        output,
        OutputMode::CaptureStdout | OutputMode::CaptureCombined
    ) {
        return None;
    }

    let buffer = Arc::new(Mutex::new(Vec::new()));
    let mut readers = Vec::new();
    if let Some(stdout) = child.stdout.take() {
        readers.push(spawn_reader(stdout, Arc::clone(&buffer)));
    }
    if output == OutputMode::CaptureCombined {
        if let Some(stderr) = child.stderr.take() {
            readers.push(spawn_reader(stderr, Arc::clone(&buffer)));
        }
    }
    Some(CaptureState { buffer, readers })
}

fn spawn_reader<R>(mut pipe: R, buffer: Arc<Mutex<Vec<u8>>>) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut chunk = [0u8; 4096];
        loop {
            match pipe.read(&mut chunk).await {
                Ok(0) | Err(_) => break,
                Ok(n) => buffer.lock().await.extend_from_slice(&chunk[..n]),
            }
        }
    })
}

async fn kill_child(child: &mut Child, command: &str) {
    if let Err(err) = child.start_kill() {
        warn!(command, %err, "failed to kill child process");
    }
    // Reap the child so it does not linger as a zombie.
    let _ = child.wait().await;
}
