//! Shell-need detection and interpreter resolution

use tracing::debug;

/// Characters that hand a command over to a shell interpreter.
///
/// Redirection, pipes, chaining, globs, brace/command grouping, variable and
/// command substitution.
const SHELL_METACHARACTERS: &str = "><|&;{}*?[]$`()";

/// Whether `command` needs a shell interpreter to run as written.
///
/// This is a syntactic scan, not a parser: a metacharacter inside quotes has
/// no live shell meaning but still triggers delegation. That imprecision is
/// accepted, since the shell will interpret the quoting correctly, whereas a
/// direct spawn of a command that did need the shell would not.
pub fn needs_shell(command: &str) -> bool {
    command.chars().any(|c| SHELL_METACHARACTERS.contains(c))
}

/// Pick the interpreter to delegate to.
///
/// An explicit override wins; otherwise prefer `bash` when it is on PATH and
/// fall back to `sh`, which every supported platform provides.
pub(crate) fn resolve_shell(shell_override: Option<&str>) -> String {
    if let Some(shell) = shell_override {
        return shell.to_string();
    }
    match which::which("bash") {
        Ok(_) => "bash".to_string(),
        Err(_) => {
            debug!("bash not found on PATH, falling back to sh");
            "sh".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_commands_run_direct() {
        assert!(!needs_shell("echo hello"));
        assert!(!needs_shell("cargo build --release"));
        assert!(!needs_shell(""));
    }

    #[test]
    fn test_pipes_and_redirection_need_shell() {
        assert!(needs_shell("echo a | grep a"));
        assert!(needs_shell("echo hi > out.txt"));
        assert!(needs_shell("sort < data.txt"));
        assert!(needs_shell("make && make install"));
        assert!(needs_shell("true; false"));
    }

    #[test]
    fn test_globs_and_substitution_need_shell() {
        assert!(needs_shell("rm *.tmp"));
        assert!(needs_shell("ls file?.txt"));
        assert!(needs_shell("echo [ab]c"));
        assert!(needs_shell("echo $HOME"));
        assert!(needs_shell("echo `date`"));
        assert!(needs_shell("echo $(pwd)"));
        assert!(needs_shell("echo {a,b}"));
    }

    #[test]
    fn test_quoted_metacharacters_still_delegate() {
        // Accepted imprecision: the dollar sign has no live meaning here but
        // the command is still routed through a shell.
        assert!(needs_shell("echo '$HOME'"));
    }

    #[test]
    fn test_override_wins() {
        assert_eq!(resolve_shell(Some("zsh")), "zsh");
    }

    #[test]
    fn test_default_resolution_is_bash_or_sh() {
        let shell = resolve_shell(None);
        assert!(shell == "bash" || shell == "sh");
    }
}
