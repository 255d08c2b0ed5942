//! Raw command string tokenization
//!
//! Splits a command string into argument words, honoring single quotes,
//! double quotes, and backslash escapes. This is deliberately not a POSIX
//! shell grammar: commands that need real shell interpretation are routed
//! through an interpreter by the executor instead (see [`crate::needs_shell`]).

use crate::error::{ShellError, ShellResult, TokenizeErrorKind};

/// Split `input` into argument words.
///
/// The space character outside any quoting mode ends the current word. Quote
/// characters toggle their mode without appearing in the output. A backslash
/// outside single quotes makes the next character literal, including another
/// backslash, a quote, or a space; inside single quotes it is an ordinary
/// character.
///
/// An unterminated quote or a dangling backslash at end of input is an error.
/// Empty input yields an empty word list.
pub fn tokenize(input: &str) -> ShellResult<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();

    let mut in_single = false;
    let mut in_double = false;
    let mut escape = false;

    for c in input.chars() {
        if escape {
            current.push(c);
            escape = false;
            continue;
        }
        match c {
            '\\' if !in_single => escape = true,
            '"' if !in_single => in_double = !in_double,
            '\'' if !in_double => in_single = !in_single,
            ' ' if !in_single && !in_double => {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        words.push(current);
    }

    if in_single || in_double {
        return Err(ShellError::tokenize(TokenizeErrorKind::UnmatchedQuote, input));
    }
    if escape {
        return Err(ShellError::tokenize(
            TokenizeErrorKind::UnfinishedEscape,
            input,
        ));
    }

    Ok(words)
}
