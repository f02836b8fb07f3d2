//! Redirection and background-marker resolution.
//!
//! One scan over the token list produces an [`Invocation`]: the cleaned
//! argument vector plus the redirection paths and background flag that the
//! launcher needs. Redirection tokens, their filename operands, and a
//! trailing `&` never reach the program's argv.

use super::ProcessError;

pub const INPUT_REDIRECT: &str = "<";
pub const OUTPUT_REDIRECT: &str = ">";
pub const BACKGROUND_MARKER: &str = "&";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub args: Vec<String>,
    pub stdin_path: Option<String>,
    pub stdout_path: Option<String>,
    pub background: bool,
}

impl Invocation {
    /// Resolves a token list into an invocation.
    ///
    /// The background marker is recognized only as the last token and is
    /// stripped either way; in foreground-only mode the request is silently
    /// downgraded to foreground. At most one redirection per direction is
    /// kept; a later occurrence wins, matching a last-assignment scan.
    pub fn resolve(tokens: &[String], foreground_only: bool) -> Result<Self, ProcessError> {
        let mut tokens = tokens.to_vec();
        let mut background = false;

        if tokens.last().map(String::as_str) == Some(BACKGROUND_MARKER) {
            tokens.pop();
            background = !foreground_only;
        }

        let mut args = Vec::new();
        let mut stdin_path = None;
        let mut stdout_path = None;

        let mut iter = tokens.into_iter();
        while let Some(token) = iter.next() {
            match token.as_str() {
                INPUT_REDIRECT => {
                    stdin_path = Some(iter.next().ok_or_else(|| {
                        ProcessError::MissingRedirectTarget(INPUT_REDIRECT.to_string())
                    })?);
                }
                OUTPUT_REDIRECT => {
                    stdout_path = Some(iter.next().ok_or_else(|| {
                        ProcessError::MissingRedirectTarget(OUTPUT_REDIRECT.to_string())
                    })?);
                }
                _ => args.push(token),
            }
        }

        if args.is_empty() {
            return Err(ProcessError::MissingProgram);
        }

        Ok(Invocation {
            args,
            stdin_path,
            stdout_path,
            background,
        })
    }
}
