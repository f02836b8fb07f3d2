//! Line preparation: pid expansion, tokenization, and skip detection.
//!
//! The rest of the shell treats the token list produced here as an opaque,
//! already-split argument list.

/// Upper bound on meaningful tokens per line; anything past it is dropped.
pub const MAX_TOKENS: usize = 19;

/// Lines whose first token starts with this are skipped outright.
pub const COMMENT_MARKER: char = '#';

/// Replaces every occurrence of `$$` with the shell's own pid.
pub fn expand_pid(line: &str) -> String {
    line.replace("$$", &std::process::id().to_string())
}

/// Splits a line on whitespace, capped at [`MAX_TOKENS`] tokens.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace()
        .take(MAX_TOKENS)
        .map(str::to_string)
        .collect()
}

/// True for blank lines and comment lines; neither reaches dispatch.
pub fn is_comment_or_blank(tokens: &[String]) -> bool {
    match tokens.first() {
        None => true,
        Some(first) => first.starts_with(COMMENT_MARKER),
    }
}
