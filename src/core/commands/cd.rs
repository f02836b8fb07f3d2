use super::{Command, CommandError};
use crate::core::state::ShellState;
use crate::path::PathExpander;
use std::env;

#[derive(Clone)]
pub struct CdCommand {
    path_expander: PathExpander,
}

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self {
            path_expander: PathExpander::new(),
        }
    }
}

impl Command for CdCommand {
    /// `cd [path]`: no argument means the home directory. A failed change
    /// leaves the working directory alone and is reported, never fatal.
    fn execute(&self, args: &[String], _state: &mut ShellState) -> Result<(), CommandError> {
        let path_str = args.first().map(String::as_str).unwrap_or("~");
        let expanded_path = self
            .path_expander
            .expand(path_str)
            .map_err(|e| CommandError::ExecutionError(e.to_string()))?;

        env::set_current_dir(&expanded_path).map_err(|e| {
            CommandError::ExecutionError(format!("cd: {}: {}", expanded_path.display(), e))
        })
    }
}
