use super::{Command, CommandError};
use crate::core::state::ShellState;

/// `exit`: kills every tracked background job, then terminates the shell
/// with status 0. Never returns. Arguments are ignored.
#[derive(Clone)]
pub struct ExitCommand;

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    fn execute(&self, _args: &[String], state: &mut ShellState) -> Result<(), CommandError> {
        state.jobs.kill_all();
        std::process::exit(0);
    }
}
