use super::{Command, CommandError};
use crate::core::state::ShellState;

/// `status`: prints the decoded outcome of the last foreground command,
/// `exit value N` or `terminated by signal N`. Arguments are ignored.
#[derive(Clone)]
pub struct StatusCommand;

impl Default for StatusCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for StatusCommand {
    fn execute(&self, _args: &[String], state: &mut ShellState) -> Result<(), CommandError> {
        println!("{}", state.last_status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::status::CommandStatus;

    #[test]
    fn test_status_never_fails() {
        let cmd = StatusCommand::new();
        let mut state = ShellState::new();
        assert!(cmd.execute(&[], &mut state).is_ok());

        state.last_status = CommandStatus::Signaled(11);
        assert!(cmd.execute(&["ignored".to_string()], &mut state).is_ok());
    }
}
