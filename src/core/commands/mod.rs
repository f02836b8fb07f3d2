use std::collections::BTreeMap;

mod cd;
mod exit;
mod status;

pub use cd::CdCommand;
pub use exit::ExitCommand;
pub use status::StatusCommand;

use crate::core::state::ShellState;
use crate::process::command::Invocation;
use crate::process::launcher::ProcessLauncher;
use crate::process::{signal, ProcessError};

#[derive(Debug)]
pub enum CommandError {
    InvalidArguments(String),
    ExecutionError(String),
    IoError(std::io::Error),
    ProcessError(ProcessError),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::InvalidArguments(msg) => write!(f, "invalid arguments: {}", msg),
            CommandError::ExecutionError(msg) => write!(f, "{}", msg),
            CommandError::IoError(err) => write!(f, "IO error: {}", err),
            CommandError::ProcessError(err) => write!(f, "{}", err),
        }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

impl From<ProcessError> for CommandError {
    fn from(err: ProcessError) -> Self {
        CommandError::ProcessError(err)
    }
}

/// A built-in: runs in-process with mutable access to the shell state.
pub trait Command {
    fn execute(&self, args: &[String], state: &mut ShellState) -> Result<(), CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Cd(CdCommand),
    Exit(ExitCommand),
    Status(StatusCommand),
}

impl Command for CommandType {
    fn execute(&self, args: &[String], state: &mut ShellState) -> Result<(), CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(args, state),
            CommandType::Exit(cmd) => cmd.execute(args, state),
            CommandType::Status(cmd) => cmd.execute(args, state),
        }
    }
}

/// Routes a token list to a built-in or hands it to the process launcher.
#[derive(Clone)]
pub struct CommandExecutor {
    commands: BTreeMap<String, CommandType>,
    launcher: ProcessLauncher,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("cd".to_string(), CommandType::Cd(CdCommand::new()));
        commands.insert("exit".to_string(), CommandType::Exit(ExitCommand::new()));
        commands.insert(
            "status".to_string(),
            CommandType::Status(StatusCommand::new()),
        );

        Self {
            commands,
            launcher: ProcessLauncher::new(),
        }
    }

    /// Dispatches one non-empty token list. Built-ins get the arguments
    /// after the command name; anything else goes through redirection
    /// resolution and the launcher. The foreground-only flag is read fresh
    /// here, never cached.
    pub fn execute(&self, tokens: &[String], state: &mut ShellState) -> Result<(), CommandError> {
        let name = match tokens.first() {
            Some(name) => name,
            None => return Ok(()),
        };

        if let Some(cmd) = self.commands.get(name) {
            return cmd.execute(&tokens[1..], state);
        }

        let invocation = Invocation::resolve(tokens, signal::foreground_only())?;
        self.launcher.launch(invocation, state)?;
        Ok(())
    }

    pub fn is_builtin(&self, command: &str) -> bool {
        self.commands.contains_key(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::status::CommandStatus;

    fn toks(line: &str) -> Vec<String> {
        crate::input::tokenize(line)
    }

    #[test]
    fn test_builtin_lookup() {
        let executor = CommandExecutor::new();
        assert!(executor.is_builtin("cd"));
        assert!(executor.is_builtin("exit"));
        assert!(executor.is_builtin("status"));
        assert!(!executor.is_builtin("ls"));
    }

    #[test]
    fn test_external_command_updates_status() {
        let executor = CommandExecutor::new();
        let mut state = ShellState::new();

        executor.execute(&toks("false"), &mut state).unwrap();
        assert_eq!(state.last_status, CommandStatus::Exited(1));

        executor.execute(&toks("true"), &mut state).unwrap();
        assert_eq!(state.last_status, CommandStatus::Exited(0));
    }

    #[test]
    fn test_status_builtin_does_not_launch() {
        let executor = CommandExecutor::new();
        let mut state = ShellState::new();
        state.last_status = CommandStatus::Signaled(2);

        executor.execute(&toks("status"), &mut state).unwrap();
        // a launch would have overwritten it
        assert_eq!(state.last_status, CommandStatus::Signaled(2));
    }

    #[test]
    fn test_missing_redirect_operand_is_reported() {
        let executor = CommandExecutor::new();
        let mut state = ShellState::new();

        let result = executor.execute(&toks("cat <"), &mut state);
        assert!(matches!(
            result,
            Err(CommandError::ProcessError(
                ProcessError::MissingRedirectTarget(_)
            ))
        ));
    }
}
