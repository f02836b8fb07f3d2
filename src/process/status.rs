use std::fmt;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

/// Decoded outcome of a waited-for child.
///
/// Constructed only from a wait result; the initial value before any
/// foreground command has run is `Exited(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Exited(i32),
    Signaled(i32),
}

impl CommandStatus {
    pub fn from_wait(status: ExitStatus) -> Self {
        if let Some(sig) = status.signal() {
            CommandStatus::Signaled(sig)
        } else {
            CommandStatus::Exited(status.code().unwrap_or(0))
        }
    }
}

impl Default for CommandStatus {
    fn default() -> Self {
        CommandStatus::Exited(0)
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandStatus::Exited(code) => write!(f, "exit value {}", code),
            CommandStatus::Signaled(sig) => write!(f, "terminated by signal {}", sig),
        }
    }
}
