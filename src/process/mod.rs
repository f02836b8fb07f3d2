use std::fmt;

pub mod command;
pub mod jobs;
pub mod launcher;
pub mod signal;
pub mod status;

#[derive(Debug)]
pub enum ProcessError {
    MissingProgram,
    MissingRedirectTarget(String),
    JobTableFull(u32),
    SignalError(String),
    Other(String),
}

impl From<std::io::Error> for ProcessError {
    fn from(e: std::io::Error) -> Self {
        ProcessError::Other(e.to_string())
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::MissingProgram => write!(f, "no command given"),
            ProcessError::MissingRedirectTarget(op) => {
                write!(f, "missing file name after '{}'", op)
            }
            ProcessError::JobTableFull(pid) => {
                write!(f, "job table full, pid {} left untracked", pid)
            }
            ProcessError::SignalError(msg) => write!(f, "Signal error: {}", msg),
            ProcessError::Other(msg) => write!(f, "Process error: {}", msg),
        }
    }
}
