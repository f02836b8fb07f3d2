use crate::process::jobs::JobRegistry;
use crate::process::status::CommandStatus;

/// Process-wide shell state, owned by the dispatch loop for the lifetime
/// of the run and lent to built-ins and the launcher.
///
/// The foreground-only flag is not here: it is mutated asynchronously by
/// the suspend-signal handler and lives as an atomic in
/// [`crate::process::signal`].
pub struct ShellState {
    /// Outcome of the most recent foreground command; `exit value 0`
    /// before any has run.
    pub last_status: CommandStatus,
    pub jobs: JobRegistry,
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellState {
    pub fn new() -> Self {
        Self {
            last_status: CommandStatus::default(),
            jobs: JobRegistry::new(),
        }
    }
}
