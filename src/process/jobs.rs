//! Background job tracking between spawn and confirmed exit.

use std::process::Child;

use super::status::CommandStatus;
use super::ProcessError;

/// Upper bound on concurrently tracked background jobs. A spawn past the
/// bound is reported and runs untracked; the table never grows.
pub const MAX_JOBS: usize = 100;

/// Ordered set of outstanding background children. Every entry has been
/// spawned and not yet observed to exit. Touched only from the shell
/// thread, so no synchronization is needed.
#[derive(Default)]
pub struct JobRegistry {
    jobs: Vec<Child>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self { jobs: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Pids of every still-tracked job, in registration order.
    pub fn pids(&self) -> Vec<u32> {
        self.jobs.iter().map(Child::id).collect()
    }

    pub fn register(&mut self, child: Child) -> Result<(), ProcessError> {
        if self.jobs.len() >= MAX_JOBS {
            return Err(ProcessError::JobTableFull(child.id()));
        }
        self.jobs.push(child);
        Ok(())
    }

    /// Non-blocking poll of every tracked child. Returns the pid and
    /// decoded status of each one that has exited (possibly none) and
    /// drops them from the registry.
    pub fn reap_all(&mut self) -> Vec<(u32, CommandStatus)> {
        let mut finished = Vec::new();
        let mut i = 0;
        while i < self.jobs.len() {
            match self.jobs[i].try_wait() {
                Ok(Some(status)) => {
                    let child = self.jobs.remove(i);
                    finished.push((child.id(), CommandStatus::from_wait(status)));
                }
                Ok(None) => i += 1,
                // already reaped out from under us; status unknowable
                Err(_) => {
                    self.jobs.remove(i);
                }
            }
        }
        finished
    }

    /// Shutdown path: SIGKILL and reap every still-tracked child so no
    /// background job outlives the shell.
    pub fn kill_all(&mut self) {
        for child in &mut self.jobs {
            let _ = child.kill();
            let _ = child.wait();
        }
        self.jobs.clear();
    }
}
