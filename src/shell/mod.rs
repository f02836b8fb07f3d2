use std::io::{self, Write};

mod executor;

use crate::{
    core::{commands::CommandExecutor, state::ShellState},
    error::ShellError,
    flags::Flags,
    process::signal,
};

use executor::CommandHandler;

pub struct Shell {
    pub(crate) state: ShellState,
    pub(crate) executor: CommandExecutor,
    pub(crate) flags: Flags,
}

impl Shell {
    /// Builds the shell and installs its signal dispositions. Call once
    /// per process.
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        signal::install_shell_dispositions()?;

        Ok(Shell {
            state: ShellState::new(),
            executor: CommandExecutor::new(),
            flags,
        })
    }

    /// The dispatch loop. Each cycle reaps finished background jobs and
    /// reports them, prompts, reads one line, and hands it to dispatch.
    /// Only the `exit` built-in leaves this loop.
    pub fn run(&mut self) -> Result<(), ShellError> {
        let stdin = io::stdin();
        loop {
            // completion reports only ever appear here, at the top of a
            // cycle, never interleaved mid-command
            for (pid, status) in self.state.jobs.reap_all() {
                println!("background pid {} is done", pid);
                println!("{}", status);
            }

            print!(": ");
            io::stdout().flush()?;

            let mut line = String::new();
            match stdin.read_line(&mut line) {
                Ok(_) => {
                    if let Err(e) = self.execute_command(&line) {
                        if !self.flags.is_set("quiet") {
                            eprintln!("{}", e);
                        }
                    }
                }
                // interrupted or failed read: swallow it and re-prompt
                Err(_) => continue,
            }
        }
    }
}
