//! Child creation and the foreground/background wait contract.
//!
//! Spawning goes through `std::process::Command` with a pre-exec hook that
//! runs in the child between fork and exec. The hook resets signal
//! dispositions and wires up redirections, then exec replaces the image; a
//! child that cannot open a redirection target reports and `_exit(1)`s
//! without ever returning into shell logic. Everything the hook touches is
//! prepared in the parent, so the child side performs only
//! async-signal-safe calls.

use std::ffi::CString;
use std::io;
use std::os::unix::process::CommandExt;
use std::process::Command;

use super::command::Invocation;
use super::signal;
use super::status::CommandStatus;
use super::ProcessError;
use crate::core::state::ShellState;

const DEV_NULL: &str = "/dev/null";

/// One stream rebinding, fully prepared for use inside the pre-exec hook.
struct Redirect {
    path: CString,
    oflag: libc::c_int,
    target_fd: libc::c_int,
    diagnostic: Vec<u8>,
}

#[derive(Clone, Default)]
pub struct ProcessLauncher;

impl ProcessLauncher {
    pub fn new() -> Self {
        Self
    }

    /// Spawns the invocation's program. Foreground: blocks on exactly that
    /// child, stores its decoded status, and reports a signal termination
    /// immediately. Background: prints the pid and registers the child
    /// without waiting.
    ///
    /// A failed spawn never takes the shell down; the command is reported
    /// and abandoned.
    pub fn launch(
        &self,
        invocation: Invocation,
        state: &mut ShellState,
    ) -> Result<(), ProcessError> {
        let plan = redirect_plan(&invocation)?;
        let background = invocation.background;

        let mut command = Command::new(&invocation.args[0]);
        command.args(&invocation.args[1..]);
        unsafe {
            command.pre_exec(move || {
                signal::child_dispositions(background);
                apply_redirects(&plan);
                Ok(())
            });
        }

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                eprintln!("minish: {}: command not found", invocation.args[0]);
                // only a foreground wait may move the status
                if !background {
                    state.last_status = CommandStatus::Exited(1);
                }
                return Ok(());
            }
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                eprintln!("minish: {}: permission denied", invocation.args[0]);
                if !background {
                    state.last_status = CommandStatus::Exited(1);
                }
                return Ok(());
            }
            // process creation failed (resource exhaustion and the like):
            // abandon this command only, the shell keeps running
            Err(e) => {
                eprintln!("minish: failed to start {}: {}", invocation.args[0], e);
                return Ok(());
            }
        };

        if background {
            println!("background pid is {}", child.id());
            state.jobs.register(child)?;
        } else {
            let status = CommandStatus::from_wait(child.wait()?);
            if let CommandStatus::Signaled(sig) = status {
                println!("terminated by signal {}", sig);
            }
            state.last_status = status;
        }
        Ok(())
    }
}

/// Builds the child's redirection plan in the parent. Explicit paths win;
/// a background job with no explicit redirection for a direction gets that
/// direction bound to `/dev/null`, so it never reads the terminal or
/// writes into the interactive session.
fn redirect_plan(invocation: &Invocation) -> Result<Vec<Redirect>, ProcessError> {
    let stdin_path = match (invocation.stdin_path.as_deref(), invocation.background) {
        (Some(path), _) => Some(path),
        (None, true) => Some(DEV_NULL),
        (None, false) => None,
    };
    let stdout_path = match (invocation.stdout_path.as_deref(), invocation.background) {
        (Some(path), _) => Some(path),
        (None, true) => Some(DEV_NULL),
        (None, false) => None,
    };

    let mut plan = Vec::new();
    if let Some(path) = stdin_path {
        plan.push(Redirect {
            path: path_cstring(path)?,
            oflag: libc::O_RDONLY,
            target_fd: libc::STDIN_FILENO,
            diagnostic: format!("minish: cannot open {} for input\n", path).into_bytes(),
        });
    }
    if let Some(path) = stdout_path {
        plan.push(Redirect {
            path: path_cstring(path)?,
            oflag: libc::O_WRONLY | libc::O_CREAT | libc::O_TRUNC,
            target_fd: libc::STDOUT_FILENO,
            diagnostic: format!("minish: cannot open {} for output\n", path).into_bytes(),
        });
    }
    Ok(plan)
}

fn path_cstring(path: &str) -> Result<CString, ProcessError> {
    CString::new(path).map_err(|_| ProcessError::Other(format!("invalid path: {}", path)))
}

/// Child side of the plan: open, dup2 onto the standard stream, close. On
/// an open failure the child writes its prepared diagnostic and exits 1
/// before exec. Only raw libc calls here.
fn apply_redirects(plan: &[Redirect]) {
    for redirect in plan {
        unsafe {
            let fd = libc::open(redirect.path.as_ptr(), redirect.oflag, 0o644 as libc::c_uint);
            if fd == -1 {
                let _ = libc::write(
                    libc::STDERR_FILENO,
                    redirect.diagnostic.as_ptr().cast(),
                    redirect.diagnostic.len(),
                );
                libc::_exit(1);
            }
            if libc::dup2(fd, redirect.target_fd) == -1 {
                libc::_exit(1);
            }
            libc::close(fd);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    fn invocation(args: &[&str]) -> Invocation {
        Invocation {
            args: args.iter().map(|s| s.to_string()).collect(),
            stdin_path: None,
            stdout_path: None,
            background: false,
        }
    }

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("minish_{}_{}", name, std::process::id()))
    }

    #[test]
    fn test_foreground_records_exit_status() {
        let launcher = ProcessLauncher::new();
        let mut state = ShellState::new();

        launcher.launch(invocation(&["true"]), &mut state).unwrap();
        assert_eq!(state.last_status, CommandStatus::Exited(0));

        launcher.launch(invocation(&["false"]), &mut state).unwrap();
        assert_eq!(state.last_status, CommandStatus::Exited(1));
    }

    #[test]
    fn test_missing_program_reports_and_sets_status() {
        let launcher = ProcessLauncher::new();
        let mut state = ShellState::new();

        let result = launcher.launch(invocation(&["minish-no-such-program"]), &mut state);
        assert!(result.is_ok());
        assert_eq!(state.last_status, CommandStatus::Exited(1));
    }

    #[test]
    fn test_foreground_signal_termination_is_decoded() {
        let launcher = ProcessLauncher::new();
        let mut state = ShellState::new();

        launcher
            .launch(invocation(&["sh", "-c", "kill -TERM $$"]), &mut state)
            .unwrap();
        assert_eq!(state.last_status, CommandStatus::Signaled(libc::SIGTERM));
    }

    #[test]
    fn test_redirection_round_trip() {
        let launcher = ProcessLauncher::new();
        let mut state = ShellState::new();
        let first = scratch("roundtrip_a");
        let second = scratch("roundtrip_b");

        let mut write_side = invocation(&["echo", "hi"]);
        write_side.stdout_path = Some(first.to_string_lossy().into_owned());
        launcher.launch(write_side, &mut state).unwrap();

        let mut read_side = invocation(&["cat"]);
        read_side.stdin_path = Some(first.to_string_lossy().into_owned());
        read_side.stdout_path = Some(second.to_string_lossy().into_owned());
        launcher.launch(read_side, &mut state).unwrap();

        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
        assert_eq!(fs::read(&second).unwrap(), b"hi\n");
        assert_eq!(state.last_status, CommandStatus::Exited(0));

        let _ = fs::remove_file(first);
        let _ = fs::remove_file(second);
    }

    #[test]
    fn test_unreadable_input_fails_child_with_exit_one() {
        let launcher = ProcessLauncher::new();
        let mut state = ShellState::new();

        let mut inv = invocation(&["cat"]);
        inv.stdin_path = Some("/no/such/minish/input".to_string());
        launcher.launch(inv, &mut state).unwrap();
        assert_eq!(state.last_status, CommandStatus::Exited(1));
    }

    #[test]
    fn test_background_registers_without_blocking() {
        let launcher = ProcessLauncher::new();
        let mut state = ShellState::new();

        let mut inv = invocation(&["sleep", "30"]);
        inv.background = true;
        let start = Instant::now();
        launcher.launch(inv, &mut state).unwrap();
        assert!(start.elapsed() < Duration::from_secs(1));
        assert_eq!(state.jobs.len(), 1);
        // a foreground command never ran, so the status is untouched
        assert_eq!(state.last_status, CommandStatus::Exited(0));

        state.jobs.kill_all();
    }

    #[test]
    fn test_background_spawn_failure_leaves_status_untouched() {
        let launcher = ProcessLauncher::new();
        let mut state = ShellState::new();
        state.last_status = CommandStatus::Exited(7);

        let mut inv = invocation(&["minish-no-such-program"]);
        inv.background = true;
        launcher.launch(inv, &mut state).unwrap();

        // no foreground wait happened, so the status must not move
        assert_eq!(state.last_status, CommandStatus::Exited(7));
        assert!(state.jobs.is_empty());
    }

    #[test]
    fn test_background_without_redirection_reads_dev_null() {
        let launcher = ProcessLauncher::new();
        let mut state = ShellState::new();

        // cat with no explicit redirection: bound to /dev/null, it sees
        // EOF at once and exits 0 instead of hanging on terminal input
        let mut inv = invocation(&["cat"]);
        inv.background = true;
        launcher.launch(inv, &mut state).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let reaped = state.jobs.reap_all();
            if !reaped.is_empty() {
                assert_eq!(reaped[0].1, CommandStatus::Exited(0));
                break;
            }
            assert!(Instant::now() < deadline, "background cat never exited");
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_background_child_ignores_interrupt() {
        let launcher = ProcessLauncher::new();
        let mut state = ShellState::new();

        let mut inv = invocation(&["sleep", "30"]);
        inv.background = true;
        launcher.launch(inv, &mut state).unwrap();
        let pid = state.jobs.pids()[0];

        unsafe {
            assert_eq!(libc::kill(pid as libc::pid_t, libc::SIGINT), 0);
        }
        std::thread::sleep(Duration::from_millis(300));
        // still running: only a foreground child takes the default SIGINT
        assert!(state.jobs.reap_all().is_empty());
        assert_eq!(state.jobs.len(), 1);

        state.jobs.kill_all();
    }

    #[test]
    fn test_background_job_is_reaped_later() {
        let launcher = ProcessLauncher::new();
        let mut state = ShellState::new();

        let mut inv = invocation(&["true"]);
        inv.background = true;
        launcher.launch(inv, &mut state).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let reaped = state.jobs.reap_all();
            if !reaped.is_empty() {
                assert_eq!(reaped[0].1, CommandStatus::Exited(0));
                break;
            }
            assert!(Instant::now() < deadline, "background job never reaped");
            std::thread::sleep(Duration::from_millis(10));
        }
    }
}
