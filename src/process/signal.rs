//! Signal dispositions for the shell and its children.
//!
//! The shell ignores SIGINT outright and handles SIGTSTP by toggling
//! foreground-only mode. Children reset both dispositions after fork,
//! before exec; the parent's settings are inherited across fork and must
//! never be left in place unexamined.

use std::sync::atomic::{AtomicBool, Ordering};

use signal_hook::consts::SIGTSTP;

use super::ProcessError;

/// Flipped only by the SIGTSTP handler; read fresh on every command.
static FOREGROUND_ONLY: AtomicBool = AtomicBool::new(false);

const ENTER_MSG: &[u8] = b"Entering foreground-only mode (& is now ignored)\n";
const EXIT_MSG: &[u8] = b"Exiting foreground-only mode\n";

/// Current foreground-only mode. Callers must not cache this across
/// commands; a SIGTSTP can arrive between any two lines of input.
pub fn foreground_only() -> bool {
    FOREGROUND_ONLY.load(Ordering::SeqCst)
}

/// SIGTSTP handler body. Runs asynchronously, so it is restricted to an
/// atomic flip and a raw write; buffered stdout is off limits here.
fn toggle_foreground_only() {
    let was_on = FOREGROUND_ONLY.fetch_xor(true, Ordering::SeqCst);
    let msg = if was_on { EXIT_MSG } else { ENTER_MSG };
    unsafe {
        let _ = libc::write(libc::STDOUT_FILENO, msg.as_ptr().cast(), msg.len());
    }
}

/// Installs the shell-side dispositions: SIGINT ignored, SIGTSTP routed to
/// the toggle handler. signal-hook registers with SA_RESTART, so a toggle
/// arriving mid-read prints its message and the line read resumes.
///
/// Called once, before the first prompt.
pub fn install_shell_dispositions() -> Result<(), ProcessError> {
    unsafe {
        if libc::signal(libc::SIGINT, libc::SIG_IGN) == libc::SIG_ERR {
            return Err(ProcessError::SignalError(
                "failed to ignore interrupt signal".to_string(),
            ));
        }
        signal_hook::low_level::register(SIGTSTP, toggle_foreground_only)
            .map_err(|e| ProcessError::SignalError(e.to_string()))?;
    }
    Ok(())
}

/// Child-side dispositions, applied after fork and before exec. SIGTSTP is
/// always ignored (children never suspend); SIGINT is default for a
/// foreground child and ignored for a background one, so only the
/// foreground job is interruptible from the terminal.
///
/// Async-signal-safe; runs inside the pre-exec hook.
pub(crate) fn child_dispositions(background: bool) {
    unsafe {
        libc::signal(libc::SIGTSTP, libc::SIG_IGN);
        let on_interrupt = if background {
            libc::SIG_IGN
        } else {
            libc::SIG_DFL
        };
        libc::signal(libc::SIGINT, on_interrupt);
    }
}
