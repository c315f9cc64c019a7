//! RAII terminal lifecycle guard backed by crossterm.
//!
//! [`TerminalGuard`] enters raw mode and the alternate screen on construction,
//! and restores the terminal on [`Drop`], including during panics or early
//! error returns. A panic hook restores the terminal *before* the panic
//! message is printed so the backtrace lands on a normal screen.

use std::io;
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};

/// Set while raw mode is active. Checked by the panic hook to decide whether
/// restoration is needed.
static RAW_MODE_ACTIVE: AtomicBool = AtomicBool::new(false);

pub struct TerminalGuard {
    hook_installed: bool,
}

impl TerminalGuard {
    /// Enter raw mode and the alternate screen, installing a panic-safe
    /// cleanup hook.
    ///
    /// # Errors
    /// Returns I/O errors if terminal setup fails. Partial setup is undone
    /// before returning.
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        RAW_MODE_ACTIVE.store(true, Ordering::SeqCst);
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
            restore_terminal_best_effort();
            return Err(e);
        }

        let prev = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_terminal_best_effort();
            prev(info);
        }));

        Ok(Self {
            hook_installed: true,
        })
    }

    /// Current terminal dimensions (columns, rows), falling back to 80x24
    /// when no tty is attached.
    #[must_use]
    pub fn terminal_size() -> (u16, u16) {
        crossterm::terminal::size()
            .ok()
            .filter(|&(cols, rows)| cols > 0 && rows > 0)
            .unwrap_or((80, 24))
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal_best_effort();
        if self.hook_installed {
            // The previous hook moved into our closure; fall back to the
            // default hook once the dashboard is gone.
            let _ = panic::take_hook();
        }
    }
}

/// Best-effort terminal restoration. Safe to call multiple times.
fn restore_terminal_best_effort() {
    if RAW_MODE_ACTIVE.swap(false, Ordering::SeqCst) {
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
        let _ = disable_raw_mode();
    }
}
