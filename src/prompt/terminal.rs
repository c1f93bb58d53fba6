//! Terminal mode restore
//!
//! The input thread may still be inside a raw-mode read when the process
//! exits (an external SIGINT ends the loop without the editor noticing).
//! [`TerminalGuard`] records the mode at startup and puts it back on drop.

/// Saved terminal attributes of stdin, restored when dropped
#[cfg(unix)]
pub struct TerminalGuard {
    fd: libc::c_int,
    original: libc::termios,
}

#[cfg(unix)]
impl TerminalGuard {
    /// Save the current mode of stdin. `None` when stdin is not a terminal.
    pub fn capture() -> Option<Self> {
        Self::capture_fd(libc::STDIN_FILENO)
    }

    fn capture_fd(fd: libc::c_int) -> Option<Self> {
        // SAFETY: tcgetattr only writes into the zeroed struct we own.
        unsafe {
            let mut original: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(fd, &mut original) != 0 {
                return None;
            }
            Some(Self { fd, original })
        }
    }

    /// Put the saved mode back
    pub fn restore(&self) {
        // SAFETY: `original` came from tcgetattr on the same descriptor.
        let rc = unsafe { libc::tcsetattr(self.fd, libc::TCSANOW, &self.original) };
        if rc != 0 {
            tracing::debug!(
                error = %std::io::Error::last_os_error(),
                "failed to restore terminal mode"
            );
        }
    }
}

#[cfg(unix)]
impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

/// No-op on platforms without termios
#[cfg(not(unix))]
pub struct TerminalGuard;

#[cfg(not(unix))]
impl TerminalGuard {
    /// Always `None`
    pub fn capture() -> Option<Self> {
        None
    }

    /// Nothing to restore
    pub fn restore(&self) {}
}
