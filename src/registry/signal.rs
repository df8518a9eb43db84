//! Delivery of termination signals to search processes.

/// Sends a termination signal to a process.
pub trait Terminator: Send + Sync {
    /// Ask the process (and its process group) identified by `pid` to stop.
    ///
    /// # Errors
    ///
    /// Returns an error if the signal could not be delivered.
    fn terminate(&self, pid: u32) -> std::io::Result<()>;
}

/// Sends `SIGTERM` to the process group led by the child.
///
/// Search children are started as process-group leaders, so this also
/// reaches the helpers spawned by `zgrep` and the second stage of a
/// filtered pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalTerminator;

impl Terminator for SignalTerminator {
    #[cfg(unix)]
    fn terminate(&self, pid: u32) -> std::io::Result<()> {
        use nix::errno::Errno;
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;

        // Group 0 is our own.
        let raw = i32::try_from(pid)
            .ok()
            .filter(|p| *p > 1)
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("refusing to signal process group {pid}"),
                )
            })?;
        let pgid = Pid::from_raw(raw);
        match killpg(pgid, Signal::SIGTERM) {
            // Already gone.
            Ok(()) | Err(Errno::ESRCH) => Ok(()),
            Err(e) => Err(std::io::Error::from(e)),
        }
    }

    #[cfg(not(unix))]
    fn terminate(&self, pid: u32) -> std::io::Result<()> {
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            format!("cannot signal process {pid} on this platform"),
        ))
    }
}
