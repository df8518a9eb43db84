//! Spawning of search processes.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncRead;
use tokio::process::{Child, Command};

use super::{CommandSpec, SpawnError};

/// Readable standard output of a search process.
pub type OutputReader = Box<dyn AsyncRead + Send + Unpin>;

/// A running search process.
#[async_trait]
pub trait ChildProcess: Send {
    /// Process identifier, if the process is still running.
    fn id(&self) -> Option<u32>;

    /// Take ownership of stdout. Subsequent calls return `None`.
    fn take_stdout(&mut self) -> Option<OutputReader>;

    /// Wait for the process to exit and return its exit code.
    ///
    /// `None` means the process was killed by a signal.
    ///
    /// # Errors
    ///
    /// Returns an error if waiting fails.
    async fn wait(&mut self) -> std::io::Result<Option<i32>>;
}

/// Launches the process described by a [`CommandSpec`].
pub trait ProcessSpawner: Send + Sync {
    /// Spawn the command with stdout piped.
    ///
    /// # Errors
    ///
    /// Returns `SpawnError` if the process fails to start.
    fn spawn(&self, spec: &CommandSpec) -> Result<Box<dyn ChildProcess>, SpawnError>;
}

/// Spawns real `grep`/`zgrep`/`bzgrep` processes.
///
/// Each child leads its own process group so a termination signal reaches
/// the whole pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrepSpawner;

impl ProcessSpawner for GrepSpawner {
    fn spawn(&self, spec: &CommandSpec) -> Result<Box<dyn ChildProcess>, SpawnError> {
        let argv = spec.argv();
        let Some((program, args)) = argv.split_first() else {
            return Err(SpawnError::NotFound(String::new()));
        };

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());

        #[cfg(unix)]
        cmd.process_group(0);

        let child = cmd
            .spawn()
            .map_err(|e| SpawnError::from_io(program, e))?;

        Ok(Box::new(GrepProcess { child }))
    }
}

/// A search process spawned by [`GrepSpawner`].
#[derive(Debug)]
pub struct GrepProcess {
    child: Child,
}

#[async_trait]
impl ChildProcess for GrepProcess {
    fn id(&self) -> Option<u32> {
        self.child.id()
    }

    fn take_stdout(&mut self) -> Option<OutputReader> {
        self.child
            .stdout
            .take()
            .map(|stdout| Box::new(stdout) as OutputReader)
    }

    async fn wait(&mut self) -> std::io::Result<Option<i32>> {
        let status = self.child.wait().await?;
        Ok(status.code())
    }
}
