//! Streaming command runner.
//!
//! Validates a request, preempts the caller's previous search, spawns the new
//! one and relays its output line by line through the parser chain into a
//! [`ChunkSink`].

use std::sync::Arc;

use tokio::io::AsyncReadExt;
use tokio::task::JoinHandle;

use super::{
    chunk_channel, render_line, ChildProcess, ChunkSink, ChunkStream, CommandSpec, GrepSpawner,
    LineBuffer, OutputReader, ProcessSpawner, SearchError, SearchParams, SinkError,
    DEFAULT_CHUNK_CAPACITY,
};
use crate::config::LogCatalog;
use crate::parser::ParserChain;
use crate::registry::{ClientIdentity, ProcessHandle, ProcessRegistry};

/// Size of each read from a child's stdout.
pub const READ_BUFFER_SIZE: usize = 8 * 1024;

/// Summary of a finished search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Rendered lines delivered to the sink.
    pub lines: usize,
    /// Exit code; `None` when killed by a signal or unknown.
    pub exit_code: Option<i32>,
    /// Whether the sink went away before the process finished.
    pub disconnected: bool,
}

/// A search that has been launched and is streaming in the background.
#[derive(Debug)]
pub struct SearchTask {
    handle: ProcessHandle,
    join: JoinHandle<SearchOutcome>,
}

impl SearchTask {
    /// Registry handle of the running process.
    #[must_use]
    pub fn handle(&self) -> &ProcessHandle {
        &self.handle
    }

    /// Wait for the relay to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the relay task panicked or was aborted.
    pub async fn finished(self) -> Result<SearchOutcome, tokio::task::JoinError> {
        self.join.await
    }
}

/// Runs searches on behalf of clients.
pub struct SearchRunner {
    registry: Arc<ProcessRegistry>,
    chain: Arc<ParserChain>,
    catalog: Arc<LogCatalog>,
    spawner: Arc<dyn ProcessSpawner>,
}

impl std::fmt::Debug for SearchRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchRunner")
            .field("registry", &self.registry)
            .field("chain", &self.chain)
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

impl SearchRunner {
    /// Create a runner that spawns real grep processes.
    #[must_use]
    pub fn new(
        registry: Arc<ProcessRegistry>,
        chain: ParserChain,
        catalog: Arc<LogCatalog>,
    ) -> Self {
        Self {
            registry,
            chain: Arc::new(chain),
            catalog,
            spawner: Arc::new(GrepSpawner),
        }
    }

    /// Replace the process spawner (builder pattern).
    #[must_use]
    pub fn with_spawner(mut self, spawner: Arc<dyn ProcessSpawner>) -> Self {
        self.spawner = spawner;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<ProcessRegistry> {
        &self.registry
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<LogCatalog> {
        &self.catalog
    }

    /// Validate `params` against the current whitelist.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidParameter` for rejected requests.
    pub fn prepare(&self, params: &SearchParams) -> Result<CommandSpec, SearchError> {
        CommandSpec::validate(params, &self.catalog.files())
    }

    /// Launch a search for `identity`, relaying its output into `sink`.
    ///
    /// Validation happens before anything else; on failure no process is
    /// preempted or spawned. Any previous search of the same client is
    /// terminated before the new process starts.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidParameter` for rejected requests and
    /// `SearchError::Spawn` if the process cannot be launched. Nothing is
    /// registered in either case.
    pub fn start<S>(
        &self,
        identity: ClientIdentity,
        params: &SearchParams,
        sink: S,
    ) -> Result<SearchTask, SearchError>
    where
        S: ChunkSink + 'static,
    {
        let spec = self.prepare(params)?;
        let command = spec.display();

        self.registry.preempt(&identity);

        let mut child = self.spawner.spawn(&spec)?;
        let stdout = child.take_stdout().ok_or(SearchError::NoStdout)?;
        let pid = child.id().ok_or(SearchError::ProcessGone)?;

        let handle = ProcessHandle::new(pid, identity, command);
        self.registry.register(handle.clone());
        tracing::info!(
            identity = %handle.identity(),
            pid,
            command = handle.command(),
            "Running search"
        );

        let relay = Relay {
            handle: handle.clone(),
            registry: self.registry.clone(),
            chain: self.chain.clone(),
        };
        let join = tokio::spawn(relay.run(child, stdout, sink));

        Ok(SearchTask { handle, join })
    }

    /// Launch a search and return the stream of rendered chunks.
    ///
    /// The stream ends with [`super::Chunk::Complete`] once the process exits.
    ///
    /// # Errors
    ///
    /// See [`SearchRunner::start`].
    pub fn run_search(
        &self,
        identity: ClientIdentity,
        params: &SearchParams,
    ) -> Result<ChunkStream, SearchError> {
        let (sink, stream) = chunk_channel(DEFAULT_CHUNK_CAPACITY);
        self.start(identity, params, sink)?;
        Ok(stream)
    }
}

/// Background relay from one child's stdout to its sink.
struct Relay {
    handle: ProcessHandle,
    registry: Arc<ProcessRegistry>,
    chain: Arc<ParserChain>,
}

impl Relay {
    async fn run<S: ChunkSink>(
        self,
        mut child: Box<dyn ChildProcess>,
        mut stdout: OutputReader,
        mut sink: S,
    ) -> SearchOutcome {
        let pid = self.handle.pid();
        let mut outcome = SearchOutcome::default();
        let mut lines = LineBuffer::new();
        let mut buf = vec![0u8; READ_BUFFER_SIZE];

        loop {
            let n = match stdout.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) => {
                    tracing::warn!(pid, error = %e, "Failed to read search output");
                    break;
                }
            };

            self.registry.confirm(&self.handle);

            let complete = lines.push(&buf[..n]);
            if self.forward(&mut sink, complete, &mut outcome).await.is_err() {
                outcome.disconnected = true;
                break;
            }
        }

        if !outcome.disconnected {
            if let Some(last) = lines.finish() {
                if self.forward(&mut sink, vec![last], &mut outcome).await.is_err() {
                    outcome.disconnected = true;
                }
            }
        }

        if outcome.disconnected {
            tracing::debug!(pid, "Client went away, stopping search");
            self.registry.retire(&self.handle);
        }
        drop(stdout);

        outcome.exit_code = match child.wait().await {
            Ok(code) => code,
            Err(e) => {
                tracing::warn!(pid, error = %e, "Failed to wait for search process");
                None
            }
        };

        self.registry.release(&self.handle);
        tracing::info!(
            identity = %self.handle.identity(),
            pid,
            exit_code = ?outcome.exit_code,
            lines = outcome.lines,
            "Search finished"
        );

        if let Err(e) = sink.complete().await {
            tracing::debug!(pid, error = %e, "Completion marker not delivered");
        }

        outcome
    }

    async fn forward<S: ChunkSink>(
        &self,
        sink: &mut S,
        lines: Vec<String>,
        outcome: &mut SearchOutcome,
    ) -> Result<(), SinkError> {
        if lines.is_empty() {
            return Ok(());
        }
        for line in lines {
            let context = self.chain.parse(&line);
            sink.append_chunk(render_line(&context)).await?;
            outcome.lines += 1;
        }
        sink.flush().await
    }
}
