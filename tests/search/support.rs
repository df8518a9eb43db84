//! Test doubles for driving the runner without real processes.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use loggrep::config::LogCatalog;
use loggrep::parser::ParserChain;
use loggrep::registry::{ProcessRegistry, Terminator};
use loggrep::search::{
    ChildProcess, CommandSpec, OutputReader, ProcessSpawner, SearchRunner, SpawnError,
};
use tempfile::TempDir;

/// First pid handed out by [`FakeSpawner`].
pub const FIRST_PID: u32 = 1000;

/// A child whose stdout is whatever reader the test supplied.
pub struct FakeChild {
    pid: u32,
    stdout: Option<OutputReader>,
}

#[async_trait]
impl ChildProcess for FakeChild {
    fn id(&self) -> Option<u32> {
        Some(self.pid)
    }

    fn take_stdout(&mut self) -> Option<OutputReader> {
        self.stdout.take()
    }

    async fn wait(&mut self) -> std::io::Result<Option<i32>> {
        Ok(Some(0))
    }
}

/// Spawner that counts calls and hands out queued readers.
#[derive(Default)]
pub struct FakeSpawner {
    calls: AtomicUsize,
    next_pid: AtomicU32,
    outputs: Mutex<VecDeque<OutputReader>>,
    specs: Mutex<Vec<CommandSpec>>,
}

impl FakeSpawner {
    pub fn push_output(&self, reader: impl tokio::io::AsyncRead + Send + Unpin + 'static) {
        self.outputs.lock().unwrap().push_back(Box::new(reader));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn specs(&self) -> Vec<CommandSpec> {
        self.specs.lock().unwrap().clone()
    }
}

impl ProcessSpawner for FakeSpawner {
    fn spawn(&self, spec: &CommandSpec) -> Result<Box<dyn ChildProcess>, SpawnError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.specs.lock().unwrap().push(spec.clone());

        let stdout = self
            .outputs
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| SpawnError::NotFound(spec.tool().program().to_string()))?;
        let pid = FIRST_PID + self.next_pid.fetch_add(1, Ordering::SeqCst);

        Ok(Box::new(FakeChild {
            pid,
            stdout: Some(stdout),
        }))
    }
}

/// Terminator that records every pid it is asked to stop.
#[derive(Default)]
pub struct RecordingTerminator {
    pids: Mutex<Vec<u32>>,
}

impl RecordingTerminator {
    pub fn pids(&self) -> Vec<u32> {
        self.pids.lock().unwrap().clone()
    }
}

impl Terminator for RecordingTerminator {
    fn terminate(&self, pid: u32) -> std::io::Result<()> {
        self.pids.lock().unwrap().push(pid);
        Ok(())
    }
}

/// A runner wired to fakes, with one whitelisted `app.log`.
pub struct Harness {
    _dir: TempDir,
    pub log: String,
    pub runner: SearchRunner,
    pub registry: Arc<ProcessRegistry>,
    pub spawner: Arc<FakeSpawner>,
    pub signals: Arc<RecordingTerminator>,
}

pub fn harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    std::fs::write(&path, "").unwrap();
    let log = path.display().to_string();

    let signals = Arc::new(RecordingTerminator::default());
    let registry = Arc::new(ProcessRegistry::with_terminator(signals.clone()));
    let spawner = Arc::new(FakeSpawner::default());

    let runner = SearchRunner::new(
        registry.clone(),
        ParserChain::standard(true),
        Arc::new(LogCatalog::new(vec![log.clone()])),
    )
    .with_spawner(spawner.clone());

    Harness {
        _dir: dir,
        log,
        runner,
        registry,
        spawner,
        signals,
    }
}
