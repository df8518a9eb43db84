//! Process registry enforcing one running search per client.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{ClientIdentity, ProcessHandle, SignalTerminator, Terminator};

/// Maps each [`ClientIdentity`] to its single outstanding [`ProcessHandle`].
///
/// All operations run under one lock, so lookup, termination and removal
/// for an identity are atomic with respect to each other. Termination
/// signals are sent while the lock is held; sending a signal never blocks.
pub struct ProcessRegistry {
    processes: Mutex<HashMap<ClientIdentity, ProcessHandle>>,
    terminator: Arc<dyn Terminator>,
}

impl std::fmt::Debug for ProcessRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessRegistry")
            .field("processes", &self.len())
            .finish_non_exhaustive()
    }
}

impl Default for ProcessRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessRegistry {
    /// Create a registry that stops processes with `SIGTERM`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_terminator(Arc::new(SignalTerminator))
    }

    /// Create a registry with a custom signal sender.
    #[must_use]
    pub fn with_terminator(terminator: Arc<dyn Terminator>) -> Self {
        Self {
            processes: Mutex::new(HashMap::new()),
            terminator,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ClientIdentity, ProcessHandle>> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.processes
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn signal(&self, handle: &ProcessHandle) {
        handle.mark_preempted();
        tracing::info!(
            identity = %handle.identity(),
            pid = handle.pid(),
            "Terminating existing process"
        );
        if let Err(e) = self.terminator.terminate(handle.pid()) {
            tracing::warn!(pid = handle.pid(), error = %e, "Failed to signal process");
        }
    }

    /// Install `handle` for its identity.
    ///
    /// Any other handle already registered for the identity is terminated
    /// first. Registering the identical handle again is a no-op.
    pub fn register(&self, handle: ProcessHandle) {
        let mut processes = self.lock();
        if let Some(existing) = processes.get(handle.identity()) {
            if *existing == handle {
                return;
            }
            self.signal(existing);
        }
        tracing::debug!(identity = %handle.identity(), pid = handle.pid(), "Registered process");
        processes.insert(handle.identity().clone(), handle);
    }

    /// Re-assert `handle` after it produced output.
    ///
    /// Reinstalls the handle only if its identity has no entry and the
    /// handle was not preempted; never signals anything.
    pub fn confirm(&self, handle: &ProcessHandle) {
        if handle.is_preempted() {
            return;
        }
        self.lock()
            .entry(handle.identity().clone())
            .or_insert_with(|| handle.clone());
    }

    /// Remove whatever is registered for `identity`.
    pub fn unregister(&self, identity: &ClientIdentity) -> Option<ProcessHandle> {
        self.lock().remove(identity)
    }

    /// Remove `handle` only if it is still the registered one.
    ///
    /// Used by exit callbacks so a preempted process finishing late never
    /// evicts the handle that replaced it.
    pub fn release(&self, handle: &ProcessHandle) -> bool {
        let mut processes = self.lock();
        if processes.get(handle.identity()) == Some(handle) {
            processes.remove(handle.identity());
            true
        } else {
            false
        }
    }

    /// Terminate and remove `handle` if it is still the registered one.
    pub fn retire(&self, handle: &ProcessHandle) -> bool {
        let mut processes = self.lock();
        if processes.get(handle.identity()) == Some(handle) {
            if let Some(current) = processes.remove(handle.identity()) {
                self.signal(&current);
            }
            true
        } else {
            false
        }
    }

    /// Look up the handle registered for `identity`.
    #[must_use]
    pub fn find_by_identity(&self, identity: &ClientIdentity) -> Option<ProcessHandle> {
        self.lock().get(identity).cloned()
    }

    /// Terminate and remove the process registered for `identity`, if any.
    pub fn preempt(&self, identity: &ClientIdentity) -> Option<ProcessHandle> {
        let mut processes = self.lock();
        let handle = processes.remove(identity)?;
        self.signal(&handle);
        Some(handle)
    }

    /// Number of registered processes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
