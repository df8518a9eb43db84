//! Preemption behavior of the process registry.

use std::sync::{Arc, Mutex};

use loggrep::registry::{ClientIdentity, ProcessHandle, ProcessRegistry, Terminator};

/// Records every signalled pid.
#[derive(Default)]
struct Recording {
    pids: Mutex<Vec<u32>>,
}

impl Terminator for Recording {
    fn terminate(&self, pid: u32) -> std::io::Result<()> {
        self.pids.lock().unwrap().push(pid);
        Ok(())
    }
}

fn handle(pid: u32, key: &str) -> ProcessHandle {
    ProcessHandle::new(pid, ClientIdentity::new(key), format!("grep -E -e q{pid} app.log"))
}

#[test]
fn second_registration_signals_only_the_first() {
    let signals = Arc::new(Recording::default());
    let registry = ProcessRegistry::with_terminator(signals.clone());

    let identities = ["1.2.3.4", "::1", "10.0.0.255"];
    for (i, key) in identities.iter().enumerate() {
        let base = u32::try_from(i).unwrap() * 10;
        let first = handle(base + 1, key);
        registry.register(first.clone());
        registry.register(handle(base + 2, key));
        assert!(first.is_preempted());

        let found = registry.find_by_identity(&ClientIdentity::new(*key)).unwrap();
        assert_eq!(found.pid(), base + 2);
        assert_eq!(found.command(), format!("grep -E -e q{} app.log", base + 2));
    }

    assert_eq!(*signals.pids.lock().unwrap(), vec![1, 11, 21]);
    assert_eq!(registry.len(), identities.len());
}

#[test]
fn default_registry_starts_empty() {
    let registry = ProcessRegistry::default();
    assert!(registry.is_empty());
    assert!(registry.find_by_identity(&"anyone".into()).is_none());
}
