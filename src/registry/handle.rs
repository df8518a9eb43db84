//! Client identity and process handle types.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use tokio_util::sync::CancellationToken;

/// Key correlating a connection with its background process.
///
/// Derived from the peer's IP address; the port is ignored so that a
/// browser's successive connections map to the same identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientIdentity(String);

impl ClientIdentity {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Identity of a remote peer.
    #[must_use]
    pub fn from_peer(addr: SocketAddr) -> Self {
        Self::from(addr.ip())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<IpAddr> for ClientIdentity {
    fn from(ip: IpAddr) -> Self {
        Self(ip.to_string())
    }
}

impl From<&str> for ClientIdentity {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A spawned search process owned by one client.
#[derive(Debug, Clone)]
pub struct ProcessHandle {
    pid: u32,
    identity: ClientIdentity,
    command: String,
    preempted: CancellationToken,
}

impl ProcessHandle {
    #[must_use]
    pub fn new(pid: u32, identity: ClientIdentity, command: impl Into<String>) -> Self {
        Self {
            pid,
            identity,
            command: command.into(),
            preempted: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn pid(&self) -> u32 {
        self.pid
    }

    #[must_use]
    pub fn identity(&self) -> &ClientIdentity {
        &self.identity
    }

    /// Shell rendering of the command, for display only.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Whether this handle was terminated by a superseding request.
    #[must_use]
    pub fn is_preempted(&self) -> bool {
        self.preempted.is_cancelled()
    }

    /// Resolves once the handle is preempted.
    pub async fn preempted(&self) {
        self.preempted.cancelled().await;
    }

    pub(crate) fn mark_preempted(&self) {
        self.preempted.cancel();
    }
}

impl PartialEq for ProcessHandle {
    fn eq(&self, other: &Self) -> bool {
        self.pid == other.pid && self.identity == other.identity
    }
}

impl Eq for ProcessHandle {}
