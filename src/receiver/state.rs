//! Receiver lifecycle state

use std::fmt;
use std::net::SocketAddr;

use super::StatsSnapshot;

/// Receiver lifecycle.
///
/// ```text
/// Stopped -> Starting -> Running -> Stopping -> Stopped
///               |           |
///               +-> Failed <+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReceiverState {
    /// No socket, no thread
    #[default]
    Stopped,
    /// Binding the socket
    Starting,
    /// Receive thread running
    Running,
    /// Waiting for the receive thread to exit
    Stopping,
    /// Bind or socket failure; see [`ReceiverStatus::last_error`]
    Failed,
}

impl ReceiverState {
    /// Whether the receive thread is (or is about to be) live
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Starting | Self::Running)
    }
}

impl fmt::Display for ReceiverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stopped => "stopped",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Stopping => "stopping",
            Self::Failed => "failed",
        };
        write!(f, "{name}")
    }
}

/// Status report for the host application.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReceiverStatus {
    /// Lifecycle state
    pub state: ReceiverState,
    /// Most recent bind or socket error, cleared on `start`
    pub last_error: Option<String>,
    /// Bound address while running
    pub local_addr: Option<SocketAddr>,
    /// Receive counters since the receiver was created
    pub stats: StatsSnapshot,
}

impl fmt::Display for ReceiverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.state, &self.last_error, &self.local_addr) {
            (ReceiverState::Failed, Some(err), _) => write!(f, "failed: {err}"),
            (ReceiverState::Running, _, Some(addr)) => write!(
                f,
                "running on {addr} ({} frames, {} rejected)",
                self.stats.frames_applied,
                self.stats.decode_errors()
            ),
            (state, _, _) => write!(f, "{state}"),
        }
    }
}
