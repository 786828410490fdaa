//! Receiver configuration

use std::collections::BTreeSet;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use crate::protocol::{ARTNET_PORT, MAX_DMX_PACKET_SIZE};
use crate::store::SequencePolicy;

/// Receiver configuration options.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReceiverConfig {
    /// Local address to bind.
    pub bind_address: IpAddr,
    /// UDP port to listen on. 0 picks an ephemeral port.
    pub port: u16,
    /// Universe read by the query facade.
    pub active_universe: u16,
    /// Socket read timeout; bounds how long `stop` waits for the loop.
    pub poll_interval: Duration,
    /// Handling of frames older than the last one seen.
    pub sequence_policy: SequencePolicy,
    /// Universes to keep. `None` keeps every universe.
    pub universe_filter: Option<BTreeSet<u16>>,
    /// Size of the datagram receive buffer in bytes.
    pub recv_buffer_size: usize,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: ARTNET_PORT,
            active_universe: 0,
            poll_interval: Duration::from_millis(100),
            sequence_policy: SequencePolicy::Accept,
            universe_filter: None,
            recv_buffer_size: 1024,
        }
    }
}

impl ReceiverConfig {
    /// Set the bind address
    #[must_use]
    pub fn with_bind_address(mut self, addr: IpAddr) -> Self {
        self.bind_address = addr;
        self
    }

    /// Set the port
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the universe read by `dmx`/`dmxf`
    #[must_use]
    pub fn with_active_universe(mut self, universe: u16) -> Self {
        self.active_universe = universe;
        self
    }

    /// Set the stop latency bound
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the out-of-order policy
    #[must_use]
    pub fn with_sequence_policy(mut self, policy: SequencePolicy) -> Self {
        self.sequence_policy = policy;
        self
    }

    /// Only store the listed universes
    #[must_use]
    pub fn with_universe_filter(mut self, universes: impl IntoIterator<Item = u16>) -> Self {
        self.universe_filter = Some(universes.into_iter().collect());
        self
    }

    /// Socket address the receiver binds to
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    /// Whether frames for `universe` should be stored
    #[must_use]
    pub fn accepts_universe(&self, universe: u16) -> bool {
        self.universe_filter
            .as_ref()
            .is_none_or(|filter| filter.contains(&universe))
    }

    /// Poll interval clamped to something the socket accepts
    pub(crate) fn read_timeout(&self) -> Duration {
        // a zero timeout is rejected by set_read_timeout
        self.poll_interval.max(Duration::from_millis(1))
    }

    /// Receive buffer size, never smaller than one full ArtDmx packet
    pub(crate) fn buffer_size(&self) -> usize {
        self.recv_buffer_size.max(MAX_DMX_PACKET_SIZE)
    }
}
