//! ArtDmx frame

use bytes::Bytes;

use super::{PortAddress, UNIVERSE_SIZE};

/// Decoded ArtDmx packet
///
/// `data` is a zero-copy slice of the received datagram and holds between 1
/// and 512 channel values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtDmx {
    universe: PortAddress,
    sequence: u8,
    physical: u8,
    data: Bytes,
}

impl ArtDmx {
    /// Create a frame.
    ///
    /// The universe is masked to 15 bits and data longer than a universe is
    /// cut to 512 channels.
    pub fn new(universe: u16, sequence: u8, data: impl Into<Bytes>) -> Self {
        let mut data = data.into();
        data.truncate(UNIVERSE_SIZE);

        Self {
            universe: PortAddress::new(universe),
            sequence,
            physical: 0,
            data,
        }
    }

    pub(crate) fn from_parts(
        universe: PortAddress,
        sequence: u8,
        physical: u8,
        data: Bytes,
    ) -> Self {
        Self {
            universe,
            sequence,
            physical,
            data,
        }
    }

    /// Set the physical input port byte
    #[must_use]
    pub fn with_physical(mut self, physical: u8) -> Self {
        self.physical = physical;
        self
    }

    /// Universe as a flat 15-bit number
    #[must_use]
    pub const fn universe(&self) -> u16 {
        self.universe.as_u16()
    }

    /// Universe as Net / Sub-Net / Universe
    #[must_use]
    pub const fn port_address(&self) -> PortAddress {
        self.universe
    }

    /// Sequence number (0 disables sequencing)
    #[must_use]
    pub const fn sequence(&self) -> u8 {
        self.sequence
    }

    /// Physical input port of the sender. Informational only.
    #[must_use]
    pub const fn physical(&self) -> u8 {
        self.physical
    }

    /// Channel values
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of channels carried
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the frame carries no channels
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Encode to an ArtDmx datagram
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        super::encode(self)
    }

    /// Decode from an ArtDmx datagram
    pub fn decode(bytes: impl Into<Bytes>) -> Result<Self, super::DecodeError> {
        super::decode(bytes.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_creation() {
        let frame = ArtDmx::new(3, 7, vec![1u8, 2, 3]);
        assert_eq!(frame.universe(), 3);
        assert_eq!(frame.sequence(), 7);
        assert_eq!(frame.physical(), 0);
        assert_eq!(frame.data(), &[1, 2, 3]);
        assert_eq!(frame.len(), 3);
    }

    #[test]
    fn test_oversized_data_truncated() {
        let frame = ArtDmx::new(0, 0, vec![9u8; 600]);
        assert_eq!(frame.len(), UNIVERSE_SIZE);
    }

    #[test]
    fn test_port_address() {
        let frame = ArtDmx::new(PortAddress::from_parts(0, 1, 2).as_u16(), 0, vec![0u8; 2]);
        assert_eq!(frame.universe(), 0x12);
        assert_eq!(frame.port_address().sub_net(), 1);
    }
}
