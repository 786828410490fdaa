//! Common Art-Net packet header
//!
//! Every Art-Net packet starts with the same 12 bytes.

use super::{ARTNET_ID, DecodeError, HEADER_SIZE, OpCode};

/// Art-Net common header
///
/// # Wire Format
///
/// ```text
/// 0       1       2       3       4       5       6       7
/// +-------+-------+-------+-------+-------+-------+-------+-------+
/// |  'A'  |  'r'  |  't'  |  '-'  |  'N'  |  'e'  |  't'  |  0x00 |
/// +-------+-------+-------+-------+-------+-------+-------+-------+
/// | OpCode (LE)   | ProtVer (BE)  |
/// +-------+-------+-------+-------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    opcode: u16,
    version: u16,
}

impl PacketHeader {
    /// Create a header for the given opcode and protocol version
    #[must_use]
    pub const fn new(opcode: OpCode, version: u16) -> Self {
        Self {
            opcode: opcode.as_u16(),
            version,
        }
    }

    /// Raw opcode
    #[must_use]
    pub const fn opcode_raw(&self) -> u16 {
        self.opcode
    }

    /// Opcode, if it is a known one
    #[must_use]
    pub fn opcode(&self) -> Option<OpCode> {
        OpCode::from_u16(self.opcode)
    }

    /// Protocol version
    #[must_use]
    pub const fn version(&self) -> u16 {
        self.version
    }

    /// Convert to bytes
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];

        bytes[0..8].copy_from_slice(&ARTNET_ID);
        bytes[8..10].copy_from_slice(&self.opcode.to_le_bytes());
        bytes[10..12].copy_from_slice(&self.version.to_be_bytes());

        bytes
    }

    /// Parse the ID and opcode, and the version if the buffer holds it.
    ///
    /// The version is only required for opcodes that carry it; a 10-byte
    /// buffer with a valid ID still yields a header so that the caller can
    /// report the opcode it did not want.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() < ARTNET_ID.len() || bytes[..ARTNET_ID.len()] != ARTNET_ID {
            return Err(DecodeError::InvalidHeader);
        }

        if bytes.len() < 10 {
            return Err(DecodeError::TruncatedPacket {
                needed: 10,
                got: bytes.len(),
            });
        }

        let opcode = u16::from_le_bytes([bytes[8], bytes[9]]);
        let version = bytes
            .get(10..12)
            .map_or(0, |v| u16::from_be_bytes([v[0], v[1]]));

        Ok(Self { opcode, version })
    }
}
