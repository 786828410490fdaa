//! Art-Net decode errors

use thiserror::Error;

/// Reasons a datagram is rejected by the decoder.
///
/// None of these are fatal to reception: the receiver counts and discards the
/// datagram and keeps listening.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Packet does not start with the `Art-Net\0` ID
    #[error("invalid header: not an Art-Net packet")]
    InvalidHeader,

    /// Valid Art-Net packet carrying something other than DMX data
    #[error("unsupported opcode: {opcode:#06x}")]
    UnsupportedOpcode {
        /// Opcode found in the packet
        opcode: u16,
    },

    /// Protocol revision older than the supported minimum
    #[error("unsupported protocol version: {version} (min {min})", min = super::MIN_PROTOCOL_VERSION)]
    UnsupportedVersion {
        /// Version found in the packet
        version: u16,
    },

    /// Packet ends before the declared data does
    #[error("truncated packet: need {needed} bytes, got {got}")]
    TruncatedPacket {
        /// Bytes required
        needed: usize,
        /// Bytes available
        got: usize,
    },

    /// Declared data length outside 1..=512
    #[error("invalid data length: {length} (expected 1..=512)")]
    InvalidLength {
        /// Declared length
        length: u16,
    },
}

/// Field-less discriminant of [`DecodeError`], used for per-kind counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeErrorKind {
    /// See [`DecodeError::InvalidHeader`]
    InvalidHeader,
    /// See [`DecodeError::UnsupportedOpcode`]
    UnsupportedOpcode,
    /// See [`DecodeError::UnsupportedVersion`]
    UnsupportedVersion,
    /// See [`DecodeError::TruncatedPacket`]
    TruncatedPacket,
    /// See [`DecodeError::InvalidLength`]
    InvalidLength,
}

impl DecodeError {
    /// Discriminant of this error
    #[must_use]
    pub const fn kind(&self) -> DecodeErrorKind {
        match self {
            Self::InvalidHeader => DecodeErrorKind::InvalidHeader,
            Self::UnsupportedOpcode { .. } => DecodeErrorKind::UnsupportedOpcode,
            Self::UnsupportedVersion { .. } => DecodeErrorKind::UnsupportedVersion,
            Self::TruncatedPacket { .. } => DecodeErrorKind::TruncatedPacket,
            Self::InvalidLength { .. } => DecodeErrorKind::InvalidLength,
        }
    }
}
