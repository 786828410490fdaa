//! Art-Net wire format
//!
//! This module provides the packet header, opcodes, and the ArtDmx codec.

mod address;
mod codec;
mod error;
mod frame;
mod header;
mod opcode;

pub use address::PortAddress;
pub use codec::{decode, encode};
pub use error::{DecodeError, DecodeErrorKind};
pub use frame::ArtDmx;
pub use header::PacketHeader;
pub use opcode::{OpCode, opcode_name};

/// Art-Net packet ID: "Art-Net" followed by a NUL terminator
pub const ARTNET_ID: [u8; 8] = *b"Art-Net\0";

/// Default Art-Net UDP port
pub const ARTNET_PORT: u16 = 6454;

/// Lowest protocol revision accepted by the decoder
pub const MIN_PROTOCOL_VERSION: u16 = 14;

/// Protocol revision written by [`encode`]
pub const PROTOCOL_VERSION: u16 = 14;

/// Number of channels in a DMX512 universe
pub const UNIVERSE_SIZE: usize = 512;

/// Size of the common header (ID + opcode + version)
pub const HEADER_SIZE: usize = 12;

/// Size of the ArtDmx header, up to the first data byte
pub const DMX_HEADER_SIZE: usize = 18;

/// Largest well-formed ArtDmx datagram
pub const MAX_DMX_PACKET_SIZE: usize = DMX_HEADER_SIZE + UNIVERSE_SIZE;
