//! ArtDmx codec (encode/decode)
//!
//! Decoding is zero-copy: the channel data of the returned frame is a slice of
//! the input buffer.

use bytes::Bytes;

use super::{
    ArtDmx, DMX_HEADER_SIZE, DecodeError, HEADER_SIZE, MIN_PROTOCOL_VERSION, OpCode,
    PROTOCOL_VERSION, PacketHeader, PortAddress, UNIVERSE_SIZE,
};

/// Encode an ArtDmx frame to bytes
///
/// # Format
///
/// ```text
/// [HEADER (12)] [Sequence] [Physical] [SubUni] [Net] [Length (BE, 2)] [DATA (1-512)]
/// ```
///
/// Used for loopback tests and tooling; the crate itself never transmits.
#[must_use]
pub fn encode(frame: &ArtDmx) -> Vec<u8> {
    let data = frame.data();
    let mut bytes = Vec::with_capacity(DMX_HEADER_SIZE + data.len());

    bytes.extend_from_slice(&PacketHeader::new(OpCode::Dmx, PROTOCOL_VERSION).to_bytes());
    bytes.push(frame.sequence());
    bytes.push(frame.physical());
    bytes.extend_from_slice(&frame.port_address().to_wire());
    // data is capped at 512 by construction
    bytes.extend_from_slice(&(data.len() as u16).to_be_bytes());
    bytes.extend_from_slice(data);

    bytes
}

/// Decode an ArtDmx frame from a datagram
///
/// # Errors
///
/// Returns an error if:
/// - The `Art-Net\0` ID is missing
/// - The opcode is anything but `OpDmx`
/// - The protocol version is below 14
/// - The declared data length is 0 or above 512
/// - The buffer ends before the declared data does
///
/// Bytes after the declared data are ignored.
pub fn decode(bytes: Bytes) -> Result<ArtDmx, DecodeError> {
    let header = PacketHeader::from_bytes(&bytes)?;

    if header.opcode() != Some(OpCode::Dmx) {
        return Err(DecodeError::UnsupportedOpcode {
            opcode: header.opcode_raw(),
        });
    }

    let total_available = bytes.len();
    if total_available < HEADER_SIZE {
        return Err(DecodeError::TruncatedPacket {
            needed: DMX_HEADER_SIZE,
            got: total_available,
        });
    }

    if header.version() < MIN_PROTOCOL_VERSION {
        return Err(DecodeError::UnsupportedVersion {
            version: header.version(),
        });
    }

    if total_available < DMX_HEADER_SIZE {
        return Err(DecodeError::TruncatedPacket {
            needed: DMX_HEADER_SIZE,
            got: total_available,
        });
    }

    let sequence = bytes[HEADER_SIZE];
    let physical = bytes[HEADER_SIZE + 1];
    let universe = PortAddress::from_wire(bytes[14], bytes[15]);
    let length = u16::from_be_bytes([bytes[16], bytes[17]]);

    if length == 0 || usize::from(length) > UNIVERSE_SIZE {
        return Err(DecodeError::InvalidLength { length });
    }

    let total_size = DMX_HEADER_SIZE + usize::from(length);
    if total_available < total_size {
        return Err(DecodeError::TruncatedPacket {
            needed: total_size,
            got: total_available,
        });
    }

    let data = bytes.slice(DMX_HEADER_SIZE..total_size);

    Ok(ArtDmx::from_parts(universe, sequence, physical, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dmx_packet(universe: u16, sequence: u8, data: &[u8]) -> Vec<u8> {
        encode(&ArtDmx::new(universe, sequence, data.to_vec()))
    }

    #[test]
    fn test_encode_layout() {
        let bytes = dmx_packet(0x0123, 9, &[10, 20, 30]);

        assert_eq!(&bytes[0..8], b"Art-Net\0");
        assert_eq!(&bytes[8..10], &[0x00, 0x50]);
        assert_eq!(&bytes[10..12], &[0x00, 14]);
        assert_eq!(bytes[12], 9);
        assert_eq!(bytes[13], 0);
        assert_eq!(&bytes[14..16], &[0x23, 0x01]);
        assert_eq!(&bytes[16..18], &[0x00, 0x03]);
        assert_eq!(&bytes[18..], &[10, 20, 30]);
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let original = ArtDmx::new(42, 200, vec![1u8, 2, 3, 4]).with_physical(3);
        let decoded = decode(Bytes::from(encode(&original))).unwrap();

        assert_eq!(decoded, original);
    }

    #[test]
    fn test_full_universe() {
        let data: Vec<u8> = (0..512).map(|i| (i % 256) as u8).collect();
        let bytes = dmx_packet(1, 1, &data);
        assert_eq!(bytes.len(), crate::protocol::MAX_DMX_PACKET_SIZE);

        let frame = decode(Bytes::from(bytes)).unwrap();
        assert_eq!(frame.data(), data.as_slice());
    }

    #[test]
    fn test_decode_invalid_header() {
        let mut bytes = dmx_packet(0, 0, &[1]);
        bytes[0] = b'X';

        assert_eq!(decode(Bytes::from(bytes)), Err(DecodeError::InvalidHeader));
    }

    #[test]
    fn test_decode_unsupported_opcode() {
        // ArtPoll: header plus TalkToMe and Priority
        let mut bytes = PacketHeader::new(OpCode::Poll, 14).to_bytes().to_vec();
        bytes.extend_from_slice(&[0x00, 0x00]);

        assert_eq!(
            decode(Bytes::from(bytes)),
            Err(DecodeError::UnsupportedOpcode { opcode: 0x2000 })
        );
    }

    #[test]
    fn test_decode_unknown_opcode() {
        let mut bytes = dmx_packet(0, 0, &[1]);
        bytes[8..10].copy_from_slice(&0xBEEF_u16.to_le_bytes());

        assert_eq!(
            decode(Bytes::from(bytes)),
            Err(DecodeError::UnsupportedOpcode { opcode: 0xBEEF })
        );
    }

    #[test]
    fn test_decode_unsupported_version() {
        let mut bytes = dmx_packet(0, 0, &[1]);
        bytes[10..12].copy_from_slice(&13u16.to_be_bytes());

        assert_eq!(
            decode(Bytes::from(bytes)),
            Err(DecodeError::UnsupportedVersion { version: 13 })
        );
    }

    #[test]
    fn test_decode_old_version_reported_before_short_header() {
        let mut bytes = dmx_packet(0, 0, &[1]);
        bytes[10..12].copy_from_slice(&13u16.to_be_bytes());
        bytes.truncate(14);

        assert_eq!(
            decode(Bytes::from(bytes)),
            Err(DecodeError::UnsupportedVersion { version: 13 })
        );
    }

    #[test]
    fn test_decode_missing_version_is_truncated() {
        let bytes = dmx_packet(0, 0, &[1]);

        assert_eq!(
            decode(Bytes::copy_from_slice(&bytes[..11])),
            Err(DecodeError::TruncatedPacket { needed: 18, got: 11 })
        );
    }

    #[test]
    fn test_decode_newer_version_accepted() {
        let mut bytes = dmx_packet(0, 0, &[1]);
        bytes[10..12].copy_from_slice(&15u16.to_be_bytes());

        assert!(decode(Bytes::from(bytes)).is_ok());
    }

    #[test]
    fn test_decode_truncated_data() {
        let mut bytes = dmx_packet(0, 0, &[1, 2, 3, 4]);
        bytes.truncate(20);

        assert_eq!(
            decode(Bytes::from(bytes)),
            Err(DecodeError::TruncatedPacket { needed: 22, got: 20 })
        );
    }

    #[test]
    fn test_decode_truncated_dmx_header() {
        let bytes = dmx_packet(0, 0, &[1]);

        let result = decode(Bytes::copy_from_slice(&bytes[..15]));
        assert!(matches!(result, Err(DecodeError::TruncatedPacket { .. })));
    }

    #[test]
    fn test_decode_invalid_length() {
        let mut bytes = dmx_packet(0, 0, &[1]);
        bytes[16..18].copy_from_slice(&0u16.to_be_bytes());
        assert_eq!(
            decode(Bytes::from(bytes)),
            Err(DecodeError::InvalidLength { length: 0 })
        );

        let mut bytes = dmx_packet(0, 0, &[0; 512]);
        bytes[16..18].copy_from_slice(&513u16.to_be_bytes());
        bytes.push(0);
        assert_eq!(
            decode(Bytes::from(bytes)),
            Err(DecodeError::InvalidLength { length: 513 })
        );
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let mut bytes = dmx_packet(5, 1, &[7, 8]);
        bytes.extend_from_slice(&[0xAA; 4]);

        let frame = decode(Bytes::from(bytes)).unwrap();
        assert_eq!(frame.data(), &[7, 8]);
    }

    #[test]
    fn test_decode_performance() {
        use std::time::Instant;

        let encoded = Bytes::from(dmx_packet(0, 1, &[0u8; 512]));

        let start = Instant::now();
        for _ in 0..1000 {
            let _ = decode(encoded.clone()).unwrap();
        }
        let elapsed = start.elapsed();

        let avg_micros = elapsed.as_micros() / 1000;
        println!("Average decode time: {avg_micros}μs");

        // Should be reasonably fast (< 100μs on CI)
        assert!(avg_micros < 100, "Decode too slow: {avg_micros}μs");
    }

    // Property-based tests
    mod proptests {
        use super::*;
        use crate::protocol::ARTNET_ID;
        use proptest::prelude::*;

        fn data_strategy() -> impl Strategy<Value = Vec<u8>> {
            prop::collection::vec(any::<u8>(), 1..=UNIVERSE_SIZE)
        }

        proptest! {
            /// Property: arbitrary input never panics the decoder
            #[test]
            fn prop_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..600)) {
                let _ = decode(Bytes::from(bytes));
            }

            /// Property: anything shorter than the DMX header is an error
            #[test]
            fn prop_short_input_rejected(bytes in prop::collection::vec(any::<u8>(), 0..DMX_HEADER_SIZE)) {
                prop_assert!(decode(Bytes::from(bytes)).is_err());
            }

            /// Property: a valid ID followed by garbage is still handled
            #[test]
            fn prop_artnet_prefix_with_garbage(tail in prop::collection::vec(any::<u8>(), 0..600)) {
                let mut bytes = ARTNET_ID.to_vec();
                bytes.extend_from_slice(&tail);
                let _ = decode(Bytes::from(bytes));
            }

            /// Property: encode then decode preserves universe, sequence and data
            #[test]
            fn prop_roundtrip_preserves_fields(
                universe in 0u16..=0x7FFF,
                sequence in any::<u8>(),
                data in data_strategy(),
            ) {
                let original = ArtDmx::new(universe, sequence, data.clone());
                let decoded = decode(Bytes::from(encode(&original))).unwrap();

                prop_assert_eq!(decoded.universe(), universe);
                prop_assert_eq!(decoded.sequence(), sequence);
                prop_assert_eq!(decoded.data(), data.as_slice());
            }

            /// Property: cutting a valid packet short is reported as truncation
            #[test]
            fn prop_truncation_detected(data in data_strategy(), cut in 1usize..=UNIVERSE_SIZE) {
                let bytes = encode(&ArtDmx::new(0, 0, data.clone()));
                let cut = cut.min(data.len());
                let short = Bytes::copy_from_slice(&bytes[..bytes.len() - cut]);

                let result = decode(short);
                prop_assert!(
                    matches!(result, Err(DecodeError::TruncatedPacket { .. })),
                    "expected truncation, got {:?}",
                    result
                );
            }
        }
    }
}
