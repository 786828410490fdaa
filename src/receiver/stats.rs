use std::sync::atomic::{AtomicU64, Ordering};

use crate::protocol::DecodeErrorKind;
use crate::store::UpdateOutcome;

/// Receive counters for one receiver.
///
/// Written only by the receive thread, read from anywhere.
#[derive(Debug, Default)]
pub(crate) struct ReceiverStats {
    datagrams: AtomicU64,
    frames_applied: AtomicU64,
    out_of_order: AtomicU64,
    out_of_order_dropped: AtomicU64,
    filtered: AtomicU64,
    decode_errors: DecodeErrorCounters,
}

#[derive(Debug, Default)]
struct DecodeErrorCounters {
    invalid_header: AtomicU64,
    unsupported_opcode: AtomicU64,
    unsupported_version: AtomicU64,
    truncated_packet: AtomicU64,
    invalid_length: AtomicU64,
}

impl DecodeErrorCounters {
    fn increment(&self, kind: DecodeErrorKind) {
        use DecodeErrorKind::*;

        match kind {
            InvalidHeader => self.invalid_header.fetch_add(1, Ordering::Relaxed),
            UnsupportedOpcode => self.unsupported_opcode.fetch_add(1, Ordering::Relaxed),
            UnsupportedVersion => self.unsupported_version.fetch_add(1, Ordering::Relaxed),
            TruncatedPacket => self.truncated_packet.fetch_add(1, Ordering::Relaxed),
            InvalidLength => self.invalid_length.fetch_add(1, Ordering::Relaxed),
        };
    }
}

impl ReceiverStats {
    #[inline]
    pub(crate) fn record_datagram(&self) {
        self.datagrams.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_decode_error(&self, kind: DecodeErrorKind) {
        self.decode_errors.increment(kind);
    }

    #[inline]
    pub(crate) fn record_filtered(&self) {
        self.filtered.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_update(&self, outcome: UpdateOutcome) {
        match outcome {
            UpdateOutcome::Applied => {
                self.frames_applied.fetch_add(1, Ordering::Relaxed);
            }
            UpdateOutcome::AppliedOutOfOrder => {
                self.frames_applied.fetch_add(1, Ordering::Relaxed);
                self.out_of_order.fetch_add(1, Ordering::Relaxed);
            }
            UpdateOutcome::DroppedOutOfOrder => {
                self.out_of_order.fetch_add(1, Ordering::Relaxed);
                self.out_of_order_dropped.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub(crate) fn snapshot(&self) -> StatsSnapshot {
        let errors = &self.decode_errors;
        StatsSnapshot {
            datagrams: self.datagrams.load(Ordering::Relaxed),
            frames_applied: self.frames_applied.load(Ordering::Relaxed),
            out_of_order: self.out_of_order.load(Ordering::Relaxed),
            out_of_order_dropped: self.out_of_order_dropped.load(Ordering::Relaxed),
            filtered: self.filtered.load(Ordering::Relaxed),
            invalid_header: errors.invalid_header.load(Ordering::Relaxed),
            unsupported_opcode: errors.unsupported_opcode.load(Ordering::Relaxed),
            unsupported_version: errors.unsupported_version.load(Ordering::Relaxed),
            truncated_packet: errors.truncated_packet.load(Ordering::Relaxed),
            invalid_length: errors.invalid_length.load(Ordering::Relaxed),
        }
    }
}

/// Lightweight snapshot of receive counters.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsSnapshot {
    /// Datagrams read from the socket
    pub datagrams: u64,
    /// ArtDmx frames written to the store
    pub frames_applied: u64,
    /// Frames older than the last one for their universe
    pub out_of_order: u64,
    /// Out-of-order frames discarded by policy
    pub out_of_order_dropped: u64,
    /// Frames for universes outside the configured filter
    pub filtered: u64,
    /// Datagrams without the Art-Net ID
    pub invalid_header: u64,
    /// Art-Net packets other than ArtDmx
    pub unsupported_opcode: u64,
    /// ArtDmx packets below the minimum protocol version
    pub unsupported_version: u64,
    /// Packets shorter than their declared length
    pub truncated_packet: u64,
    /// Packets declaring 0 or more than 512 channels
    pub invalid_length: u64,
}

impl StatsSnapshot {
    /// Total number of datagrams rejected by the decoder
    #[must_use]
    pub const fn decode_errors(&self) -> u64 {
        self.invalid_header
            + self.unsupported_opcode
            + self.unsupported_version
            + self.truncated_packet
            + self.invalid_length
    }
}
