//! Per-universe channel state

use std::time::{Duration, Instant};

use crate::protocol::{ArtDmx, UNIVERSE_SIZE};

/// Point-in-time copy of one universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniverseState {
    channels: [u8; UNIVERSE_SIZE],
    last_updated: Instant,
    last_sequence: u8,
    last_length: usize,
    frames: u64,
}

impl UniverseState {
    pub(crate) fn new(now: Instant) -> Self {
        Self {
            channels: [0u8; UNIVERSE_SIZE],
            last_updated: now,
            last_sequence: 0,
            last_length: 0,
            frames: 0,
        }
    }

    /// Overwrite the leading channels with the frame data.
    ///
    /// Channels past the frame length keep their previous values.
    pub(crate) fn apply(&mut self, frame: &ArtDmx, now: Instant) {
        let data = frame.data();
        self.channels[..data.len()].copy_from_slice(data);
        self.last_updated = now;
        self.last_sequence = frame.sequence();
        self.last_length = data.len();
        self.frames += 1;
    }

    /// Whether `sequence` is strictly older than the last accepted one.
    ///
    /// Uses signed 8-bit wraparound distance; 0 on either side disables the
    /// check.
    #[must_use]
    pub fn is_out_of_order(&self, sequence: u8) -> bool {
        if sequence == 0 || self.last_sequence == 0 {
            return false;
        }
        (sequence.wrapping_sub(self.last_sequence) as i8) < 0
    }

    /// All 512 channel values
    #[must_use]
    pub const fn channels(&self) -> &[u8; UNIVERSE_SIZE] {
        &self.channels
    }

    /// Value of one channel, `None` if the index is out of range
    #[must_use]
    pub fn channel(&self, channel: usize) -> Option<u8> {
        self.channels.get(channel).copied()
    }

    /// When the last frame was applied
    #[must_use]
    pub const fn last_updated(&self) -> Instant {
        self.last_updated
    }

    /// Time since the last frame was applied
    #[must_use]
    pub fn age(&self) -> Duration {
        self.last_updated.elapsed()
    }

    /// Sequence number of the last applied frame
    #[must_use]
    pub const fn last_sequence(&self) -> u8 {
        self.last_sequence
    }

    /// Channel count of the last applied frame
    #[must_use]
    pub const fn last_length(&self) -> usize {
        self.last_length
    }

    /// Number of frames applied so far
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_sequence(sequence: u8) -> UniverseState {
        let mut state = UniverseState::new(Instant::now());
        state.apply(&ArtDmx::new(0, sequence, vec![1u8]), Instant::now());
        state
    }

    #[test]
    fn test_sequence_ordering() {
        let state = state_with_sequence(10);
        assert!(state.is_out_of_order(9));
        assert!(state.is_out_of_order(10u8.wrapping_sub(127)));
        assert!(!state.is_out_of_order(10));
        assert!(!state.is_out_of_order(11));
    }

    #[test]
    fn test_sequence_wraparound() {
        let state = state_with_sequence(255);
        // 1 follows 255 once 0 is skipped
        assert!(!state.is_out_of_order(1));
        assert!(state.is_out_of_order(250));

        let state = state_with_sequence(3);
        assert!(state.is_out_of_order(250));
    }

    #[test]
    fn test_zero_disables_sequencing() {
        let state = state_with_sequence(0);
        assert!(!state.is_out_of_order(1));
        assert!(!state.is_out_of_order(200));

        let state = state_with_sequence(100);
        assert!(!state.is_out_of_order(0));
    }

    #[test]
    fn test_apply_tracks_metadata() {
        let start = Instant::now();
        let mut state = UniverseState::new(start);
        state.apply(&ArtDmx::new(0, 4, vec![9u8; 24]), start);

        assert_eq!(state.frames(), 1);
        assert_eq!(state.last_length(), 24);
        assert_eq!(state.last_sequence(), 4);
        assert_eq!(state.channel(23), Some(9));
        assert_eq!(state.channel(24), Some(0));
        assert_eq!(state.channel(512), None);
    }
}
