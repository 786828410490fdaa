//! Latest channel values per universe
//!
//! The receiver thread is the only writer. Readers always get copies, so a
//! snapshot can never observe a half-written frame.

mod universe;

use std::collections::HashMap;
use std::time::Instant;

use parking_lot::RwLock;
use tracing::debug;

use crate::protocol::{ArtDmx, UNIVERSE_SIZE};
use crate::{Error, Result};

pub use universe::UniverseState;

/// What to do with a frame whose sequence number is older than the last one
/// applied to its universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SequencePolicy {
    /// Apply it anyway (last writer wins) and log it
    #[default]
    Accept,
    /// Discard it
    DropOutOfOrder,
}

/// Result of [`ChannelStore::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Frame applied in order
    Applied,
    /// Frame was out of order but applied
    AppliedOutOfOrder,
    /// Frame was out of order and discarded
    DroppedOutOfOrder,
}

impl UpdateOutcome {
    /// Whether the frame reached the channel array
    #[must_use]
    pub const fn is_applied(self) -> bool {
        !matches!(self, Self::DroppedOutOfOrder)
    }
}

/// Thread-safe universe → channel table.
#[derive(Debug, Default)]
pub struct ChannelStore {
    universes: RwLock<HashMap<u16, UniverseState>>,
}

impl ChannelStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a frame, accepting out-of-order sequence numbers.
    pub fn update(&self, frame: &ArtDmx) -> UpdateOutcome {
        self.update_with_policy(frame, SequencePolicy::Accept)
    }

    /// Apply a frame to its universe.
    ///
    /// Only the first `frame.len()` channels are written; the rest keep the
    /// values from earlier frames.
    pub fn update_with_policy(&self, frame: &ArtDmx, policy: SequencePolicy) -> UpdateOutcome {
        let now = Instant::now();
        let universe = frame.universe();
        let mut guard = self.universes.write();
        let state = guard
            .entry(universe)
            .or_insert_with(|| UniverseState::new(now));

        let out_of_order = state.is_out_of_order(frame.sequence());
        if out_of_order {
            debug!(
                universe,
                sequence = frame.sequence(),
                last_sequence = state.last_sequence(),
                ?policy,
                "out-of-order frame"
            );
            if policy == SequencePolicy::DropOutOfOrder {
                return UpdateOutcome::DroppedOutOfOrder;
            }
        }

        state.apply(frame, now);

        if out_of_order {
            UpdateOutcome::AppliedOutOfOrder
        } else {
            UpdateOutcome::Applied
        }
    }

    /// Copy of a universe's state, `None` if nothing was received for it
    #[must_use]
    pub fn snapshot(&self, universe: u16) -> Option<UniverseState> {
        self.universes.read().get(&universe).copied()
    }

    /// Copy of a universe's channels; all zero if nothing was received
    #[must_use]
    pub fn channels(&self, universe: u16) -> [u8; UNIVERSE_SIZE] {
        self.universes
            .read()
            .get(&universe)
            .map_or([0u8; UNIVERSE_SIZE], |state| *state.channels())
    }

    /// Value of a single channel.
    ///
    /// Unseen universes read as 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChannel`] if `channel` is not in 0..512.
    pub fn channel(&self, universe: u16, channel: usize) -> Result<u8> {
        if channel >= UNIVERSE_SIZE {
            return Err(Error::InvalidChannel { channel });
        }
        Ok(self
            .universes
            .read()
            .get(&universe)
            .map_or(0, |state| state.channels()[channel]))
    }

    /// Universes that have received at least one frame, ascending
    #[must_use]
    pub fn universes(&self) -> Vec<u16> {
        let mut universes: Vec<u16> = self.universes.read().keys().copied().collect();
        universes.sort_unstable();
        universes
    }

    /// Number of universes seen
    #[must_use]
    pub fn len(&self) -> usize {
        self.universes.read().len()
    }

    /// Whether no universe has been seen
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.universes.read().is_empty()
    }

    /// Forget every universe
    pub fn clear(&self) {
        self.universes.write().clear();
    }
}
