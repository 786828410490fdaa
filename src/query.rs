//! `dmx` / `dmxf` lookups for expression and per-frame callers.
//!
//! These never fail and never wait on the network: a missing universe, an
//! out-of-range channel, or a stopped receiver all read as 0.

use std::sync::Arc;
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::Duration;

use crate::protocol::UNIVERSE_SIZE;
use crate::store::ChannelStore;

/// Cloneable read handle on a receiver's channel store.
#[derive(Debug, Clone)]
pub struct DmxQuery {
    store: Arc<ChannelStore>,
    active_universe: Arc<AtomicU16>,
}

impl DmxQuery {
    /// Query a store directly, starting at `universe`.
    #[must_use]
    pub fn new(store: Arc<ChannelStore>, universe: u16) -> Self {
        Self::from_parts(store, Arc::new(AtomicU16::new(universe)))
    }

    pub(crate) fn from_parts(store: Arc<ChannelStore>, active_universe: Arc<AtomicU16>) -> Self {
        Self {
            store,
            active_universe,
        }
    }

    /// Raw value (0-255) of `channel` in the active universe.
    ///
    /// Channels are 0-based. Anything outside 0..512 reads as 0.
    #[must_use]
    pub fn dmx(&self, channel: i32) -> u8 {
        let Ok(channel) = usize::try_from(channel) else {
            return 0;
        };
        // out-of-range channels come back as InvalidChannel
        self.store
            .channel(self.active_universe(), channel)
            .unwrap_or(0)
    }

    /// `dmx(channel) / 255.0`
    #[must_use]
    pub fn dmxf(&self, channel: i32) -> f32 {
        f32::from(self.dmx(channel)) / 255.0
    }

    /// All 512 values of the active universe
    #[must_use]
    pub fn channels(&self) -> [u8; UNIVERSE_SIZE] {
        self.store.channels(self.active_universe())
    }

    /// Universe read by `dmx`/`dmxf`
    #[must_use]
    pub fn active_universe(&self) -> u16 {
        self.active_universe.load(Ordering::Relaxed)
    }

    /// Switch the universe read by `dmx`/`dmxf`.
    ///
    /// Shared with the receiver and every clone of this handle.
    pub fn set_active_universe(&self, universe: u16) {
        self.active_universe.store(universe, Ordering::Relaxed);
    }

    /// Whether any frame has arrived for the active universe
    #[must_use]
    pub fn has_signal(&self) -> bool {
        self.store.snapshot(self.active_universe()).is_some()
    }

    /// Time since the last frame on the active universe
    #[must_use]
    pub fn signal_age(&self) -> Option<Duration> {
        self.store
            .snapshot(self.active_universe())
            .map(|state| state.age())
    }
}
