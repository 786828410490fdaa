//! Art-Net input - receive DMX512 over UDP and read channel values from anywhere
//!
//! A background thread listens for ArtDmx packets, keeps the latest 512
//! channel values of every universe it hears, and serves them through
//! non-blocking lookups that are safe to call from per-frame callbacks.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use artnet_in::{Receiver, ReceiverConfig};
//!
//! let mut receiver = Receiver::new();
//! receiver.start(ReceiverConfig::default().with_active_universe(1))?;
//!
//! let query = receiver.query();
//! let dimmer = query.dmx(0); // 0..=255
//! let level = query.dmxf(1); // 0.0..=1.0
//!
//! receiver.stop();
//! # Ok::<(), artnet_in::Error>(())
//! ```
//!
//! # Features
//!
//! - **Tolerant decoding** - foreign, truncated and malformed packets are
//!   counted and dropped without interrupting reception
//! - **Partial universes** - short frames update only the channels they carry
//! - **Consistent snapshots** - readers copy whole universes under a short lock
//! - **Bounded shutdown** - `stop` returns within one poll interval
//!
//! Transmitting Art-Net, RDM and node discovery are out of scope.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

mod error;
pub mod protocol;
mod query;
pub mod receiver;
pub mod store;

pub use error::{Error, Result};
pub use protocol::{ARTNET_PORT, ArtDmx, DecodeError, PortAddress, UNIVERSE_SIZE};
pub use query::DmxQuery;
pub use receiver::{Receiver, ReceiverConfig, ReceiverState, ReceiverStatus, StatsSnapshot};
pub use store::{ChannelStore, SequencePolicy, UniverseState, UpdateOutcome};
