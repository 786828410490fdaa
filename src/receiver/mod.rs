//! Art-Net receive loop
//!
//! A [`Receiver`] owns one UDP socket and one background thread. The thread
//! decodes every datagram and writes ArtDmx frames into the shared
//! [`ChannelStore`]; bad packets are counted and dropped. Reads go through
//! [`DmxQuery`](crate::DmxQuery) handles and never touch the socket.

mod config;
mod socket;
mod state;
mod stats;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};
use std::thread::{self, JoinHandle};

use bytes::Bytes;
use parking_lot::Mutex;
use tracing::{debug, info, instrument, trace, warn};

use crate::protocol::{DecodeError, decode, opcode_name};
use crate::query::DmxQuery;
use crate::store::ChannelStore;
use crate::{Error, Result};

pub use config::ReceiverConfig;
pub use state::{ReceiverState, ReceiverStatus};
pub use stats::StatsSnapshot;

use socket::{DatagramSource, Recv, SocketBinding};
use stats::ReceiverStats;

/// State shared between the owner and the receive thread.
#[derive(Debug, Default)]
struct Shared {
    status: Mutex<StatusInner>,
    stats: ReceiverStats,
}

#[derive(Debug, Default)]
struct StatusInner {
    state: ReceiverState,
    failure: Option<Failure>,
}

/// Where a recorded failure happened.
#[derive(Debug, Clone, Copy)]
enum FailureSite {
    Bind(SocketAddr),
    Spawn,
    Socket,
}

/// Last bind, spawn or socket error, kept so `health` can rebuild it.
#[derive(Debug, Clone)]
struct Failure {
    site: FailureSite,
    kind: io::ErrorKind,
    message: String,
}

impl Failure {
    fn new(site: FailureSite, err: &io::Error) -> Self {
        Self {
            site,
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    fn to_error(&self) -> Error {
        let source = io::Error::new(self.kind, self.message.clone());
        match self.site {
            FailureSite::Bind(addr) => Error::Bind { addr, source },
            FailureSite::Spawn => Error::Spawn(source),
            FailureSite::Socket => Error::Socket(source),
        }
    }
}

impl Shared {
    fn state(&self) -> ReceiverState {
        self.status.lock().state
    }

    fn set_state(&self, state: ReceiverState) {
        self.status.lock().state = state;
    }

    fn fail(&self, site: FailureSite, err: &io::Error) {
        let mut status = self.status.lock();
        status.state = ReceiverState::Failed;
        status.failure = Some(Failure::new(site, err));
    }
}

#[derive(Debug)]
struct Worker {
    shutdown: Arc<AtomicBool>,
    handle: JoinHandle<()>,
    local_addr: SocketAddr,
}

/// Art-Net input receiver.
///
/// The host owns one instance; every [`DmxQuery`] obtained from it reads the
/// same channel store. Dropping the receiver stops it.
#[derive(Debug)]
pub struct Receiver {
    store: Arc<ChannelStore>,
    active_universe: Arc<AtomicU16>,
    shared: Arc<Shared>,
    worker: Option<Worker>,
}

impl Receiver {
    /// Create a stopped receiver with an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Arc::new(ChannelStore::new()),
            active_universe: Arc::new(AtomicU16::new(0)),
            shared: Arc::new(Shared::default()),
            worker: None,
        }
    }

    /// Bind the socket and start the receive thread.
    ///
    /// A running receiver is stopped first, so this also serves as restart.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bind`] if the socket cannot be bound (port in use,
    /// missing privilege) and [`Error::Spawn`] if the thread cannot be
    /// created. The receiver is left in [`ReceiverState::Failed`].
    #[instrument(level = "info", skip(self, config), fields(addr = %config.socket_addr()))]
    pub fn start(&mut self, config: ReceiverConfig) -> Result<()> {
        if self.shared.state().is_active() {
            debug!("restarting running receiver");
        }
        self.stop();

        {
            let mut status = self.shared.status.lock();
            status.state = ReceiverState::Starting;
            status.failure = None;
        }
        self.active_universe
            .store(config.active_universe, Ordering::Relaxed);

        let addr = config.socket_addr();
        let socket = SocketBinding::bind(addr, config.read_timeout())
            .and_then(|socket| socket.local_addr().map(|local| (socket, local)));
        let (socket, local_addr) = match socket {
            Ok(bound) => bound,
            Err(source) => {
                warn!(%addr, error = %source, "failed to bind Art-Net socket");
                self.shared.fail(FailureSite::Bind(addr), &source);
                return Err(Error::Bind { addr, source });
            }
        };

        self.spawn(socket, local_addr, config)
    }

    /// Hand `source` to a new receive thread and mark the receiver running.
    fn spawn<S: DatagramSource>(
        &mut self,
        source: S,
        local_addr: SocketAddr,
        config: ReceiverConfig,
    ) -> Result<()> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let rx_loop = RxLoop {
            buf: vec![0u8; config.buffer_size()],
            source,
            store: Arc::clone(&self.store),
            shared: Arc::clone(&self.shared),
            shutdown: Arc::clone(&shutdown),
            config,
        };

        self.shared.set_state(ReceiverState::Running);
        let handle = thread::Builder::new()
            .name("artnet-rx".into())
            .spawn(move || rx_loop.run())
            .map_err(|err| {
                self.shared.fail(FailureSite::Spawn, &err);
                Error::Spawn(err)
            })?;

        info!(%local_addr, "Art-Net receiver started");
        self.worker = Some(Worker {
            shutdown,
            handle,
            local_addr,
        });
        Ok(())
    }

    /// Stop the receive thread and wait for it to exit.
    ///
    /// Clears the channel store and moves a failed receiver back to
    /// [`ReceiverState::Stopped`]. Calling this on a stopped receiver does
    /// nothing.
    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            if self.shared.state() == ReceiverState::Failed {
                self.shared.set_state(ReceiverState::Stopped);
            }
            return;
        };

        self.shared.set_state(ReceiverState::Stopping);
        worker.shutdown.store(true, Ordering::Release);
        if worker.handle.join().is_err() {
            warn!("Art-Net receive thread panicked");
        }

        self.store.clear();
        self.shared.set_state(ReceiverState::Stopped);
        info!(local_addr = %worker.local_addr, "Art-Net receiver stopped");
    }

    /// Current lifecycle state
    #[must_use]
    pub fn state(&self) -> ReceiverState {
        self.shared.state()
    }

    /// Lifecycle state, last error, bound address and counters
    #[must_use]
    pub fn status(&self) -> ReceiverStatus {
        let (state, last_error) = {
            let status = self.shared.status.lock();
            let last_error = status.failure.as_ref().map(|failure| failure.message.clone());
            (status.state, last_error)
        };
        ReceiverStatus {
            state,
            last_error,
            local_addr: self.local_addr(),
            stats: self.shared.stats.snapshot(),
        }
    }

    /// `Ok` unless the last start or the receive thread failed.
    ///
    /// # Errors
    ///
    /// While the receiver is in [`ReceiverState::Failed`], returns the
    /// recorded failure as the variant it was raised as: [`Error::Bind`] for
    /// a bind failure, [`Error::Spawn`] if the thread could not start, and
    /// [`Error::Socket`] if the receive thread hit a fatal socket error.
    pub fn health(&self) -> Result<()> {
        let status = self.shared.status.lock();
        match (status.state, &status.failure) {
            (ReceiverState::Failed, Some(failure)) => Err(failure.to_error()),
            _ => Ok(()),
        }
    }

    /// Receive counters
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.shared.stats.snapshot()
    }

    /// Address the socket is bound to while running
    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.worker.as_ref().map(|worker| worker.local_addr)
    }

    /// Query handle reading this receiver's store
    #[must_use]
    pub fn query(&self) -> DmxQuery {
        DmxQuery::from_parts(Arc::clone(&self.store), Arc::clone(&self.active_universe))
    }

    /// Change the universe read by `dmx`/`dmxf` without restarting
    pub fn set_active_universe(&self, universe: u16) {
        self.active_universe.store(universe, Ordering::Relaxed);
    }

    /// Universe read by `dmx`/`dmxf`
    #[must_use]
    pub fn active_universe(&self) -> u16 {
        self.active_universe.load(Ordering::Relaxed)
    }

    /// The channel store written by the receive thread
    #[must_use]
    pub fn store(&self) -> &Arc<ChannelStore> {
        &self.store
    }
}

impl Default for Receiver {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Receiver {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Everything the receive thread owns.
struct RxLoop<S> {
    source: S,
    store: Arc<ChannelStore>,
    shared: Arc<Shared>,
    shutdown: Arc<AtomicBool>,
    config: ReceiverConfig,
    buf: Vec<u8>,
}

impl<S: DatagramSource> RxLoop<S> {
    fn run(mut self) {
        debug!("receive loop running");

        while !self.shutdown.load(Ordering::Acquire) {
            match self.source.recv(&mut self.buf) {
                Ok(Recv::Idle) => {}
                Ok(Recv::Datagram(len, src)) => self.handle_datagram(len, src),
                Err(err) => {
                    if self.shutdown.load(Ordering::Acquire) {
                        break;
                    }
                    warn!(error = %err, "Art-Net socket error; receiver stopped");
                    self.shared.fail(FailureSite::Socket, &err);
                    return;
                }
            }
        }

        debug!("receive loop exited");
    }

    fn handle_datagram(&self, len: usize, src: SocketAddr) {
        self.shared.stats.record_datagram();

        let frame = match decode(Bytes::copy_from_slice(&self.buf[..len])) {
            Ok(frame) => frame,
            Err(err) => {
                self.shared.stats.record_decode_error(err.kind());
                match err {
                    // polls and other node traffic share the port
                    DecodeError::UnsupportedOpcode { opcode } => {
                        trace!(%src, opcode = %opcode_name(opcode), "ignoring packet");
                    }
                    _ => debug!(%src, len, error = %err, "dropping malformed packet"),
                }
                return;
            }
        };

        let universe = frame.universe();
        if !self.config.accepts_universe(universe) {
            self.shared.stats.record_filtered();
            trace!(%src, universe, "universe not subscribed");
            return;
        }

        let outcome = self
            .store
            .update_with_policy(&frame, self.config.sequence_policy);
        self.shared.stats.record_update(outcome);
        trace!(
            %src,
            universe,
            sequence = frame.sequence(),
            channels = frame.len(),
            ?outcome,
            "ArtDmx"
        );
    }
}
