//! Crate error types

use std::net::SocketAddr;

use thiserror::Error;

/// Art-Net receiver errors
#[derive(Error, Debug)]
pub enum Error {
    /// Could not bind the listening socket
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address we tried to bind
        addr: SocketAddr,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Socket failed while receiving
    #[error("socket error: {0}")]
    Socket(#[from] std::io::Error),

    /// Channel index outside 0..512
    #[error("invalid channel: {channel} (expected 0..512)")]
    InvalidChannel {
        /// Requested channel
        channel: usize,
    },

    /// Could not spawn the receive thread
    #[error("failed to spawn receiver thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
