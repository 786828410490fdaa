//! Minimal UDP socket wrapper for the receive loop.

use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

/// Outcome of a single receive attempt.
#[derive(Debug)]
pub(crate) enum Recv {
    /// A datagram of the given length arrived
    Datagram(usize, SocketAddr),
    /// The read timeout elapsed without data
    Idle,
}

/// Anything the receive loop can pull datagrams from.
pub(crate) trait DatagramSource: Send + 'static {
    /// Wait up to the read timeout for one datagram.
    ///
    /// Transient conditions come back as [`Recv::Idle`]; an `Err` is fatal
    /// to the loop.
    fn recv(&self, buf: &mut [u8]) -> io::Result<Recv>;
}

/// Binding for the listening UDP socket.
#[derive(Debug)]
pub(crate) struct SocketBinding {
    socket: UdpSocket,
}

impl SocketBinding {
    /// Bind to the provided address with a read timeout.
    pub(crate) fn bind(addr: SocketAddr, read_timeout: Duration) -> io::Result<Self> {
        let socket = UdpSocket::bind(addr)?;
        socket.set_nonblocking(false)?;
        socket.set_read_timeout(Some(read_timeout))?;
        Ok(Self { socket })
    }

    /// Access the local address for this binding.
    pub(crate) fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

impl DatagramSource for SocketBinding {
    /// Receive one datagram, mapping timeouts to [`Recv::Idle`].
    fn recv(&self, buf: &mut [u8]) -> io::Result<Recv> {
        match self.socket.recv_from(buf) {
            Ok((len, addr)) => Ok(Recv::Datagram(len, addr)),
            Err(err) if is_transient(&err) => Ok(Recv::Idle),
            Err(err) => Err(err),
        }
    }
}

/// Errors that just mean "nothing to read right now".
///
/// Windows reports a datagram larger than the buffer as an error and a
/// previous send's ICMP port unreachable as `ConnectionReset`; neither should
/// stop reception.
fn is_transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock
            | io::ErrorKind::TimedOut
            | io::ErrorKind::Interrupted
            | io::ErrorKind::ConnectionReset
    ) || is_oversized_datagram(err)
}

#[cfg(windows)]
fn is_oversized_datagram(err: &io::Error) -> bool {
    // WSAEMSGSIZE
    err.raw_os_error() == Some(10040)
}

#[cfg(not(windows))]
fn is_oversized_datagram(_err: &io::Error) -> bool {
    false
}
