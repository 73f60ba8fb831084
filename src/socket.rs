//! The socket the connection pipeline owns: dual-stack connect with the
//! JDWP handshake, exact-count reads and writes safe to call from
//! different threads, and a non-blocking readability probe.

use std::{
    io::{self, Read, Write},
    net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs},
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};

use crate::{error::Error, Result};

const HANDSHAKE: &[u8; 14] = b"JDWP-Handshake";

/// A TCP stream that has completed the JDWP handshake.
///
/// Reads and writes go through separate mutex-guarded clones of the
/// stream, so a write can proceed while a read is parked; `shutdown` uses
/// an unguarded clone and never blocks. Once the peer closes or a write
/// hits a broken pipe the socket is permanently closed and every further
/// operation fails with [`Error::Disconnected`].
///
/// Note on broken pipes: the Rust runtime ignores SIGPIPE process-wide,
/// so a write to a closed peer surfaces as an `io::Error` here instead of
/// a signal.
#[derive(Debug)]
pub struct JdwpSocket {
    reader: Mutex<TcpStream>,
    writer: Mutex<TcpStream>,
    poller: Mutex<TcpStream>,
    ctrl: TcpStream,
    closed: AtomicBool,
}

impl JdwpSocket {
    /// Resolves `host` dual-stack, preferring IPv6 addresses over IPv4,
    /// connects, and performs the handshake.
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        let addrs: Vec<SocketAddr> = (host, port).to_socket_addrs()?.collect();
        let (v6, v4): (Vec<_>, Vec<_>) = addrs.into_iter().partition(SocketAddr::is_ipv6);

        let mut last_err: Option<io::Error> = None;
        for addr in v6.into_iter().chain(v4) {
            match TcpStream::connect(addr) {
                Ok(stream) => return Self::attach(stream),
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err
            .unwrap_or_else(|| {
                io::Error::new(io::ErrorKind::AddrNotAvailable, "host resolved to no addresses")
            })
            .into())
    }

    /// Performs the handshake on an already-connected stream.
    ///
    /// Exactly 14 bytes of `JDWP-Handshake` go out, and the peer must
    /// echo them back verbatim; anything else closes the socket and
    /// fails with [`Error::Handshake`].
    pub fn attach(mut stream: TcpStream) -> Result<Self> {
        stream.write_all(HANDSHAKE)?;
        let mut reply = [0u8; HANDSHAKE.len()];
        stream.read_exact(&mut reply)?;
        if &reply != HANDSHAKE {
            let _ = stream.shutdown(Shutdown::Both);
            return Err(Error::Handshake);
        }

        let writer = stream.try_clone()?;
        let poller = stream.try_clone()?;
        let ctrl = stream.try_clone()?;
        Ok(JdwpSocket {
            reader: Mutex::new(stream),
            writer: Mutex::new(writer),
            poller: Mutex::new(poller),
            ctrl,
            closed: AtomicBool::new(false),
        })
    }

    /// Blocks until exactly `n` bytes arrive. `read_exact` retries
    /// transient interruptions itself; a clean peer close surfaces as
    /// [`Error::Disconnected`].
    pub fn read_exact(&self, n: usize) -> Result<Vec<u8>> {
        if self.is_closed() {
            return Err(Error::Disconnected);
        }
        let mut buf = vec![0; n];
        let mut stream = self.reader.lock().unwrap();
        match stream.read_exact(&mut buf) {
            Ok(()) => Ok(buf),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Writes all of `bytes`, retrying transient interruptions.
    pub fn write_all(&self, bytes: &[u8]) -> Result<()> {
        if self.is_closed() {
            return Err(Error::Disconnected);
        }
        let mut stream = self.writer.lock().unwrap();
        stream.write_all(bytes).map_err(|e| self.fail(e))
    }

    /// Whether at least one byte can be read without blocking.
    pub fn poll_readable(&self) -> Result<bool> {
        if self.is_closed() {
            return Err(Error::Disconnected);
        }
        let stream = self.poller.lock().unwrap();
        stream.set_nonblocking(true)?;
        let mut probe = [0u8; 1];
        let peeked = stream.peek(&mut probe);
        let restore = stream.set_nonblocking(false);
        let readable = match peeked {
            Ok(0) => {
                self.closed.store(true, Ordering::SeqCst);
                false
            }
            Ok(_) => true,
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => false,
            Err(e) => return Err(self.fail(e)),
        };
        restore?;
        Ok(readable)
    }

    /// Closes both directions; all blocked reads and writes return.
    /// Idempotent.
    pub fn shutdown(&self) {
        self.closed.store(true, Ordering::SeqCst);
        let _ = self.ctrl.shutdown(Shutdown::Both);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn fail(&self, e: io::Error) -> Error {
        match e.kind() {
            io::ErrorKind::UnexpectedEof
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::NotConnected => {
                self.closed.store(true, Ordering::SeqCst);
                Error::Disconnected
            }
            _ => Error::Io(e),
        }
    }
}

impl Drop for JdwpSocket {
    fn drop(&mut self) {
        self.shutdown();
    }
}
