//! The connection pipeline: one writer thread draining a FIFO of
//! serialized packets, one reader thread correlating replies and
//! dispatching events, and the IDSizes bootstrap between handshake and
//! active service.

use std::{
    collections::HashMap,
    fmt::{self, Debug, Formatter},
    sync::{
        mpsc::{self, Receiver, Sender},
        Arc, Mutex,
    },
    thread::{self, JoinHandle},
};

use crate::{
    commands::{event::Composite, virtual_machine},
    enums::ErrorCode,
    error::Error,
    events::{self, EventHandler},
    packet::{CommandPacket, IdAllocator, PacketHeader, PacketMeta, ReplyPacket, HEADER_LEN},
    sizes::IdSizes,
    socket::JdwpSocket,
    Result,
};

/// Lifecycle of a connection. Construction covers the first three
/// states; a connection handed to the caller is already `Active`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    Connecting,
    ProbingSizes,
    Active,
    Closing,
    Closed,
}

enum WriterMsg {
    Packet { id: u32, bytes: Vec<u8> },
    Shutdown,
}

enum ReplySlot {
    /// Someone is blocked on this id.
    Waiter(Sender<Result<ReplyPacket>>),
    /// The reply beat its waiter; retained until claimed or the
    /// connection closes. Dropping it would silently hide protocol
    /// errors.
    Ready(Result<ReplyPacket>),
}

struct Shared {
    state: Mutex<State>,
    replies: Mutex<HashMap<u32, ReplySlot>>,
    handlers: Mutex<Vec<Arc<dyn EventHandler>>>,
    outbound: Mutex<Sender<WriterMsg>>,
}

/// A live JDWP connection.
///
/// All operations take `&self`; the client is meant to be shared across
/// threads. Packets must be built with this client's [`ids`](Self::ids)
/// allocator so their ids correlate with replies on this connection.
pub struct JdwpClient {
    socket: Arc<JdwpSocket>,
    sizes: IdSizes,
    ids: IdAllocator,
    shared: Arc<Shared>,
    writer: Mutex<Option<JoinHandle<()>>>,
    reader: Mutex<Option<JoinHandle<()>>>,
}

impl Debug for JdwpClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("JdwpClient")
            .field("sizes", &self.sizes)
            .field("state", &*self.shared.state.lock().unwrap())
            .finish_non_exhaustive()
    }
}

impl JdwpClient {
    /// Connects to `host:port`, shakes hands, probes id sizes and goes
    /// active.
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        Self::attach(JdwpSocket::connect(host, port)?)
    }

    /// [`connect`](Self::connect) with the default host.
    pub fn connect_localhost(port: u16) -> Result<Self> {
        Self::connect("localhost", port)
    }

    /// Builds a client over a socket that has completed the handshake.
    pub fn attach(socket: JdwpSocket) -> Result<Self> {
        let socket = Arc::new(socket);
        let ids = IdAllocator::new();
        let (outbound_tx, outbound_rx) = mpsc::channel();
        let shared = Arc::new(Shared {
            state: Mutex::new(State::Connecting),
            replies: Mutex::new(HashMap::new()),
            handlers: Mutex::new(Vec::new()),
            outbound: Mutex::new(outbound_tx),
        });

        // Nothing else may be transmitted until the sizes are known, so
        // the pipeline spends its first packet id on IDSizes itself.
        *shared.state.lock().unwrap() = State::ProbingSizes;
        let bootstrap = CommandPacket::new(&ids, &virtual_machine::ID_SIZES, vec![]);
        let bootstrap_id = bootstrap.id();
        socket.write_all(&bootstrap.serialize(&IdSizes::default())?)?;

        let sizes = loop {
            let header = read_header(&socket)?;
            let body = socket.read_exact(header.body_len())?;
            match header.meta {
                PacketMeta::Reply(ErrorCode::None) if header.id == bootstrap_id => {
                    break IdSizes::from_reply(&body)?;
                }
                PacketMeta::Reply(code) if header.id == bootstrap_id => {
                    return Err(Error::Protocol(code));
                }
                // Usually the VmStart composite from a freshly launched
                // JVM. No handler can be registered yet and the sizes to
                // parse it are not known, so it goes to the floor.
                meta => log::debug!("dropping pre-bootstrap packet {meta:?}"),
            }
        };
        log::debug!("received id sizes: {sizes:?}");

        *shared.state.lock().unwrap() = State::Active;

        let writer = thread::spawn({
            let socket = socket.clone();
            let shared = shared.clone();
            move || writer_loop(outbound_rx, &socket, &shared)
        });
        let reader = thread::spawn({
            let socket = socket.clone();
            let shared = shared.clone();
            move || reader_loop(&socket, &shared, sizes)
        });

        Ok(JdwpClient {
            socket,
            sizes,
            ids,
            shared,
            writer: Mutex::new(Some(writer)),
            reader: Mutex::new(Some(reader)),
        })
    }

    /// The id widths this connection's JVM reported.
    pub fn sizes(&self) -> &IdSizes {
        &self.sizes
    }

    /// The packet id allocator to build [`CommandPacket`]s with.
    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    /// Serializes and enqueues a packet, returning its already-assigned
    /// id without waiting for transmission.
    ///
    /// Serialization happens here so that encoding mistakes (an id wider
    /// than the sizes table allows, for one) fail this call and leave the
    /// connection alone.
    pub fn send_async(&self, packet: CommandPacket) -> Result<u32> {
        self.ensure_active()?;
        let bytes = packet.serialize(&self.sizes)?;
        let id = packet.id();
        let command = packet.command_id();
        let dispose = command == virtual_machine::DISPOSE.id();
        self.shared
            .outbound
            .lock()
            .unwrap()
            .send(WriterMsg::Packet { id, bytes })
            .map_err(|_| Error::Disconnected)?;
        log::trace!("[{id:x}] queued command {command}");
        if dispose {
            // the JVM owes no reply to Dispose; flush the queue and tear
            // the connection down
            self.close()?;
        }
        Ok(id)
    }

    /// Enqueues a packet and blocks until its reply arrives.
    ///
    /// A reply with a non-zero error code surfaces as
    /// [`Error::Protocol`]; closing the connection resolves every
    /// blocked call with [`Error::Disconnected`].
    pub fn send_and_wait(&self, packet: CommandPacket) -> Result<ReplyPacket> {
        let id = packet.id();
        // the waiter must be in the map before the packet can go out,
        // or a fast reply could find nobody home
        let rx = self.register_waiter(id);
        if let Err(e) = self.send_async(packet) {
            self.shared.replies.lock().unwrap().remove(&id);
            return Err(e);
        }
        rx.recv().unwrap_or(Err(Error::Disconnected))
    }

    /// Claims the reply for a packet previously sent with
    /// [`send_async`](Self::send_async), blocking until it arrives.
    pub fn wait_reply(&self, id: u32) -> Result<ReplyPacket> {
        let rx = {
            let mut replies = self.shared.replies.lock().unwrap();
            match replies.remove(&id) {
                Some(ReplySlot::Ready(result)) => return result,
                Some(ReplySlot::Waiter(_)) | None => {
                    if !self.is_active() {
                        return Err(Error::Disconnected);
                    }
                    let (tx, rx) = mpsc::channel();
                    replies.insert(id, ReplySlot::Waiter(tx));
                    rx
                }
            }
        };
        rx.recv().unwrap_or(Err(Error::Disconnected))
    }

    /// Subscribes `handler` to every event parsed from now on.
    ///
    /// Handlers run on the reader thread in registration order.
    pub fn register_handler(&self, handler: Arc<dyn EventHandler>) {
        self.shared.handlers.lock().unwrap().push(handler);
    }

    /// Stops both worker threads, closes the socket and resolves every
    /// pending waiter with [`Error::Disconnected`]. Idempotent.
    ///
    /// Must not be called from an event handler: handlers run on the
    /// reader thread, which `close` joins.
    pub fn close(&self) -> Result<()> {
        {
            let mut state = self.shared.state.lock().unwrap();
            if *state == State::Closed {
                return Ok(());
            }
            *state = State::Closing;
        }
        // let queued packets flush, then stop the writer...
        let _ = self
            .shared
            .outbound
            .lock()
            .unwrap()
            .send(WriterMsg::Shutdown);
        if let Some(handle) = self.writer.lock().unwrap().take() {
            let _ = handle.join();
        }
        // ...and pull the socket out from under the reader
        self.socket.shutdown();
        if let Some(handle) = self.reader.lock().unwrap().take() {
            let _ = handle.join();
        }
        drain_replies(&self.shared);
        *self.shared.state.lock().unwrap() = State::Closed;
        Ok(())
    }

    fn register_waiter(&self, id: u32) -> Receiver<Result<ReplyPacket>> {
        let (tx, rx) = mpsc::channel();
        self.shared
            .replies
            .lock()
            .unwrap()
            .insert(id, ReplySlot::Waiter(tx));
        rx
    }

    fn is_active(&self) -> bool {
        *self.shared.state.lock().unwrap() == State::Active
    }

    fn ensure_active(&self) -> Result<()> {
        if self.is_active() {
            Ok(())
        } else {
            Err(Error::Disconnected)
        }
    }
}

impl Drop for JdwpClient {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

fn read_header(socket: &JdwpSocket) -> Result<PacketHeader> {
    let bytes: [u8; HEADER_LEN as usize] = socket
        .read_exact(HEADER_LEN as usize)?
        .try_into()
        .map_err(|_| Error::Malformed)?;
    PacketHeader::parse(&bytes)
}

fn writer_loop(queue: Receiver<WriterMsg>, socket: &JdwpSocket, shared: &Shared) {
    while let Ok(msg) = queue.recv() {
        match msg {
            WriterMsg::Packet { id, bytes } => {
                if let Err(e) = socket.write_all(&bytes) {
                    log::error!("[{id:x}] failed to write packet: {e}");
                    begin_teardown(shared, socket);
                    break;
                }
                log::trace!("[{id:x}] wrote {} bytes", bytes.len());
            }
            WriterMsg::Shutdown => break,
        }
    }
}

fn reader_loop(socket: &JdwpSocket, shared: &Shared, sizes: IdSizes) {
    loop {
        match read_packet(socket, shared, sizes) {
            Ok(()) => {}
            Err(Error::Disconnected) => {
                log::debug!("reader: peer closed the connection");
                break;
            }
            Err(e) => {
                // an unparseable stream cannot be re-framed, so any
                // failure here is terminal
                log::error!("reader: failed to process incoming data: {e}");
                break;
            }
        }
    }
    begin_teardown(shared, socket);
}

fn read_packet(socket: &JdwpSocket, shared: &Shared, sizes: IdSizes) -> Result<()> {
    let header = read_header(socket)?;
    let body = socket.read_exact(header.body_len())?;
    match header.meta {
        PacketMeta::Command(command) if command.is_composite_event() => {
            let composite = Composite::parse(&header, &body, &sizes)?;
            log::trace!("[host] composite with {} event(s)", composite.events.len());
            // snapshot so handlers can register more handlers without
            // deadlocking the dispatch
            let handlers = shared.handlers.lock().unwrap().clone();
            events::dispatch(&handlers, &composite);
        }
        PacketMeta::Command(command) => {
            log::warn!("ignoring unknown command from the host: {command}");
        }
        PacketMeta::Reply(code) => {
            let result = if code == ErrorCode::None {
                log::trace!("[{:x}] reply, {} byte body", header.id, body.len());
                Ok(ReplyPacket {
                    id: header.id,
                    data: body,
                })
            } else {
                log::trace!("[{:x}] reply, host error {:?}", header.id, code);
                Err(Error::Protocol(code))
            };
            let mut replies = shared.replies.lock().unwrap();
            match replies.remove(&header.id) {
                Some(ReplySlot::Waiter(waiter)) => {
                    let _ = waiter.send(result);
                }
                Some(ReplySlot::Ready(first)) => {
                    log::warn!("[{:x}] duplicate reply, keeping the first", header.id);
                    replies.insert(header.id, ReplySlot::Ready(first));
                }
                None => {
                    replies.insert(header.id, ReplySlot::Ready(result));
                }
            }
        }
    }
    Ok(())
}

/// Moves the connection towards `Closing` from a worker thread: wakes
/// the other worker, fails every waiter, and leaves the final join to
/// [`JdwpClient::close`].
fn begin_teardown(shared: &Shared, socket: &JdwpSocket) {
    {
        let mut state = shared.state.lock().unwrap();
        if *state == State::Active {
            *state = State::Closing;
        }
    }
    socket.shutdown();
    let _ = shared.outbound.lock().unwrap().send(WriterMsg::Shutdown);
    drain_replies(shared);
}

fn drain_replies(shared: &Shared) {
    let mut replies = shared.replies.lock().unwrap();
    for (_, slot) in replies.drain() {
        if let ReplySlot::Waiter(waiter) = slot {
            let _ = waiter.send(Err(Error::Disconnected));
        }
    }
}
