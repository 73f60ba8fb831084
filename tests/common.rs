//! Shared harness: an in-process endpoint that speaks just enough JDWP
//! to exercise the client pipeline, since running a real JVM is out of
//! scope.
//!
//! The endpoint accepts one connection, answers the handshake and the
//! IDSizes bootstrap (reporting 8 for every width, like a real HotSpot),
//! records every command packet it receives, and can inject arbitrary
//! bytes - scripted replies, composite events - into the stream.

#![allow(dead_code)]

use std::{
    io::{Read, Write},
    net::{TcpListener, TcpStream},
    sync::{
        mpsc::{self, Sender},
        Arc, Mutex,
    },
    thread,
    time::{Duration, Instant},
};

use jdwp_wire::JdwpClient;

pub const HANDSHAKE: &[u8; 14] = b"JDWP-Handshake";

const WAIT_LIMIT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedPacket {
    pub id: u32,
    pub command_set: u8,
    pub command: u8,
    pub data: Vec<u8>,
}

#[derive(Debug)]
pub struct MockJvm {
    pub port: u16,
    inject: Sender<Vec<u8>>,
    received: Arc<Mutex<Vec<ReceivedPacket>>>,
}

impl MockJvm {
    /// An endpoint that answers every command with an empty success
    /// reply.
    pub fn start() -> MockJvm {
        Self::launch(true)
    }

    /// An endpoint that only answers the IDSizes bootstrap; every other
    /// reply is scripted by the test through [`inject`](Self::inject).
    pub fn manual() -> MockJvm {
        Self::launch(false)
    }

    fn launch(auto_reply: bool) -> MockJvm {
        let _ = env_logger::builder().is_test(true).try_init();

        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let port = listener.local_addr().expect("local addr").port();
        let (inject_tx, inject_rx) = mpsc::channel::<Vec<u8>>();
        let reply_tx = inject_tx.clone();
        let received = Arc::new(Mutex::new(Vec::new()));

        thread::spawn({
            let received = received.clone();
            move || {
                let (mut stream, _) = match listener.accept() {
                    Ok(accepted) => accepted,
                    Err(_) => return,
                };
                if !shake_hands(&mut stream) {
                    return;
                }

                // injected bytes are written from their own thread so the
                // read loop below can stay blocked
                let mut write_half = stream.try_clone().expect("clone stream");
                thread::spawn(move || {
                    while let Ok(bytes) = inject_rx.recv() {
                        if write_half.write_all(&bytes).is_err() {
                            break;
                        }
                    }
                });

                loop {
                    let mut header = [0u8; 11];
                    if stream.read_exact(&mut header).is_err() {
                        break;
                    }
                    let length =
                        u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as usize;
                    let id = u32::from_be_bytes([header[4], header[5], header[6], header[7]]);
                    let (command_set, command) = (header[9], header[10]);
                    let mut data = vec![0; length - 11];
                    if stream.read_exact(&mut data).is_err() {
                        break;
                    }
                    received.lock().unwrap().push(ReceivedPacket {
                        id,
                        command_set,
                        command,
                        data,
                    });

                    if (command_set, command) == (1, 7) {
                        let _ = reply_tx.send(id_sizes_reply(id));
                    } else if auto_reply {
                        let _ = reply_tx.send(reply_bytes(id, 0, &[]));
                    }
                }
            }
        });

        MockJvm {
            port,
            inject: inject_tx,
            received,
        }
    }

    pub fn connect(&self) -> JdwpClient {
        JdwpClient::connect("127.0.0.1", self.port).expect("connect to mock endpoint")
    }

    /// Queues raw bytes for transmission to the client.
    pub fn inject(&self, bytes: Vec<u8>) {
        self.inject.send(bytes).expect("endpoint is gone");
    }

    pub fn received(&self) -> Vec<ReceivedPacket> {
        self.received.lock().unwrap().clone()
    }

    /// Blocks until the endpoint has seen at least `n` command packets
    /// (the IDSizes bootstrap counts).
    pub fn wait_for_packets(&self, n: usize) -> Vec<ReceivedPacket> {
        let deadline = Instant::now() + WAIT_LIMIT;
        loop {
            let seen = self.received();
            if seen.len() >= n {
                return seen;
            }
            assert!(
                Instant::now() < deadline,
                "endpoint saw only {} of {n} packets",
                seen.len()
            );
            thread::sleep(Duration::from_millis(2));
        }
    }
}

fn shake_hands(stream: &mut TcpStream) -> bool {
    let mut buf = [0u8; HANDSHAKE.len()];
    stream.read_exact(&mut buf).is_ok() && &buf == HANDSHAKE && stream.write_all(HANDSHAKE).is_ok()
}

/// Raw bytes of a reply packet.
pub fn reply_bytes(id: u32, error: u16, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(11 + data.len());
    out.extend_from_slice(&(11 + data.len() as u32).to_be_bytes());
    out.extend_from_slice(&id.to_be_bytes());
    out.push(0x80);
    out.extend_from_slice(&error.to_be_bytes());
    out.extend_from_slice(data);
    out
}

/// Raw bytes of a Composite event packet wrapping the given body.
pub fn event_bytes(body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(11 + body.len());
    out.extend_from_slice(&(11 + body.len() as u32).to_be_bytes());
    out.extend_from_slice(&0x7000_0001u32.to_be_bytes());
    out.push(0x00);
    out.push(64);
    out.push(100);
    out.extend_from_slice(body);
    out
}

fn id_sizes_reply(id: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity(20);
    for _ in 0..5 {
        data.extend_from_slice(&8i32.to_be_bytes());
    }
    reply_bytes(id, 0, &data)
}

/// Polls `probe` until it returns true or the shared deadline passes.
pub fn wait_until(what: &str, mut probe: impl FnMut() -> bool) {
    let deadline = Instant::now() + WAIT_LIMIT;
    while !probe() {
        assert!(Instant::now() < deadline, "timed out waiting for {what}");
        thread::sleep(Duration::from_millis(2));
    }
}
