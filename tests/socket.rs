//! The socket wrapper on its own: handshake, readability polling and
//! close detection.

mod common;

use std::{
    io::{Read, Write},
    net::{TcpListener, TcpStream},
    thread,
};

use common::{wait_until, HANDSHAKE};
use jdwp_wire::{error::Error, socket::JdwpSocket};

/// A peer that completes the handshake and then follows a script.
fn peer(script: impl FnOnce(TcpStream) + Send + 'static) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 14];
            if stream.read_exact(&mut buf).is_ok()
                && &buf == HANDSHAKE
                && stream.write_all(HANDSHAKE).is_ok()
            {
                script(stream);
            }
        }
    });
    port
}

#[test]
fn poll_reports_pending_bytes() {
    let port = peer(|mut stream| {
        let mut byte = [0u8; 1];
        // wait for a cue from the client before sending anything
        let _ = stream.read_exact(&mut byte);
        let _ = stream.write_all(&[0xAA, 0xBB]);
        // park until the client is done
        let _ = stream.read_exact(&mut byte);
    });
    let socket = JdwpSocket::connect("127.0.0.1", port).unwrap();

    assert!(!socket.poll_readable().unwrap());

    socket.write_all(&[1]).unwrap();
    wait_until("bytes to become readable", || {
        socket.poll_readable().unwrap()
    });

    // polling peeks, it must not consume
    assert_eq!(socket.read_exact(2).unwrap(), [0xAA, 0xBB]);
}

#[test]
fn peer_close_is_permanent() {
    let port = peer(drop);
    let socket = JdwpSocket::connect("127.0.0.1", port).unwrap();

    assert!(matches!(socket.read_exact(1), Err(Error::Disconnected)));
    assert!(socket.is_closed());
    assert!(matches!(socket.read_exact(1), Err(Error::Disconnected)));
    assert!(matches!(socket.write_all(&[0]), Err(Error::Disconnected)));
    assert!(matches!(socket.poll_readable(), Err(Error::Disconnected)));
}

#[test]
fn shutdown_unblocks_a_reader() {
    let port = peer(|mut stream| {
        let mut byte = [0u8; 1];
        let _ = stream.read_exact(&mut byte);
    });
    let socket = JdwpSocket::connect("127.0.0.1", port).unwrap();

    thread::scope(|scope| {
        let blocked = scope.spawn(|| socket.read_exact(1));
        thread::sleep(std::time::Duration::from_millis(20));
        socket.shutdown();
        assert!(matches!(blocked.join().unwrap(), Err(Error::Disconnected)));
    });
}
