#![deny(missing_debug_implementations)]

//! Wire-level client for the Java Debug Wire Protocol.
//!
//! The crate speaks the socket transport of JDWP: it connects to a JVM's
//! debug port, performs the `JDWP-Handshake` exchange, and multiplexes the
//! stream between a writer thread draining an outbound packet queue and a
//! reader thread that correlates replies with outstanding command ids and
//! fans composite events out to registered handlers.
//!
//! Command packets are described by data ([`commands::CommandSpec`] tables,
//! one module per JDWP command set) and encoded by a single generic walk
//! over their slot lists, so adding a command is a one-line table entry.
//! Field values are the closed [`types::FieldValue`] sum, encoded against
//! the per-connection [`sizes::IdSizes`] table the JVM reports during the
//! connection bootstrap.

pub mod client;
pub mod codec;
pub mod commands;
pub mod enums;
pub mod error;
pub mod events;
pub mod packet;
pub mod sizes;
pub mod socket;
pub mod types;

pub use client::JdwpClient;
pub use error::Error;
pub use sizes::IdSizes;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
