use std::io;

use thiserror::Error;

use crate::enums::ErrorCode;

/// Everything that can go wrong while talking to a JVM.
///
/// Transport failures ([`Io`](Error::Io), [`Disconnected`](Error::Disconnected))
/// and inbound framing failures tear the connection down; the remaining
/// variants fail only the offending call.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("the connection was closed, either by the peer or by a previous failure")]
    Disconnected,
    #[error("the peer did not answer the JDWP handshake")]
    Handshake,
    #[error("malformed packet")]
    Malformed,
    #[error("unrecognized value tag {0:#04x}")]
    InvalidTag(u8),
    #[error("unrecognized event kind {0}")]
    InvalidEventKind(u8),
    #[error("id value {value:#x} does not fit in {width} bytes")]
    IdTooWide { value: u64, width: u8 },
    #[error("id sizes are not known yet; the IDSizes reply has not arrived")]
    SizesUnknown,
    #[error("data ended before the field did")]
    Truncated,
    #[error("packet body does not fit the 32-bit length field")]
    BodyTooLong,
    #[error("host reported an error: {0}")]
    Protocol(ErrorCode),
}

impl Error {
    /// Whether this error leaves the connection unusable.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::Io(_)
            | Error::Disconnected
            | Error::Handshake
            | Error::Malformed
            | Error::InvalidTag(_)
            | Error::InvalidEventKind(_)
            | Error::Truncated => true,
            Error::IdTooWide { .. }
            | Error::SizesUnknown
            | Error::BodyTooLong
            | Error::Protocol(_) => false,
        }
    }
}
