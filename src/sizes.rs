//! The per-connection table of identifier widths.

use crate::{codec::JdwpReader, error::Error, types::IdKind, Result};

/// Widths, in bytes, of the variably-sized identifier types on one
/// connection, as reported by the `VirtualMachine.IDSizes` reply.
///
/// The table starts out unpopulated; any width query in that state fails
/// with [`Error::SizesUnknown`]. The connection pipeline populates it once
/// during the bootstrap, after which it never changes for the lifetime of
/// the connection.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct IdSizes {
    field: u8,
    method: u8,
    object: u8,
    reference_type: u8,
    frame: u8,
    populated: bool,
}

impl IdSizes {
    /// Builds a populated table. Every width must be in `1..=8`.
    pub fn new(field: u8, method: u8, object: u8, reference_type: u8, frame: u8) -> Result<Self> {
        let sizes = IdSizes {
            field,
            method,
            object,
            reference_type,
            frame,
            populated: true,
        };
        if [field, method, object, reference_type, frame]
            .iter()
            .all(|w| (1..=8).contains(w))
        {
            Ok(sizes)
        } else {
            Err(Error::Malformed)
        }
    }

    /// A table with every width set to 8 bytes, which is what every
    /// contemporary HotSpot JVM reports.
    pub fn all_eight() -> Self {
        IdSizes {
            field: 8,
            method: 8,
            object: 8,
            reference_type: 8,
            frame: 8,
            populated: true,
        }
    }

    /// Parses the five ints of an `IDSizes` reply body, in wire order:
    /// field, method, object, reference-type, frame.
    pub fn from_reply(data: &[u8]) -> Result<Self> {
        let mut r = JdwpReader::new(data, IdSizes::default());
        let mut widths = [0u8; 5];
        for width in &mut widths {
            let raw = r.read_i32()?;
            if !(1..=8).contains(&raw) {
                return Err(Error::Malformed);
            }
            *width = raw as u8;
        }
        Self::new(widths[0], widths[1], widths[2], widths[3], widths[4])
    }

    pub fn is_populated(&self) -> bool {
        self.populated
    }

    /// The width of ids of the given kind.
    ///
    /// Object-family ids share the object width, the reference-type family
    /// shares the reference-type width, and methods, fields and frames
    /// each have their own.
    pub fn width_of(&self, kind: IdKind) -> Result<u8> {
        if !self.populated {
            return Err(Error::SizesUnknown);
        }
        Ok(match kind {
            IdKind::Object
            | IdKind::Thread
            | IdKind::ThreadGroup
            | IdKind::String
            | IdKind::ClassLoader
            | IdKind::ClassObject
            | IdKind::Array => self.object,
            IdKind::ReferenceType | IdKind::Class | IdKind::Interface | IdKind::ArrayType => {
                self.reference_type
            }
            IdKind::Method => self.method,
            IdKind::Field => self.field,
            IdKind::Frame => self.frame,
        })
    }
}
