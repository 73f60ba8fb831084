//! Packet framing: the 11-byte header, outbound packet ids, and the
//! generic command serializer driven by the schema tables.

use std::{
    fmt::{Display, Formatter},
    sync::Mutex,
};

use crate::{
    codec::JdwpWriter,
    commands::{encode_slot_values, event_request, CommandSpec, Slot, SlotValue},
    enums::{ErrorCode, EventKind, SuspendPolicy},
    error::Error,
    sizes::IdSizes,
    Result,
};

/// Every JDWP packet starts with this many bytes.
pub const HEADER_LEN: u32 = 11;

const FLAG_REPLY: u8 = 0x80;

/// The (command set, command) pair identifying a command's shape.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CommandId {
    pub command_set: u8,
    pub command: u8,
}

impl CommandId {
    pub const fn new(command_set: u8, command: u8) -> CommandId {
        CommandId {
            command_set,
            command,
        }
    }

    /// Whether this is the Composite event command, the only command a
    /// JVM sends unprompted.
    pub fn is_composite_event(self) -> bool {
        self.command_set == 64 && self.command == 100
    }
}

impl Display for CommandId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.command_set, self.command)
    }
}

/// What the last three header bytes mean, which depends on the reply bit
/// of the flags byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PacketMeta {
    Command(CommandId),
    Reply(ErrorCode),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PacketHeader {
    /// Total packet length, body plus the header's own 11 bytes.
    pub length: u32,
    pub id: u32,
    pub meta: PacketMeta,
}

impl PacketHeader {
    /// Length of the body that follows this header.
    pub fn body_len(&self) -> usize {
        (self.length - HEADER_LEN) as usize
    }

    /// Parses and classifies a header. Reply classification is by bit 7
    /// of the flags byte; everything else is a command, events included.
    pub fn parse(bytes: &[u8; HEADER_LEN as usize]) -> Result<Self> {
        let length = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if length < HEADER_LEN {
            return Err(Error::Malformed);
        }
        let id = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        let meta = if bytes[8] & FLAG_REPLY != 0 {
            let code = u16::from_be_bytes([bytes[9], bytes[10]]);
            PacketMeta::Reply(ErrorCode::from_wire(code).ok_or(Error::Malformed)?)
        } else {
            PacketMeta::Command(CommandId::new(bytes[9], bytes[10]))
        };
        Ok(PacketHeader { length, id, meta })
    }

    pub fn write(&self, w: &mut JdwpWriter) -> Result<()> {
        w.write_u32(self.length)?;
        w.write_u32(self.id)?;
        match self.meta {
            PacketMeta::Command(cmd) => {
                w.write_u8(0x00)?;
                w.write_u8(cmd.command_set)?;
                w.write_u8(cmd.command)
            }
            PacketMeta::Reply(code) => {
                w.write_u8(FLAG_REPLY)?;
                w.write_u16(code.into())
            }
        }
    }
}

/// Hands out packet ids for one connection: monotonically increasing from
/// zero, never reused.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: Mutex<u32>,
}

impl IdAllocator {
    pub fn new() -> Self {
        IdAllocator::default()
    }

    pub fn next(&self) -> u32 {
        let mut next = self.next.lock().unwrap();
        let id = *next;
        *next += 1;
        id
    }
}

/// An outbound command, fully typed, with its id already assigned.
///
/// The generic constructor takes one [`SlotValue`] per schema slot;
/// `EventRequest.Set` gets its own constructor because its modifier list
/// is a tagged union the slot model cannot express.
#[derive(Debug)]
pub struct CommandPacket {
    id: u32,
    spec: &'static CommandSpec,
    body: Body,
}

#[derive(Debug)]
enum Body {
    Slots(Vec<SlotValue>),
    EventRequest {
        event_kind: EventKind,
        suspend_policy: SuspendPolicy,
        modifiers: Vec<event_request::Modifier>,
    },
}

impl CommandPacket {
    /// Builds a packet for `spec`, drawing its id from `ids`.
    ///
    /// # Panics
    ///
    /// Panics if the slot values do not match the schema's slot list in
    /// arity or kind; the schemas are static data, so a mismatch is a
    /// caller bug, not a runtime condition.
    pub fn new(ids: &IdAllocator, spec: &'static CommandSpec, slots: Vec<SlotValue>) -> Self {
        check_slots(spec, &slots);
        CommandPacket {
            id: ids.next(),
            spec,
            body: Body::Slots(slots),
        }
    }

    /// Builds an `EventRequest.Set` packet.
    pub fn event_request_set(
        ids: &IdAllocator,
        event_kind: EventKind,
        suspend_policy: SuspendPolicy,
        modifiers: Vec<event_request::Modifier>,
    ) -> Self {
        CommandPacket {
            id: ids.next(),
            spec: &event_request::SET,
            body: Body::EventRequest {
                event_kind,
                suspend_policy,
                modifiers,
            },
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn spec(&self) -> &'static CommandSpec {
        self.spec
    }

    pub fn command_id(&self) -> CommandId {
        self.spec.id()
    }

    /// Produces the full wire form, header included.
    pub fn serialize(&self, sizes: &IdSizes) -> Result<Vec<u8>> {
        let mut body = JdwpWriter::new(*sizes);
        match &self.body {
            Body::Slots(slots) => encode_slot_values(slots, &mut body)?,
            Body::EventRequest {
                event_kind,
                suspend_policy,
                modifiers,
            } => event_request::encode_set(*event_kind, *suspend_policy, modifiers, &mut body)?,
        }
        let body = body.into_bytes();
        if body.len() > (u32::MAX - HEADER_LEN) as usize {
            return Err(Error::BodyTooLong);
        }

        let mut out = JdwpWriter::new(*sizes);
        PacketHeader {
            length: body.len() as u32 + HEADER_LEN,
            id: self.id,
            meta: PacketMeta::Command(self.spec.id()),
        }
        .write(&mut out)?;
        out.write_bytes(&body)?;
        Ok(out.into_bytes())
    }
}

fn check_slots(spec: &CommandSpec, values: &[SlotValue]) {
    assert_eq!(
        spec.slots().len(),
        values.len(),
        "command {} declares {} slots, got {} values",
        spec.id(),
        spec.slots().len(),
        values.len(),
    );
    for (i, (slot, value)) in spec.slots().iter().zip(values).enumerate() {
        match (slot, value) {
            (Slot::Field(kind), SlotValue::Field(v)) => assert_eq!(
                v.kind(),
                *kind,
                "command {} slot {i} expects {kind:?}",
                spec.id(),
            ),
            (Slot::Vector(kinds), SlotValue::Vector(rows)) => {
                for row in rows {
                    assert_eq!(
                        row.len(),
                        kinds.len(),
                        "command {} slot {i} rows have {} fields",
                        spec.id(),
                        kinds.len(),
                    );
                    for (kind, v) in kinds.iter().zip(row) {
                        assert_eq!(
                            v.kind(),
                            *kind,
                            "command {} slot {i} expects row fields {kinds:?}",
                            spec.id(),
                        );
                    }
                }
            }
            _ => panic!("command {} slot {i} shape mismatch", spec.id()),
        }
    }
}

/// A successful reply's correlation id and raw body.
///
/// Bodies are decoded by the caller against whatever slot list fits the
/// command, via [`crate::commands::decode_slots`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyPacket {
    pub id: u32,
    pub data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_start_at_zero_and_increase() {
        let ids = IdAllocator::new();
        assert_eq!(ids.next(), 0);
        assert_eq!(ids.next(), 1);
        assert_eq!(ids.next(), 2);
    }

    #[test]
    fn header_classification() {
        let reply = [0, 0, 0, 11, 0, 0, 0, 7, 0x80, 0, 0];
        let header = PacketHeader::parse(&reply).unwrap();
        assert_eq!(header.id, 7);
        assert_eq!(header.meta, PacketMeta::Reply(ErrorCode::None));
        assert_eq!(header.body_len(), 0);

        let event = [0, 0, 0, 20, 0, 0, 0, 9, 0x00, 64, 100];
        let header = PacketHeader::parse(&event).unwrap();
        assert_eq!(header.body_len(), 9);
        match header.meta {
            PacketMeta::Command(cmd) => assert!(cmd.is_composite_event()),
            PacketMeta::Reply(_) => panic!("classified an event as a reply"),
        }
    }

    #[test]
    fn short_length_is_malformed() {
        let bad = [0, 0, 0, 10, 0, 0, 0, 0, 0, 1, 1];
        assert!(matches!(PacketHeader::parse(&bad), Err(Error::Malformed)));
    }

    #[test]
    fn error_reply_codes_decode() {
        let reply = [0, 0, 0, 11, 0, 0, 0, 1, 0x80, 0, 112];
        let header = PacketHeader::parse(&reply).unwrap();
        assert_eq!(header.meta, PacketMeta::Reply(ErrorCode::VmDead));

        // error code 1 is not in the table
        let unknown = [0, 0, 0, 11, 0, 0, 0, 1, 0x80, 0, 1];
        assert!(matches!(
            PacketHeader::parse(&unknown),
            Err(Error::Malformed)
        ));
    }
}
