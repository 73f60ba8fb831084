//! The Event command set (64): the Composite command and the event
//! records inside it.
//!
//! Composite is the only command a JVM sends on its own; every
//! notification, from breakpoints to VM death, arrives as one of the
//! records of a Composite body.

use crate::{
    codec::JdwpReader,
    enums::{ClassStatus, EventKind, SuspendPolicy, TypeTag},
    error::Error,
    packet::{PacketHeader, PacketMeta},
    sizes::IdSizes,
    types::{IdKind, Location, TaggedObjectId, Value},
    Result,
};

use super::CommandSpec;

/// The Composite event command itself. Inbound only; the schema exists so
/// the command is classifiable like any other.
pub static COMPOSITE: CommandSpec = CommandSpec::new(64, 100, &[]);

/// One event record out of a Composite body.
///
/// Thread, object and type ids are the raw 64-bit identifiers; pair them
/// with the reference commands to interrogate the JVM further.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A step completed; reported before the code at the location runs.
    SingleStep {
        request: i32,
        thread: u64,
        location: Location,
    },
    /// A breakpoint was hit; reported before the code at the location
    /// runs.
    Breakpoint {
        request: i32,
        thread: u64,
        location: Location,
    },
    FramePop {
        request: i32,
        thread: u64,
        location: Location,
    },
    /// An exception was thrown. `catch_location` is present when the
    /// throw point is dynamically enclosed in a handling try; with native
    /// frames on the stack it is a prediction, not a promise.
    Exception {
        request: i32,
        thread: u64,
        location: Location,
        exception: TaggedObjectId,
        catch_location: Option<Location>,
    },
    /// A new thread is about to start running. Other events for the
    /// thread may precede this one.
    ThreadStart { request: i32, thread: u64 },
    /// A thread is about to terminate.
    ThreadDeath { request: i32, thread: u64 },
    /// A reference type finished preparation.
    ClassPrepare {
        request: i32,
        thread: u64,
        type_tag: TypeTag,
        type_id: u64,
        signature: String,
        status: ClassStatus,
    },
    /// A class was unloaded; only the signature survives collection.
    ClassUnload { request: i32, signature: String },
    /// A watched field was read. `object` is `None` for statics.
    FieldAccess {
        request: i32,
        thread: u64,
        location: Location,
        type_tag: TypeTag,
        type_id: u64,
        field: u64,
        object: Option<TaggedObjectId>,
    },
    /// A watched field is about to be written with `value`.
    FieldModification {
        request: i32,
        thread: u64,
        location: Location,
        type_tag: TypeTag,
        type_id: u64,
        field: u64,
        object: Option<TaggedObjectId>,
        value: Value,
    },
    MethodEntry {
        request: i32,
        thread: u64,
        location: Location,
    },
    MethodExit {
        request: i32,
        thread: u64,
        location: Location,
    },
    MethodExitWithReturnValue {
        request: i32,
        thread: u64,
        location: Location,
        value: Value,
    },
    MonitorContendedEnter {
        request: i32,
        thread: u64,
        object: TaggedObjectId,
        location: Location,
    },
    MonitorContendedEntered {
        request: i32,
        thread: u64,
        object: TaggedObjectId,
        location: Location,
    },
    MonitorWait {
        request: i32,
        thread: u64,
        object: TaggedObjectId,
        location: Location,
        timeout: u64,
    },
    MonitorWaited {
        request: i32,
        thread: u64,
        object: TaggedObjectId,
        location: Location,
        timed_out: bool,
    },
    /// The VM is up, before any application code. Always generated, so
    /// `request` is `None` unless a request asked for it too.
    VmStart { request: Option<i32>, thread: u64 },
    /// The VM is going away. Always generated.
    VmDeath { request: i32 },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::SingleStep { .. } => EventKind::SingleStep,
            Event::Breakpoint { .. } => EventKind::Breakpoint,
            Event::FramePop { .. } => EventKind::FramePop,
            Event::Exception { .. } => EventKind::Exception,
            Event::ThreadStart { .. } => EventKind::ThreadStart,
            Event::ThreadDeath { .. } => EventKind::ThreadDeath,
            Event::ClassPrepare { .. } => EventKind::ClassPrepare,
            Event::ClassUnload { .. } => EventKind::ClassUnload,
            Event::FieldAccess { .. } => EventKind::FieldAccess,
            Event::FieldModification { .. } => EventKind::FieldModification,
            Event::MethodEntry { .. } => EventKind::MethodEntry,
            Event::MethodExit { .. } => EventKind::MethodExit,
            Event::MethodExitWithReturnValue { .. } => EventKind::MethodExitWithReturnValue,
            Event::MonitorContendedEnter { .. } => EventKind::MonitorContendedEnter,
            Event::MonitorContendedEntered { .. } => EventKind::MonitorContendedEntered,
            Event::MonitorWait { .. } => EventKind::MonitorWait,
            Event::MonitorWaited { .. } => EventKind::MonitorWaited,
            Event::VmStart { .. } => EventKind::VmStart,
            Event::VmDeath { .. } => EventKind::VmDeath,
        }
    }

    fn read(r: &mut JdwpReader) -> Result<Event> {
        let raw = r.read_u8()?;
        let kind = EventKind::from_wire(raw).ok_or(Error::InvalidEventKind(raw))?;
        Ok(match kind {
            EventKind::SingleStep => Event::SingleStep {
                request: r.read_i32()?,
                thread: r.read_id(IdKind::Thread)?,
                location: Location::read(r)?,
            },
            EventKind::Breakpoint => Event::Breakpoint {
                request: r.read_i32()?,
                thread: r.read_id(IdKind::Thread)?,
                location: Location::read(r)?,
            },
            EventKind::FramePop => Event::FramePop {
                request: r.read_i32()?,
                thread: r.read_id(IdKind::Thread)?,
                location: Location::read(r)?,
            },
            EventKind::Exception => Event::Exception {
                request: r.read_i32()?,
                thread: r.read_id(IdKind::Thread)?,
                location: Location::read(r)?,
                exception: TaggedObjectId::read(r)?,
                catch_location: read_optional_location(r)?,
            },
            EventKind::ThreadStart => Event::ThreadStart {
                request: r.read_i32()?,
                thread: r.read_id(IdKind::Thread)?,
            },
            EventKind::ThreadDeath => Event::ThreadDeath {
                request: r.read_i32()?,
                thread: r.read_id(IdKind::Thread)?,
            },
            EventKind::ClassPrepare => Event::ClassPrepare {
                request: r.read_i32()?,
                thread: r.read_id(IdKind::Thread)?,
                type_tag: read_type_tag(r)?,
                type_id: r.read_id(IdKind::ReferenceType)?,
                signature: read_string(r)?,
                status: ClassStatus::from_bits_retain(r.read_u32()?),
            },
            EventKind::ClassUnload => Event::ClassUnload {
                request: r.read_i32()?,
                signature: read_string(r)?,
            },
            EventKind::FieldAccess => Event::FieldAccess {
                request: r.read_i32()?,
                thread: r.read_id(IdKind::Thread)?,
                location: Location::read(r)?,
                type_tag: read_type_tag(r)?,
                type_id: r.read_id(IdKind::ReferenceType)?,
                field: r.read_id(IdKind::Field)?,
                object: read_optional_object(r)?,
            },
            EventKind::FieldModification => Event::FieldModification {
                request: r.read_i32()?,
                thread: r.read_id(IdKind::Thread)?,
                location: Location::read(r)?,
                type_tag: read_type_tag(r)?,
                type_id: r.read_id(IdKind::ReferenceType)?,
                field: r.read_id(IdKind::Field)?,
                object: read_optional_object(r)?,
                value: Value::read_tagged(r)?,
            },
            EventKind::MethodEntry => Event::MethodEntry {
                request: r.read_i32()?,
                thread: r.read_id(IdKind::Thread)?,
                location: Location::read(r)?,
            },
            EventKind::MethodExit => Event::MethodExit {
                request: r.read_i32()?,
                thread: r.read_id(IdKind::Thread)?,
                location: Location::read(r)?,
            },
            EventKind::MethodExitWithReturnValue => Event::MethodExitWithReturnValue {
                request: r.read_i32()?,
                thread: r.read_id(IdKind::Thread)?,
                location: Location::read(r)?,
                value: Value::read_tagged(r)?,
            },
            EventKind::MonitorContendedEnter => Event::MonitorContendedEnter {
                request: r.read_i32()?,
                thread: r.read_id(IdKind::Thread)?,
                object: TaggedObjectId::read(r)?,
                location: Location::read(r)?,
            },
            EventKind::MonitorContendedEntered => Event::MonitorContendedEntered {
                request: r.read_i32()?,
                thread: r.read_id(IdKind::Thread)?,
                object: TaggedObjectId::read(r)?,
                location: Location::read(r)?,
            },
            EventKind::MonitorWait => Event::MonitorWait {
                request: r.read_i32()?,
                thread: r.read_id(IdKind::Thread)?,
                object: TaggedObjectId::read(r)?,
                location: Location::read(r)?,
                timeout: r.read_u64()?,
            },
            EventKind::MonitorWaited => Event::MonitorWaited {
                request: r.read_i32()?,
                thread: r.read_id(IdKind::Thread)?,
                object: TaggedObjectId::read(r)?,
                location: Location::read(r)?,
                timed_out: r.read_bool()?,
            },
            EventKind::VmStart => Event::VmStart {
                request: match r.read_i32()? {
                    0 => None,
                    id => Some(id),
                },
                thread: r.read_id(IdKind::Thread)?,
            },
            EventKind::VmDeath => Event::VmDeath {
                request: r.read_i32()?,
            },
        })
    }
}

fn read_type_tag(r: &mut JdwpReader) -> Result<TypeTag> {
    let raw = r.read_u8()?;
    TypeTag::from_wire(raw).ok_or(Error::InvalidTag(raw))
}

fn read_string(r: &mut JdwpReader) -> Result<String> {
    let len = r.read_u32()? as usize;
    Ok(String::from_utf8_lossy(r.read_bytes(len)?).into_owned())
}

/// Null locations travel at full width with a zero type-tag byte.
fn read_optional_location(r: &mut JdwpReader) -> Result<Option<Location>> {
    let raw = r.read_u8()?;
    if raw == 0 {
        r.read_id(IdKind::Class)?;
        r.read_id(IdKind::Method)?;
        r.read_u64()?;
        return Ok(None);
    }
    let type_tag = TypeTag::from_wire(raw).ok_or(Error::InvalidTag(raw))?;
    Ok(Some(Location {
        type_tag,
        class_id: r.read_id(IdKind::Class)?,
        method_id: r.read_id(IdKind::Method)?,
        index: r.read_u64()?,
    }))
}

/// Null objects travel as a tagged id with a zero id.
fn read_optional_object(r: &mut JdwpReader) -> Result<Option<TaggedObjectId>> {
    let id = TaggedObjectId::read(r)?;
    Ok((id.id != 0).then_some(id))
}

/// A parsed Composite event packet: the suspend policy the JVM applied
/// and the records it bundled.
#[derive(Debug, Clone, PartialEq)]
pub struct Composite {
    pub suspend_policy: SuspendPolicy,
    pub events: Vec<Event>,
}

impl Composite {
    /// Parses the body of a packet already classified as an event.
    ///
    /// The header must carry (command set, command) = (64, 100);
    /// anything else is a framing error.
    pub fn parse(header: &PacketHeader, body: &[u8], sizes: &IdSizes) -> Result<Self> {
        match header.meta {
            PacketMeta::Command(id) if id.is_composite_event() => {}
            _ => return Err(Error::Malformed),
        }
        let mut r = JdwpReader::new(body, *sizes);
        let raw = r.read_u8()?;
        let suspend_policy = SuspendPolicy::from_wire(raw).ok_or(Error::Malformed)?;
        let count = r.read_u32()?;
        let mut events = Vec::with_capacity((count as usize).min(1024));
        for _ in 0..count {
            events.push(Event::read(&mut r)?);
        }
        Ok(Composite {
            suspend_policy,
            events,
        })
    }
}
