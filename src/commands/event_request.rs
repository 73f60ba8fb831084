//! The EventRequest command set (15).
//!
//! `Set` is the one command in the protocol the generic slot walk cannot
//! express: its modifier list is a twelve-armed tagged union. The
//! [`Modifier`] sum type and [`encode_set`] handle it; the variant's
//! modKind byte is written first, then the variant's fields.

use super::{CommandSpec, Slot};
use crate::{
    codec::JdwpWriter,
    enums::{EventKind, StepDepth, StepSize, SuspendPolicy},
    types::{FieldKind, IdKind, Location},
    Result,
};

/// Requests that the JVM report events of one kind, filtered by the given
/// modifiers. Encoded by [`encode_set`], not the generic slot walk; build
/// it with [`crate::packet::CommandPacket::event_request_set`].
pub static SET: CommandSpec = CommandSpec::new(15, 1, &[]);

/// Clears one event request by kind and request id.
pub static CLEAR: CommandSpec = CommandSpec::new(
    15,
    2,
    &[Slot::Field(FieldKind::Byte), Slot::Field(FieldKind::Int)],
);

/// Removes all set breakpoints; a no-op if there are none.
pub static CLEAR_ALL_BREAKPOINTS: CommandSpec = CommandSpec::new(15, 3, &[]);

/// A filter clause restricting when a requested event fires.
///
/// Events must satisfy every modifier of their request, in order, to be
/// reported; filtering in the JVM keeps event traffic down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modifier {
    /// Report at most once, after skipping count-1 occurrences. One for a
    /// one-off event.
    Count(i32),
    /// Conditional on an expression id; reserved by the protocol.
    Conditional(i32),
    /// Only events in the given thread.
    ThreadOnly(u64),
    /// Only events whose location is in the given reference type or its
    /// subtypes.
    ClassOnly(u64),
    /// Only events in classes whose name matches the pattern; exact match
    /// or a leading/trailing `*`.
    ClassMatch(String),
    /// The negation of [`ClassMatch`](Modifier::ClassMatch).
    ClassExclude(String),
    /// Only events at the given location; breakpoint, step, exception and
    /// field events.
    LocationOnly(Location),
    /// Restricts exception events by exception type (zero means any) and
    /// by whether the exception is caught or uncaught.
    ExceptionOnly {
        exception: u64,
        caught: bool,
        uncaught: bool,
    },
    /// Only field events for the given field.
    FieldOnly { declaring: u64, field: u64 },
    /// Step granularity and direction for step events.
    Step {
        thread: u64,
        size: StepSize,
        depth: StepDepth,
    },
    /// Only events whose `this` is the given object.
    InstanceOnly(u64),
    /// Only class prepare events whose source name matches the pattern.
    SourceNameMatch(String),
}

impl Modifier {
    /// The wire discriminant, 1 through 12.
    pub fn mod_kind(&self) -> u8 {
        match self {
            Modifier::Count(_) => 1,
            Modifier::Conditional(_) => 2,
            Modifier::ThreadOnly(_) => 3,
            Modifier::ClassOnly(_) => 4,
            Modifier::ClassMatch(_) => 5,
            Modifier::ClassExclude(_) => 6,
            Modifier::LocationOnly(_) => 7,
            Modifier::ExceptionOnly { .. } => 8,
            Modifier::FieldOnly { .. } => 9,
            Modifier::Step { .. } => 10,
            Modifier::InstanceOnly(_) => 11,
            Modifier::SourceNameMatch(_) => 12,
        }
    }

    fn write(&self, w: &mut JdwpWriter) -> Result<()> {
        w.write_u8(self.mod_kind())?;
        match self {
            Modifier::Count(count) => w.write_i32(*count),
            Modifier::Conditional(expr_id) => w.write_i32(*expr_id),
            Modifier::ThreadOnly(thread) => w.write_id(IdKind::Thread, *thread),
            Modifier::ClassOnly(class) => w.write_id(IdKind::ReferenceType, *class),
            Modifier::ClassMatch(pattern) | Modifier::ClassExclude(pattern) => {
                write_pattern(pattern, w)
            }
            Modifier::LocationOnly(location) => location.write(w),
            Modifier::ExceptionOnly {
                exception,
                caught,
                uncaught,
            } => {
                w.write_id(IdKind::ReferenceType, *exception)?;
                w.write_bool(*caught)?;
                w.write_bool(*uncaught)
            }
            Modifier::FieldOnly { declaring, field } => {
                w.write_id(IdKind::ReferenceType, *declaring)?;
                w.write_id(IdKind::Field, *field)
            }
            Modifier::Step {
                thread,
                size,
                depth,
            } => {
                w.write_id(IdKind::Thread, *thread)?;
                w.write_u32((*size).into())?;
                w.write_u32((*depth).into())
            }
            Modifier::InstanceOnly(instance) => w.write_id(IdKind::Object, *instance),
            Modifier::SourceNameMatch(pattern) => write_pattern(pattern, w),
        }
    }
}

fn write_pattern(pattern: &str, w: &mut JdwpWriter) -> Result<()> {
    w.write_u32(pattern.len() as u32)?;
    w.write_bytes(pattern.as_bytes())
}

/// Body encoder for [`SET`].
pub(crate) fn encode_set(
    event_kind: EventKind,
    suspend_policy: SuspendPolicy,
    modifiers: &[Modifier],
    w: &mut JdwpWriter,
) -> Result<()> {
    w.write_u8(event_kind.into())?;
    w.write_u8(suspend_policy.into())?;
    w.write_u32(modifiers.len() as u32)?;
    for modifier in modifiers {
        modifier.write(w)?;
    }
    Ok(())
}
