//! The ObjectReference command set (9).

use super::{CommandSpec, Slot};
use crate::types::{FieldKind, IdKind};

const OBJECT: Slot = Slot::Field(FieldKind::Id(IdKind::Object));

pub static REFERENCE_TYPE: CommandSpec = CommandSpec::new(9, 1, &[OBJECT]);

/// Returns the values of one or more instance fields.
pub static GET_VALUES: CommandSpec = CommandSpec::new(
    9,
    2,
    &[OBJECT, Slot::Vector(&[FieldKind::Id(IdKind::Field)])],
);

/// Sets instance field values; like `ClassType.SetValues` the values
/// travel untagged.
pub static SET_VALUES: CommandSpec = CommandSpec::new(
    9,
    3,
    &[
        OBJECT,
        Slot::Vector(&[FieldKind::Id(IdKind::Field), FieldKind::UntaggedValue]),
    ],
);

pub static MONITOR_INFO: CommandSpec = CommandSpec::new(9, 5, &[OBJECT]);

/// Invokes an instance method; the class id picks which declaration of
/// the method to run.
pub static INVOKE_METHOD: CommandSpec = CommandSpec::new(
    9,
    6,
    &[
        OBJECT,
        Slot::Field(FieldKind::Id(IdKind::Thread)),
        Slot::Field(FieldKind::Id(IdKind::Class)),
        Slot::Field(FieldKind::Id(IdKind::Method)),
        Slot::Vector(&[FieldKind::Value]),
        Slot::Field(FieldKind::Int),
    ],
);

/// Prevents garbage collection of the object while it is debugged.
pub static DISABLE_COLLECTION: CommandSpec = CommandSpec::new(9, 7, &[OBJECT]);

pub static ENABLE_COLLECTION: CommandSpec = CommandSpec::new(9, 8, &[OBJECT]);

pub static IS_COLLECTED: CommandSpec = CommandSpec::new(9, 9, &[OBJECT]);

/// Returns objects that directly reference this one, up to the limit
/// (zero for all).
pub static REFERRING_OBJECTS: CommandSpec =
    CommandSpec::new(9, 10, &[OBJECT, Slot::Field(FieldKind::Int)]);
