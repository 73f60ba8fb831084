//! The ClassType command set (3).

use super::{CommandSpec, Slot};
use crate::types::{FieldKind, IdKind};

pub static SUPERCLASS: CommandSpec =
    CommandSpec::new(3, 1, &[Slot::Field(FieldKind::Id(IdKind::Class))]);

/// Sets static field values. The wire form carries each value untagged:
/// the JVM already knows every field's declared type, so the schema uses
/// [`FieldKind::UntaggedValue`] where the generic encoding would
/// otherwise tag.
pub static SET_VALUES: CommandSpec = CommandSpec::new(
    3,
    2,
    &[
        Slot::Field(FieldKind::Id(IdKind::Class)),
        Slot::Vector(&[FieldKind::Id(IdKind::Field), FieldKind::UntaggedValue]),
    ],
);

/// Invokes a static method; arguments are tagged values, options is the
/// invoke-options word.
pub static INVOKE_METHOD: CommandSpec = CommandSpec::new(
    3,
    3,
    &[
        Slot::Field(FieldKind::Id(IdKind::Class)),
        Slot::Field(FieldKind::Id(IdKind::Thread)),
        Slot::Field(FieldKind::Id(IdKind::Method)),
        Slot::Vector(&[FieldKind::Value]),
        Slot::Field(FieldKind::Int),
    ],
);

/// Creates a new instance by invoking a constructor.
pub static NEW_INSTANCE: CommandSpec = CommandSpec::new(
    3,
    4,
    &[
        Slot::Field(FieldKind::Id(IdKind::Class)),
        Slot::Field(FieldKind::Id(IdKind::Thread)),
        Slot::Field(FieldKind::Id(IdKind::Method)),
        Slot::Vector(&[FieldKind::Value]),
        Slot::Field(FieldKind::Int),
    ],
);
