//! The ArrayReference command set (13).

use super::{CommandSpec, Slot};
use crate::types::{FieldKind, IdKind};

const ARRAY: Slot = Slot::Field(FieldKind::Id(IdKind::Array));

pub static LENGTH: CommandSpec = CommandSpec::new(13, 1, &[ARRAY]);

/// Returns `length` elements starting at `firstIndex`, as an array
/// region in the reply.
pub static GET_VALUES: CommandSpec = CommandSpec::new(
    13,
    2,
    &[
        ARRAY,
        Slot::Field(FieldKind::Int),
        Slot::Field(FieldKind::Int),
    ],
);

/// Replaces a run of elements starting at `firstIndex`. The element
/// types are fixed by the array, so each value travels untagged.
pub static SET_VALUES: CommandSpec = CommandSpec::new(
    13,
    3,
    &[
        ARRAY,
        Slot::Field(FieldKind::Int),
        Slot::Vector(&[FieldKind::UntaggedValue]),
    ],
);
