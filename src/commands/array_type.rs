//! The ArrayType command set (4).

use super::{CommandSpec, Slot};
use crate::types::{FieldKind, IdKind};

/// Creates a new array of the given type and length.
pub static NEW_INSTANCE: CommandSpec = CommandSpec::new(
    4,
    1,
    &[
        Slot::Field(FieldKind::Id(IdKind::ArrayType)),
        Slot::Field(FieldKind::Int),
    ],
);
