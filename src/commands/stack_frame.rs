//! The StackFrame command set (16).

use super::{CommandSpec, Slot};
use crate::types::{FieldKind, IdKind};

const THREAD: Slot = Slot::Field(FieldKind::Id(IdKind::Thread));
const FRAME: Slot = Slot::Field(FieldKind::Id(IdKind::Frame));

/// Reads local variables: a vector of (slot index, signature tag byte)
/// picks which locals, the reply carries their tagged values.
pub static GET_VALUES: CommandSpec = CommandSpec::new(
    16,
    1,
    &[
        THREAD,
        FRAME,
        Slot::Vector(&[FieldKind::Int, FieldKind::Byte]),
    ],
);

/// Writes local variables: a vector of (slot index, tagged value).
pub static SET_VALUES: CommandSpec = CommandSpec::new(
    16,
    2,
    &[
        THREAD,
        FRAME,
        Slot::Vector(&[FieldKind::Int, FieldKind::Value]),
    ],
);

/// Returns the `this` object of the frame, or the null object for static
/// and native methods.
pub static THIS_OBJECT: CommandSpec = CommandSpec::new(16, 3, &[THREAD, FRAME]);

/// Pops frames up to and including the given one. The thread must be
/// suspended and the frames must not be native.
pub static POP_FRAMES: CommandSpec = CommandSpec::new(16, 4, &[THREAD, FRAME]);
