//! The InterfaceType command set (5).

use super::{CommandSpec, Slot};
use crate::types::{FieldKind, IdKind};

/// Invokes a static interface method. Since JDWP version 1.8.
pub static INVOKE_METHOD: CommandSpec = CommandSpec::new(
    5,
    1,
    &[
        Slot::Field(FieldKind::Id(IdKind::Interface)),
        Slot::Field(FieldKind::Id(IdKind::Thread)),
        Slot::Field(FieldKind::Id(IdKind::Method)),
        Slot::Vector(&[FieldKind::Value]),
        Slot::Field(FieldKind::Int),
    ],
);
