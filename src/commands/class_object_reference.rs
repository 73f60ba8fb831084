//! The ClassObjectReference command set (17).

use super::{CommandSpec, Slot};
use crate::types::{FieldKind, IdKind};

/// Returns the reference type mirrored by a `java.lang.Class` instance.
pub static REFLECTED_TYPE: CommandSpec =
    CommandSpec::new(17, 1, &[Slot::Field(FieldKind::Id(IdKind::ClassObject))]);
