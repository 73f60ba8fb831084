//! The ClassLoaderReference command set (14).

use super::{CommandSpec, Slot};
use crate::types::{FieldKind, IdKind};

/// Returns all reference types this loader can return by name, whether
/// it defined them or delegated.
pub static VISIBLE_CLASSES: CommandSpec =
    CommandSpec::new(14, 1, &[Slot::Field(FieldKind::Id(IdKind::ClassLoader))]);
