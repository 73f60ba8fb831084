//! The StringReference command set (10).

use super::{CommandSpec, Slot};
use crate::types::{FieldKind, IdKind};

/// Returns the characters of the string object.
pub static VALUE: CommandSpec =
    CommandSpec::new(10, 1, &[Slot::Field(FieldKind::Id(IdKind::String))]);
