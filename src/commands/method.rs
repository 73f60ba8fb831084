//! The Method command set (6).
//!
//! Method ids are only unique within their reference type, so every
//! command here takes the pair.

use super::{CommandSpec, Slot};
use crate::types::{FieldKind, IdKind};

const REF_AND_METHOD: &[Slot] = &[
    Slot::Field(FieldKind::Id(IdKind::ReferenceType)),
    Slot::Field(FieldKind::Id(IdKind::Method)),
];

pub static LINE_TABLE: CommandSpec = CommandSpec::new(6, 1, REF_AND_METHOD);

pub static VARIABLE_TABLE: CommandSpec = CommandSpec::new(6, 2, REF_AND_METHOD);

pub static BYTECODES: CommandSpec = CommandSpec::new(6, 3, REF_AND_METHOD);

pub static IS_OBSOLETE: CommandSpec = CommandSpec::new(6, 4, REF_AND_METHOD);

pub static VARIABLE_TABLE_WITH_GENERIC: CommandSpec = CommandSpec::new(6, 5, REF_AND_METHOD);
