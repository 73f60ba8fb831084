//! The ReferenceType command set (2).

use super::{CommandSpec, Slot};
use crate::types::{FieldKind, IdKind};

const REF_TYPE: Slot = Slot::Field(FieldKind::Id(IdKind::ReferenceType));

pub static SIGNATURE: CommandSpec = CommandSpec::new(2, 1, &[REF_TYPE]);

pub static CLASS_LOADER: CommandSpec = CommandSpec::new(2, 2, &[REF_TYPE]);

/// Returns the modifier bits (public, final, ...) of a reference type.
pub static MODIFIERS: CommandSpec = CommandSpec::new(2, 3, &[REF_TYPE]);

pub static FIELDS: CommandSpec = CommandSpec::new(2, 4, &[REF_TYPE]);

pub static METHODS: CommandSpec = CommandSpec::new(2, 5, &[REF_TYPE]);

/// Returns the values of one or more static fields of the type.
pub static GET_VALUES: CommandSpec = CommandSpec::new(
    2,
    6,
    &[REF_TYPE, Slot::Vector(&[FieldKind::Id(IdKind::Field)])],
);

pub static SOURCE_FILE: CommandSpec = CommandSpec::new(2, 7, &[REF_TYPE]);

pub static NESTED_TYPES: CommandSpec = CommandSpec::new(2, 8, &[REF_TYPE]);

pub static STATUS: CommandSpec = CommandSpec::new(2, 9, &[REF_TYPE]);

pub static INTERFACES: CommandSpec = CommandSpec::new(2, 10, &[REF_TYPE]);

pub static CLASS_OBJECT: CommandSpec = CommandSpec::new(2, 11, &[REF_TYPE]);

pub static SOURCE_DEBUG_EXTENSION: CommandSpec = CommandSpec::new(2, 12, &[REF_TYPE]);

pub static SIGNATURE_WITH_GENERIC: CommandSpec = CommandSpec::new(2, 13, &[REF_TYPE]);

pub static FIELDS_WITH_GENERIC: CommandSpec = CommandSpec::new(2, 14, &[REF_TYPE]);

pub static METHODS_WITH_GENERIC: CommandSpec = CommandSpec::new(2, 15, &[REF_TYPE]);

/// Returns up to `maxInstances` reachable instances of the type; zero
/// means all of them.
pub static INSTANCES: CommandSpec =
    CommandSpec::new(2, 16, &[REF_TYPE, Slot::Field(FieldKind::Int)]);

pub static CLASS_FILE_VERSION: CommandSpec = CommandSpec::new(2, 17, &[REF_TYPE]);

pub static CONSTANT_POOL: CommandSpec = CommandSpec::new(2, 18, &[REF_TYPE]);
