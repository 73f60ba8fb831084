//! The VirtualMachine command set (1).

use super::{CommandSpec, Slot};
use crate::types::{FieldKind, IdKind};

/// Returns the JDWP version implemented by the target VM.
pub static VERSION: CommandSpec = CommandSpec::new(1, 1, &[]);

/// Returns reference types for all loaded classes matching the given JNI
/// signature, e.g. `"Ljava/lang/String;"`.
pub static CLASSES_BY_SIGNATURE: CommandSpec =
    CommandSpec::new(1, 2, &[Slot::Field(FieldKind::String)]);

/// Returns reference types for all classes currently loaded by the
/// target VM.
pub static ALL_CLASSES: CommandSpec = CommandSpec::new(1, 3, &[]);

/// Returns all threads currently running in the target VM.
pub static ALL_THREADS: CommandSpec = CommandSpec::new(1, 4, &[]);

pub static TOP_LEVEL_THREAD_GROUPS: CommandSpec = CommandSpec::new(1, 5, &[]);

/// Invalidates this virtual machine mirror; the JVM prepares to accept
/// another debugger connection. The pipeline tears the connection down
/// after transmitting this, since no reply is guaranteed.
pub static DISPOSE: CommandSpec = CommandSpec::new(1, 6, &[]);

/// Returns the sizes of variably-sized data types in the target VM.
/// Issued automatically by the connection bootstrap before anything else.
pub static ID_SIZES: CommandSpec = CommandSpec::new(1, 7, &[]);

pub static SUSPEND: CommandSpec = CommandSpec::new(1, 8, &[]);

pub static RESUME: CommandSpec = CommandSpec::new(1, 9, &[]);

/// Terminates the target VM with the given exit code.
pub static EXIT: CommandSpec = CommandSpec::new(1, 10, &[Slot::Field(FieldKind::Int)]);

pub static CREATE_STRING: CommandSpec = CommandSpec::new(1, 11, &[Slot::Field(FieldKind::String)]);

pub static CAPABILITIES: CommandSpec = CommandSpec::new(1, 12, &[]);

pub static CLASS_PATHS: CommandSpec = CommandSpec::new(1, 13, &[]);

/// Releases object ids so the JVM may reuse them: a vector of
/// (object id, reference count) pairs.
pub static DISPOSE_OBJECTS: CommandSpec = CommandSpec::new(
    1,
    14,
    &[Slot::Vector(&[
        FieldKind::Id(IdKind::Object),
        FieldKind::Int,
    ])],
);

pub static HOLD_EVENTS: CommandSpec = CommandSpec::new(1, 15, &[]);

pub static RELEASE_EVENTS: CommandSpec = CommandSpec::new(1, 16, &[]);

pub static CAPABILITIES_NEW: CommandSpec = CommandSpec::new(1, 17, &[]);

/// Installs new class definitions: a vector of (reference type id,
/// class-file bytes). The class-file bytes share the string wire form, a
/// 4-byte count followed by raw bytes.
pub static REDEFINE_CLASSES: CommandSpec = CommandSpec::new(
    1,
    18,
    &[Slot::Vector(&[
        FieldKind::Id(IdKind::ReferenceType),
        FieldKind::String,
    ])],
);

pub static SET_DEFAULT_STRATUM: CommandSpec =
    CommandSpec::new(1, 19, &[Slot::Field(FieldKind::String)]);

pub static ALL_CLASSES_WITH_GENERIC: CommandSpec = CommandSpec::new(1, 20, &[]);

/// Returns instance counts for each of the given reference types.
pub static INSTANCE_COUNTS: CommandSpec = CommandSpec::new(
    1,
    21,
    &[Slot::Vector(&[FieldKind::Id(IdKind::ReferenceType)])],
);
