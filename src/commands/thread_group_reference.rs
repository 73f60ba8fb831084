//! The ThreadGroupReference command set (12).

use super::{CommandSpec, Slot};
use crate::types::{FieldKind, IdKind};

const GROUP: Slot = Slot::Field(FieldKind::Id(IdKind::ThreadGroup));

pub static NAME: CommandSpec = CommandSpec::new(12, 1, &[GROUP]);

pub static PARENT: CommandSpec = CommandSpec::new(12, 2, &[GROUP]);

pub static CHILDREN: CommandSpec = CommandSpec::new(12, 3, &[GROUP]);
