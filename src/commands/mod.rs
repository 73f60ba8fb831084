//! Command schemas for the 17 JDWP command sets.
//!
//! A schema is data: the command-set byte, the command byte, and an
//! ordered slot list. One generic walk serializes any of them, and
//! [`decode_slots`] parses any slot list out of a reply body, so adding a
//! command is a single static table entry in the right module.

use crate::{
    codec::{JdwpReader, JdwpWriter},
    packet::CommandId,
    sizes::IdSizes,
    types::{FieldKind, FieldValue},
    Result,
};

pub mod array_reference;
pub mod array_type;
pub mod class_loader_reference;
pub mod class_object_reference;
pub mod class_type;
pub mod event;
pub mod event_request;
pub mod interface_type;
pub mod method;
pub mod object_reference;
pub mod reference_type;
pub mod stack_frame;
pub mod string_reference;
pub mod thread_group_reference;
pub mod thread_reference;
pub mod virtual_machine;

pub mod field {
    // the Field command set defines no commands
}

/// One slot of a command body: a single field, or a counted vector of
/// field tuples (a 4-byte big-endian count followed by the concatenated
/// rows).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Slot {
    Field(FieldKind),
    Vector(&'static [FieldKind]),
}

/// The value filling one [`Slot`].
#[derive(Debug, Clone, PartialEq)]
pub enum SlotValue {
    Field(FieldValue),
    Vector(Vec<Vec<FieldValue>>),
}

impl SlotValue {
    /// Shorthand for a vector slot whose rows have a single field.
    pub fn vector_of(fields: impl IntoIterator<Item = FieldValue>) -> Self {
        SlotValue::Vector(fields.into_iter().map(|f| vec![f]).collect())
    }
}

/// The declared shape of one command.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    command_set: u8,
    command: u8,
    slots: &'static [Slot],
}

impl CommandSpec {
    pub const fn new(command_set: u8, command: u8, slots: &'static [Slot]) -> Self {
        CommandSpec {
            command_set,
            command,
            slots,
        }
    }

    pub fn id(&self) -> CommandId {
        CommandId::new(self.command_set, self.command)
    }

    pub fn slots(&self) -> &'static [Slot] {
        self.slots
    }
}

/// Parses fields left-to-right out of `data` according to `slots`,
/// returning the values and the number of bytes consumed.
pub fn decode_slots(
    slots: &[Slot],
    data: &[u8],
    sizes: &IdSizes,
) -> Result<(Vec<SlotValue>, usize)> {
    let mut r = JdwpReader::new(data, *sizes);
    let mut out = Vec::with_capacity(slots.len());
    for slot in slots {
        match slot {
            Slot::Field(kind) => out.push(SlotValue::Field(kind.deserialize(&mut r)?)),
            Slot::Vector(kinds) => {
                let count = r.read_u32()?;
                let mut rows = Vec::with_capacity((count as usize).min(1024));
                for _ in 0..count {
                    let row = kinds
                        .iter()
                        .map(|kind| kind.deserialize(&mut r))
                        .collect::<Result<Vec<_>>>()?;
                    rows.push(row);
                }
                out.push(SlotValue::Vector(rows));
            }
        }
    }
    Ok((out, r.position()))
}

/// Writes slot values in order; vectors get their 4-byte count prefix.
///
/// Kind agreement with the schema was checked at packet construction, so
/// each value serializes by its own variant here.
pub(crate) fn encode_slot_values(values: &[SlotValue], w: &mut JdwpWriter) -> Result<()> {
    for value in values {
        match value {
            SlotValue::Field(field) => field.serialize(w)?,
            SlotValue::Vector(rows) => {
                w.write_u32(rows.len() as u32)?;
                for row in rows {
                    for field in row {
                        field.serialize(w)?;
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IdKind;

    #[test]
    fn slot_decode_reports_consumed_bytes() {
        let sizes = IdSizes::new(8, 8, 4, 8, 8).unwrap();
        let slots = [
            Slot::Field(FieldKind::Int),
            Slot::Vector(&[FieldKind::Id(IdKind::Object), FieldKind::Boolean]),
        ];
        // int 7, then two rows of (4-byte object id, bool)
        let data = [
            0, 0, 0, 7, // int
            0, 0, 0, 2, // count
            0, 0, 0, 1, 1, // row 0
            0, 0, 0, 2, 0, // row 1
        ];
        let (values, consumed) = decode_slots(&slots, &data, &sizes).unwrap();
        assert_eq!(consumed, data.len());
        assert_eq!(
            values,
            vec![
                SlotValue::Field(FieldValue::Int(7)),
                SlotValue::Vector(vec![
                    vec![FieldValue::Id(IdKind::Object, 1), FieldValue::Boolean(true)],
                    vec![FieldValue::Id(IdKind::Object, 2), FieldValue::Boolean(false)],
                ]),
            ]
        );
    }

    #[test]
    fn vector_count_is_honored_not_guessed() {
        let sizes = IdSizes::all_eight();
        let slots = [Slot::Vector(&[FieldKind::Int])];
        // declared count 2, only one element present
        let data = [0, 0, 0, 2, 0, 0, 0, 5];
        assert!(decode_slots(&slots, &data, &sizes).is_err());
    }
}
