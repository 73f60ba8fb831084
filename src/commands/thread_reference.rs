//! The ThreadReference command set (11).

use super::{CommandSpec, Slot};
use crate::types::{FieldKind, IdKind};

const THREAD: Slot = Slot::Field(FieldKind::Id(IdKind::Thread));

pub static NAME: CommandSpec = CommandSpec::new(11, 1, &[THREAD]);

/// Suspends the thread; suspensions nest, resume as many times as you
/// suspended.
pub static SUSPEND: CommandSpec = CommandSpec::new(11, 2, &[THREAD]);

pub static RESUME: CommandSpec = CommandSpec::new(11, 3, &[THREAD]);

pub static STATUS: CommandSpec = CommandSpec::new(11, 4, &[THREAD]);

pub static THREAD_GROUP: CommandSpec = CommandSpec::new(11, 5, &[THREAD]);

/// Returns `length` stack frames starting at `startFrame`; -1 length
/// means all remaining frames.
pub static FRAMES: CommandSpec = CommandSpec::new(
    11,
    6,
    &[
        THREAD,
        Slot::Field(FieldKind::Int),
        Slot::Field(FieldKind::Int),
    ],
);

pub static FRAME_COUNT: CommandSpec = CommandSpec::new(11, 7, &[THREAD]);

pub static OWNED_MONITORS: CommandSpec = CommandSpec::new(11, 8, &[THREAD]);

pub static CURRENT_CONTENDED_MONITOR: CommandSpec = CommandSpec::new(11, 9, &[THREAD]);

/// Stops the thread with the given throwable object, as if by
/// `Thread.stop`.
pub static STOP: CommandSpec =
    CommandSpec::new(11, 10, &[THREAD, Slot::Field(FieldKind::Id(IdKind::Object))]);

pub static INTERRUPT: CommandSpec = CommandSpec::new(11, 11, &[THREAD]);

pub static SUSPEND_COUNT: CommandSpec = CommandSpec::new(11, 12, &[THREAD]);

pub static OWNED_MONITORS_STACK_DEPTH_INFO: CommandSpec = CommandSpec::new(11, 13, &[THREAD]);

/// Forces the topmost frame to return early with the given value.
pub static FORCE_EARLY_RETURN: CommandSpec =
    CommandSpec::new(11, 14, &[THREAD, Slot::Field(FieldKind::Value)]);
