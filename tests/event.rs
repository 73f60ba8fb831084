//! Composite event parsing against hand-assembled wire bytes.

use jdwp_wire::{
    commands::event::{Composite, Event},
    enums::{ClassStatus, SuspendPolicy, TypeTag},
    error::Error,
    packet::{CommandId, PacketHeader, PacketMeta},
    types::Location,
    IdSizes,
};

fn event_header(body_len: usize) -> PacketHeader {
    PacketHeader {
        length: 11 + body_len as u32,
        id: 0x7000_0001,
        meta: PacketMeta::Command(CommandId::new(64, 100)),
    }
}

fn composite_body(suspend_policy: u8, records: &[Vec<u8>]) -> Vec<u8> {
    let mut body = vec![suspend_policy];
    body.extend_from_slice(&(records.len() as u32).to_be_bytes());
    for record in records {
        body.extend_from_slice(record);
    }
    body
}

fn breakpoint_record(request: i32, thread: u64) -> Vec<u8> {
    let mut record = vec![2];
    record.extend_from_slice(&request.to_be_bytes());
    record.extend_from_slice(&thread.to_be_bytes());
    record.push(1); // class type tag
    record.extend_from_slice(&0x10u64.to_be_bytes());
    record.extend_from_slice(&0x20u64.to_be_bytes());
    record.extend_from_slice(&0x30u64.to_be_bytes());
    record
}

#[test]
fn composite_with_several_records() {
    let class_unload = {
        let mut record = vec![9];
        record.extend_from_slice(&99i32.to_be_bytes());
        record.extend_from_slice(&6u32.to_be_bytes());
        record.extend_from_slice(b"LGone;");
        record
    };
    let vm_start = {
        let mut record = vec![90];
        record.extend_from_slice(&0i32.to_be_bytes());
        record.extend_from_slice(&5u64.to_be_bytes());
        record
    };
    let body = composite_body(2, &[breakpoint_record(7, 5), class_unload, vm_start]);

    let composite =
        Composite::parse(&event_header(body.len()), &body, &IdSizes::all_eight()).unwrap();

    assert_eq!(composite.suspend_policy, SuspendPolicy::All);
    assert_eq!(
        composite.events,
        vec![
            Event::Breakpoint {
                request: 7,
                thread: 5,
                location: Location {
                    type_tag: TypeTag::Class,
                    class_id: 0x10,
                    method_id: 0x20,
                    index: 0x30,
                },
            },
            Event::ClassUnload {
                request: 99,
                signature: "LGone;".to_owned(),
            },
            Event::VmStart {
                request: None,
                thread: 5,
            },
        ]
    );
}

#[test]
fn class_prepare_carries_status_flags() {
    let record = {
        let mut record = vec![8];
        record.extend_from_slice(&3i32.to_be_bytes());
        record.extend_from_slice(&5u64.to_be_bytes());
        record.push(1); // class
        record.extend_from_slice(&0x40u64.to_be_bytes());
        record.extend_from_slice(&7u32.to_be_bytes());
        record.extend_from_slice(b"LReady;");
        record.extend_from_slice(&7u32.to_be_bytes()); // verified | prepared | initialized
        record
    };
    let body = composite_body(0, &[record]);

    let composite =
        Composite::parse(&event_header(body.len()), &body, &IdSizes::all_eight()).unwrap();

    assert_eq!(
        composite.events,
        vec![Event::ClassPrepare {
            request: 3,
            thread: 5,
            type_tag: TypeTag::Class,
            type_id: 0x40,
            signature: "LReady;".to_owned(),
            status: ClassStatus::VERIFIED | ClassStatus::PREPARED | ClassStatus::INITIALIZED,
        }]
    );
}

#[test]
fn uncaught_exception_has_no_catch_location() {
    let record = {
        let mut record = vec![4];
        record.extend_from_slice(&11i32.to_be_bytes());
        record.extend_from_slice(&5u64.to_be_bytes());
        record.push(1); // throw location
        record.extend_from_slice(&0x10u64.to_be_bytes());
        record.extend_from_slice(&0x20u64.to_be_bytes());
        record.extend_from_slice(&0x30u64.to_be_bytes());
        record.push(b'L'); // the exception object
        record.extend_from_slice(&0x99u64.to_be_bytes());
        // null catch location: zero type tag, zero ids, full width
        record.push(0);
        record.extend_from_slice(&0u64.to_be_bytes());
        record.extend_from_slice(&0u64.to_be_bytes());
        record.extend_from_slice(&0u64.to_be_bytes());
        record
    };
    let body = composite_body(1, &[record]);

    let composite =
        Composite::parse(&event_header(body.len()), &body, &IdSizes::all_eight()).unwrap();

    match &composite.events[..] {
        [Event::Exception {
            exception,
            catch_location,
            ..
        }] => {
            assert_eq!(exception.id, 0x99);
            assert_eq!(*catch_location, None);
        }
        other => panic!("parsed {other:?}"),
    }
}

#[test]
fn unknown_event_kind_fails() {
    // kind 5 (UserDefined) is not part of the composite vocabulary
    let mut record = vec![5];
    record.extend_from_slice(&1i32.to_be_bytes());
    let body = composite_body(0, &[record]);

    assert!(matches!(
        Composite::parse(&event_header(body.len()), &body, &IdSizes::all_eight()),
        Err(Error::InvalidEventKind(5))
    ));
}

#[test]
fn only_the_composite_command_parses() {
    let body = composite_body(0, &[]);
    let header = PacketHeader {
        length: 11 + body.len() as u32,
        id: 1,
        meta: PacketMeta::Command(CommandId::new(1, 1)),
    };
    assert!(matches!(
        Composite::parse(&header, &body, &IdSizes::all_eight()),
        Err(Error::Malformed)
    ));
}

#[test]
fn truncated_record_fails() {
    // declares two records but carries one
    let body = {
        let mut body = vec![0];
        body.extend_from_slice(&2u32.to_be_bytes());
        body.extend_from_slice(&breakpoint_record(1, 2));
        body
    };
    assert!(matches!(
        Composite::parse(&event_header(body.len()), &body, &IdSizes::all_eight()),
        Err(Error::Truncated)
    ));
}

#[test]
fn debug_rendering_is_stable() {
    let body = composite_body(0, &[breakpoint_record(7, 5)]);
    let composite =
        Composite::parse(&event_header(body.len()), &body, &IdSizes::all_eight()).unwrap();

    insta::assert_debug_snapshot!(composite, @r###"
    Composite {
        suspend_policy: None,
        events: [
            Breakpoint {
                request: 7,
                thread: 5,
                location: Location {
                    type_tag: Class,
                    class_id: 16,
                    method_id: 32,
                    index: 48,
                },
            },
        ],
    }
    "###);
}
