//! Handler registration and event fan-out.

use std::sync::Arc;

use crate::commands::event::{Composite, Event};

/// A subscriber for JVM events.
///
/// Override the methods for the kinds you care about; every unoverridden
/// kind falls through to [`on_event`](EventHandler::on_event), and the
/// default of that drops the event. Handlers run on the connection's
/// reader thread, so they must not block indefinitely: nothing else is
/// read from the JVM until they return.
#[allow(unused_variables)]
pub trait EventHandler: Send + Sync {
    /// Catch-all for kinds without their own override.
    fn on_event(&self, event: &Event) {}

    fn on_single_step(&self, event: &Event) {
        self.on_event(event)
    }

    fn on_breakpoint(&self, event: &Event) {
        self.on_event(event)
    }

    fn on_frame_pop(&self, event: &Event) {
        self.on_event(event)
    }

    fn on_exception(&self, event: &Event) {
        self.on_event(event)
    }

    fn on_thread_start(&self, event: &Event) {
        self.on_event(event)
    }

    fn on_thread_death(&self, event: &Event) {
        self.on_event(event)
    }

    fn on_class_prepare(&self, event: &Event) {
        self.on_event(event)
    }

    fn on_class_unload(&self, event: &Event) {
        self.on_event(event)
    }

    fn on_field_access(&self, event: &Event) {
        self.on_event(event)
    }

    fn on_field_modification(&self, event: &Event) {
        self.on_event(event)
    }

    fn on_method_entry(&self, event: &Event) {
        self.on_event(event)
    }

    fn on_method_exit(&self, event: &Event) {
        self.on_event(event)
    }

    fn on_method_exit_with_return_value(&self, event: &Event) {
        self.on_event(event)
    }

    fn on_monitor_contended_enter(&self, event: &Event) {
        self.on_event(event)
    }

    fn on_monitor_contended_entered(&self, event: &Event) {
        self.on_event(event)
    }

    fn on_monitor_wait(&self, event: &Event) {
        self.on_event(event)
    }

    fn on_monitor_waited(&self, event: &Event) {
        self.on_event(event)
    }

    fn on_vm_start(&self, event: &Event) {
        self.on_event(event)
    }

    fn on_vm_death(&self, event: &Event) {
        self.on_event(event)
    }
}

/// Delivers every record of `composite` to every handler: records in
/// composite order, handlers in registration order within each record.
pub(crate) fn dispatch(handlers: &[Arc<dyn EventHandler>], composite: &Composite) {
    for event in &composite.events {
        for handler in handlers {
            route(handler.as_ref(), event);
        }
    }
}

fn route(handler: &dyn EventHandler, event: &Event) {
    match event {
        Event::SingleStep { .. } => handler.on_single_step(event),
        Event::Breakpoint { .. } => handler.on_breakpoint(event),
        Event::FramePop { .. } => handler.on_frame_pop(event),
        Event::Exception { .. } => handler.on_exception(event),
        Event::ThreadStart { .. } => handler.on_thread_start(event),
        Event::ThreadDeath { .. } => handler.on_thread_death(event),
        Event::ClassPrepare { .. } => handler.on_class_prepare(event),
        Event::ClassUnload { .. } => handler.on_class_unload(event),
        Event::FieldAccess { .. } => handler.on_field_access(event),
        Event::FieldModification { .. } => handler.on_field_modification(event),
        Event::MethodEntry { .. } => handler.on_method_entry(event),
        Event::MethodExit { .. } => handler.on_method_exit(event),
        Event::MethodExitWithReturnValue { .. } => handler.on_method_exit_with_return_value(event),
        Event::MonitorContendedEnter { .. } => handler.on_monitor_contended_enter(event),
        Event::MonitorContendedEntered { .. } => handler.on_monitor_contended_entered(event),
        Event::MonitorWait { .. } => handler.on_monitor_wait(event),
        Event::MonitorWaited { .. } => handler.on_monitor_waited(event),
        Event::VmStart { .. } => handler.on_vm_start(event),
        Event::VmDeath { .. } => handler.on_vm_death(event),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::enums::{EventKind, SuspendPolicy};

    #[derive(Debug, Default)]
    struct Recorder {
        specific: Mutex<Vec<EventKind>>,
        fallback: Mutex<Vec<EventKind>>,
    }

    impl EventHandler for Recorder {
        fn on_event(&self, event: &Event) {
            self.fallback.lock().unwrap().push(event.kind());
        }

        fn on_breakpoint(&self, event: &Event) {
            self.specific.lock().unwrap().push(event.kind());
        }
    }

    #[test]
    fn overridden_kind_does_not_hit_the_fallback() {
        let composite = Composite {
            suspend_policy: SuspendPolicy::None,
            events: vec![
                Event::VmDeath { request: 1 },
                Event::Breakpoint {
                    request: 2,
                    thread: 3,
                    location: crate::types::Location {
                        type_tag: crate::enums::TypeTag::Class,
                        class_id: 0,
                        method_id: 0,
                        index: 0,
                    },
                },
            ],
        };

        let recorder = Arc::new(Recorder::default());
        let handlers: Vec<Arc<dyn EventHandler>> = vec![recorder.clone()];
        dispatch(&handlers, &composite);

        assert_eq!(*recorder.specific.lock().unwrap(), [EventKind::Breakpoint]);
        assert_eq!(*recorder.fallback.lock().unwrap(), [EventKind::VmDeath]);
    }
}
