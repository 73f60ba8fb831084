//! Enums with fixed wire representations, straight from the JDWP
//! specification.
//!
//! Each one is a plain repr-typed enum plus a fallible from-wire
//! conversion; the caller picks the error to report for an unknown raw
//! value, since that differs by context (a bad value tag is not the same
//! failure as a bad event kind).

use std::fmt::{Display, Formatter};

use bitflags::bitflags;

macro_rules! wire_enum {
    (
        $(#[$outer:meta])*
        $name:ident: $repr:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[repr($repr)]
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value,)*
        }

        impl $name {
            /// Maps a raw wire value back to the enum, or `None` if the
            /// peer sent something this crate does not know.
            pub fn from_wire(raw: $repr) -> Option<Self> {
                match raw {
                    $($value => Some($name::$variant),)*
                    _ => None,
                }
            }
        }

        impl From<$name> for $repr {
            fn from(v: $name) -> $repr {
                v as $repr
            }
        }
    };
    (
        $(#[$outer:meta])*
        $name:ident: $repr:ident | Display {
            $($variant:ident = $value:literal / $descr:literal),* $(,)?
        }
    ) => {
        wire_enum! {
            $(#[$outer])*
            $name: $repr {
                $(#[doc = $descr] $variant = $value,)*
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(match self {
                    $($name::$variant => $descr,)*
                })
            }
        }
    };
}

wire_enum! {
    /// JDWP reply error codes, with the description sentences the
    /// specification gives for each.
    ErrorCode: u16 | Display {
        None = 0 / "No error has occurred",
        InvalidThread = 10 / "Passed thread is null, is not a valid thread or has exited",
        InvalidThreadGroup = 11 / "Thread group invalid",
        InvalidPriority = 12 / "Invalid priority",
        ThreadNotSuspended = 13 / "If the specified thread has not been suspended by an event",
        ThreadSuspended = 14 / "Thread already suspended",
        ThreadNotAlive = 15 / "Thread has not been started or is now dead",
        InvalidObject = 20 / "If this reference type has been unloaded and garbage collected",
        InvalidClass = 21 / "Invalid class",
        ClassNotPrepared = 22 / "Class has been loaded but not yet prepared",
        InvalidMethodid = 23 / "Invalid method",
        InvalidLocation = 24 / "Invalid location",
        InvalidFieldid = 25 / "Invalid field",
        InvalidFrameid = 30 / "Invalid jframeID",
        NoMoreFrames = 31 / "There are no more Java or JNI frames on the call stack",
        OpaqueFrame = 32 / "Information about the frame is not available",
        NotCurrentFrame = 33 / "Operation can only be performed on current frame",
        TypeMismatch = 34 / "The variable is not an appropriate type for the function used",
        InvalidSlot = 35 / "Invalid slot",
        Duplicate = 40 / "Item already set",
        NotFound = 41 / "Desired element not found",
        InvalidMonitor = 50 / "Invalid monitor",
        NotMonitorOwner = 51 / "This thread doesn't own the monitor",
        Interrupt = 52 / "The call has been interrupted before completion",
        InvalidClassFormat = 60 / "The virtual machine attempted to read a class file and determined that the file is malformed or otherwise cannot be interpreted as a class file",
        CircularClassDefinition = 61 / "A circularity has been detected while initializing a class",
        FailsVerification = 62 / "The verifier detected that a class file, though well formed, contained some sort of internal inconsistency or security problem",
        AddMethodNotImplemented = 63 / "Adding methods has not been implemented",
        SchemaChangeNotImplemented = 64 / "Schema change has not been implemented",
        InvalidTypestate = 65 / "The state of the thread has been modified, and is now inconsistent",
        HierarchyChangeNotImplemented = 66 / "A direct superclass is different for the new class version, or the set of directly implemented interfaces is different and canUnrestrictedlyRedefineClasses is false",
        DeleteMethodNotImplemented = 67 / "The new class version does not declare a method declared in the old class version and canUnrestrictedlyRedefineClasses is false",
        UnsupportedVersion = 68 / "A class file has a version number not supported by this VM",
        NamesDontMatch = 69 / "The class name defined in the new class file is different from the name in the old class object",
        ClassModifiersChangeNotImplemented = 70 / "The new class version has different modifiers and canUnrestrictedlyRedefineClasses is false",
        MethodModifiersChangeNotImplemented = 71 / "A method in the new class version has different modifiers than its counterpart in the old class version and canUnrestrictedlyRedefineClasses is false",
        NotImplemented = 99 / "The functionality is not implemented in this virtual machine",
        NullPointer = 100 / "Invalid pointer",
        AbsentInformation = 101 / "Desired information is not available",
        InvalidEventType = 102 / "The specified event type id is not recognized",
        IllegalArgument = 103 / "Illegal argument",
        OutOfMemory = 110 / "The function needed to allocate memory and no more memory was available for allocation",
        AccessDenied = 111 / "Debugging has not been enabled in this virtual machine. JVMTI cannot be used",
        VmDead = 112 / "The virtual machine is not running",
        Internal = 113 / "An unexpected internal error has occurred",
        UnattachedThread = 115 / "The thread being used to call this function is not attached to the virtual machine. Calls must be made from attached threads",
        InvalidTag = 500 / "object type id or class tag",
        AlreadyInvoking = 502 / "Previous invoke not complete",
        InvalidIndex = 503 / "Index is invalid",
        InvalidLength = 504 / "The length is invalid",
        InvalidString = 506 / "The string is invalid",
        InvalidClassLoader = 507 / "The class loader is invalid",
        InvalidArray = 508 / "The array is invalid",
        TransportLoad = 509 / "Unable to load the transport",
        TransportInit = 510 / "Unable to initialize the transport",
        NativeMethod = 511 / "NATIVE_METHOD",
        InvalidCount = 512 / "The count is invalid",
    }
}

wire_enum! {
    /// Kinds of event records a Composite event can carry.
    EventKind: u8 {
        SingleStep = 1,
        Breakpoint = 2,
        FramePop = 3,
        Exception = 4,
        ThreadStart = 6,
        ThreadDeath = 7,
        ClassPrepare = 8,
        ClassUnload = 9,
        FieldAccess = 20,
        FieldModification = 21,
        MethodEntry = 40,
        MethodExit = 41,
        MethodExitWithReturnValue = 42,
        MonitorContendedEnter = 43,
        MonitorContendedEntered = 44,
        MonitorWait = 45,
        MonitorWaited = 46,
        VmStart = 90,
        VmDeath = 99,
    }
}

wire_enum! {
    /// One-byte type tags naming the runtime type of a value.
    ///
    /// The raw values are the ASCII signature characters.
    Tag: u8 {
        /// `[` - an array object (objectID size)
        Array = 91,
        /// `B` - a byte value (1 byte)
        Byte = 66,
        /// `C` - a character value (2 bytes)
        Char = 67,
        /// `L` - an object (objectID size)
        Object = 76,
        /// `F` - a float value (4 bytes)
        Float = 70,
        /// `D` - a double value (8 bytes)
        Double = 68,
        /// `I` - an int value (4 bytes)
        Int = 73,
        /// `J` - a long value (8 bytes)
        Long = 74,
        /// `S` - a short value (2 bytes)
        Short = 83,
        /// `V` - a void value (no bytes)
        Void = 86,
        /// `Z` - a boolean value (1 byte)
        Boolean = 90,
        /// `s` - a String object (objectID size)
        String = 115,
        /// `t` - a Thread object (objectID size)
        Thread = 116,
        /// `g` - a ThreadGroup object (objectID size)
        ThreadGroup = 103,
        /// `l` - a ClassLoader object (objectID size)
        ClassLoader = 108,
        /// `c` - a class object object (objectID size)
        ClassObject = 99,
    }
}

impl Tag {
    /// Whether a value with this tag is an object id on the wire.
    pub fn is_object_kind(self) -> bool {
        matches!(
            self,
            Tag::Object
                | Tag::Array
                | Tag::String
                | Tag::Thread
                | Tag::ThreadGroup
                | Tag::ClassLoader
                | Tag::ClassObject
        )
    }
}

wire_enum! {
    /// Discriminates classes, interfaces and array types in locations and
    /// tagged reference-type ids.
    TypeTag: u8 {
        /// The reference type is a class
        Class = 1,
        /// The reference type is an interface
        Interface = 2,
        /// The reference type is an array
        Array = 3,
    }
}

wire_enum! {
    /// What the JVM suspends when a requested event fires.
    SuspendPolicy: u8 {
        /// Suspend no threads
        None = 0,
        /// Suspend only the event thread
        EventThread = 1,
        /// Suspend all threads
        All = 2,
    }
}

wire_enum! {
    /// Granularity of a step request, used by the Step modifier.
    StepSize: u32 {
        /// Step by the minimum possible amount, often a bytecode instruction
        Min = 0,
        /// Step to the next source line, or a minimum step where there is no line info
        Line = 1,
    }
}

wire_enum! {
    /// Call-stack direction of a step request, used by the Step modifier.
    StepDepth: u32 {
        /// Step into any method calls
        Into = 0,
        /// Step over any method calls
        Over = 1,
        /// Step out of the current method
        Out = 2,
    }
}

bitflags! {
    /// Status word reported for a reference type in ClassPrepare events.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct ClassStatus: u32 {
        const VERIFIED = 1;
        const PREPARED = 2;
        const INITIALIZED = 4;
        const ERROR = 8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_round_trips() {
        for raw in [0u16, 10, 35, 71, 115, 500, 512] {
            let code = ErrorCode::from_wire(raw).unwrap();
            assert_eq!(u16::from(code), raw);
        }
        assert_eq!(ErrorCode::from_wire(1), None);
        assert_eq!(ErrorCode::from_wire(513), None);

        assert_eq!(Tag::from_wire(b'I'), Some(Tag::Int));
        assert_eq!(Tag::from_wire(b'['), Some(Tag::Array));
        assert_eq!(Tag::from_wire(b'x'), None);

        assert_eq!(EventKind::from_wire(90), Some(EventKind::VmStart));
        assert_eq!(EventKind::from_wire(5), None);
    }

    #[test]
    fn object_kinds() {
        assert!(Tag::Object.is_object_kind());
        assert!(Tag::Thread.is_object_kind());
        assert!(!Tag::Int.is_object_kind());
        assert!(!Tag::Void.is_object_kind());
    }

    #[test]
    fn descriptions() {
        assert_eq!(
            ErrorCode::VmDead.to_string(),
            "The virtual machine is not running"
        );
        assert_eq!(ErrorCode::InvalidCount.to_string(), "The count is invalid");
    }
}
