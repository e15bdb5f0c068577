//! Opaque descriptor handles and kind classification.
//!
//! Every symbol the [`crate::metadata::provider::DescriptorProvider`] knows about is addressed
//! through a [`Descriptor`] handle. The handle carries no structure of its own; all meaning
//! (kind, name, owning namespace, children) comes from asking the provider. This mirrors how
//! the underlying introspection database hands out blob references rather than parsed records.
//!
//! # Key Types
//! - [`Descriptor`] - Opaque handle into the provider's descriptor space
//! - [`NativeTypeId`] - Identity of a registered native type
//! - [`DescriptorKind`] - Closed classification used for load dispatch
//! - [`CallableFlags`] - Shape bits for functions and methods

use std::fmt;

use bitflags::bitflags;
use strum::{Display, EnumIter};

/// An opaque handle referencing one descriptor in the provider's database.
///
/// Descriptors are cheap to copy and only meaningful when presented back to the
/// provider that issued them. The library never inspects the raw value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Descriptor(pub u32);

impl Descriptor {
    /// Creates a new descriptor handle from a raw 32-bit value
    #[must_use]
    pub fn new(value: u32) -> Self {
        Descriptor(value)
    }

    /// Returns the raw handle value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Descriptor {
    fn from(value: u32) -> Self {
        Descriptor(value)
    }
}

impl From<Descriptor> for u32 {
    fn from(desc: Descriptor) -> Self {
        desc.0
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Descriptor(0x{:08x})", self.0)
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

/// Identity of a type registered with the native runtime.
///
/// Used by the opaque runtime for instance construction and checked casts, and
/// exposed on every resolved compound as header metadata.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NativeTypeId(pub u64);

impl NativeTypeId {
    /// Creates a native type id from a raw value
    #[must_use]
    pub fn new(value: u64) -> Self {
        NativeTypeId(value)
    }

    /// Returns the raw id value
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns true if this is the unregistered sentinel (value 0)
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for NativeTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeTypeId(0x{:x})", self.0)
    }
}

impl fmt::Display for NativeTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Closed classification of descriptor kinds.
///
/// Namespace loading dispatches on this enumeration with one handler per kind;
/// there is no open-ended dynamic dispatch anywhere in the load path.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum DescriptorKind {
    /// An instantiatable class with inheritance and interface implementations
    Class,
    /// An interface, possibly with prerequisites its implementers must satisfy
    Interface,
    /// A plain structure
    Struct,
    /// An untagged union
    Union,
    /// An enumeration with a closed value set
    Enum,
    /// A bit-flag set
    Flags,
    /// A free function at namespace scope
    Function,
    /// A plain constant at namespace scope
    Constant,
    /// A field inside a compound
    Field,
    /// A method inside a compound
    Method,
    /// A property inside a compound
    Property,
    /// A signal inside a compound
    Signal,
    /// One named value of an enumeration or flag set
    Value,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Shape flags for functions and methods as reported by the provider.
    pub struct CallableFlags: u32 {
        /// Callable is a property getter in disguise
        const GETTER = 0x0001;
        /// Callable is a property setter in disguise
        const SETTER = 0x0002;
        /// Callable constructs instances of its container
        const CONSTRUCTOR = 0x0004;
        /// Callable does not take an instance argument
        const STATIC = 0x0008;
    }
}

impl CallableFlags {
    /// Returns true if this callable is a getter or setter shaped accessor.
    ///
    /// Accessor-shaped callables are filtered out of general method categories;
    /// their functionality is reachable through the property they shadow.
    #[must_use]
    pub fn is_accessor(&self) -> bool {
        self.intersects(CallableFlags::GETTER | CallableFlags::SETTER)
    }
}
