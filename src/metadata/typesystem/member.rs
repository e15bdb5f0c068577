//! Resolved member representations cached inside compound categories.
//!
//! Once a category slot has been fetched and transformed, it is stored as a
//! [`Member`]. Members are cheap to clone (reference counted payloads) because
//! repeated lookups hand out the identical cached instance.

use std::sync::Arc;

use crate::metadata::{
    descriptor::{CallableFlags, Descriptor},
    provider::DescriptorProvider,
    typesystem::CompoundRef,
};

/// A plain runtime value, as produced for constants and enum members.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A boolean constant
    Bool(bool),
    /// A signed integer constant
    Int(i64),
    /// A floating point constant
    Float(f64),
    /// A string constant
    Str(String),
}

/// A function or method, resolved from the provider but not yet invoked.
///
/// The call itself is performed by the opaque runtime; this record carries the
/// metadata needed to drive that call and to introspect the signature.
#[derive(Debug, Clone)]
pub struct Callable {
    /// Declared name of the callable
    pub name: String,
    /// Provider handle for signature introspection and invocation
    pub descriptor: Descriptor,
    /// Shape flags as reported by the provider
    pub flags: CallableFlags,
}

impl Callable {
    /// Number of declared arguments, queried from the provider on demand.
    pub fn arg_count(&self, provider: &dyn DescriptorProvider) -> u32 {
        provider.arg_count(self.descriptor)
    }

    /// Descriptor of the argument at `index`, if any.
    pub fn arg(&self, provider: &dyn DescriptorProvider, index: u32) -> Option<Descriptor> {
        provider.arg(self.descriptor, index)
    }

    /// Descriptor of the return type, if the callable returns a value.
    pub fn return_type(&self, provider: &dyn DescriptorProvider) -> Option<Descriptor> {
        provider.return_type(self.descriptor)
    }
}

/// A data field inside a struct, union or class.
#[derive(Debug, Clone)]
pub struct Field {
    /// Declared name of the field
    pub name: String,
    /// Provider handle for offset/type introspection
    pub descriptor: Descriptor,
}

/// A property of a class or interface, under its declared (dash-separated) name.
#[derive(Debug, Clone)]
pub struct Property {
    /// Declared name of the property
    pub name: String,
    /// Provider handle for type/flags introspection
    pub descriptor: Descriptor,
}

/// A signal of a class or interface, under its declared (dash-separated) name.
#[derive(Debug, Clone)]
pub struct Signal {
    /// Declared name of the signal
    pub name: String,
    /// Provider handle describing the signal signature
    pub descriptor: Descriptor,
}

/// One cached category entry.
///
/// Cloning a `Member` clones an `Arc` (or a small constant), so repeated
/// lookups observe the identical resolved instance.
#[derive(Debug, Clone)]
pub enum Member {
    /// A method of the owning compound
    Method(Arc<Callable>),
    /// A field of the owning compound
    Field(Arc<Field>),
    /// A property of the owning compound
    Property(Arc<Property>),
    /// A signal of the owning compound
    Signal(Arc<Signal>),
    /// A constant of the owning compound
    Constant(Value),
    /// An inheritance edge: a weak reference to another compound
    Compound(CompoundRef),
}

impl Member {
    /// The method payload, if this member is one.
    #[must_use]
    pub fn as_method(&self) -> Option<&Arc<Callable>> {
        match self {
            Member::Method(c) => Some(c),
            _ => None,
        }
    }

    /// The signal payload, if this member is one.
    #[must_use]
    pub fn as_signal(&self) -> Option<&Arc<Signal>> {
        match self {
            Member::Signal(s) => Some(s),
            _ => None,
        }
    }

    /// The property payload, if this member is one.
    #[must_use]
    pub fn as_property(&self) -> Option<&Arc<Property>> {
        match self {
            Member::Property(p) => Some(p),
            _ => None,
        }
    }

    /// The constant payload, if this member is one.
    #[must_use]
    pub fn as_constant(&self) -> Option<&Value> {
        match self {
            Member::Constant(v) => Some(v),
            _ => None,
        }
    }
}
