//! Abstract descriptor provider interface.
//!
//! The repository never parses the introspection database itself; it consumes an
//! abstract [`DescriptorProvider`] that answers synchronous, in-process metadata
//! queries. Wire format and ABI of the database are properties of the provider
//! implementation and out of scope here.
//!
//! # Key Types
//! - [`DescriptorProvider`] - The full query surface the repository depends on
//! - [`MemoryProvider`] - Complete in-memory reference implementation, used by
//!   the integration tests and the benchmarks
//!
//! # Contract
//!
//! All operations are expected to answer quickly and synchronously. Handles
//! returned by one provider instance are only meaningful when presented back to
//! that same instance. Index-based accessors (`field(container, i)` and
//! friends) must answer deterministically: the slot order they expose *is* the
//! declaration order every documented iteration order in this library derives
//! from.

mod memory;

pub use memory::MemoryProvider;

use crate::metadata::{
    descriptor::{CallableFlags, Descriptor, DescriptorKind, NativeTypeId},
    typesystem::Value,
};

/// Query surface of the external introspection database.
///
/// One method pair per child kind rather than a generic indexed accessor: load
/// dispatch is a closed pattern match over [`DescriptorKind`], and the category
/// materializer selects the accessor pair for its kind explicitly.
pub trait DescriptorProvider: Send + Sync {
    // ── Namespace level ─────────────────────────────────────────────────

    /// Version string of a namespace, or `None` when the provider does not
    /// know the namespace at all (which makes the namespace silently absent).
    fn namespace_version(&self, namespace: &str) -> Option<String>;

    /// Names of the namespaces this namespace depends on, in declaration
    /// order, formatted as `Name-Version` strings.
    fn namespace_dependencies(&self, namespace: &str) -> Vec<String>;

    /// Total number of top-level descriptors in a namespace, for exhaustive
    /// enumeration.
    fn info_count(&self, namespace: &str) -> u32;

    /// Top-level descriptor at `index`, for exhaustive enumeration.
    fn info(&self, namespace: &str, index: u32) -> Option<Descriptor>;

    /// Look up a top-level descriptor by name within a namespace.
    fn find_by_name(&self, namespace: &str, symbol: &str) -> Option<Descriptor>;

    /// Reverse lookup from a registered native type id to its descriptor.
    fn find_by_native_type(&self, id: NativeTypeId) -> Option<Descriptor>;

    // ── Descriptor level ────────────────────────────────────────────────

    /// Kind classification of a descriptor.
    fn kind(&self, desc: Descriptor) -> DescriptorKind;

    /// Declared name of a descriptor.
    fn name(&self, desc: Descriptor) -> String;

    /// Name of the namespace a descriptor belongs to.
    fn namespace_of(&self, desc: Descriptor) -> String;

    /// Containing descriptor, for members nested inside a compound.
    fn container(&self, desc: Descriptor) -> Option<Descriptor>;

    /// Native type id registered for this descriptor, or the null id.
    fn native_type(&self, desc: Descriptor) -> NativeTypeId;

    /// Whether the descriptor is marked deprecated. Deprecated symbols are
    /// never exposed by the repository.
    fn is_deprecated(&self, desc: Descriptor) -> bool;

    /// Whether a struct descriptor is the implementation-internal shadow of
    /// another registered type. Shadow structs are never exposed as
    /// independent symbols.
    fn is_shadow_struct(&self, desc: Descriptor) -> bool;

    // ── Category slot accessors ─────────────────────────────────────────

    /// Number of fields declared on a compound.
    fn field_count(&self, container: Descriptor) -> u32;
    /// Field descriptor at `index`.
    fn field(&self, container: Descriptor, index: u32) -> Option<Descriptor>;

    /// Number of methods declared on a compound.
    fn method_count(&self, container: Descriptor) -> u32;
    /// Method descriptor at `index`.
    fn method(&self, container: Descriptor, index: u32) -> Option<Descriptor>;

    /// Number of properties declared on a class or interface.
    fn property_count(&self, container: Descriptor) -> u32;
    /// Property descriptor at `index`.
    fn property(&self, container: Descriptor, index: u32) -> Option<Descriptor>;

    /// Number of signals declared on a class or interface.
    fn signal_count(&self, container: Descriptor) -> u32;
    /// Signal descriptor at `index`.
    fn signal(&self, container: Descriptor, index: u32) -> Option<Descriptor>;

    /// Number of constants declared on a class or interface.
    fn constant_count(&self, container: Descriptor) -> u32;
    /// Constant descriptor at `index`.
    fn constant(&self, container: Descriptor, index: u32) -> Option<Descriptor>;

    /// Number of values declared by an enum or flags descriptor.
    fn value_count(&self, container: Descriptor) -> u32;
    /// Value descriptor at `index`.
    fn value(&self, container: Descriptor, index: u32) -> Option<Descriptor>;

    /// Number of prerequisites an interface imposes on its implementers.
    fn prerequisite_count(&self, interface: Descriptor) -> u32;
    /// Prerequisite descriptor at `index`.
    fn prerequisite(&self, interface: Descriptor, index: u32) -> Option<Descriptor>;

    /// Number of interfaces a class declares to implement.
    fn interface_count(&self, class: Descriptor) -> u32;
    /// Implemented-interface descriptor at `index`.
    fn interface(&self, class: Descriptor, index: u32) -> Option<Descriptor>;

    /// Parent type a class derives from, if it declares one.
    fn parent(&self, class: Descriptor) -> Option<Descriptor>;

    // ── Callables ───────────────────────────────────────────────────────

    /// Shape flags of a function or method descriptor.
    fn callable_flags(&self, desc: Descriptor) -> CallableFlags;

    /// Number of declared arguments of a callable.
    fn arg_count(&self, callable: Descriptor) -> u32;

    /// Argument descriptor at `index`.
    fn arg(&self, callable: Descriptor, index: u32) -> Option<Descriptor>;

    /// Return type descriptor of a callable, if it returns a value.
    fn return_type(&self, callable: Descriptor) -> Option<Descriptor>;

    // ── Values ──────────────────────────────────────────────────────────

    /// Integer value of one enum/flags value descriptor.
    fn enum_value(&self, value: Descriptor) -> i64;

    /// Value of a constant descriptor.
    fn constant_value(&self, desc: Descriptor) -> Value;
}
