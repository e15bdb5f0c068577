//! # introscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the introscope library. Import this module to get quick access to the essential
//! types for lazy metadata resolution.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all introscope operations
pub use crate::Error;

/// The result type used throughout introscope
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Process-level index of lazily loaded namespaces
pub use crate::Repository;

/// What a namespace-level lookup yields
pub use crate::Symbol;

/// Per-namespace symbol caches
pub use crate::metadata::repository::Namespace;

// ================================================================================================
// Descriptors and Backing Sources
// ================================================================================================

/// Opaque handles and kind/flag vocabularies
pub use crate::metadata::descriptor::{
    CallableFlags, Descriptor, DescriptorKind, NativeTypeId,
};

/// The backing-source abstraction and the in-memory reference implementation
pub use crate::metadata::provider::{DescriptorProvider, MemoryProvider};

// ================================================================================================
// Type System
// ================================================================================================

/// Compounds and their lazy member categories
pub use crate::metadata::typesystem::{
    Category, CategoryKind, Compound, CompoundKind, CompoundRc, CompoundRef, ValueTable,
};

/// Members yielded by category lookups
pub use crate::metadata::typesystem::{Callable, Field, Member, Property, Signal, Value};

/// Per-category key transforms between exposed and declared names
pub use crate::metadata::naming::NameScheme;

// ================================================================================================
// Object Layer
// ================================================================================================

/// The abstract runtime for instantiation, casting, and signal connection
pub use crate::metadata::runtime::{Runtime, SignalCallback};
