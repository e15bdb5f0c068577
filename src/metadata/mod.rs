//! Introspection metadata: descriptors, providers, the lazy type system, and
//! the repository that ties them together.
//!
//! # Layering
//!
//! - [`descriptor`] - opaque handles and kind/flag vocabularies shared by every
//!   other layer
//! - [`provider`] - the [`provider::DescriptorProvider`] trait abstracting the
//!   backing metadata source, plus the in-memory reference implementation
//! - [`naming`] - per-category key transforms between exposed and declared
//!   member names
//! - [`typesystem`] - compounds, lazy member categories, enum value tables,
//!   and the inheritance-aware resolver
//! - [`repository`] - the top-level [`repository::Repository`] index and its
//!   per-namespace symbol caches
//! - [`runtime`] - the optional object-layer trait for instantiation, casting
//!   and signal connection

pub mod descriptor;
pub mod naming;
pub mod provider;
pub mod repository;
pub mod runtime;
pub mod typesystem;
