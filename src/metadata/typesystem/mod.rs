//! Compound assembly and the lazy member type system.
//!
//! This module contains the cacheable representations symbols resolve to and
//! the machinery that builds them:
//!
//! - [`Category`] - the lazy, self-optimizing member collection (the core of
//!   the library's on-demand materialization)
//! - [`Compound`] / [`CompoundRef`] - assembled struct/union/class/interface
//!   records with weak inheritance edges
//! - [`ValueTable`] - eager forward/reverse tables for enums and flag sets
//! - [`Member`] and its payloads - what category lookups return
//! - [`resolver`] - the inheritance-aware, depth-first member search
//! - `loader` - kind-dispatched symbol assembly, driven by the namespace
//!   loader in [`crate::metadata::repository`]

pub(crate) mod category;
pub(crate) mod loader;
pub mod resolver;

mod compound;
mod enums;
mod member;

pub use category::{Category, CategoryKind};
pub use compound::{Compound, CompoundKind, CompoundRc, CompoundRef, InheritsList};
pub use enums::ValueTable;
pub use member::{Callable, Field, Member, Property, Signal, Value};
