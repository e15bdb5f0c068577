// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]
#![deny(unsafe_code)]

//! # introscope
//!
//! [![Crates.io](https://img.shields.io/crates/v/introscope.svg)](https://crates.io/crates/introscope)
//! [![Documentation](https://docs.rs/introscope/badge.svg)](https://docs.rs/introscope)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/BinFlip/introscope/blob/main/LICENSE-APACHE)
//!
//! A lazily-resolved repository for native introspection metadata. `introscope` sits
//! between a raw metadata source (typelibs, compiled descriptor blobs, or anything else
//! that can answer descriptor queries) and code that wants cheap, cached, inheritance-aware
//! symbol access - without ever paying for metadata nobody asked about.
//!
//! ## Features
//!
//! - **Lazy materialization** - members are fetched from the backing source at most once,
//!   on first lookup, and cached forever after
//! - **Inheritance-aware resolution** - depth-first member search across parent classes
//!   and interface prerequisites, with own members always shadowing inherited ones
//! - **Concurrent by construction** - lock-free namespace and symbol caches that hand out
//!   shared handles across threads
//! - **Pluggable backing source** - everything reaches metadata through the
//!   [`metadata::provider::DescriptorProvider`] trait; an in-memory reference
//!   implementation ships with the crate
//! - **Name-scheme transforms** - per-category key rewriting between the exposed
//!   convention and the declared one (property dashes, signal prefixes)
//! - **Cycle and depth safety** - mutually-referential class/interface graphs load
//!   without deadlock or infinite recursion
//!
//! ## Quick Start
//!
//! Add `introscope` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! introscope = "0.1"
//! ```
//!
//! ### Using the Prelude
//!
//! For convenient access to the most commonly used types, import the prelude:
//!
//! ```rust
//! use introscope::prelude::*;
//! use std::sync::Arc;
//!
//! let mut provider = MemoryProvider::new();
//! provider.add_namespace("Gtk", "4.0", &[]);
//! let widget = provider.add_class("Gtk", "Widget", NativeTypeId(0x10));
//! provider.add_method(widget, "show");
//!
//! let repository = Repository::new(Arc::new(provider));
//! let symbol = repository.lookup("Gtk", "Widget")?.unwrap();
//! let widget = symbol.as_compound().unwrap();
//! println!("resolved {}", widget.qualified_name());
//! # Ok::<(), introscope::Error>(())
//! ```
//!
//! ### Resolving Members
//!
//! Compounds resolve members lazily; nothing is fetched until a name is asked for,
//! and inherited members are found automatically:
//!
//! ```rust
//! use introscope::prelude::*;
//! use std::sync::Arc;
//!
//! let mut provider = MemoryProvider::new();
//! provider.add_namespace("Gtk", "4.0", &[]);
//! let widget = provider.add_class("Gtk", "Widget", NativeTypeId(0x10));
//! provider.add_method(widget, "show");
//! let button = provider.add_class("Gtk", "Button", NativeTypeId(0x11));
//! provider.set_parent(button, widget);
//!
//! let repository = Repository::new(Arc::new(provider));
//! let symbol = repository.lookup("Gtk", "Button")?.unwrap();
//! let button = symbol.as_compound().unwrap();
//!
//! // `show` lives on Widget; resolution walks the parent edge.
//! let member = button.resolve(repository.provider(), "show")?;
//! assert!(member.is_some());
//! # Ok::<(), introscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `introscope` is organized into a small number of layers:
//!
//! - [`prelude`] - convenient re-exports of commonly used types and traits
//! - [`metadata::repository`] - the process-level [`Repository`] index and its
//!   per-namespace symbol caches
//! - [`metadata::typesystem`] - compounds, lazy member categories, enum value
//!   tables, and the inheritance-aware resolver
//! - [`metadata::provider`] - the backing-source abstraction
//! - [`metadata::runtime`] - the optional object-layer trait for instantiation,
//!   casting, and signal connection
//! - [`Error`] and [`Result`] - error handling used throughout
//!
//! ### Laziness Model
//!
//! The cost model is strictly pay-as-you-go, at three levels:
//!
//! 1. **Namespaces** materialize on first mention.
//! 2. **Symbols** (classes, interfaces, enums, functions, constants) materialize on
//!    first lookup within their namespace, and the resulting handle is shared by all
//!    later lookups.
//! 3. **Members** inside a compound materialize one at a time: each lookup pops
//!    descriptors off an unresolved queue only until the requested name is found,
//!    and every descriptor passed over on the way is indexed so it is never fetched
//!    from the provider again. Once a category's queue is exhausted it collapses
//!    into a plain read-only map.
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, Error>`](Result):
//!
//! ```rust,no_run
//! use introscope::{Error, Repository};
//! # fn demo(repository: &Repository) {
//! match repository.lookup("Gtk", "Widget") {
//!     Ok(Some(symbol)) => println!("resolved: {:?}", symbol.as_compound().is_some()),
//!     Ok(None) => println!("no such symbol"),
//!     Err(Error::RecursionLimit(depth)) => println!("inheritance too deep: {}", depth),
//!     Err(e) => println!("error: {}", e),
//! }
//! # }
//! ```

#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// This module provides a curated selection of the most frequently used types
/// from across the introscope library, allowing for convenient glob imports.
///
/// # Example
///
/// ```rust,no_run
/// use introscope::prelude::*;
/// use std::sync::Arc;
///
/// let repository = Repository::new(Arc::new(MemoryProvider::new()));
/// assert!(repository.namespace("Gtk").is_none());
/// ```
pub mod prelude;

/// Descriptors, providers, the lazy type system, and the repository index.
///
/// This module implements the complete metadata model:
///
/// ## Repository Layer
/// - [`Repository`] - main entry point, the process-level namespace index
/// - [`metadata::repository::Namespace`] - per-namespace symbol caches
/// - [`Symbol`] - what a namespace lookup yields
///
/// ## Type System
/// - [`metadata::typesystem`] - compounds, categories, value tables, resolver
/// - [`metadata::descriptor`] - opaque handles and kind/flag vocabularies
/// - [`metadata::naming`] - exposed/declared key transforms
///
/// ## Backing Sources
/// - [`metadata::provider`] - the [`metadata::provider::DescriptorProvider`]
///   trait and the in-memory reference implementation
///
/// ## Object Layer
/// - [`metadata::runtime`] - instantiation, casting, and signal connection
///   over an abstract runtime
pub mod metadata;

/// `introscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is
/// always [`Error`]. Used consistently throughout the crate for all fallible
/// operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `introscope` Error type
///
/// The main error type for all operations in this crate. Covers provider
/// bootstrap failures, failed runtime casts, missing members, and inheritance
/// graphs that exceed the traversal depth cap.
pub use error::Error;

/// Main entry point: the process-level index of lazily loaded namespaces.
///
/// See [`metadata::repository::Repository`] for symbol lookup and cache
/// behavior.
///
/// # Example
///
/// ```rust,no_run
/// use introscope::Repository;
/// use introscope::metadata::provider::MemoryProvider;
/// use std::sync::Arc;
///
/// let repository = Repository::new(Arc::new(MemoryProvider::new()));
/// let symbol = repository.lookup("Gtk", "Widget")?;
/// # Ok::<(), introscope::Error>(())
/// ```
pub use metadata::repository::Repository;

/// A resolved namespace-level symbol: compound, enum table, function, or constant.
pub use metadata::repository::Symbol;
