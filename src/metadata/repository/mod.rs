//! Top-level repository index over lazily loaded namespaces.
//!
//! The [`Repository`] is the single entry point of the library: it maps
//! namespace names to [`Namespace`] values, creating each on first touch from
//! the provider's version and dependency records, and routes symbol lookups
//! through the namespace loader. There is no implicit global; the repository
//! is an explicit value passed (by reference) to every operation that needs
//! it, and all of its caches persist for its lifetime.
//!
//! # Key Components
//!
//! - [`Repository`] - Namespace index, provider handle and cycle guard
//! - [`Namespace`] - Per-namespace symbol caches and the load path
//! - [`Symbol`] - The uniform result of any successful lookup
//!
//! # Thread Safety
//!
//! The namespace index is a `DashMap`, namespace tables are `SkipMap`s and
//! compound categories lock internally, so a repository can be shared behind
//! an `Arc` without external synchronization. The original single-threaded
//! design remains the intended mode of use: load everything during startup,
//! then read.

mod namespace;
mod progress;

pub use namespace::Namespace;
pub(crate) use progress::ProgressTracker;

use std::sync::Arc;

use dashmap::DashMap;

use crate::{
    metadata::{
        descriptor::NativeTypeId,
        provider::DescriptorProvider,
        typesystem::{Callable, CompoundRc, Value, ValueTable},
    },
    Result,
};

/// The uniform result of a successful symbol lookup.
///
/// Cloning a `Symbol` clones an `Arc` (or a small constant value): repeated
/// lookups of the same symbol observe the identical cached instance.
#[derive(Clone)]
pub enum Symbol {
    /// A struct, union, class or interface
    Compound(CompoundRc),
    /// An enumeration or bit-flag value table
    Enum(Arc<ValueTable>),
    /// A free function
    Function(Arc<Callable>),
    /// A plain constant value
    Constant(Value),
}

impl Symbol {
    /// The compound payload, if this symbol is one.
    #[must_use]
    pub fn as_compound(&self) -> Option<&CompoundRc> {
        match self {
            Symbol::Compound(c) => Some(c),
            _ => None,
        }
    }

    /// The value-table payload, if this symbol is one.
    #[must_use]
    pub fn as_enum(&self) -> Option<&Arc<ValueTable>> {
        match self {
            Symbol::Enum(t) => Some(t),
            _ => None,
        }
    }

    /// The function payload, if this symbol is one.
    #[must_use]
    pub fn as_function(&self) -> Option<&Arc<Callable>> {
        match self {
            Symbol::Function(f) => Some(f),
            _ => None,
        }
    }

    /// The constant payload, if this symbol is one.
    #[must_use]
    pub fn as_constant(&self) -> Option<&Value> {
        match self {
            Symbol::Constant(v) => Some(v),
            _ => None,
        }
    }
}

/// Process-level index of lazily loaded namespaces.
pub struct Repository {
    provider: Arc<dyn DescriptorProvider>,
    namespaces: DashMap<String, Arc<Namespace>>,
    progress: ProgressTracker,
}

impl Repository {
    /// Create an empty repository over the given provider.
    #[must_use]
    pub fn new(provider: Arc<dyn DescriptorProvider>) -> Self {
        Repository {
            provider,
            namespaces: DashMap::new(),
            progress: ProgressTracker::new(),
        }
    }

    /// Create a repository and verify the provider's bootstrap invariants.
    ///
    /// The root namespace must be known to the provider and every hand-built
    /// base symbol must resolve; anything missing indicates a broken provider
    /// and aborts initialization with [`crate::Error::Bootstrap`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Bootstrap`] when the root namespace or one of
    /// the base symbols cannot be located.
    pub fn bootstrap(
        provider: Arc<dyn DescriptorProvider>,
        root_namespace: &str,
        base_symbols: &[&str],
    ) -> Result<Self> {
        let repository = Repository::new(provider);

        if repository.namespace(root_namespace).is_none() {
            return Err(bootstrap_error!(
                "root namespace `{}` is not known to the provider",
                root_namespace
            ));
        }
        for symbol in base_symbols {
            if repository.lookup(root_namespace, symbol)?.is_none() {
                return Err(bootstrap_error!(
                    "base symbol `{}.{}` cannot be located",
                    root_namespace,
                    symbol
                ));
            }
        }

        Ok(repository)
    }

    /// The provider this repository reads from.
    #[must_use]
    pub fn provider(&self) -> &dyn DescriptorProvider {
        self.provider.as_ref()
    }

    pub(crate) fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    /// The namespace of the given name, created on first touch.
    ///
    /// A namespace the provider does not know resolves to `None`; an entry,
    /// once created, persists for the repository's lifetime.
    #[must_use]
    pub fn namespace(&self, name: &str) -> Option<Arc<Namespace>> {
        if let Some(existing) = self.namespaces.get(name) {
            return Some(existing.clone());
        }

        let version = self.provider.namespace_version(name)?;
        let dependencies = self.provider.namespace_dependencies(name);
        let created = Arc::new(Namespace::new(name.to_string(), version, dependencies));
        Some(
            self.namespaces
                .entry(name.to_string())
                .or_insert(created)
                .clone(),
        )
    }

    /// Resolve `symbol` within `namespace`, loading either on first touch.
    ///
    /// Absence (unknown namespace, unknown symbol, deprecated symbol, excluded
    /// shadow struct, re-entrant load) is `Ok(None)`, never an error.
    pub fn lookup(&self, namespace: &str, symbol: &str) -> Result<Option<Symbol>> {
        let Some(ns) = self.namespace(namespace) else {
            return Ok(None);
        };
        ns.lookup(self, symbol)
    }

    /// Resolve a dotted `Namespace.Symbol` path.
    pub fn lookup_qualified(&self, path: &str) -> Result<Option<Symbol>> {
        let Some((namespace, symbol)) = path.split_once('.') else {
            return Ok(None);
        };
        self.lookup(namespace, symbol)
    }

    /// Resolve the symbol registered under a native type id, if any.
    pub fn find_by_native_type(&self, id: NativeTypeId) -> Result<Option<Symbol>> {
        let Some(desc) = self.provider.find_by_native_type(id) else {
            return Ok(None);
        };
        let namespace = self.provider.namespace_of(desc);
        let name = self.provider.name(desc);
        self.lookup(&namespace, &name)
    }

    /// Resolve the recorded dependencies of `namespace` to namespaces.
    ///
    /// Dependency entries are `Name-Version` strings; entries that cannot be
    /// parsed, or name a namespace the provider does not know, are silently
    /// skipped rather than raised.
    #[must_use]
    pub fn dependencies(&self, namespace: &str) -> Vec<Arc<Namespace>> {
        let Some(ns) = self.namespace(namespace) else {
            return Vec::new();
        };
        ns.dependencies()
            .iter()
            .filter_map(|dep| parse_dependency(dep))
            .filter_map(|(name, _version)| self.namespace(name))
            .collect()
    }

    /// Touch every symbol of `namespace` once, driving full materialization.
    pub fn resolve_all(&self, namespace: &str) -> Result<()> {
        if let Some(ns) = self.namespace(namespace) {
            ns.resolve_all(self)?;
        }
        Ok(())
    }
}

/// Split a `Name-Version` dependency string on its last separator.
fn parse_dependency(dep: &str) -> Option<(&str, &str)> {
    dep.rsplit_once('-')
        .filter(|(name, version)| !name.is_empty() && !version.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dependency() {
        assert_eq!(parse_dependency("Core-1.0"), Some(("Core", "1.0")));
        assert_eq!(parse_dependency("Some-Lib-2.4"), Some(("Some-Lib", "2.4")));
        assert_eq!(parse_dependency("NoVersion"), None);
        assert_eq!(parse_dependency("-1.0"), None);
        assert_eq!(parse_dependency("Core-"), None);
    }
}
