//! One externally versioned namespace and its lazy symbol caches.
//!
//! A [`Namespace`] keeps one ordered cache table per symbol kind. Tables are
//! populated by the namespace loader as symbols are first touched and persist
//! for the lifetime of the repository; repeated lookups hand out the identical
//! cached instance.
//!
//! The load path of [`Namespace::lookup`] is the heart of the cycle guard: the
//! `namespace.symbol` key is marked in-progress for the duration of the
//! dispatch, and any lookup that re-enters an in-progress key short-circuits
//! to absence instead of recursing.

use std::sync::Arc;

use crossbeam_skiplist::SkipMap;

use crate::{
    metadata::{
        repository::{Repository, Symbol},
        typesystem::{loader, Callable, CompoundKind, CompoundRc, Value, ValueTable},
    },
    Result,
};

/// One namespace: header metadata plus one cache table per symbol kind.
pub struct Namespace {
    name: String,
    version: String,
    dependencies: Vec<String>,
    classes: SkipMap<String, CompoundRc>,
    interfaces: SkipMap<String, CompoundRc>,
    structs: SkipMap<String, CompoundRc>,
    unions: SkipMap<String, CompoundRc>,
    enums: SkipMap<String, Arc<ValueTable>>,
    functions: SkipMap<String, Arc<Callable>>,
    constants: SkipMap<String, Value>,
}

impl Namespace {
    pub(crate) fn new(name: String, version: String, dependencies: Vec<String>) -> Self {
        Namespace {
            name,
            version,
            dependencies,
            classes: SkipMap::new(),
            interfaces: SkipMap::new(),
            structs: SkipMap::new(),
            unions: SkipMap::new(),
            enums: SkipMap::new(),
            functions: SkipMap::new(),
            constants: SkipMap::new(),
        }
    }

    /// Name of this namespace.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version string reported by the provider when the namespace was created.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Dependency names as reported by the provider, `Name-Version` formatted.
    #[must_use]
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// The already-cached symbol under `name`, if any, without loading.
    #[must_use]
    pub fn cached(&self, name: &str) -> Option<Symbol> {
        if let Some(entry) = self.classes.get(name) {
            return Some(Symbol::Compound(entry.value().clone()));
        }
        if let Some(entry) = self.interfaces.get(name) {
            return Some(Symbol::Compound(entry.value().clone()));
        }
        if let Some(entry) = self.structs.get(name) {
            return Some(Symbol::Compound(entry.value().clone()));
        }
        if let Some(entry) = self.unions.get(name) {
            return Some(Symbol::Compound(entry.value().clone()));
        }
        if let Some(entry) = self.enums.get(name) {
            return Some(Symbol::Enum(entry.value().clone()));
        }
        if let Some(entry) = self.functions.get(name) {
            return Some(Symbol::Function(entry.value().clone()));
        }
        if let Some(entry) = self.constants.get(name) {
            return Some(Symbol::Constant(entry.value().clone()));
        }
        None
    }

    /// Resolve `symbol` within this namespace, loading it on first touch.
    ///
    /// Absent, deprecated and excluded symbols all resolve to `Ok(None)`. A
    /// lookup that re-enters a symbol currently being loaded also resolves to
    /// `Ok(None)`; that short-circuit is the cycle breaker for mutually
    /// referential compounds.
    pub fn lookup(&self, repository: &Repository, symbol: &str) -> Result<Option<Symbol>> {
        if let Some(cached) = self.cached(symbol) {
            return Ok(Some(cached));
        }

        let key = format!("{}.{}", self.name, symbol);
        let Some(_guard) = repository.progress().acquire(key) else {
            return Ok(None);
        };

        let provider = repository.provider();
        let Some(desc) = provider.find_by_name(&self.name, symbol) else {
            return Ok(None);
        };
        // Deprecated symbols are never exposed
        if provider.is_deprecated(desc) {
            return Ok(None);
        }

        // The guard stays held across dispatch and is released on every exit
        let loaded = loader::load_symbol(repository, desc)?;
        if let Some(symbol_value) = &loaded {
            self.store(symbol, symbol_value.clone());
        }
        Ok(loaded)
    }

    /// Touch every symbol index of this namespace once, driving full
    /// materialization of the namespace tables.
    pub fn resolve_all(&self, repository: &Repository) -> Result<()> {
        let provider = repository.provider();
        for index in 0..provider.info_count(&self.name) {
            if let Some(desc) = provider.info(&self.name, index) {
                let name = provider.name(desc);
                self.lookup(repository, &name)?;
            }
        }
        Ok(())
    }

    /// Cached classes, in name order.
    #[must_use]
    pub fn classes(&self) -> Vec<(String, CompoundRc)> {
        table_view(&self.classes)
    }

    /// Cached interfaces, in name order.
    #[must_use]
    pub fn interfaces(&self) -> Vec<(String, CompoundRc)> {
        table_view(&self.interfaces)
    }

    /// Cached structs, in name order.
    #[must_use]
    pub fn structs(&self) -> Vec<(String, CompoundRc)> {
        table_view(&self.structs)
    }

    /// Cached unions, in name order.
    #[must_use]
    pub fn unions(&self) -> Vec<(String, CompoundRc)> {
        table_view(&self.unions)
    }

    /// Cached enum and flag tables, in name order.
    #[must_use]
    pub fn enums(&self) -> Vec<(String, Arc<ValueTable>)> {
        table_view(&self.enums)
    }

    /// Cached free functions, in name order.
    #[must_use]
    pub fn functions(&self) -> Vec<(String, Arc<Callable>)> {
        table_view(&self.functions)
    }

    /// Cached namespace-level constants, in name order.
    #[must_use]
    pub fn constants(&self) -> Vec<(String, Value)> {
        table_view(&self.constants)
    }

    /// Names of every currently cached symbol, sorted, across all tables.
    #[must_use]
    pub fn cached_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .classes
            .iter()
            .chain(self.interfaces.iter())
            .chain(self.structs.iter())
            .chain(self.unions.iter())
            .map(|entry| entry.key().clone())
            .chain(self.enums.iter().map(|entry| entry.key().clone()))
            .chain(self.functions.iter().map(|entry| entry.key().clone()))
            .chain(self.constants.iter().map(|entry| entry.key().clone()))
            .collect();
        names.sort();
        names
    }

    /// File the loaded symbol into the cache table of its kind.
    fn store(&self, name: &str, symbol: Symbol) {
        match symbol {
            Symbol::Compound(compound) => {
                let table = match compound.kind() {
                    CompoundKind::Class => &self.classes,
                    CompoundKind::Interface => &self.interfaces,
                    CompoundKind::Struct => &self.structs,
                    CompoundKind::Union => &self.unions,
                };
                table.insert(name.to_string(), compound);
            }
            Symbol::Enum(table_value) => {
                self.enums.insert(name.to_string(), table_value);
            }
            Symbol::Function(callable) => {
                self.functions.insert(name.to_string(), callable);
            }
            Symbol::Constant(value) => {
                self.constants.insert(name.to_string(), value);
            }
        }
    }
}

/// Snapshot one cache table in key order.
fn table_view<V: Clone>(table: &SkipMap<String, V>) -> Vec<(String, V)>
where
    V: Send + 'static,
{
    table
        .iter()
        .map(|entry| (entry.key().clone(), entry.value().clone()))
        .collect()
}
