//! Lazy, self-optimizing member categories.
//!
//! A [`Category`] turns one index range of the descriptor provider (all methods of a
//! compound, all properties, ...) into a name-keyed cache that materializes on demand.
//! It is the central mechanism of this library: lookups fetch only as many provider
//! slots as needed to answer, and every slot is fetched at most once over the
//! category's lifetime no matter the order or number of lookups.
//!
//! # State Machine
//!
//! Each category is an explicit two-state machine:
//!
//! - **Lazy**: holds the list of not-yet-fetched slot indices, an index of slots that
//!   were fetched during a scan but did not match the key being searched (keyed by
//!   their declared name, for O(1) resolution on a later lookup), and the partial
//!   name→member cache built so far.
//! - **Resolved**: a plain immutable name→member map. All dynamic behavior is
//!   detached; lookups are hash probes against the incoming key.
//!
//! The transition Lazy→Resolved happens when the slot list and the pending index are
//! both exhausted, or when an explicit full materialization is issued. It never
//! transitions back.
//!
//! # Invariants
//!
//! - Member names within one category are unique; collisions overwrite, never merge.
//! - A slot, once matched to a name, is consumed exactly once: the unresolved list,
//!   the pending index and the cache are pairwise disjoint.
//!
//! # Thread Safety
//!
//! The lazy state sits behind a `Mutex`; a poisoned lock surfaces as
//! [`crate::Error::LockError`].

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use strum::{Display, EnumIter};

use crate::{
    metadata::{
        descriptor::Descriptor,
        naming::NameScheme,
        provider::DescriptorProvider,
        typesystem::{Callable, Field, Member, Property, Signal},
    },
    Error::LockError,
    Result,
};

/// The closed set of member categories a compound can carry.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum CategoryKind {
    /// Properties of a class or interface
    Properties,
    /// Methods of any compound
    Methods,
    /// Signals of a class or interface
    Signals,
    /// Constants of a class or interface
    Constants,
    /// Fields of a struct, union or class
    Fields,
}

impl CategoryKind {
    /// Parse an explicit category-address prefix (`prop_`, `method_`, `signal_`,
    /// `constant_`, `field_`), as used by the resolver to bypass the default
    /// search order.
    #[must_use]
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "prop" => Some(CategoryKind::Properties),
            "method" => Some(CategoryKind::Methods),
            "signal" => Some(CategoryKind::Signals),
            "constant" => Some(CategoryKind::Constants),
            "field" => Some(CategoryKind::Fields),
            _ => None,
        }
    }
}

/// Which provider accessor pair a lazy category draws its slots from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlotSource {
    /// `field_count` / `field`
    Fields,
    /// `method_count` / `method`
    Methods,
    /// `property_count` / `property`
    Properties,
    /// `signal_count` / `signal`
    Signals,
    /// `constant_count` / `constant`
    Constants,
}

impl SlotSource {
    /// Number of slots the provider declares for `container` under this source.
    pub(crate) fn count(self, provider: &dyn DescriptorProvider, container: Descriptor) -> u32 {
        match self {
            SlotSource::Fields => provider.field_count(container),
            SlotSource::Methods => provider.method_count(container),
            SlotSource::Properties => provider.property_count(container),
            SlotSource::Signals => provider.signal_count(container),
            SlotSource::Constants => provider.constant_count(container),
        }
    }

    /// Fetch the slot descriptor at `index`.
    pub(crate) fn slot(
        self,
        provider: &dyn DescriptorProvider,
        container: Descriptor,
        index: u32,
    ) -> Option<Descriptor> {
        match self {
            SlotSource::Fields => provider.field(container, index),
            SlotSource::Methods => provider.method(container, index),
            SlotSource::Properties => provider.property(container, index),
            SlotSource::Signals => provider.signal(container, index),
            SlotSource::Constants => provider.constant(container, index),
        }
    }
}

/// Dynamic state of a category that has not fully materialized yet.
struct LazyCategory {
    /// Compound descriptor the slot accessors are invoked against
    container: Descriptor,
    /// Accessor pair slots are drawn from
    source: SlotSource,
    /// Slot indices that have never been fetched
    unresolved: VecDeque<u32>,
    /// Slots fetched during a scan that did not match the searched key,
    /// indexed by their declared name and not yet transformed
    pending: HashMap<String, Descriptor>,
    /// Partial name→member cache, keyed by the exposed (host-side) name
    cache: HashMap<String, Member>,
}

enum CategoryState {
    Lazy(LazyCategory),
    Resolved(HashMap<String, Member>),
}

/// One lazily materialized member category of a compound.
pub struct Category {
    kind: CategoryKind,
    naming: NameScheme,
    filter_accessors: bool,
    state: Mutex<CategoryState>,
}

impl Category {
    /// Build a category over `count` provider slots.
    ///
    /// With `count` of zero the pre-seeded cache is returned unchanged as an
    /// already-resolved category; no lazy behavior is installed.
    pub(crate) fn new(
        kind: CategoryKind,
        naming: NameScheme,
        filter_accessors: bool,
        container: Descriptor,
        source: SlotSource,
        count: u32,
        seed: HashMap<String, Member>,
    ) -> Self {
        let state = if count == 0 {
            CategoryState::Resolved(seed)
        } else {
            CategoryState::Lazy(LazyCategory {
                container,
                source,
                unresolved: (0..count).collect(),
                pending: HashMap::new(),
                cache: seed,
            })
        };

        Category {
            kind,
            naming,
            filter_accessors,
            state: Mutex::new(state),
        }
    }

    /// The kind of members this category holds.
    #[must_use]
    pub fn kind(&self) -> CategoryKind {
        self.kind
    }

    /// Whether the category has detached its lazy behavior.
    pub fn is_resolved(&self) -> Result<bool> {
        let state = self.state.lock().map_err(|_| LockError)?;
        Ok(matches!(*state, CategoryState::Resolved(_)))
    }

    /// Look up one member by its host-side name.
    ///
    /// The cache is consulted first. On a miss the incoming key is translated
    /// through the category's name scheme; a key the scheme cannot translate
    /// fails without touching any slot. A translated key is matched against the
    /// pending index, then against the remaining unresolved slots in a linear
    /// scan that retains every non-matching slot in the pending index. A scan
    /// that exhausts the slot list without a match fails and caches nothing for
    /// that name.
    pub fn lookup(&self, provider: &dyn DescriptorProvider, name: &str) -> Result<Option<Member>> {
        let mut state = self.state.lock().map_err(|_| LockError)?;

        let result = match &mut *state {
            CategoryState::Resolved(map) => return Ok(map.get(name).cloned()),
            CategoryState::Lazy(lazy) => {
                if let Some(hit) = lazy.cache.get(name) {
                    return Ok(Some(hit.clone()));
                }

                let Some(declared) = self.naming.to_declared(name) else {
                    return Ok(None);
                };

                if let Some(desc) = lazy.pending.remove(&declared) {
                    let member = self.transform(provider, desc, &declared);
                    if let Some(member) = &member {
                        lazy.cache.insert(name.to_string(), member.clone());
                    }
                    member
                } else {
                    let mut found = None;
                    while let Some(slot) = lazy.unresolved.pop_front() {
                        let Some(desc) = lazy.source.slot(provider, lazy.container, slot) else {
                            continue;
                        };
                        let slot_name = provider.name(desc);
                        if slot_name == declared {
                            found = self.transform(provider, desc, &declared);
                            if let Some(member) = &found {
                                lazy.cache.insert(name.to_string(), member.clone());
                            }
                            break;
                        }
                        lazy.pending.insert(slot_name, desc);
                    }
                    found
                }
            }
        };

        Self::detach_if_exhausted(&mut state);
        Ok(result)
    }

    /// Drain every remaining slot, transform it, and detach the lazy behavior.
    ///
    /// Returns the members produced by this call in slot order (pending slots
    /// from earlier scans follow, ordered by declared name), keyed by their
    /// exposed names. Calling this on a resolved category is a no-op.
    pub fn materialize(&self, provider: &dyn DescriptorProvider) -> Result<Vec<(String, Member)>> {
        let mut state = self.state.lock().map_err(|_| LockError)?;

        let produced = match &mut *state {
            CategoryState::Resolved(_) => Vec::new(),
            CategoryState::Lazy(lazy) => {
                let mut produced = Vec::new();

                while let Some(slot) = lazy.unresolved.pop_front() {
                    let Some(desc) = lazy.source.slot(provider, lazy.container, slot) else {
                        continue;
                    };
                    let declared = provider.name(desc);
                    if let Some(member) = self.transform(provider, desc, &declared) {
                        let key = self.naming.to_exposed(&declared);
                        lazy.cache.insert(key.clone(), member.clone());
                        produced.push((key, member));
                    }
                }

                let mut pending: Vec<(String, Descriptor)> = lazy.pending.drain().collect();
                pending.sort_by(|a, b| a.0.cmp(&b.0));
                for (declared, desc) in pending {
                    if let Some(member) = self.transform(provider, desc, &declared) {
                        let key = self.naming.to_exposed(&declared);
                        lazy.cache.insert(key.clone(), member.clone());
                        produced.push((key, member));
                    }
                }

                produced
            }
        };

        Self::detach_if_exhausted(&mut state);
        Ok(produced)
    }

    /// Snapshot of the currently cached members, sorted by exposed name.
    pub fn snapshot(&self) -> Result<Vec<(String, Member)>> {
        let state = self.state.lock().map_err(|_| LockError)?;
        let map = match &*state {
            CategoryState::Resolved(map) => map,
            CategoryState::Lazy(lazy) => &lazy.cache,
        };
        let mut entries: Vec<(String, Member)> =
            map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(entries)
    }

    /// Convert one fetched slot descriptor into its cached member form.
    ///
    /// Returns `None` for slots the category filters out (accessor-shaped
    /// methods); such slots are consumed but leave no cache entry.
    fn transform(
        &self,
        provider: &dyn DescriptorProvider,
        desc: Descriptor,
        declared: &str,
    ) -> Option<Member> {
        match self.kind {
            CategoryKind::Methods => {
                let flags = provider.callable_flags(desc);
                if self.filter_accessors && flags.is_accessor() {
                    return None;
                }
                Some(Member::Method(Arc::new(Callable {
                    name: declared.to_string(),
                    descriptor: desc,
                    flags,
                })))
            }
            CategoryKind::Fields => Some(Member::Field(Arc::new(Field {
                name: declared.to_string(),
                descriptor: desc,
            }))),
            CategoryKind::Properties => Some(Member::Property(Arc::new(Property {
                name: declared.to_string(),
                descriptor: desc,
            }))),
            CategoryKind::Signals => Some(Member::Signal(Arc::new(Signal {
                name: declared.to_string(),
                descriptor: desc,
            }))),
            CategoryKind::Constants => Some(Member::Constant(provider.constant_value(desc))),
        }
    }

    /// Replace the lazy state with a plain map once nothing dynamic remains.
    fn detach_if_exhausted(state: &mut CategoryState) {
        if let CategoryState::Lazy(lazy) = state {
            if lazy.unresolved.is_empty() && lazy.pending.is_empty() {
                let cache = std::mem::take(&mut lazy.cache);
                *state = CategoryState::Resolved(cache);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{descriptor::NativeTypeId, provider::MemoryProvider};

    fn provider_with_methods(names: &[&str]) -> (MemoryProvider, Descriptor) {
        let mut provider = MemoryProvider::new();
        provider.add_namespace("Foo", "1.0", &[]);
        let class = provider.add_class("Foo", "Bar", NativeTypeId::new(80));
        for name in names {
            provider.add_method(class, name);
        }
        (provider, class)
    }

    fn method_category(provider: &MemoryProvider, class: Descriptor) -> Category {
        Category::new(
            CategoryKind::Methods,
            NameScheme::Verbatim,
            true,
            class,
            SlotSource::Methods,
            provider.method_count(class),
            HashMap::new(),
        )
    }

    #[test]
    fn test_empty_returns_seed_without_lazy_behavior() {
        let (provider, class) = provider_with_methods(&[]);
        let category = method_category(&provider, class);
        assert!(category.is_resolved().unwrap());
        assert!(category.lookup(&provider, "anything").unwrap().is_none());
    }

    #[test]
    fn test_lookup_materializes_on_demand() {
        let (provider, class) = provider_with_methods(&["alpha", "beta", "gamma"]);
        let category = method_category(&provider, class);

        let beta = category.lookup(&provider, "beta").unwrap();
        assert!(beta.is_some());
        assert!(!category.is_resolved().unwrap());

        // alpha was scanned past while searching beta; it sits in the pending
        // index and resolves without another slot fetch
        let alpha_desc = provider.method(class, 0).unwrap();
        let fetches_before = provider.fetch_count(alpha_desc);
        assert!(category.lookup(&provider, "alpha").unwrap().is_some());
        assert_eq!(provider.fetch_count(alpha_desc), fetches_before);

        // gamma is the final unresolved slot; resolving it detaches laziness
        assert!(category.lookup(&provider, "gamma").unwrap().is_some());
        assert!(category.is_resolved().unwrap());
    }

    #[test]
    fn test_each_slot_fetched_at_most_once() {
        let (provider, class) = provider_with_methods(&["alpha", "beta", "gamma"]);
        let descs: Vec<Descriptor> = (0..3).map(|i| provider.method(class, i).unwrap()).collect();
        let baseline: Vec<u32> = descs.iter().map(|d| provider.fetch_count(*d)).collect();

        let category = method_category(&provider, class);
        for key in ["gamma", "alpha", "gamma", "missing", "beta", "alpha"] {
            let _ = category.lookup(&provider, key).unwrap();
        }
        let _ = category.materialize(&provider).unwrap();

        for (desc, before) in descs.iter().zip(baseline) {
            assert_eq!(provider.fetch_count(*desc), before + 1);
        }
    }

    #[test]
    fn test_missing_name_caches_nothing() {
        let (provider, class) = provider_with_methods(&["alpha"]);
        let category = method_category(&provider, class);

        assert!(category.lookup(&provider, "nope").unwrap().is_none());
        // the scan consumed the only slot; alpha now resolves from pending
        assert!(category.lookup(&provider, "alpha").unwrap().is_some());
        assert!(category.is_resolved().unwrap());
        assert!(category.lookup(&provider, "nope").unwrap().is_none());
    }

    #[test]
    fn test_materialize_equals_individual_lookups() {
        let names = ["alpha", "beta", "gamma", "delta"];
        let (provider_a, class_a) = provider_with_methods(&names);
        let (provider_b, class_b) = provider_with_methods(&names);

        let all_at_once = method_category(&provider_a, class_a);
        let mut bulk: Vec<String> = all_at_once
            .materialize(&provider_a)
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        bulk.sort();

        let one_by_one = method_category(&provider_b, class_b);
        for name in ["delta", "alpha", "gamma", "beta"] {
            assert!(one_by_one.lookup(&provider_b, name).unwrap().is_some());
        }
        let mut single: Vec<String> = one_by_one
            .snapshot()
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        single.sort();

        assert_eq!(bulk, single);
    }

    #[test]
    fn test_accessor_shaped_methods_are_filtered() {
        use crate::metadata::descriptor::CallableFlags;

        let mut provider = MemoryProvider::new();
        provider.add_namespace("Foo", "1.0", &[]);
        let class = provider.add_class("Foo", "Bar", NativeTypeId::new(80));
        let getter = provider.add_method(class, "get_name");
        provider.set_callable_flags(getter, CallableFlags::GETTER);
        provider.add_method(class, "do_thing");

        let category = method_category(&provider, class);
        // the accessor slot is consumed but produces no entry
        assert!(category.lookup(&provider, "get_name").unwrap().is_none());
        assert!(category.lookup(&provider, "do_thing").unwrap().is_some());
        assert!(category.is_resolved().unwrap());

        let names: Vec<String> =
            category.snapshot().unwrap().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["do_thing"]);
    }

    #[test]
    fn test_signal_scheme_keys() {
        let mut provider = MemoryProvider::new();
        provider.add_namespace("Foo", "1.0", &[]);
        let class = provider.add_class("Foo", "Bar", NativeTypeId::new(80));
        provider.add_signal(class, "row-activated");

        let category = Category::new(
            CategoryKind::Signals,
            NameScheme::Signal,
            false,
            class,
            SlotSource::Signals,
            provider.signal_count(class),
            HashMap::new(),
        );

        // a key the scheme cannot translate fails without consuming slots
        assert!(category.lookup(&provider, "row_activated").unwrap().is_none());
        assert!(!category.is_resolved().unwrap());

        let member = category.lookup(&provider, "on_row_activated").unwrap().unwrap();
        assert_eq!(member.as_signal().unwrap().name, "row-activated");
    }

    #[test]
    fn test_full_materialization_applies_reverse_transform() {
        let mut provider = MemoryProvider::new();
        provider.add_namespace("Foo", "1.0", &[]);
        let class = provider.add_class("Foo", "Bar", NativeTypeId::new(80));
        provider.add_signal(class, "row-activated");
        provider.add_signal(class, "closed");

        let category = Category::new(
            CategoryKind::Signals,
            NameScheme::Signal,
            false,
            class,
            SlotSource::Signals,
            provider.signal_count(class),
            HashMap::new(),
        );

        let mut keys: Vec<String> = category
            .materialize(&provider)
            .unwrap()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        keys.sort();
        assert_eq!(keys, vec!["on_closed", "on_row_activated"]);
        assert!(category.is_resolved().unwrap());
    }
}
