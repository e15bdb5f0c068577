//! Kind-specific symbol assembly.
//!
//! Namespace loading hands a descriptor to [`load_symbol`], which dispatches on
//! the descriptor kind through one closed pattern match: compounds go through
//! [`load_compound`], enums and flag sets through the value-table builder, and
//! functions and constants are wrapped directly.
//!
//! Compound assembly installs one lazy [`Category`] per relevant category kind
//! and then builds the inheritance edges eagerly: prerequisite sets are small
//! and the resolver needs them complete, so their materialization is forced as
//! the final step of assembly rather than left lazy. Edge targets resolve
//! through the repository, which may recursively load other namespaces; a
//! target that is itself mid-load yields no edge (the cycle guard's view), so
//! a class and the interface that requires it assemble without recursing into
//! each other.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    metadata::{
        descriptor::{Descriptor, DescriptorKind},
        naming::NameScheme,
        provider::DescriptorProvider,
        repository::{Repository, Symbol},
        typesystem::{
            category::SlotSource, Callable, Category, CategoryKind, Compound, CompoundKind,
            CompoundRc, CompoundRef, ValueTable,
        },
    },
    Result,
};

/// Which provider list the inheritance edges of a compound come from.
#[derive(Clone, Copy)]
enum InheritsSource {
    /// An interface's prerequisite list
    Prerequisites,
    /// A class's declared interface-implementation list
    Interfaces,
}

/// Assemble the cached symbol for one top-level descriptor.
///
/// Returns `Ok(None)` for descriptor kinds that are not exposed as namespace
/// symbols, and for structs excluded by the shadow rule.
pub(crate) fn load_symbol(repository: &Repository, desc: Descriptor) -> Result<Option<Symbol>> {
    let provider = repository.provider();

    match provider.kind(desc) {
        DescriptorKind::Class => load_compound(repository, desc, CompoundKind::Class),
        DescriptorKind::Interface => load_compound(repository, desc, CompoundKind::Interface),
        DescriptorKind::Struct => load_compound(repository, desc, CompoundKind::Struct),
        DescriptorKind::Union => load_compound(repository, desc, CompoundKind::Union),
        DescriptorKind::Enum => Ok(Some(Symbol::Enum(Arc::new(ValueTable::from_descriptor(
            provider, desc, false,
        ))))),
        DescriptorKind::Flags => Ok(Some(Symbol::Enum(Arc::new(ValueTable::from_descriptor(
            provider, desc, true,
        ))))),
        DescriptorKind::Function => Ok(Some(Symbol::Function(Arc::new(Callable {
            name: provider.name(desc),
            descriptor: desc,
            flags: provider.callable_flags(desc),
        })))),
        DescriptorKind::Constant => Ok(Some(Symbol::Constant(provider.constant_value(desc)))),
        // Member kinds never appear at namespace scope
        DescriptorKind::Field
        | DescriptorKind::Method
        | DescriptorKind::Property
        | DescriptorKind::Signal
        | DescriptorKind::Value => Ok(None),
    }
}

/// Assemble one compound of the given variant.
fn load_compound(
    repository: &Repository,
    desc: Descriptor,
    kind: CompoundKind,
) -> Result<Option<Symbol>> {
    let provider = repository.provider();

    // Implementation-internal shadows of other registered types are never
    // exposed as independent symbols
    if kind == CompoundKind::Struct && provider.is_shadow_struct(desc) {
        return Ok(None);
    }

    let with_object_categories = matches!(kind, CompoundKind::Class | CompoundKind::Interface);

    let methods = Some(category(
        provider,
        desc,
        CategoryKind::Methods,
        SlotSource::Methods,
        NameScheme::Verbatim,
        with_object_categories,
    ));
    let fields = match kind {
        CompoundKind::Struct | CompoundKind::Union | CompoundKind::Class => Some(category(
            provider,
            desc,
            CategoryKind::Fields,
            SlotSource::Fields,
            NameScheme::Verbatim,
            false,
        )),
        CompoundKind::Interface => None,
    };
    let (properties, signals, constants) = if with_object_categories {
        (
            Some(category(
                provider,
                desc,
                CategoryKind::Properties,
                SlotSource::Properties,
                NameScheme::Property,
                false,
            )),
            Some(category(
                provider,
                desc,
                CategoryKind::Signals,
                SlotSource::Signals,
                NameScheme::Signal,
                false,
            )),
            Some(category(
                provider,
                desc,
                CategoryKind::Constants,
                SlotSource::Constants,
                NameScheme::Verbatim,
                false,
            )),
        )
    } else {
        (None, None, None)
    };

    let compound: CompoundRc = Arc::new(Compound::new(
        kind,
        provider.namespace_of(desc),
        provider.name(desc),
        provider.native_type(desc),
        desc,
        properties,
        methods,
        signals,
        constants,
        fields,
    ));

    // Inheritance edges are forced to full materialization as the final step
    // of assembly; prerequisite sets are small and needed eagerly
    match kind {
        CompoundKind::Interface => {
            load_inherits(repository, &compound, desc, InheritsSource::Prerequisites)?;
        }
        CompoundKind::Class => {
            load_inherits(repository, &compound, desc, InheritsSource::Interfaces)?;
            load_parent_edge(repository, &compound, desc)?;
        }
        CompoundKind::Struct | CompoundKind::Union => {}
    }

    Ok(Some(Symbol::Compound(compound)))
}

fn category(
    provider: &dyn DescriptorProvider,
    container: Descriptor,
    kind: CategoryKind,
    source: SlotSource,
    naming: NameScheme,
    filter_accessors: bool,
) -> Category {
    Category::new(
        kind,
        naming,
        filter_accessors,
        container,
        source,
        source.count(provider, container),
        HashMap::new(),
    )
}

/// Resolve every declared edge of `compound` in declaration order.
fn load_inherits(
    repository: &Repository,
    compound: &CompoundRc,
    desc: Descriptor,
    source: InheritsSource,
) -> Result<()> {
    let provider = repository.provider();
    let count = match source {
        InheritsSource::Prerequisites => provider.prerequisite_count(desc),
        InheritsSource::Interfaces => provider.interface_count(desc),
    };

    for index in 0..count {
        let target = match source {
            InheritsSource::Prerequisites => provider.prerequisite(desc, index),
            InheritsSource::Interfaces => provider.interface(desc, index),
        };
        if let Some(target) = target {
            add_edge(repository, compound, target)?;
        }
    }
    Ok(())
}

/// Append a synthetic edge for a class's declared parent, unless the parent is
/// the class itself (root types report themselves).
fn load_parent_edge(
    repository: &Repository,
    compound: &CompoundRc,
    desc: Descriptor,
) -> Result<()> {
    let provider = repository.provider();
    let Some(parent) = provider.parent(desc) else {
        return Ok(());
    };

    let parent_namespace = provider.namespace_of(parent);
    let parent_name = provider.name(parent);
    if parent_namespace == compound.namespace() && parent_name == compound.name() {
        return Ok(());
    }

    add_edge(repository, compound, parent)
}

/// Resolve one edge target through the repository and append the edge.
///
/// A target that is currently mid-load resolves to absent (the namespace
/// loader's cycle guard), so the edge is simply omitted rather than recursed
/// into. Targets that resolve to non-compound symbols are ignored likewise.
fn add_edge(repository: &Repository, compound: &CompoundRc, target: Descriptor) -> Result<()> {
    let provider = repository.provider();
    let namespace = provider.namespace_of(target);
    let name = provider.name(target);

    if let Some(symbol) = repository.lookup(&namespace, &name)? {
        if let Some(target_rc) = symbol.as_compound() {
            compound.add_inherits_edge(name, CompoundRef::new(target_rc));
        }
    }
    Ok(())
}
