//! Recursive, ordered symbol search across a compound and its ancestors.
//!
//! Resolution is depth-first with first-match-wins semantics and no aggregation
//! across ancestors: a name present in a compound's own categories always shadows
//! the same name anywhere in the inheritance graph, and among ancestors the
//! declaration order of the inheritance edges decides.
//!
//! A key of the form `<category-prefix>_<rest>` (for example `method_do_thing` or
//! `prop_icon_name`) addresses a single category explicitly, bypassing the default
//! search order; the prefixed form is carried into ancestors unchanged so explicit
//! addressing still sees inherited members.
//!
//! Edges whose target has been dropped, or was declined during loading because the
//! target was mid-load (a prerequisite cycle), simply do not participate. Traversal
//! depth is capped to protect against pathological graphs that the cycle guard
//! cannot see, such as a provider reporting mutually inheriting classes.

use crate::{
    metadata::{
        provider::DescriptorProvider,
        typesystem::{CategoryKind, Compound, Member},
    },
    Error::RecursionLimit,
    Result,
};

/// Maximum recursion depth for inheritance traversal
const MAX_RECURSION_DEPTH: usize = 100;

/// Resolve `name` against `compound`, then depth-first against its ancestors.
///
/// Absence is `Ok(None)`; only lock poisoning and the recursion cap produce
/// errors.
pub fn resolve(
    provider: &dyn DescriptorProvider,
    compound: &Compound,
    name: &str,
) -> Result<Option<Member>> {
    resolve_with_depth(provider, compound, name, 0)
}

fn resolve_with_depth(
    provider: &dyn DescriptorProvider,
    compound: &Compound,
    name: &str,
    depth: usize,
) -> Result<Option<Member>> {
    if depth >= MAX_RECURSION_DEPTH {
        return Err(RecursionLimit(MAX_RECURSION_DEPTH));
    }

    // Explicit category addressing bypasses the default search order
    if let Some((prefix, rest)) = name.split_once('_') {
        if let Some(kind) = CategoryKind::from_prefix(prefix) {
            if let Some(category) = compound.category(kind) {
                if let Some(member) = category.lookup(provider, rest)? {
                    return Ok(Some(member));
                }
            }
            return resolve_inherited(provider, compound, name, depth);
        }
    }

    for kind in compound.kind().search_order() {
        if let Some(category) = compound.category(*kind) {
            if let Some(member) = category.lookup(provider, name)? {
                return Ok(Some(member));
            }
        }
    }

    resolve_inherited(provider, compound, name, depth)
}

fn resolve_inherited(
    provider: &dyn DescriptorProvider,
    compound: &Compound,
    name: &str,
    depth: usize,
) -> Result<Option<Member>> {
    for (_, (_, edge)) in compound.inherits().iter() {
        // Dead or declined edges are skipped, not errors
        let Some(target) = edge.upgrade() else {
            continue;
        };
        if let Some(member) = resolve_with_depth(provider, &target, name, depth + 1)? {
            return Ok(Some(member));
        }
    }
    Ok(None)
}
