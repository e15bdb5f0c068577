//! Forward and reverse value tables for enumerations and bit-flag sets.
//!
//! Unlike compound categories, value tables are built eagerly: enumerations are
//! small and their reverse lookups need the complete table anyway. Value names
//! are upper-case normalized (`red` → `RED`) to match the constant naming
//! convention of the host surface.
//!
//! Reverse lookup semantics differ by kind:
//! - **Enum**: given an integer, the first name whose value equals it wins.
//!   Ties are broken by provider declaration order, which is the fixed,
//!   documented order throughout this library.
//! - **Flags**: given a bitmask, every name whose value is fully contained in
//!   the mask (`value & mask == value`) is returned, in declaration order.

use std::collections::HashMap;

use crate::metadata::{
    descriptor::{Descriptor, NativeTypeId},
    provider::DescriptorProvider,
};

/// Name↔value table of one enumeration or flag set.
#[derive(Debug)]
pub struct ValueTable {
    namespace: String,
    name: String,
    native_type: NativeTypeId,
    descriptor: Descriptor,
    flags: bool,
    /// Normalized names with their values, in provider declaration order.
    /// A name collision overwrites the value in place, keeping the position
    /// of the first occurrence.
    entries: Vec<(String, i64)>,
    index: HashMap<String, usize>,
}

impl ValueTable {
    /// Build the complete table for an enum or flags descriptor.
    pub(crate) fn from_descriptor(
        provider: &dyn DescriptorProvider,
        desc: Descriptor,
        flags: bool,
    ) -> Self {
        let mut entries: Vec<(String, i64)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for i in 0..provider.value_count(desc) {
            let Some(value_desc) = provider.value(desc, i) else {
                continue;
            };
            let name = provider.name(value_desc).to_ascii_uppercase();
            let value = provider.enum_value(value_desc);
            match index.get(&name) {
                Some(&pos) => entries[pos].1 = value,
                None => {
                    index.insert(name.clone(), entries.len());
                    entries.push((name, value));
                }
            }
        }

        ValueTable {
            namespace: provider.namespace_of(desc),
            name: provider.name(desc),
            native_type: provider.native_type(desc),
            descriptor: desc,
            flags,
            entries,
            index,
        }
    }

    /// Name of the namespace this table belongs to.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Simple name of the enumeration or flag set.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace-qualified name, `Namespace.Name`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    /// Native type id from the provider, exposed as header metadata.
    #[must_use]
    pub fn native_type(&self) -> NativeTypeId {
        self.native_type
    }

    /// Provider handle this table was built from.
    #[must_use]
    pub fn descriptor(&self) -> Descriptor {
        self.descriptor
    }

    /// Whether this table describes a bit-flag set rather than an enumeration.
    #[must_use]
    pub fn is_flags(&self) -> bool {
        self.flags
    }

    /// Number of named values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table declares no values at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forward lookup: normalized name to integer value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<i64> {
        self.index.get(name).map(|&pos| self.entries[pos].1)
    }

    /// Reverse lookup for enumerations: first declared name carrying `value`.
    #[must_use]
    pub fn name_of(&self, value: i64) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(name, _)| name.as_str())
    }

    /// Subset lookup for flag sets: all names whose value is fully contained
    /// in `mask`, in declaration order.
    #[must_use]
    pub fn names_in(&self, mask: i64) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, v)| v & mask == *v)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Iterate the table in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::provider::MemoryProvider;

    fn color_table() -> ValueTable {
        let mut provider = MemoryProvider::new();
        provider.add_namespace("Foo", "1.0", &[]);
        let color = provider.add_enum(
            "Foo",
            "Color",
            NativeTypeId::new(81),
            &[("red", 0), ("green", 1), ("blue", 2)],
        );
        ValueTable::from_descriptor(&provider, color, false)
    }

    #[test]
    fn test_enum_round_trip() {
        let table = color_table();
        assert_eq!(table.get("GREEN"), Some(1));
        assert_eq!(table.name_of(1), Some("GREEN"));
        assert_eq!(table.get("purple"), None);
        assert_eq!(table.name_of(9), None);
    }

    #[test]
    fn test_names_are_upper_case_normalized() {
        let table = color_table();
        assert_eq!(table.get("RED"), Some(0));
        assert_eq!(table.get("red"), None);
        let names: Vec<&str> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["RED", "GREEN", "BLUE"]);
    }

    #[test]
    fn test_reverse_ties_break_by_declaration_order() {
        let mut provider = MemoryProvider::new();
        provider.add_namespace("Foo", "1.0", &[]);
        let status = provider.add_enum(
            "Foo",
            "Status",
            NativeTypeId::new(82),
            &[("ok", 0), ("success", 0), ("failed", 1)],
        );
        let table = ValueTable::from_descriptor(&provider, status, false);
        assert_eq!(table.name_of(0), Some("OK"));
    }

    #[test]
    fn test_name_collisions_overwrite_in_place() {
        let mut provider = MemoryProvider::new();
        provider.add_namespace("Foo", "1.0", &[]);
        let odd = provider.add_enum(
            "Foo",
            "Odd",
            NativeTypeId::new(83),
            &[("same", 1), ("other", 2), ("SAME", 3)],
        );
        let table = ValueTable::from_descriptor(&provider, odd, false);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("SAME"), Some(3));
        let names: Vec<&str> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["SAME", "OTHER"]);
    }

    #[test]
    fn test_flags_subset() {
        let mut provider = MemoryProvider::new();
        provider.add_namespace("Foo", "1.0", &[]);
        let anchors = provider.add_flags(
            "Foo",
            "Anchors",
            NativeTypeId::new(84),
            &[("left", 1), ("top", 2), ("right", 4)],
        );
        let table = ValueTable::from_descriptor(&provider, anchors, true);
        assert!(table.is_flags());
        assert_eq!(table.names_in(3), vec!["LEFT", "TOP"]);
        assert_eq!(table.names_in(1), vec!["LEFT"]);
        assert_eq!(table.names_in(4), vec!["RIGHT"]);
        assert!(table.names_in(8).is_empty());
    }
}
