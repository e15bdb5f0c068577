//! In-memory reference implementation of the descriptor provider.
//!
//! `MemoryProvider` backs the integration tests and the benchmarks. Descriptor graphs are assembled imperatively through the
//! builder-style `add_*`/`set_*` methods, then the finished provider is
//! shared behind an `Arc` and queried read-only through the
//! [`DescriptorProvider`] trait.
//!
//! Every slot accessor call is counted per descriptor, so tests can assert
//! the materializer's single-fetch guarantee directly via
//! [`MemoryProvider::fetch_count`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::metadata::{
    descriptor::{CallableFlags, Descriptor, DescriptorKind, NativeTypeId},
    provider::DescriptorProvider,
    typesystem::Value,
};

/// One descriptor record in the in-memory database.
struct DescriptorData {
    kind: DescriptorKind,
    name: String,
    namespace: String,
    container: Option<Descriptor>,
    native_type: NativeTypeId,
    deprecated: bool,
    shadow: bool,
    flags: CallableFlags,
    fields: Vec<Descriptor>,
    methods: Vec<Descriptor>,
    properties: Vec<Descriptor>,
    signals: Vec<Descriptor>,
    constants: Vec<Descriptor>,
    values: Vec<Descriptor>,
    prerequisites: Vec<Descriptor>,
    interfaces: Vec<Descriptor>,
    args: Vec<Descriptor>,
    parent: Option<Descriptor>,
    return_type: Option<Descriptor>,
    enum_value: i64,
    constant: Value,
    fetches: AtomicU32,
}

impl DescriptorData {
    fn new(kind: DescriptorKind, namespace: &str, name: &str) -> Self {
        DescriptorData {
            kind,
            name: name.to_string(),
            namespace: namespace.to_string(),
            container: None,
            native_type: NativeTypeId::default(),
            deprecated: false,
            shadow: false,
            flags: CallableFlags::empty(),
            fields: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
            signals: Vec::new(),
            constants: Vec::new(),
            values: Vec::new(),
            prerequisites: Vec::new(),
            interfaces: Vec::new(),
            args: Vec::new(),
            parent: None,
            return_type: None,
            enum_value: 0,
            constant: Value::Int(0),
            fetches: AtomicU32::new(0),
        }
    }
}

struct NamespaceData {
    version: String,
    dependencies: Vec<String>,
    infos: Vec<Descriptor>,
    by_name: HashMap<String, Descriptor>,
}

/// Complete in-memory descriptor database.
///
/// Build the graph with the `add_*`/`set_*` methods, then hand the provider to
/// a [`crate::Repository`] behind an `Arc`. Handles issued by one provider are
/// only valid against that provider; presenting a foreign handle panics.
///
/// # Examples
///
/// ```rust
/// use introscope::metadata::provider::MemoryProvider;
/// use introscope::metadata::descriptor::NativeTypeId;
///
/// let mut provider = MemoryProvider::new();
/// provider.add_namespace("Foo", "1.0", &[]);
/// let bar = provider.add_class("Foo", "Bar", NativeTypeId::new(80));
/// provider.add_method(bar, "do_thing");
/// ```
#[derive(Default)]
pub struct MemoryProvider {
    descriptors: Vec<DescriptorData>,
    namespaces: HashMap<String, NamespaceData>,
    by_native: HashMap<NativeTypeId, Descriptor>,
}

impl MemoryProvider {
    /// Create an empty provider with no namespaces.
    #[must_use]
    pub fn new() -> Self {
        MemoryProvider::default()
    }

    fn data(&self, desc: Descriptor) -> &DescriptorData {
        &self.descriptors[desc.0 as usize]
    }

    fn data_mut(&mut self, desc: Descriptor) -> &mut DescriptorData {
        &mut self.descriptors[desc.0 as usize]
    }

    fn push(&mut self, data: DescriptorData) -> Descriptor {
        let desc = Descriptor::new(u32::try_from(self.descriptors.len()).unwrap_or(u32::MAX));
        self.descriptors.push(data);
        desc
    }

    fn register_toplevel(&mut self, namespace: &str, name: &str, desc: Descriptor) {
        if let Some(ns) = self.namespaces.get_mut(namespace) {
            ns.infos.push(desc);
            ns.by_name.insert(name.to_string(), desc);
        }
    }

    fn counted_slot(&self, list: &[Descriptor], index: u32) -> Option<Descriptor> {
        let slot = list.get(index as usize).copied();
        if let Some(d) = slot {
            self.data(d).fetches.fetch_add(1, Ordering::Relaxed);
        }
        slot
    }

    // ── Graph construction ──────────────────────────────────────────────

    /// Register a namespace with its version and dependency names.
    pub fn add_namespace(&mut self, name: &str, version: &str, dependencies: &[&str]) {
        self.namespaces.insert(
            name.to_string(),
            NamespaceData {
                version: version.to_string(),
                dependencies: dependencies.iter().map(|d| (*d).to_string()).collect(),
                infos: Vec::new(),
                by_name: HashMap::new(),
            },
        );
    }

    fn add_toplevel(
        &mut self,
        kind: DescriptorKind,
        namespace: &str,
        name: &str,
        native: NativeTypeId,
    ) -> Descriptor {
        let mut data = DescriptorData::new(kind, namespace, name);
        data.native_type = native;
        let desc = self.push(data);
        self.register_toplevel(namespace, name, desc);
        if !native.is_null() {
            self.by_native.insert(native, desc);
        }
        desc
    }

    /// Register a class descriptor in a namespace.
    pub fn add_class(&mut self, namespace: &str, name: &str, native: NativeTypeId) -> Descriptor {
        self.add_toplevel(DescriptorKind::Class, namespace, name, native)
    }

    /// Register an interface descriptor in a namespace.
    pub fn add_interface(
        &mut self,
        namespace: &str,
        name: &str,
        native: NativeTypeId,
    ) -> Descriptor {
        self.add_toplevel(DescriptorKind::Interface, namespace, name, native)
    }

    /// Register a struct descriptor in a namespace.
    pub fn add_struct(&mut self, namespace: &str, name: &str, native: NativeTypeId) -> Descriptor {
        self.add_toplevel(DescriptorKind::Struct, namespace, name, native)
    }

    /// Register a union descriptor in a namespace.
    pub fn add_union(&mut self, namespace: &str, name: &str, native: NativeTypeId) -> Descriptor {
        self.add_toplevel(DescriptorKind::Union, namespace, name, native)
    }

    /// Register an enum descriptor with its named values, in declaration order.
    pub fn add_enum(
        &mut self,
        namespace: &str,
        name: &str,
        native: NativeTypeId,
        values: &[(&str, i64)],
    ) -> Descriptor {
        let desc = self.add_toplevel(DescriptorKind::Enum, namespace, name, native);
        for (value_name, value) in values {
            let value_desc = self.add_value(desc, value_name, *value);
            self.data_mut(desc).values.push(value_desc);
        }
        desc
    }

    /// Register a flags descriptor with its named bits, in declaration order.
    pub fn add_flags(
        &mut self,
        namespace: &str,
        name: &str,
        native: NativeTypeId,
        values: &[(&str, i64)],
    ) -> Descriptor {
        let desc = self.add_toplevel(DescriptorKind::Flags, namespace, name, native);
        for (value_name, value) in values {
            let value_desc = self.add_value(desc, value_name, *value);
            self.data_mut(desc).values.push(value_desc);
        }
        desc
    }

    fn add_value(&mut self, container: Descriptor, name: &str, value: i64) -> Descriptor {
        let namespace = self.data(container).namespace.clone();
        let mut data = DescriptorData::new(DescriptorKind::Value, &namespace, name);
        data.container = Some(container);
        data.enum_value = value;
        self.push(data)
    }

    /// Register a free function in a namespace.
    pub fn add_function(&mut self, namespace: &str, name: &str) -> Descriptor {
        self.add_toplevel(DescriptorKind::Function, namespace, name, NativeTypeId::default())
    }

    /// Register a namespace-level constant.
    pub fn add_constant(&mut self, namespace: &str, name: &str, value: Value) -> Descriptor {
        let desc =
            self.add_toplevel(DescriptorKind::Constant, namespace, name, NativeTypeId::default());
        self.data_mut(desc).constant = value;
        desc
    }

    fn add_child(&mut self, kind: DescriptorKind, container: Descriptor, name: &str) -> Descriptor {
        let namespace = self.data(container).namespace.clone();
        let mut data = DescriptorData::new(kind, &namespace, name);
        data.container = Some(container);
        self.push(data)
    }

    /// Add a method to a compound.
    pub fn add_method(&mut self, container: Descriptor, name: &str) -> Descriptor {
        let desc = self.add_child(DescriptorKind::Method, container, name);
        self.data_mut(container).methods.push(desc);
        desc
    }

    /// Add a field to a compound.
    pub fn add_field(&mut self, container: Descriptor, name: &str) -> Descriptor {
        let desc = self.add_child(DescriptorKind::Field, container, name);
        self.data_mut(container).fields.push(desc);
        desc
    }

    /// Add a property, under its declared (dash-separated) name.
    pub fn add_property(&mut self, container: Descriptor, name: &str) -> Descriptor {
        let desc = self.add_child(DescriptorKind::Property, container, name);
        self.data_mut(container).properties.push(desc);
        desc
    }

    /// Add a signal, under its declared (dash-separated) name.
    pub fn add_signal(&mut self, container: Descriptor, name: &str) -> Descriptor {
        let desc = self.add_child(DescriptorKind::Signal, container, name);
        self.data_mut(container).signals.push(desc);
        desc
    }

    /// Add a constant member to a compound.
    pub fn add_member_constant(
        &mut self,
        container: Descriptor,
        name: &str,
        value: Value,
    ) -> Descriptor {
        let desc = self.add_child(DescriptorKind::Constant, container, name);
        self.data_mut(desc).constant = value;
        self.data_mut(container).constants.push(desc);
        desc
    }

    /// Declare a prerequisite on an interface.
    pub fn add_prerequisite(&mut self, interface: Descriptor, target: Descriptor) {
        self.data_mut(interface).prerequisites.push(target);
    }

    /// Declare that a class implements an interface.
    pub fn add_interface_impl(&mut self, class: Descriptor, interface: Descriptor) {
        self.data_mut(class).interfaces.push(interface);
    }

    /// Declare the parent type of a class.
    pub fn set_parent(&mut self, class: Descriptor, parent: Descriptor) {
        self.data_mut(class).parent = Some(parent);
    }

    /// Mark a descriptor deprecated.
    pub fn set_deprecated(&mut self, desc: Descriptor) {
        self.data_mut(desc).deprecated = true;
    }

    /// Mark a struct as the implementation-internal shadow of another type.
    pub fn set_shadow(&mut self, desc: Descriptor) {
        self.data_mut(desc).shadow = true;
    }

    /// Set the shape flags of a callable.
    pub fn set_callable_flags(&mut self, desc: Descriptor, flags: CallableFlags) {
        self.data_mut(desc).flags = flags;
    }

    /// Add a named argument to a callable.
    pub fn add_arg(&mut self, callable: Descriptor, name: &str) -> Descriptor {
        let namespace = self.data(callable).namespace.clone();
        let mut data = DescriptorData::new(DescriptorKind::Value, &namespace, name);
        data.container = Some(callable);
        let desc = self.push(data);
        self.data_mut(callable).args.push(desc);
        desc
    }

    /// Set the return type descriptor of a callable.
    pub fn set_return_type(&mut self, callable: Descriptor, ty: Descriptor) {
        self.data_mut(callable).return_type = Some(ty);
    }

    // ── Instrumentation ─────────────────────────────────────────────────

    /// Number of times `desc` has been handed out by a slot accessor.
    ///
    /// Used by tests to verify that the category materializer fetches each
    /// slot at most once regardless of lookup order.
    #[must_use]
    pub fn fetch_count(&self, desc: Descriptor) -> u32 {
        self.data(desc).fetches.load(Ordering::Relaxed)
    }
}

impl DescriptorProvider for MemoryProvider {
    fn namespace_version(&self, namespace: &str) -> Option<String> {
        self.namespaces.get(namespace).map(|ns| ns.version.clone())
    }

    fn namespace_dependencies(&self, namespace: &str) -> Vec<String> {
        self.namespaces
            .get(namespace)
            .map(|ns| ns.dependencies.clone())
            .unwrap_or_default()
    }

    fn info_count(&self, namespace: &str) -> u32 {
        self.namespaces
            .get(namespace)
            .map_or(0, |ns| u32::try_from(ns.infos.len()).unwrap_or(u32::MAX))
    }

    fn info(&self, namespace: &str, index: u32) -> Option<Descriptor> {
        self.namespaces
            .get(namespace)
            .and_then(|ns| ns.infos.get(index as usize).copied())
    }

    fn find_by_name(&self, namespace: &str, symbol: &str) -> Option<Descriptor> {
        self.namespaces
            .get(namespace)
            .and_then(|ns| ns.by_name.get(symbol).copied())
    }

    fn find_by_native_type(&self, id: NativeTypeId) -> Option<Descriptor> {
        self.by_native.get(&id).copied()
    }

    fn kind(&self, desc: Descriptor) -> DescriptorKind {
        self.data(desc).kind
    }

    fn name(&self, desc: Descriptor) -> String {
        self.data(desc).name.clone()
    }

    fn namespace_of(&self, desc: Descriptor) -> String {
        self.data(desc).namespace.clone()
    }

    fn container(&self, desc: Descriptor) -> Option<Descriptor> {
        self.data(desc).container
    }

    fn native_type(&self, desc: Descriptor) -> NativeTypeId {
        self.data(desc).native_type
    }

    fn is_deprecated(&self, desc: Descriptor) -> bool {
        self.data(desc).deprecated
    }

    fn is_shadow_struct(&self, desc: Descriptor) -> bool {
        self.data(desc).shadow
    }

    fn field_count(&self, container: Descriptor) -> u32 {
        u32::try_from(self.data(container).fields.len()).unwrap_or(u32::MAX)
    }

    fn field(&self, container: Descriptor, index: u32) -> Option<Descriptor> {
        self.counted_slot(&self.data(container).fields, index)
    }

    fn method_count(&self, container: Descriptor) -> u32 {
        u32::try_from(self.data(container).methods.len()).unwrap_or(u32::MAX)
    }

    fn method(&self, container: Descriptor, index: u32) -> Option<Descriptor> {
        self.counted_slot(&self.data(container).methods, index)
    }

    fn property_count(&self, container: Descriptor) -> u32 {
        u32::try_from(self.data(container).properties.len()).unwrap_or(u32::MAX)
    }

    fn property(&self, container: Descriptor, index: u32) -> Option<Descriptor> {
        self.counted_slot(&self.data(container).properties, index)
    }

    fn signal_count(&self, container: Descriptor) -> u32 {
        u32::try_from(self.data(container).signals.len()).unwrap_or(u32::MAX)
    }

    fn signal(&self, container: Descriptor, index: u32) -> Option<Descriptor> {
        self.counted_slot(&self.data(container).signals, index)
    }

    fn constant_count(&self, container: Descriptor) -> u32 {
        u32::try_from(self.data(container).constants.len()).unwrap_or(u32::MAX)
    }

    fn constant(&self, container: Descriptor, index: u32) -> Option<Descriptor> {
        self.counted_slot(&self.data(container).constants, index)
    }

    fn value_count(&self, container: Descriptor) -> u32 {
        u32::try_from(self.data(container).values.len()).unwrap_or(u32::MAX)
    }

    fn value(&self, container: Descriptor, index: u32) -> Option<Descriptor> {
        self.counted_slot(&self.data(container).values, index)
    }

    fn prerequisite_count(&self, interface: Descriptor) -> u32 {
        u32::try_from(self.data(interface).prerequisites.len()).unwrap_or(u32::MAX)
    }

    fn prerequisite(&self, interface: Descriptor, index: u32) -> Option<Descriptor> {
        self.counted_slot(&self.data(interface).prerequisites, index)
    }

    fn interface_count(&self, class: Descriptor) -> u32 {
        u32::try_from(self.data(class).interfaces.len()).unwrap_or(u32::MAX)
    }

    fn interface(&self, class: Descriptor, index: u32) -> Option<Descriptor> {
        self.counted_slot(&self.data(class).interfaces, index)
    }

    fn parent(&self, class: Descriptor) -> Option<Descriptor> {
        self.data(class).parent
    }

    fn callable_flags(&self, desc: Descriptor) -> CallableFlags {
        self.data(desc).flags
    }

    fn arg_count(&self, callable: Descriptor) -> u32 {
        u32::try_from(self.data(callable).args.len()).unwrap_or(u32::MAX)
    }

    fn arg(&self, callable: Descriptor, index: u32) -> Option<Descriptor> {
        self.data(callable).args.get(index as usize).copied()
    }

    fn return_type(&self, callable: Descriptor) -> Option<Descriptor> {
        self.data(callable).return_type
    }

    fn enum_value(&self, value: Descriptor) -> i64 {
        self.data(value).enum_value
    }

    fn constant_value(&self, desc: Descriptor) -> Value {
        self.data(desc).constant.clone()
    }
}
