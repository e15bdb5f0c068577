//! Compound records: structs, unions, classes and interfaces.
//!
//! A [`Compound`] links the lazily materialized categories of one descriptor into a
//! single record together with its header metadata (qualified name, native type id)
//! and its inheritance edges. Compounds are immutable once assembled; their
//! categories keep materializing in place behind shared references.
//!
//! Inheritance edges are weak references: an edge may point at a compound that is
//! still being loaded, and the resolver declines to follow an edge whose target has
//! not (yet) been pinned by a namespace cache. This is what keeps class↔interface
//! prerequisite cycles from leaking or recursing forever.

use std::fmt;
use std::sync::{Arc, Weak};

use strum::IntoEnumIterator;

use crate::{
    metadata::{
        descriptor::{Descriptor, NativeTypeId},
        provider::DescriptorProvider,
        runtime::{Runtime, SignalCallback},
        typesystem::{resolver, Category, CategoryKind, Member, Value},
    },
    Error::{CastFailed, MemberNotFound},
    Result,
};

/// A reference counted compound
pub type CompoundRc = Arc<Compound>;

/// Ordered, append-only list of inheritance edges: declared name plus weak target
pub type InheritsList = Arc<boxcar::Vec<(String, CompoundRef)>>;

/// A smart reference to a `Compound` that automatically handles weak references
/// to prevent circular reference memory leaks while providing a clean API
#[derive(Clone, Debug)]
pub struct CompoundRef {
    weak_ref: Weak<Compound>,
}

impl CompoundRef {
    /// Create a new `CompoundRef` from a strong reference
    #[must_use]
    pub fn new(strong_ref: &CompoundRc) -> Self {
        Self {
            weak_ref: Arc::downgrade(strong_ref),
        }
    }

    /// Get a strong reference to the compound, returning None if it has been dropped
    #[must_use]
    pub fn upgrade(&self) -> Option<CompoundRc> {
        self.weak_ref.upgrade()
    }

    /// Check if the referenced compound is still alive
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.weak_ref.strong_count() > 0
    }

    /// Get the name of the referenced compound (if still alive)
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.upgrade().map(|c| c.name().to_string())
    }

    /// Get the qualified name of the referenced compound (if still alive)
    #[must_use]
    pub fn qualified_name(&self) -> Option<String> {
        self.upgrade().map(|c| c.qualified_name())
    }
}

impl From<CompoundRc> for CompoundRef {
    fn from(strong_ref: CompoundRc) -> Self {
        Self::new(&strong_ref)
    }
}

/// The four compound variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompoundKind {
    /// A plain structure (methods, fields)
    Struct,
    /// An untagged union (methods, fields)
    Union,
    /// A class (properties, methods, signals, constants, fields, inherits)
    Class,
    /// An interface (properties, methods, signals, constants, inherits)
    Interface,
}

impl CompoundKind {
    /// The fixed category search order the resolver walks for this variant.
    ///
    /// Classes and interfaces: properties, methods, signals, constants, fields.
    /// Structs and unions: methods, fields.
    #[must_use]
    pub fn search_order(&self) -> &'static [CategoryKind] {
        match self {
            CompoundKind::Class | CompoundKind::Interface => &[
                CategoryKind::Properties,
                CategoryKind::Methods,
                CategoryKind::Signals,
                CategoryKind::Constants,
                CategoryKind::Fields,
            ],
            CompoundKind::Struct | CompoundKind::Union => {
                &[CategoryKind::Methods, CategoryKind::Fields]
            }
        }
    }
}

impl fmt::Display for CompoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompoundKind::Struct => write!(f, "Struct"),
            CompoundKind::Union => write!(f, "Union"),
            CompoundKind::Class => write!(f, "Class"),
            CompoundKind::Interface => write!(f, "Interface"),
        }
    }
}

/// One assembled struct, union, class or interface.
pub struct Compound {
    kind: CompoundKind,
    namespace: String,
    name: String,
    native_type: NativeTypeId,
    descriptor: Descriptor,
    properties: Option<Category>,
    methods: Option<Category>,
    signals: Option<Category>,
    constants: Option<Category>,
    fields: Option<Category>,
    inherits: InheritsList,
}

impl Compound {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        kind: CompoundKind,
        namespace: String,
        name: String,
        native_type: NativeTypeId,
        descriptor: Descriptor,
        properties: Option<Category>,
        methods: Option<Category>,
        signals: Option<Category>,
        constants: Option<Category>,
        fields: Option<Category>,
    ) -> Self {
        Compound {
            kind,
            namespace,
            name,
            native_type,
            descriptor,
            properties,
            methods,
            signals,
            constants,
            fields,
            inherits: Arc::new(boxcar::Vec::new()),
        }
    }

    /// The compound variant.
    #[must_use]
    pub fn kind(&self) -> CompoundKind {
        self.kind
    }

    /// Name of the namespace this compound belongs to.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Simple name of the compound.
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

    /// Provider handle this compound was assembled from.
    #[must_use]
    pub fn descriptor(&self) -> Descriptor {
        self.descriptor
    }

    /// The category of the given kind, if this variant carries it.
    #[must_use]
    pub fn category(&self, kind: CategoryKind) -> Option<&Category> {
        match kind {
            CategoryKind::Properties => self.properties.as_ref(),
            CategoryKind::Methods => self.methods.as_ref(),
            CategoryKind::Signals => self.signals.as_ref(),
            CategoryKind::Constants => self.constants.as_ref(),
            CategoryKind::Fields => self.fields.as_ref(),
        }
    }

    /// The inheritance edges, in declaration order (a class's synthetic parent
    /// edge follows its declared interfaces).
    #[must_use]
    pub fn inherits(&self) -> &InheritsList {
        &self.inherits
    }

    pub(crate) fn add_inherits_edge(&self, name: String, target: CompoundRef) {
        self.inherits.push((name, target));
    }

    /// Resolve a member by name across this compound's own categories and its
    /// inherited compounds. Absence is `Ok(None)`, never an error.
    pub fn resolve(
        &self,
        provider: &dyn DescriptorProvider,
        name: &str,
    ) -> Result<Option<Member>> {
        resolver::resolve(provider, self, name)
    }

    /// Force every category of this compound to fully materialize in one pass.
    pub fn materialize(&self, provider: &dyn DescriptorProvider) -> Result<()> {
        for kind in CategoryKind::iter() {
            if let Some(category) = self.category(kind) {
                category.materialize(provider)?;
            }
        }
        Ok(())
    }

    /// Construct an instance of this compound through the opaque runtime.
    pub fn instantiate<R: Runtime>(
        &self,
        runtime: &R,
        properties: &[(String, Value)],
    ) -> Result<R::Value> {
        runtime.instantiate(self.descriptor, properties)
    }

    /// Cast a runtime value to this compound's native type.
    ///
    /// A rejected cast is a recoverable error naming the source value and the
    /// target type, as the embedding layer is expected to surface it verbatim.
    pub fn cast<R: Runtime>(&self, runtime: &R, value: &R::Value) -> Result<R::Value> {
        runtime.cast(value, self.native_type).ok_or_else(|| CastFailed {
            value: format!("{value:?}"),
            target: self.qualified_name(),
        })
    }

    /// Connect a callback to one of this compound's signals, including signals
    /// reached through inheritance.
    pub fn connect<R: Runtime>(
        &self,
        provider: &dyn DescriptorProvider,
        runtime: &R,
        instance: &R::Value,
        signal: &str,
        callback: SignalCallback<R::Value>,
        detail: Option<&str>,
        after: bool,
    ) -> Result<R::Subscription> {
        let member = self.resolve(provider, signal)?;
        match member.as_ref().and_then(Member::as_signal) {
            Some(signal) => Ok(runtime.connect(instance, signal, callback, detail, after)),
            None => Err(MemberNotFound {
                container: self.qualified_name(),
                name: signal.to_string(),
            }),
        }
    }
}

impl fmt::Debug for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compound")
            .field("kind", &self.kind)
            .field("name", &self.qualified_name())
            .field("native_type", &self.native_type)
            .finish_non_exhaustive()
    }
}
