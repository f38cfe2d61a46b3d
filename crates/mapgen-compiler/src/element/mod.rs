//! Mapper elements: one node per declared type.
//!
//! Variants form a closed set ([`ElementKind`]). Every element carries the
//! same shared capabilities; hierarchy links and fields are simply empty for
//! variants that have none.

mod init;
mod options;

use mapgen_core::{DeclId, TypeRef, TypeUniverse};
use serde::Serialize;

pub use options::MapperOptions;

/// Index of an element in its group's arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct ElementId(u32);

impl ElementId {
    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Variant tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    /// Annotated class found while enumerating the scope.
    Target,
    /// Annotated class pulled in by reference.
    Dependent,
    /// Annotated type alias over a class.
    Alias,
    /// Redirecting constructor mapped as its own variant.
    FactoryConstructor,
    /// Unannotated supertype or interface; a hierarchy rung only.
    None,
    TargetEnum,
    DependentEnum,
    TargetRecord,
}

impl ElementKind {
    pub fn is_class_like(self) -> bool {
        matches!(
            self,
            ElementKind::Target
                | ElementKind::Dependent
                | ElementKind::Alias
                | ElementKind::FactoryConstructor
                | ElementKind::None
        )
    }

    pub fn is_enum(self) -> bool {
        matches!(self, ElementKind::TargetEnum | ElementKind::DependentEnum)
    }

    pub fn is_record(self) -> bool {
        self == ElementKind::TargetRecord
    }

    pub fn generates_copy(self) -> bool {
        !matches!(self, ElementKind::None | ElementKind::FactoryConstructor)
    }

    /// Registered with the runtime mapper container on its own.
    pub fn is_top_level(self) -> bool {
        !matches!(self, ElementKind::None | ElementKind::FactoryConstructor)
    }

    /// Gets a generated mapper at all.
    pub fn is_emittable(self) -> bool {
        self != ElementKind::None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Target => "target",
            ElementKind::Dependent => "dependent",
            ElementKind::Alias => "alias",
            ElementKind::FactoryConstructor => "factoryConstructor",
            ElementKind::None => "none",
            ElementKind::TargetEnum => "targetEnum",
            ElementKind::DependentEnum => "dependentEnum",
            ElementKind::TargetRecord => "targetRecord",
        }
    }
}

/// Hierarchy links of a class-like element. Append-only, no duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassLinks {
    super_element: Option<ElementId>,
    interface_elements: Vec<ElementId>,
    sub_elements: Vec<ElementId>,
}

impl ClassLinks {
    /// Returns false when a super link already exists.
    pub(crate) fn set_super(&mut self, id: ElementId) -> bool {
        if self.super_element.is_some() {
            return false;
        }
        self.super_element = Some(id);
        true
    }

    pub(crate) fn add_interface(&mut self, id: ElementId) -> bool {
        push_unique(&mut self.interface_elements, id)
    }

    pub(crate) fn add_sub(&mut self, id: ElementId) -> bool {
        push_unique(&mut self.sub_elements, id)
    }
}

fn push_unique(list: &mut Vec<ElementId>, id: ElementId) -> bool {
    if list.contains(&id) {
        return false;
    }
    list.push(id);
    true
}

/// A constructor parameter or record field with its encoded key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub key: String,
    pub ty: TypeRef,
    pub named: bool,
    pub required: bool,
}

/// Encoded form of an enum value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EncodedValue {
    Name(String),
    Index(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub encoded: EncodedValue,
}

/// Where a factory-constructor element comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FactoryOrigin {
    pub owner: DeclId,
    /// Index into the owner's constructors.
    pub constructor: usize,
}

/// One node of the mapper graph.
#[derive(Clone, Debug)]
pub struct MapperElement {
    id: ElementId,
    identity: DeclId,
    kind: ElementKind,
    options: MapperOptions,
    /// Declaration answering hierarchy and constructor queries. The aliased
    /// class for aliases, the identity otherwise.
    hierarchy_decl: DeclId,
    /// Type arguments applied to `hierarchy_decl`.
    type_args: Vec<TypeRef>,
    factory: Option<FactoryOrigin>,
    constructor: Option<String>,
    fields: Vec<Field>,
    values: Vec<EnumValue>,
    explicit_subs: Vec<TypeRef>,
    links: ClassLinks,
    initialized: bool,
    pub(crate) analyzed: bool,
}

impl MapperElement {
    pub(crate) fn new(
        id: ElementId,
        identity: DeclId,
        kind: ElementKind,
        options: MapperOptions,
        universe: &dyn TypeUniverse,
    ) -> Self {
        let (hierarchy_decl, type_args) = match kind {
            ElementKind::Alias => match universe.aliased_type(identity) {
                Some(aliased) => (
                    aliased.decl().unwrap_or(identity),
                    aliased.args().to_vec(),
                ),
                None => (identity, Vec::new()),
            },
            _ => (identity, Vec::new()),
        };

        Self {
            id,
            identity,
            kind,
            options,
            hierarchy_decl,
            type_args,
            factory: None,
            constructor: None,
            fields: Vec::new(),
            values: Vec::new(),
            explicit_subs: Vec::new(),
            links: ClassLinks::default(),
            initialized: false,
            analyzed: false,
        }
    }

    pub(crate) fn factory(
        id: ElementId,
        identity: DeclId,
        options: MapperOptions,
        origin: FactoryOrigin,
    ) -> Self {
        Self {
            id,
            identity,
            kind: ElementKind::FactoryConstructor,
            options,
            hierarchy_decl: identity,
            type_args: Vec::new(),
            factory: Some(origin),
            constructor: None,
            fields: Vec::new(),
            values: Vec::new(),
            explicit_subs: Vec::new(),
            links: ClassLinks::default(),
            initialized: false,
            analyzed: false,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn identity(&self) -> DeclId {
        self.identity
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn options(&self) -> &MapperOptions {
        &self.options
    }

    pub fn hierarchy_decl(&self) -> DeclId {
        self.hierarchy_decl
    }

    pub fn type_args(&self) -> &[TypeRef] {
        &self.type_args
    }

    pub fn factory_origin(&self) -> Option<FactoryOrigin> {
        self.factory
    }

    /// Display name of the constructor used for decoding (`Box`, `Box.of`).
    pub fn constructor(&self) -> Option<&str> {
        self.constructor.as_deref()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn values(&self) -> &[EnumValue] {
        &self.values
    }

    pub fn super_element(&self) -> Option<ElementId> {
        self.links.super_element
    }

    pub fn interface_elements(&self) -> &[ElementId] {
        &self.links.interface_elements
    }

    pub fn sub_elements(&self) -> &[ElementId] {
        &self.links.sub_elements
    }

    /// Subclasses named by redirecting constructors.
    pub(crate) fn explicit_subs(&self) -> &[TypeRef] {
        &self.explicit_subs
    }

    pub(crate) fn add_explicit_sub(&mut self, ty: TypeRef) {
        if !self.explicit_subs.contains(&ty) {
            self.explicit_subs.push(ty);
        }
    }

    pub(crate) fn links_mut(&mut self) -> &mut ClassLinks {
        &mut self.links
    }
}
