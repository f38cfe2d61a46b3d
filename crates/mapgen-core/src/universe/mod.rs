//! The type universe: source units, declarations, and the adapter contract.
//!
//! [`TypeUniverse`] is everything the analysis core may ask about the host
//! program. [`Universe`] is the in-memory implementation, loaded from JSON
//! via [`Universe::from_json`].

mod error;
mod raw;
pub mod type_expr;


use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::annotation::{Annotation, AnnotationKind, AnnotationOptions};
use crate::types::{Constructor, DeclCategory, DeclId, RecordShape, TypeParam, TypeRef, UnitId};

pub use error::UniverseError;

/// Name of the universal root type. Never reported as a supertype.
pub const ROOT_TYPE: &str = "Object";

/// Which units are analysed together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Only the root unit.
    #[default]
    #[serde(alias = "library")]
    Unit,
    /// Every unit in the root unit's directory.
    Directory,
    /// Every unit of the root unit's package.
    Package,
}

impl Scope {
    pub fn parse(spec: &str) -> Option<Self> {
        match spec.to_ascii_lowercase().as_str() {
            "unit" | "library" | "single" => Some(Self::Unit),
            "directory" | "dir" => Some(Self::Directory),
            "package" | "pkg" => Some(Self::Package),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Unit => "unit",
            Scope::Directory => "directory",
            Scope::Package => "package",
        }
    }
}

/// Import of another unit, optionally under a namespace prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Import {
    pub unit: UnitId,
    pub prefix: Option<String>,
}

/// One source unit.
#[derive(Clone, Debug)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub path: String,
    pub package: String,
    pub imports: Vec<Import>,
    /// Unit-wide annotation defaults.
    pub options: Option<AnnotationOptions>,
    pub decls: Vec<DeclId>,
}

/// Kind-specific part of a declaration.
#[derive(Clone, Debug)]
pub enum DeclKind {
    Class {
        is_abstract: bool,
        is_sealed: bool,
        supertype: Option<TypeRef>,
        interfaces: Vec<TypeRef>,
        constructors: Vec<Constructor>,
    },
    Enum {
        values: Vec<String>,
    },
    ClassAlias {
        aliased: TypeRef,
    },
    RecordAlias {
        shape: RecordShape,
    },
}

/// A declared type.
#[derive(Clone, Debug)]
pub struct Decl {
    pub id: DeclId,
    pub unit: UnitId,
    pub name: String,
    pub private: bool,
    pub type_params: Vec<TypeParam>,
    pub annotation: Option<Annotation>,
    pub kind: DeclKind,
}

impl Decl {
    pub fn category(&self) -> DeclCategory {
        match self.kind {
            DeclKind::Class { .. } => DeclCategory::Class,
            DeclKind::Enum { .. } => DeclCategory::Enum,
            DeclKind::ClassAlias { .. } => DeclCategory::ClassAlias,
            DeclKind::RecordAlias { .. } => DeclCategory::RecordAlias,
        }
    }
}

/// Adapter contract between the analysis core and the host type system.
///
/// All declaration handles passed in must come from the same universe.
pub trait TypeUniverse {
    fn decl_name(&self, decl: DeclId) -> &str;

    /// `unit::Name`, used in diagnostics.
    fn qualified_name(&self, decl: DeclId) -> String;

    fn decl_unit(&self, decl: DeclId) -> UnitId;

    fn decl_category(&self, decl: DeclId) -> DeclCategory;

    /// Whether code in `from` may reference `decl`.
    fn is_visible(&self, decl: DeclId, from: UnitId) -> bool;

    fn is_abstract(&self, decl: DeclId) -> bool;

    /// The annotation of the given kind on `decl`, if any.
    fn annotation_of(&self, decl: DeclId, kind: AnnotationKind) -> Option<&Annotation>;

    fn has_annotation_of(&self, decl: DeclId, kind: AnnotationKind) -> bool {
        self.annotation_of(decl, kind).is_some()
    }

    /// Direct supertype, excluding the universal root type.
    fn declared_supertype(&self, decl: DeclId) -> Option<TypeRef>;

    fn declared_interfaces(&self, decl: DeclId) -> Vec<TypeRef>;

    /// Subtypes the host type system knows exhaustively (the direct
    /// subtypes of a sealed declaration). Empty for open declarations.
    fn known_subclasses(&self, decl: DeclId) -> Vec<TypeRef>;

    fn constructors(&self, decl: DeclId) -> &[Constructor];

    fn generic_parameters(&self, decl: DeclId) -> &[TypeParam];

    /// The aliased class instantiation of a class alias.
    fn aliased_type(&self, decl: DeclId) -> Option<&TypeRef>;

    /// What a class-alias reference stands for, with the reference's type
    /// arguments substituted. `None` when `ty` does not name a class alias.
    fn expand_alias(&self, ty: &TypeRef) -> Option<TypeRef> {
        let TypeRef::Named {
            decl,
            args,
            nullable,
        } = ty
        else {
            return None;
        };
        let expanded = self.aliased_type(*decl)?.substitute(*decl, args);
        let nullable = *nullable || expanded.is_nullable();
        Some(expanded.with_nullable(nullable))
    }

    fn enum_values(&self, decl: DeclId) -> &[String];

    /// The declared shape of a record alias, unsubstituted.
    fn record_shape(&self, decl: DeclId) -> Option<&RecordShape>;

    /// Structural decomposition of a record-like type.
    ///
    /// Inline records decompose to their shape, references to record
    /// aliases to the alias shape with type arguments substituted. Any
    /// other type yields `Ok(None)`.
    fn decompose_record(&self, ty: &TypeRef) -> Result<Option<RecordShape>, UniverseError>;

    /// Qualifier needed to name `decl` from `from` (`Some("m")` for
    /// `import ... as m`).
    fn import_prefix_of(&self, from: UnitId, decl: DeclId) -> Option<&str>;

    fn unit_name(&self, unit: UnitId) -> &str;

    fn unit_options(&self, unit: UnitId) -> Option<&AnnotationOptions>;

    /// Every declaration of the universe, in declaration order.
    fn decls(&self) -> Vec<DeclId>;

    /// Candidate declarations per unit for an analysis rooted at `root`.
    fn discover_universe(&self, root: UnitId, scope: Scope) -> Vec<(UnitId, Vec<DeclId>)>;
}

/// In-memory universe.
#[derive(Clone, Debug, Default)]
pub struct Universe {
    units: Vec<Unit>,
    decls: Vec<Decl>,
    unit_ids: IndexMap<String, UnitId>,
}

impl Universe {
    /// Parse and resolve a universe from its JSON description.
    pub fn from_json(json: &str) -> Result<Self, UniverseError> {
        raw::load(json)
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> &Unit {
        &self.units[id.index()]
    }

    pub fn unit_id(&self, name: &str) -> Option<UnitId> {
        self.unit_ids.get(name).copied()
    }

    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id.index()]
    }

    /// Look up a declaration by name, searching units in order.
    pub fn find_decl(&self, name: &str) -> Option<DeclId> {
        self.decls.iter().find(|d| d.name == name).map(|d| d.id)
    }

    pub fn find_decl_in(&self, unit: UnitId, name: &str) -> Option<DeclId> {
        self.unit(unit)
            .decls
            .iter()
            .copied()
            .find(|&d| self.decl(d).name == name)
    }

    fn unit_dir(&self, unit: UnitId) -> Option<&Path> {
        Path::new(&self.unit(unit).path).parent()
    }

    /// The class `ty` names, looking through class aliases.
    fn class_of(&self, ty: &TypeRef) -> Option<DeclId> {
        let mut decl = ty.decl()?;
        let mut seen = Vec::new();
        while let Some(aliased) = self.aliased_type(decl).and_then(TypeRef::decl) {
            if seen.contains(&decl) {
                break;
            }
            seen.push(decl);
            decl = aliased;
        }
        Some(decl)
    }

    fn class_parts(&self, decl: DeclId) -> Option<(&Option<TypeRef>, &[TypeRef])> {
        match &self.decl(decl).kind {
            DeclKind::Class {
                supertype,
                interfaces,
                ..
            } => Some((supertype, interfaces)),
            _ => None,
        }
    }
}

impl TypeUniverse for Universe {
    fn decl_name(&self, decl: DeclId) -> &str {
        &self.decl(decl).name
    }

    fn qualified_name(&self, decl: DeclId) -> String {
        let d = self.decl(decl);
        format!("{}::{}", self.unit(d.unit).name, d.name)
    }

    fn decl_unit(&self, decl: DeclId) -> UnitId {
        self.decl(decl).unit
    }

    fn decl_category(&self, decl: DeclId) -> DeclCategory {
        self.decl(decl).category()
    }

    fn is_visible(&self, decl: DeclId, from: UnitId) -> bool {
        let d = self.decl(decl);
        !d.private || d.unit == from
    }

    fn is_abstract(&self, decl: DeclId) -> bool {
        match self.decl(decl).kind {
            DeclKind::Class {
                is_abstract,
                is_sealed,
                ..
            } => is_abstract || is_sealed,
            _ => false,
        }
    }

    fn annotation_of(&self, decl: DeclId, kind: AnnotationKind) -> Option<&Annotation> {
        self.decl(decl)
            .annotation
            .as_ref()
            .filter(|a| a.kind == kind)
    }

    fn declared_supertype(&self, decl: DeclId) -> Option<TypeRef> {
        let (supertype, _) = self.class_parts(decl)?;
        supertype.clone()
    }

    fn declared_interfaces(&self, decl: DeclId) -> Vec<TypeRef> {
        self.class_parts(decl)
            .map(|(_, interfaces)| interfaces.to_vec())
            .unwrap_or_default()
    }

    fn known_subclasses(&self, decl: DeclId) -> Vec<TypeRef> {
        let DeclKind::Class { is_sealed: true, .. } = self.decl(decl).kind else {
            return Vec::new();
        };

        self.decls
            .iter()
            .filter(|d| {
                self.class_parts(d.id).is_some_and(|(supertype, interfaces)| {
                    supertype.iter().chain(interfaces).any(|t| self.class_of(t) == Some(decl))
                })
            })
            .map(|d| TypeRef::named(d.id))
            .collect()
    }

    fn constructors(&self, decl: DeclId) -> &[Constructor] {
        match &self.decl(decl).kind {
            DeclKind::Class { constructors, .. } => constructors,
            _ => &[],
        }
    }

    fn generic_parameters(&self, decl: DeclId) -> &[TypeParam] {
        &self.decl(decl).type_params
    }

    fn aliased_type(&self, decl: DeclId) -> Option<&TypeRef> {
        match &self.decl(decl).kind {
            DeclKind::ClassAlias { aliased } => Some(aliased),
            _ => None,
        }
    }

    fn enum_values(&self, decl: DeclId) -> &[String] {
        match &self.decl(decl).kind {
            DeclKind::Enum { values } => values,
            _ => &[],
        }
    }

    fn record_shape(&self, decl: DeclId) -> Option<&RecordShape> {
        match &self.decl(decl).kind {
            DeclKind::RecordAlias { shape } => Some(shape),
            _ => None,
        }
    }

    fn decompose_record(&self, ty: &TypeRef) -> Result<Option<RecordShape>, UniverseError> {
        match ty {
            TypeRef::Record { shape, .. } => Ok(Some(shape.clone())),
            TypeRef::Named { decl, args, .. } => {
                let Some(shape) = self.record_shape(*decl) else {
                    return Ok(None);
                };
                let expected = self.decl(*decl).type_params.len();
                if !args.is_empty() && args.len() != expected {
                    return Err(UniverseError::RecordDecomposition {
                        name: self.qualified_name(*decl),
                        reason: format!(
                            "expected {expected} type argument(s), found {}",
                            args.len()
                        ),
                    });
                }
                Ok(Some(shape.substitute(*decl, args)))
            }
            TypeRef::Param { .. } | TypeRef::Builtin { .. } => Ok(None),
        }
    }

    fn import_prefix_of(&self, from: UnitId, decl: DeclId) -> Option<&str> {
        let target = self.decl(decl).unit;
        if target == from {
            return None;
        }
        self.unit(from)
            .imports
            .iter()
            .find(|i| i.unit == target)
            .and_then(|i| i.prefix.as_deref())
    }

    fn unit_name(&self, unit: UnitId) -> &str {
        &self.unit(unit).name
    }

    fn unit_options(&self, unit: UnitId) -> Option<&AnnotationOptions> {
        self.unit(unit).options.as_ref()
    }

    fn decls(&self) -> Vec<DeclId> {
        self.decls.iter().map(|d| d.id).collect()
    }

    fn discover_universe(&self, root: UnitId, scope: Scope) -> Vec<(UnitId, Vec<DeclId>)> {
        let root_unit = self.unit(root);
        self.units
            .iter()
            .filter(|u| match scope {
                Scope::Unit => u.id == root,
                Scope::Directory => self.unit_dir(u.id) == self.unit_dir(root),
                Scope::Package => u.package == root_unit.package,
            })
            .map(|u| (u.id, u.decls.clone()))
            .collect()
    }
}
