//! Resolved type references and declaration parts.
//!
//! Everything here is produced by the universe loader and consumed
//! read-only by the analysis core.

use std::fmt;

use crate::annotation::Annotation;

/// Handle to a source unit (one library/module of the host program).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct UnitId(u32);

impl UnitId {
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to a declared type. Unique across the whole universe.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct DeclId(u32);

impl DeclId {
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Coarse declaration category, used for the closed dispatch on annotations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclCategory {
    Class,
    Enum,
    ClassAlias,
    RecordAlias,
}

/// A resolved type reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A declared type, possibly instantiated.
    Named {
        decl: DeclId,
        args: Vec<TypeRef>,
        nullable: bool,
    },
    /// The `index`-th type parameter of `owner`.
    Param {
        owner: DeclId,
        index: usize,
        name: String,
        nullable: bool,
    },
    /// An inline record shape.
    Record { shape: RecordShape, nullable: bool },
    /// A host builtin (`int`, `String`, `List<T>`, ...). Never annotated.
    Builtin {
        name: String,
        args: Vec<TypeRef>,
        nullable: bool,
    },
}

impl TypeRef {
    pub fn named(decl: DeclId) -> Self {
        TypeRef::Named {
            decl,
            args: Vec::new(),
            nullable: false,
        }
    }

    pub fn builtin(name: &str) -> Self {
        TypeRef::Builtin {
            name: name.to_string(),
            args: Vec::new(),
            nullable: false,
        }
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            TypeRef::Named { nullable, .. }
            | TypeRef::Param { nullable, .. }
            | TypeRef::Record { nullable, .. }
            | TypeRef::Builtin { nullable, .. } => *nullable,
        }
    }

    #[must_use]
    pub fn with_nullable(mut self, value: bool) -> Self {
        match &mut self {
            TypeRef::Named { nullable, .. }
            | TypeRef::Param { nullable, .. }
            | TypeRef::Record { nullable, .. }
            | TypeRef::Builtin { nullable, .. } => *nullable = value,
        }
        self
    }

    /// The referenced declaration, if this is a named reference.
    pub fn decl(&self) -> Option<DeclId> {
        match self {
            TypeRef::Named { decl, .. } => Some(*decl),
            _ => None,
        }
    }

    /// Type arguments of named and builtin references.
    pub fn args(&self) -> &[TypeRef] {
        match self {
            TypeRef::Named { args, .. } | TypeRef::Builtin { args, .. } => args,
            TypeRef::Param { .. } | TypeRef::Record { .. } => &[],
        }
    }

    /// Replace the type parameters of `owner` by `args`.
    ///
    /// A nullable parameter reference makes the substituted argument nullable.
    /// Parameters without a matching argument are kept as they are.
    #[must_use]
    pub fn substitute(&self, owner: DeclId, args: &[TypeRef]) -> TypeRef {
        match self {
            TypeRef::Param {
                owner: o,
                index,
                nullable,
                ..
            } if *o == owner => match args.get(*index) {
                Some(arg) => {
                    let nullable = *nullable || arg.is_nullable();
                    arg.clone().with_nullable(nullable)
                }
                None => self.clone(),
            },
            TypeRef::Param { .. } => self.clone(),
            TypeRef::Named {
                decl,
                args: inner,
                nullable,
            } => TypeRef::Named {
                decl: *decl,
                args: inner.iter().map(|a| a.substitute(owner, args)).collect(),
                nullable: *nullable,
            },
            TypeRef::Builtin {
                name,
                args: inner,
                nullable,
            } => TypeRef::Builtin {
                name: name.clone(),
                args: inner.iter().map(|a| a.substitute(owner, args)).collect(),
                nullable: *nullable,
            },
            TypeRef::Record { shape, nullable } => TypeRef::Record {
                shape: shape.substitute(owner, args),
                nullable: *nullable,
            },
        }
    }

    /// Replace every parameter reference by its position in `params`,
    /// dropping owner and name.
    fn normalize_params(&self, params: &[TypeRef]) -> TypeRef {
        match self {
            TypeRef::Param { nullable, .. } => {
                let plain = self.clone().with_nullable(false);
                let index = params.iter().position(|p| *p == plain).unwrap_or(params.len());
                TypeRef::Param {
                    owner: KEY_OWNER,
                    index,
                    name: String::new(),
                    nullable: *nullable,
                }
            }
            TypeRef::Named {
                decl,
                args,
                nullable,
            } => TypeRef::Named {
                decl: *decl,
                args: args.iter().map(|a| a.normalize_params(params)).collect(),
                nullable: *nullable,
            },
            TypeRef::Builtin {
                name,
                args,
                nullable,
            } => TypeRef::Builtin {
                name: name.clone(),
                args: args.iter().map(|a| a.normalize_params(params)).collect(),
                nullable: *nullable,
            },
            TypeRef::Record { shape, nullable } => TypeRef::Record {
                shape: RecordShape {
                    positional: shape
                        .positional
                        .iter()
                        .map(|t| t.normalize_params(params))
                        .collect(),
                    named: shape
                        .named
                        .iter()
                        .map(|(n, t)| (n.clone(), t.normalize_params(params)))
                        .collect(),
                },
                nullable: *nullable,
            },
        }
    }

    /// Collect the distinct type parameters referenced anywhere inside,
    /// in first-appearance order. Collected references are non-nullable.
    pub fn collect_params(&self, out: &mut Vec<TypeRef>) {
        match self {
            TypeRef::Param { .. } => {
                let param = self.clone().with_nullable(false);
                if !out.contains(&param) {
                    out.push(param);
                }
            }
            TypeRef::Named { args, .. } | TypeRef::Builtin { args, .. } => {
                for arg in args {
                    arg.collect_params(out);
                }
            }
            TypeRef::Record { shape, .. } => shape.collect_params(out),
        }
    }
}

/// Owner of the parameter references in a structural key.
const KEY_OWNER: DeclId = DeclId(u32::MAX);

/// Structural record (tuple / labeled tuple) shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RecordShape {
    pub positional: Vec<TypeRef>,
    /// Named fields in declaration order.
    pub named: Vec<(String, TypeRef)>,
}

impl RecordShape {
    pub fn new(positional: Vec<TypeRef>, named: Vec<(String, TypeRef)>) -> Self {
        Self { positional, named }
    }

    /// Structural identity: positional order is significant, named fields
    /// compare as a set of name/type pairs. Type parameters are numbered as
    /// in [`RecordShape::key_params`], so `(T, int)` in two generic
    /// declarations has one key.
    pub fn key(&self) -> RecordShape {
        let sorted = self.sorted();
        let params = sorted.params();
        RecordShape {
            positional: sorted
                .positional
                .iter()
                .map(|ty| ty.normalize_params(&params))
                .collect(),
            named: sorted
                .named
                .iter()
                .map(|(name, ty)| (name.clone(), ty.normalize_params(&params)))
                .collect(),
        }
    }

    /// Distinct type parameters in structural order: positional fields
    /// first, then named fields by name.
    pub fn key_params(&self) -> Vec<TypeRef> {
        self.sorted().params()
    }

    fn sorted(&self) -> RecordShape {
        let mut named = self.named.clone();
        named.sort_by(|a, b| a.0.cmp(&b.0));
        RecordShape {
            positional: self.positional.clone(),
            named,
        }
    }

    fn params(&self) -> Vec<TypeRef> {
        let mut out = Vec::new();
        self.collect_params(&mut out);
        out
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    /// All fields with their access label: `$1`, `$2`, ... for positional
    /// fields, the field name for named ones.
    pub fn fields(&self) -> impl Iterator<Item = (String, &TypeRef)> {
        let positional = self
            .positional
            .iter()
            .enumerate()
            .map(|(i, ty)| (format!("${}", i + 1), ty));
        let named = self.named.iter().map(|(name, ty)| (name.clone(), ty));
        positional.chain(named)
    }

    #[must_use]
    pub fn substitute(&self, owner: DeclId, args: &[TypeRef]) -> RecordShape {
        RecordShape {
            positional: self
                .positional
                .iter()
                .map(|t| t.substitute(owner, args))
                .collect(),
            named: self
                .named
                .iter()
                .map(|(n, t)| (n.clone(), t.substitute(owner, args)))
                .collect(),
        }
    }

    pub fn collect_params(&self, out: &mut Vec<TypeRef>) {
        for ty in &self.positional {
            ty.collect_params(out);
        }
        for (_, ty) in &self.named {
            ty.collect_params(out);
        }
    }
}

/// Generic type parameter of a declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParam {
    pub name: String,
    pub bound: Option<TypeRef>,
}

/// Constructor parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: TypeRef,
    pub named: bool,
    pub required: bool,
    /// Encoded key override from a field annotation.
    pub key: Option<String>,
}

/// Constructor of a class declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constructor {
    /// `None` for the unnamed (default) constructor.
    pub name: Option<String>,
    pub params: Vec<Param>,
    /// Class the constructor redirects to (`factory Base.a() = A;`).
    pub redirect: Option<TypeRef>,
    /// Class annotation placed on the constructor itself.
    pub annotation: Option<Annotation>,
    /// Explicitly selected as the constructor used for decoding.
    pub mappable: bool,
}

impl Constructor {
    pub fn is_redirecting(&self) -> bool {
        self.redirect.is_some()
    }

    /// `Class` or `Class.name`.
    pub fn display_name(&self, class: &str) -> String {
        match &self.name {
            Some(name) => format!("{class}.{name}"),
            None => class.to_string(),
        }
    }
}
