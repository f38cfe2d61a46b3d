//! Deserialization layer for the universe JSON description.
//!
//! Loading runs in two phases: every unit and declaration gets its ID first,
//! then type expressions are parsed and resolved against those IDs. Forward
//! references and import cycles are therefore fine.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Deserialize;

use super::type_expr::{TypeExpr, parse_type_expr};
use super::{Decl, DeclKind, Import, ROOT_TYPE, Unit, Universe, UniverseError};
use crate::annotation::{
    Annotation, AnnotationKind, AnnotationOptions, CaseStyle, EnumMode, GenerateMethods,
};
use crate::types::{
    Constructor, DeclCategory, DeclId, Param, RecordShape, TypeParam, TypeRef, UnitId,
};

/// Host builtins. Never annotated, never mapped.
const BUILTINS: &[&str] = &[
    "int", "double", "num", "String", "bool", ROOT_TYPE, "dynamic", "List", "Map", "Set",
    "Iterable", "DateTime", "Uri", "Duration", "BigInt", "void", "Null",
];

pub(super) fn load(json: &str) -> Result<Universe, UniverseError> {
    let raw: RawUniverse = serde_json::from_str(json)?;
    raw.resolve()
}

#[derive(Deserialize)]
struct RawUniverse {
    #[serde(default)]
    units: Vec<RawUnit>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUnit {
    name: String,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    package: Option<String>,
    #[serde(default)]
    imports: Vec<RawImport>,
    #[serde(default)]
    options: Option<RawOptions>,
    #[serde(default)]
    decls: Vec<RawDecl>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawImport {
    Plain(String),
    Prefixed {
        unit: String,
        #[serde(default, alias = "as")]
        prefix: Option<String>,
    },
}

impl RawImport {
    fn parts(&self) -> (&str, Option<&str>) {
        match self {
            RawImport::Plain(unit) => (unit, None),
            RawImport::Prefixed { unit, prefix } => (unit, prefix.as_deref()),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDecl {
    name: String,
    #[serde(default)]
    private: bool,
    #[serde(default)]
    type_params: Vec<RawTypeParam>,
    #[serde(default)]
    annotation: Option<RawAnnotation>,
    #[serde(flatten)]
    kind: RawDeclKind,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum RawDeclKind {
    Class {
        #[serde(default, rename = "abstract")]
        is_abstract: bool,
        #[serde(default, rename = "sealed")]
        is_sealed: bool,
        #[serde(default, rename = "extends")]
        supertype: Option<String>,
        #[serde(default, rename = "implements")]
        interfaces: Vec<String>,
        #[serde(default)]
        constructors: Vec<RawConstructor>,
    },
    Enum {
        #[serde(default)]
        values: Vec<String>,
    },
    ClassAlias {
        aliased: String,
    },
    RecordAlias {
        shape: String,
    },
}

impl RawDeclKind {
    fn category(&self) -> DeclCategory {
        match self {
            RawDeclKind::Class { .. } => DeclCategory::Class,
            RawDeclKind::Enum { .. } => DeclCategory::Enum,
            RawDeclKind::ClassAlias { .. } => DeclCategory::ClassAlias,
            RawDeclKind::RecordAlias { .. } => DeclCategory::RecordAlias,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTypeParam {
    Plain(String),
    Bounded {
        name: String,
        #[serde(default)]
        bound: Option<String>,
    },
}

impl RawTypeParam {
    fn name(&self) -> &str {
        match self {
            RawTypeParam::Plain(name) | RawTypeParam::Bounded { name, .. } => name,
        }
    }

    fn bound(&self) -> Option<&str> {
        match self {
            RawTypeParam::Plain(_) => None,
            RawTypeParam::Bounded { bound, .. } => bound.as_deref(),
        }
    }
}

#[derive(Deserialize)]
struct RawAnnotation {
    kind: AnnotationKind,
    #[serde(default)]
    options: RawOptions,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RawOptions {
    case_style: Option<CaseStyle>,
    enum_case_style: Option<CaseStyle>,
    ignore_null: Option<bool>,
    discriminator_key: Option<String>,
    discriminator_value: Option<String>,
    generate_methods: Option<GenerateMethods>,
    #[serde(default)]
    include_sub_classes: Vec<String>,
    enum_mode: Option<EnumMode>,
    default_value: Option<String>,
    unique_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConstructor {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    params: Vec<RawParam>,
    #[serde(default)]
    redirect: Option<String>,
    #[serde(default)]
    annotation: Option<RawAnnotation>,
    #[serde(default)]
    mappable: bool,
}

#[derive(Deserialize)]
struct RawParam {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    named: bool,
    #[serde(default)]
    required: Option<bool>,
    #[serde(default)]
    key: Option<String>,
}

/// What phase one knows about a declaration.
struct Header {
    unit: UnitId,
    name: String,
    private: bool,
    category: DeclCategory,
    params: Vec<String>,
}

/// Where a type expression is resolved.
#[derive(Clone, Copy)]
struct Site<'a> {
    unit: UnitId,
    /// Declaration whose type parameters are in scope.
    owner: Option<DeclId>,
    context: &'a str,
}

enum Target {
    Decl(DeclId),
    Param(DeclId, usize),
    Builtin,
}

impl RawUniverse {
    fn resolve(self) -> Result<Universe, UniverseError> {
        let mut unit_ids = IndexMap::new();
        let mut units = Vec::with_capacity(self.units.len());
        let mut headers = Vec::new();

        for (index, raw_unit) in self.units.iter().enumerate() {
            let id = UnitId::from_raw(index as u32);
            if unit_ids.insert(raw_unit.name.clone(), id).is_some() {
                return Err(UniverseError::DuplicateUnit {
                    name: raw_unit.name.clone(),
                });
            }

            let mut seen = HashSet::new();
            let mut decls = Vec::with_capacity(raw_unit.decls.len());
            for raw_decl in &raw_unit.decls {
                if !seen.insert(raw_decl.name.as_str()) {
                    return Err(UniverseError::DuplicateDecl {
                        unit: raw_unit.name.clone(),
                        name: raw_decl.name.clone(),
                    });
                }
                decls.push(DeclId::from_raw(headers.len() as u32));
                headers.push(Header {
                    unit: id,
                    name: raw_decl.name.clone(),
                    private: raw_decl.private || raw_decl.name.starts_with('_'),
                    category: raw_decl.kind.category(),
                    params: raw_decl.type_params.iter().map(|p| p.name().to_string()).collect(),
                });
            }

            units.push(Unit {
                id,
                name: raw_unit.name.clone(),
                path: raw_unit.path.clone().unwrap_or_else(|| raw_unit.name.clone()),
                package: raw_unit.package.clone().unwrap_or_default(),
                imports: Vec::new(),
                options: None,
                decls,
            });
        }

        for (unit, raw_unit) in units.iter_mut().zip(&self.units) {
            for import in &raw_unit.imports {
                let (name, prefix) = import.parts();
                let target = unit_ids
                    .get(name)
                    .copied()
                    .ok_or_else(|| UniverseError::UnknownUnit {
                        name: name.to_string(),
                    })?;
                unit.imports.push(Import {
                    unit: target,
                    prefix: prefix.map(str::to_string),
                });
            }
        }

        let resolver = Resolver {
            units: &units,
            headers: &headers,
        };

        let mut unit_options = Vec::with_capacity(units.len());
        let mut decls = Vec::with_capacity(headers.len());
        for (unit, raw_unit) in units.iter().zip(&self.units) {
            let site = Site {
                unit: unit.id,
                owner: None,
                context: &unit.name,
            };
            let options = raw_unit
                .options
                .as_ref()
                .map(|o| resolver.options(o, site))
                .transpose()?;
            unit_options.push(options);

            for (&id, raw_decl) in unit.decls.iter().zip(&raw_unit.decls) {
                decls.push(resolver.decl(id, raw_decl)?);
            }
        }

        for (unit, options) in units.iter_mut().zip(unit_options) {
            unit.options = options;
        }

        Ok(Universe {
            units,
            decls,
            unit_ids,
        })
    }
}

struct Resolver<'a> {
    units: &'a [Unit],
    headers: &'a [Header],
}

impl Resolver<'_> {
    fn site<'c>(&self, owner: DeclId, context: &'c str) -> Site<'c> {
        Site {
            unit: self.headers[owner.index()].unit,
            owner: Some(owner),
            context,
        }
    }

    fn decl(&self, id: DeclId, raw: &RawDecl) -> Result<Decl, UniverseError> {
        let header = &self.headers[id.index()];
        let unit_name = &self.units[header.unit.index()].name;
        let qualified = format!("{unit_name}::{}", header.name);

        let bound_context = format!("type parameters of {qualified}");
        let type_params = raw
            .type_params
            .iter()
            .map(|p| {
                Ok(TypeParam {
                    name: p.name().to_string(),
                    bound: p
                        .bound()
                        .map(|b| self.type_text(b, self.site(id, &bound_context)))
                        .transpose()?,
                })
            })
            .collect::<Result<Vec<_>, UniverseError>>()?;

        let annotation_context = format!("annotation of {qualified}");
        let annotation = raw
            .annotation
            .as_ref()
            .map(|a| self.annotation(a, self.site(id, &annotation_context)))
            .transpose()?;

        let kind = match &raw.kind {
            RawDeclKind::Class {
                is_abstract,
                is_sealed,
                supertype,
                interfaces,
                constructors,
            } => {
                let super_context = format!("supertype of {qualified}");
                let supertype = match supertype {
                    Some(text) => self.class_type(text, self.site(id, &super_context))?,
                    None => None,
                };

                let iface_context = format!("interfaces of {qualified}");
                let mut resolved = Vec::with_capacity(interfaces.len());
                for text in interfaces {
                    let site = self.site(id, &iface_context);
                    if let Some(ty) = self.class_type(text, site)? {
                        resolved.push(ty);
                    }
                }

                let ctor_context = format!("constructors of {qualified}");
                let constructors = constructors
                    .iter()
                    .map(|c| self.constructor(c, self.site(id, &ctor_context)))
                    .collect::<Result<Vec<_>, _>>()?;

                DeclKind::Class {
                    is_abstract: *is_abstract,
                    is_sealed: *is_sealed,
                    supertype,
                    interfaces: resolved,
                    constructors,
                }
            }
            RawDeclKind::Enum { values } => DeclKind::Enum {
                values: values.clone(),
            },
            RawDeclKind::ClassAlias { aliased: text } => {
                let context = format!("alias {qualified}");
                let aliased = self.type_text(text, self.site(id, &context))?;
                match aliased.decl() {
                    Some(d) if self.headers[d.index()].category == DeclCategory::Class => {}
                    _ => {
                        return Err(UniverseError::NotAClass {
                            name: text.clone(),
                            context,
                        });
                    }
                }
                DeclKind::ClassAlias { aliased }
            }
            RawDeclKind::RecordAlias { shape } => {
                let context = format!("record alias {qualified}");
                match self.type_text(shape, self.site(id, &context))? {
                    TypeRef::Record { shape, .. } => DeclKind::RecordAlias { shape },
                    _ => {
                        return Err(UniverseError::RecordDecomposition {
                            name: qualified,
                            reason: format!("`{shape}` is not a record type"),
                        });
                    }
                }
            }
        };

        Ok(Decl {
            id,
            unit: header.unit,
            name: header.name.clone(),
            private: header.private,
            type_params,
            annotation,
            kind,
        })
    }

    fn constructor(&self, raw: &RawConstructor, site: Site) -> Result<Constructor, UniverseError> {
        let params = raw
            .params
            .iter()
            .map(|p| {
                Ok(Param {
                    name: p.name.clone(),
                    ty: self.type_text(&p.ty, site)?,
                    named: p.named,
                    required: p.required.unwrap_or(!p.named),
                    key: p.key.clone(),
                })
            })
            .collect::<Result<Vec<_>, UniverseError>>()?;

        let redirect = match &raw.redirect {
            Some(text) => self.class_type(text, site)?,
            None => None,
        };

        Ok(Constructor {
            name: raw.name.clone(),
            params,
            redirect,
            annotation: raw
                .annotation
                .as_ref()
                .map(|a| self.annotation(a, site))
                .transpose()?,
            mappable: raw.mappable,
        })
    }

    fn annotation(&self, raw: &RawAnnotation, site: Site) -> Result<Annotation, UniverseError> {
        Ok(Annotation::new(raw.kind).with_options(self.options(&raw.options, site)?))
    }

    fn options(&self, raw: &RawOptions, site: Site) -> Result<AnnotationOptions, UniverseError> {
        let mut include_sub_classes = Vec::with_capacity(raw.include_sub_classes.len());
        for text in &raw.include_sub_classes {
            if let Some(ty) = self.class_type(text, site)? {
                include_sub_classes.push(ty);
            }
        }

        Ok(AnnotationOptions {
            case_style: raw.case_style,
            enum_case_style: raw.enum_case_style,
            ignore_null: raw.ignore_null,
            discriminator_key: raw.discriminator_key.clone(),
            discriminator_value: raw.discriminator_value.clone(),
            generate_methods: raw.generate_methods,
            include_sub_classes,
            enum_mode: raw.enum_mode,
            default_value: raw.default_value.clone(),
            unique_id: raw.unique_id.clone(),
        })
    }

    /// Resolve a reference that must name a class. The root type yields `None`.
    fn class_type(&self, text: &str, site: Site) -> Result<Option<TypeRef>, UniverseError> {
        let ty = self.type_text(text, site)?;
        match &ty {
            TypeRef::Builtin { name, .. } if name == ROOT_TYPE => Ok(None),
            TypeRef::Named { decl, .. }
                if matches!(
                    self.headers[decl.index()].category,
                    DeclCategory::Class | DeclCategory::ClassAlias
                ) =>
            {
                Ok(Some(ty))
            }
            _ => Err(UniverseError::NotAClass {
                name: text.to_string(),
                context: site.context.to_string(),
            }),
        }
    }

    fn type_text(&self, text: &str, site: Site) -> Result<TypeRef, UniverseError> {
        let expr = parse_type_expr(text).map_err(|source| UniverseError::TypeSyntax {
            text: text.to_string(),
            context: site.context.to_string(),
            source,
        })?;
        self.type_expr(&expr, site)
    }

    fn type_expr(&self, expr: &TypeExpr, site: Site) -> Result<TypeRef, UniverseError> {
        match expr {
            TypeExpr::Record {
                positional,
                named,
                nullable,
            } => {
                let positional = positional
                    .iter()
                    .map(|e| self.type_expr(e, site))
                    .collect::<Result<Vec<_>, _>>()?;
                let named = named
                    .iter()
                    .map(|(n, e)| Ok((n.clone(), self.type_expr(e, site)?)))
                    .collect::<Result<Vec<_>, UniverseError>>()?;
                Ok(TypeRef::Record {
                    shape: RecordShape::new(positional, named),
                    nullable: *nullable,
                })
            }
            TypeExpr::Named {
                prefix,
                name,
                args,
                nullable,
            } => {
                let args = args
                    .iter()
                    .map(|e| self.type_expr(e, site))
                    .collect::<Result<Vec<_>, _>>()?;
                let display = match prefix {
                    Some(p) => format!("{p}.{name}"),
                    None => name.clone(),
                };

                let target = self.lookup(prefix.as_deref(), name, site).ok_or_else(|| {
                    UniverseError::UnknownType {
                        name: display.clone(),
                        context: site.context.to_string(),
                    }
                })?;

                match target {
                    Target::Param(owner, index) => {
                        check_arity(&display, 0, args.len())?;
                        Ok(TypeRef::Param {
                            owner,
                            index,
                            name: name.clone(),
                            nullable: *nullable,
                        })
                    }
                    Target::Decl(decl) => {
                        let expected = self.headers[decl.index()].params.len();
                        if !args.is_empty() {
                            check_arity(&display, expected, args.len())?;
                        }
                        Ok(TypeRef::Named {
                            decl,
                            args,
                            nullable: *nullable,
                        })
                    }
                    Target::Builtin => Ok(TypeRef::Builtin {
                        name: name.clone(),
                        args,
                        nullable: *nullable,
                    }),
                }
            }
        }
    }

    /// Name lookup: owner type parameters, the unit itself, unprefixed
    /// imports, builtins, then any public declaration of the universe.
    fn lookup(&self, prefix: Option<&str>, name: &str, site: Site) -> Option<Target> {
        let unit = &self.units[site.unit.index()];

        if let Some(prefix) = prefix {
            return unit
                .imports
                .iter()
                .filter(|i| i.prefix.as_deref() == Some(prefix))
                .find_map(|i| self.find_public(i.unit, name))
                .map(Target::Decl);
        }

        if let Some(owner) = site.owner
            && let Some(index) = self.headers[owner.index()]
                .params
                .iter()
                .position(|p| p == name)
        {
            return Some(Target::Param(owner, index));
        }

        if let Some(decl) = unit
            .decls
            .iter()
            .copied()
            .find(|d| self.headers[d.index()].name == name)
        {
            return Some(Target::Decl(decl));
        }

        if let Some(decl) = unit
            .imports
            .iter()
            .filter(|i| i.prefix.is_none())
            .find_map(|i| self.find_public(i.unit, name))
        {
            return Some(Target::Decl(decl));
        }

        if BUILTINS.contains(&name) {
            return Some(Target::Builtin);
        }

        self.units
            .iter()
            .find_map(|u| self.find_public(u.id, name))
            .map(Target::Decl)
    }

    fn find_public(&self, unit: UnitId, name: &str) -> Option<DeclId> {
        self.units[unit.index()].decls.iter().copied().find(|d| {
            let header = &self.headers[d.index()];
            header.name == name && !header.private
        })
    }
}

fn check_arity(name: &str, expected: usize, found: usize) -> Result<(), UniverseError> {
    if expected == found {
        return Ok(());
    }
    Err(UniverseError::Arity {
        name: name.to_string(),
        expected,
        found,
    })
}
