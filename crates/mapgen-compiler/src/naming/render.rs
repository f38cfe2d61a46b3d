//! Rendering type references as host-syntax text.

use mapgen_core::{DeclCategory, DeclId, RecordShape, TypeRef, TypeUniverse};

use super::Prefixes;
use crate::element::ElementKind;
use crate::group::{RecordAlias, Registry};

/// Fallback for type parameters without a bound.
const UNBOUNDED: &str = "dynamic";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Append `?` to nullable references.
    pub nullable: bool,
    /// Render type parameters as their bounds.
    pub resolve_bounds: bool,
}

impl RenderOptions {
    pub const PLAIN: Self = Self {
        nullable: false,
        resolve_bounds: false,
    };

    pub const NULLABLE: Self = Self {
        nullable: true,
        resolve_bounds: false,
    };

    pub const BOUNDED: Self = Self {
        nullable: false,
        resolve_bounds: true,
    };
}

/// Renders type references against a finished group.
pub struct TypeRenderer<'a> {
    universe: &'a dyn TypeUniverse,
    prefixes: &'a Prefixes,
    registry: &'a Registry,
}

impl<'a> TypeRenderer<'a> {
    pub(crate) fn new(
        universe: &'a dyn TypeUniverse,
        prefixes: &'a Prefixes,
        registry: &'a Registry,
    ) -> Self {
        Self {
            universe,
            prefixes,
            registry,
        }
    }

    pub fn render(&self, ty: &TypeRef, opts: RenderOptions) -> String {
        let mut out = String::new();
        self.write(&mut out, ty, opts, &mut Vec::new());
        out
    }

    /// Qualified declaration name without type arguments (`g.Point`).
    pub fn decl_name(&self, decl: DeclId) -> String {
        format!("{}{}", self.prefixes.get(decl), self.universe.decl_name(decl))
    }

    /// Name of the generated companion (`g.PointMapper`).
    pub fn mapper_name(&self, decl: DeclId) -> String {
        format!("{}Mapper", self.decl_name(decl))
    }

    /// The declaration instantiated with its type parameters' bounds
    /// (`Box<num>`). Used for helper signatures.
    pub fn bounded_type(&self, decl: DeclId) -> String {
        let params = self.param_refs(decl);
        let ty = TypeRef::Named {
            decl,
            args: params,
            nullable: false,
        };
        self.render(&ty, RenderOptions::BOUNDED)
    }

    /// Type parameters as declared (`T`, `T extends num`).
    pub fn type_params(&self, decl: DeclId) -> Vec<String> {
        self.universe
            .generic_parameters(decl)
            .iter()
            .map(|p| match &p.bound {
                Some(bound) => format!("{} extends {}", p.name, self.render(bound, RenderOptions::NULLABLE)),
                None => p.name.clone(),
            })
            .collect()
    }

    /// Alias with its own type parameters (`_R0<T>`).
    pub fn record_alias(&self, alias: &RecordAlias, opts: RenderOptions) -> String {
        let mut out = alias.name.clone();
        self.write_args(&mut out, &alias.type_params, opts, &mut Vec::new());
        out
    }

    /// Structural form, ignoring registered aliases (`(int, {String name})`).
    pub fn inline_record(&self, shape: &RecordShape, opts: RenderOptions) -> String {
        let mut out = String::new();
        self.write_inline_record(&mut out, shape, opts, &mut Vec::new());
        out
    }

    fn param_refs(&self, decl: DeclId) -> Vec<TypeRef> {
        self.universe
            .generic_parameters(decl)
            .iter()
            .enumerate()
            .map(|(index, p)| TypeRef::Param {
                owner: decl,
                index,
                name: p.name.clone(),
                nullable: false,
            })
            .collect()
    }

    fn is_record_target(&self, decl: DeclId) -> bool {
        self.registry
            .lookup(decl)
            .is_some_and(|id| self.registry.get(id).kind() == ElementKind::TargetRecord)
    }

    fn write(
        &self,
        out: &mut String,
        ty: &TypeRef,
        opts: RenderOptions,
        visiting: &mut Vec<(DeclId, usize)>,
    ) {
        match ty {
            TypeRef::Named { decl, args, .. } => {
                let decomposed = if self.universe.decl_category(*decl) == DeclCategory::RecordAlias
                    && !self.is_record_target(*decl)
                {
                    self.universe.decompose_record(ty).ok().flatten()
                } else {
                    None
                };
                match decomposed {
                    Some(shape) => self.write_record(out, &shape, opts, visiting),
                    None => {
                        out.push_str(self.prefixes.get(*decl));
                        out.push_str(self.universe.decl_name(*decl));
                        self.write_args(out, args, opts, visiting);
                    }
                }
            }
            TypeRef::Param {
                owner,
                index,
                name,
                nullable,
            } => {
                if !opts.resolve_bounds {
                    out.push_str(name);
                } else {
                    let key = (*owner, *index);
                    let bound = self
                        .universe
                        .generic_parameters(*owner)
                        .get(*index)
                        .and_then(|p| p.bound.as_ref());
                    match bound {
                        Some(bound) if !visiting.contains(&key) => {
                            let bound = bound.clone().with_nullable(bound.is_nullable() || *nullable);
                            visiting.push(key);
                            self.write(out, &bound, opts, visiting);
                            visiting.pop();
                        }
                        _ => out.push_str(UNBOUNDED),
                    }
                    // The bound carries its own nullability.
                    return;
                }
            }
            TypeRef::Record { shape, .. } => self.write_record(out, shape, opts, visiting),
            TypeRef::Builtin { name, args, .. } => {
                out.push_str(name);
                self.write_args(out, args, opts, visiting);
            }
        }

        if opts.nullable && ty.is_nullable() {
            out.push('?');
        }
    }

    fn write_args(
        &self,
        out: &mut String,
        args: &[TypeRef],
        opts: RenderOptions,
        visiting: &mut Vec<(DeclId, usize)>,
    ) {
        if args.is_empty() {
            return;
        }
        out.push('<');
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write(out, arg, opts, visiting);
        }
        out.push('>');
    }

    fn write_record(
        &self,
        out: &mut String,
        shape: &RecordShape,
        opts: RenderOptions,
        visiting: &mut Vec<(DeclId, usize)>,
    ) {
        match self.registry.records.get(shape) {
            Some(alias) => {
                // Arguments are this shape's own parameters.
                out.push_str(&alias.name);
                self.write_args(out, &shape.key_params(), opts, visiting);
            }
            None => self.write_inline_record(out, shape, opts, visiting),
        }
    }

    fn write_inline_record(
        &self,
        out: &mut String,
        shape: &RecordShape,
        opts: RenderOptions,
        visiting: &mut Vec<(DeclId, usize)>,
    ) {
        out.push('(');
        for (i, ty) in shape.positional.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write(out, ty, opts, visiting);
        }

        if shape.named.is_empty() {
            if shape.positional.len() == 1 {
                out.push(',');
            }
        } else {
            if !shape.positional.is_empty() {
                out.push_str(", ");
            }
            out.push('{');
            for (i, (name, ty)) in shape.named.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                self.write(out, ty, opts, visiting);
                out.push(' ');
                out.push_str(name);
            }
            out.push('}');
        }
        out.push(')');
    }
}
