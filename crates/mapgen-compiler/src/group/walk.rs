//! Transitive walk over referenced types.

use mapgen_core::{AnnotationKind, DeclCategory, RecordShape, TypeRef};

use super::registry::{AnalysisCtx, Registry};
use super::resolve::{Policy, is_transparent_alias, resolve_or_create, unalias};
use crate::Result;

/// Discover every annotated declaration `ty` references, through type
/// arguments and record fields, registering record shapes on the way.
pub(crate) fn walk_type(cx: AnalysisCtx<'_>, reg: &mut Registry, ty: &TypeRef) -> Result<()> {
    match ty {
        TypeRef::Named { decl, args, .. } => {
            if cx.universe.decl_category(*decl) == DeclCategory::RecordAlias
                && !cx.universe.has_annotation_of(*decl, AnnotationKind::Record)
                && let Some(shape) = cx.universe.decompose_record(ty)?
            {
                return walk_record(cx, reg, &shape);
            }
            if is_transparent_alias(cx.universe, *decl) {
                let target = unalias(cx, ty);
                return match target.decl() {
                    // Alias cycle.
                    Some(d) if is_transparent_alias(cx.universe, d) => walk_all(cx, reg, target.args()),
                    _ => walk_type(cx, reg, &target),
                };
            }
            resolve_or_create(cx, reg, ty, Policy::IfAnnotated)?;
            walk_all(cx, reg, args)
        }
        TypeRef::Builtin { args, .. } => walk_all(cx, reg, args),
        TypeRef::Record { shape, .. } => walk_record(cx, reg, shape),
        TypeRef::Param { .. } => Ok(()),
    }
}

fn walk_all(cx: AnalysisCtx<'_>, reg: &mut Registry, types: &[TypeRef]) -> Result<()> {
    for ty in types {
        walk_type(cx, reg, ty)?;
    }
    Ok(())
}

fn walk_record(cx: AnalysisCtx<'_>, reg: &mut Registry, shape: &RecordShape) -> Result<()> {
    if shape.is_empty() {
        return Ok(());
    }
    let (alias, inserted) = reg.records.register(shape);
    if !inserted {
        return Ok(());
    }
    tracing::debug!(target: "mapgen::group", alias = %alias.name, "record registered");

    for (_, ty) in shape.fields() {
        walk_type(cx, reg, ty)?;
    }
    Ok(())
}
