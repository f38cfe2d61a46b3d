//! Resolve-or-create: the single entry point for adding elements on demand.

use mapgen_core::{Annotation, AnnotationKind, DeclCategory, DeclId, TypeRef, TypeUniverse};

use super::hierarchy::analyze_element;
use super::registry::{AnalysisCtx, Registry};
use crate::element::{ElementId, ElementKind, MapperOptions};
use crate::{Error, Result};

/// What to do when a referenced declaration carries no annotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Policy {
    /// Supertypes and interfaces: create a None placeholder.
    CreateNone,
    /// Field types and bounds: skip.
    IfAnnotated,
    /// Subclasses: fail.
    MustExist,
}

/// Return the element for the declaration `ty` names, creating it if the
/// policy allows. A new element is initialized and hierarchy-analysed
/// before this returns.
pub(crate) fn resolve_or_create(
    cx: AnalysisCtx<'_>,
    reg: &mut Registry,
    ty: &TypeRef,
    policy: Policy,
) -> Result<Option<ElementId>> {
    let Some(decl) = ty.decl() else {
        return Ok(None);
    };
    if let Some(id) = reg.lookup(decl) {
        return Ok(Some(id));
    }

    let kind = match dependent_kind(cx.universe, decl) {
        Some(kind) => kind,
        None => match policy {
            Policy::CreateNone if is_class_decl(cx.universe, decl) => ElementKind::None,
            Policy::MustExist => {
                return Err(Error::MissingSubclassMapper {
                    name: cx.name(decl),
                });
            }
            Policy::CreateNone | Policy::IfAnnotated => return Ok(None),
        },
    };

    let options = match kind {
        ElementKind::None => MapperOptions::placeholder(cx.config),
        _ => element_options(cx, decl),
    };
    let id = reg.create(cx, decl, kind, options);
    analyze_element(cx, reg, id)?;
    Ok(Some(id))
}

/// Variant for a declaration found while enumerating the scope.
pub(crate) fn target_kind(universe: &dyn TypeUniverse, decl: DeclId) -> Option<ElementKind> {
    annotation(universe, decl)?;
    Some(match universe.decl_category(decl) {
        DeclCategory::Class => ElementKind::Target,
        DeclCategory::ClassAlias => ElementKind::Alias,
        DeclCategory::Enum => ElementKind::TargetEnum,
        DeclCategory::RecordAlias => ElementKind::TargetRecord,
    })
}

/// Variant for an annotated declaration pulled in by reference.
fn dependent_kind(universe: &dyn TypeUniverse, decl: DeclId) -> Option<ElementKind> {
    annotation(universe, decl)?;
    Some(match universe.decl_category(decl) {
        DeclCategory::Class => ElementKind::Dependent,
        DeclCategory::ClassAlias => ElementKind::Alias,
        DeclCategory::Enum => ElementKind::DependentEnum,
        DeclCategory::RecordAlias => ElementKind::TargetRecord,
    })
}

/// Options layered from config, the declaring unit and the annotation.
pub(crate) fn element_options(cx: AnalysisCtx<'_>, decl: DeclId) -> MapperOptions {
    let unit = cx.universe.decl_unit(decl);
    MapperOptions::resolve(
        cx.config,
        cx.universe.unit_options(unit),
        annotation(cx.universe, decl).map(|a| &a.options),
    )
}

/// The annotation matching the declaration's category, if present.
fn annotation(universe: &dyn TypeUniverse, decl: DeclId) -> Option<&Annotation> {
    let kind = match universe.decl_category(decl) {
        DeclCategory::Class | DeclCategory::ClassAlias => AnnotationKind::Class,
        DeclCategory::Enum => AnnotationKind::Enum,
        DeclCategory::RecordAlias => AnnotationKind::Record,
    };
    universe.annotation_of(decl, kind)
}

/// Look through unannotated class aliases: they map as the class they
/// stand for. Stops at an annotated alias or on an alias cycle.
pub(crate) fn unalias(cx: AnalysisCtx<'_>, ty: &TypeRef) -> TypeRef {
    let mut current = ty.clone();
    let mut seen = Vec::new();
    while let Some(decl) = current.decl()
        && is_transparent_alias(cx.universe, decl)
        && !seen.contains(&decl)
        && let Some(expanded) = cx.universe.expand_alias(&current)
    {
        seen.push(decl);
        current = expanded;
    }
    current
}

/// The class `ty` names, looking through every class alias.
pub(crate) fn aliased_class(cx: AnalysisCtx<'_>, ty: &TypeRef) -> Option<DeclId> {
    let mut current = ty.clone();
    let mut seen = Vec::new();
    while let Some(decl) = current.decl()
        && !seen.contains(&decl)
        && let Some(expanded) = cx.universe.expand_alias(&current)
    {
        seen.push(decl);
        current = expanded;
    }
    current.decl()
}

pub(crate) fn is_transparent_alias(universe: &dyn TypeUniverse, decl: DeclId) -> bool {
    universe.decl_category(decl) == DeclCategory::ClassAlias
        && !universe.has_annotation_of(decl, AnnotationKind::Class)
}

fn is_class_decl(universe: &dyn TypeUniverse, decl: DeclId) -> bool {
    matches!(
        universe.decl_category(decl),
        DeclCategory::Class | DeclCategory::ClassAlias
    )
}
