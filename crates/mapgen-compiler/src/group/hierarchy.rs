//! Hierarchy analysis: super, interface and subclass edges of one element.

use mapgen_core::TypeRef;

use super::registry::{AnalysisCtx, Registry};
use super::resolve::{Policy, aliased_class, resolve_or_create, unalias};
use super::walk::walk_type;
use crate::element::{ElementId, ElementKind};
use crate::{Error, Result};

/// Analyse `id` once: hierarchy edges and referenced types for class-like
/// elements, field types for records.
pub(crate) fn analyze_element(cx: AnalysisCtx<'_>, reg: &mut Registry, id: ElementId) -> Result<()> {
    let element = reg.get_mut(id);
    if element.analyzed {
        return Ok(());
    }
    element.analyzed = true;

    if element.kind().is_class_like() {
        analyze_class(cx, reg, id)
    } else {
        walk_fields(cx, reg, id)
    }
}

fn analyze_class(cx: AnalysisCtx<'_>, reg: &mut Registry, id: ElementId) -> Result<()> {
    let decl = reg.get(id).hierarchy_decl();

    if reg.get(id).super_element().is_none()
        && let Some(supertype) = cx.universe.declared_supertype(decl)
        && let Some(parent) = resolve_or_create(cx, reg, &unalias(cx, &supertype), Policy::CreateNone)?
    {
        reg.link_super(cx, id, parent);
    }

    for interface in cx.universe.declared_interfaces(decl) {
        if let Some(parent) = resolve_or_create(cx, reg, &unalias(cx, &interface), Policy::CreateNone)? {
            reg.link_interface(cx, id, parent);
        }
    }

    if reg.get(id).kind() == ElementKind::None {
        return Ok(());
    }

    for sub in subclasses(cx, reg, id) {
        if let Some(sub_id) = resolve_or_create(cx, reg, &sub, Policy::MustExist)?
            && sub_id != id
        {
            link_subclass(cx, reg, id, sub_id)?;
        }
    }

    walk_fields(cx, reg, id)?;

    for param in cx.universe.generic_parameters(decl) {
        if let Some(bound) = &param.bound {
            walk_type(cx, reg, bound)?;
        }
    }
    Ok(())
}

fn walk_fields(cx: AnalysisCtx<'_>, reg: &mut Registry, id: ElementId) -> Result<()> {
    let types: Vec<TypeRef> = reg.get(id).fields().iter().map(|f| f.ty.clone()).collect();
    for ty in &types {
        walk_type(cx, reg, ty)?;
    }
    Ok(())
}

/// Known subclasses, explicitly included ones and factory targets, without
/// duplicates.
fn subclasses(cx: AnalysisCtx<'_>, reg: &Registry, id: ElementId) -> Vec<TypeRef> {
    let element = reg.get(id);
    let known = cx.universe.known_subclasses(element.hierarchy_decl());
    let explicit = element.options().include_sub_classes.iter();

    let mut out: Vec<TypeRef> = Vec::new();
    for ty in known
        .into_iter()
        .chain(explicit.cloned())
        .chain(element.explicit_subs().iter().cloned())
    {
        if !out.iter().any(|t| t.decl() == ty.decl()) {
            out.push(ty);
        }
    }
    out
}

/// Classify `sub` as extending or implementing `parent` and add the edge.
fn link_subclass(
    cx: AnalysisCtx<'_>,
    reg: &mut Registry,
    parent: ElementId,
    sub: ElementId,
) -> Result<()> {
    let parent_decl = reg.get(parent).hierarchy_decl();
    let sub_decl = reg.get(sub).hierarchy_decl();
    let supertype = cx.universe.declared_supertype(sub_decl);

    let parent_class = aliased_class(cx, &TypeRef::named(parent_decl));
    if supertype.as_ref().and_then(|t| aliased_class(cx, t)) == parent_class {
        if reg.link_super(cx, sub, parent) {
            return Ok(());
        }
        // Already linked to another element over the same class (an alias
        // and its aliased class).
        if let Some(existing) = reg.get(sub).super_element()
            && aliased_class(cx, &TypeRef::named(reg.get(existing).hierarchy_decl())) == parent_class
        {
            return Ok(());
        }
    } else {
        let interfaces = cx.universe.declared_interfaces(sub_decl);
        if interfaces.iter().any(|i| aliased_class(cx, i) == parent_class) {
            reg.link_interface(cx, sub, parent);
            return Ok(());
        }
    }

    Err(Error::UnknownRelation {
        sub: cx.name(reg.get(sub).identity()),
        parent: cx.name(reg.get(parent).identity()),
        detail: relation_detail(cx, supertype.as_ref(), &cx.universe.declared_interfaces(sub_decl)),
    })
}

fn relation_detail(cx: AnalysisCtx<'_>, supertype: Option<&TypeRef>, interfaces: &[TypeRef]) -> String {
    let supertype = supertype.and_then(TypeRef::decl).map(|d| cx.name(d));
    let interfaces: Vec<String> = interfaces
        .iter()
        .filter_map(TypeRef::decl)
        .map(|d| cx.name(d))
        .collect();

    match (supertype, interfaces.is_empty()) {
        (Some(s), true) => format!("it extends {s}"),
        (Some(s), false) => format!("it extends {s} and implements {}", interfaces.join(", ")),
        (None, false) => format!("it implements {}", interfaces.join(", ")),
        (None, true) => "it declares no supertype or interfaces".to_string(),
    }
}
