//! Mapper element group: registry and graph builder for one analysis unit.
//!
//! [`MapperElementGroup::analyze`] enumerates the scope, creates a target
//! element per annotated declaration, then resolves hierarchy edges and
//! walks field types until no element is left unanalysed. Afterwards the
//! group is read-only.

mod hierarchy;
mod records;
mod registry;
mod resolve;
mod walk;

#[cfg(test)]
mod group_tests;

use mapgen_core::{AnnotationKind, DeclId, TypeRef, TypeUniverse, UnitId};

use crate::element::{ElementId, ElementKind, FactoryOrigin, MapperElement, MapperOptions};
use crate::naming::{Prefixes, TypeRenderer};
use crate::plan::MapperPlan;
use crate::{Config, Result};

use hierarchy::analyze_element;
use registry::AnalysisCtx;
use resolve::{element_options, target_kind};

pub use records::{RecordAlias, RecordsGroup};
pub(crate) use registry::Registry;

/// All mapper elements of one analysis unit.
pub struct MapperElementGroup<'u> {
    universe: &'u dyn TypeUniverse,
    config: Config,
    root: UnitId,
    registry: Registry,
    prefixes: Prefixes,
}

impl<'u> MapperElementGroup<'u> {
    pub fn new(universe: &'u dyn TypeUniverse, root: UnitId, config: Config) -> Self {
        Self {
            universe,
            prefixes: Prefixes::build(universe, root),
            config,
            root,
            registry: Registry::default(),
        }
    }

    /// Build the graph. The first error aborts; elements registered before
    /// it stay inspectable.
    pub fn analyze(&mut self) -> Result<()> {
        let cx = AnalysisCtx {
            universe: self.universe,
            config: &self.config,
            root: self.root,
        };
        let reg = &mut self.registry;

        for (_, decls) in cx.universe.discover_universe(cx.root, cx.config.scope) {
            for decl in decls {
                if reg.contains(decl) || !cx.universe.is_visible(decl, cx.root) {
                    continue;
                }
                let Some(kind) = target_kind(cx.universe, decl) else {
                    continue;
                };
                let id = reg.create(cx, decl, kind, element_options(cx, decl));
                if kind == ElementKind::Target {
                    add_factory_constructors(cx, reg, id);
                }
            }
        }

        let mut next = 0;
        while next < reg.len() {
            analyze_element(cx, reg, ElementId::new(next))?;
            next += 1;
        }

        tracing::info!(
            target: "mapgen::group",
            unit = cx.universe.unit_name(cx.root),
            elements = reg.len(),
            records = reg.records.len(),
            "analysis finished"
        );
        Ok(())
    }

    pub fn universe(&self) -> &'u dyn TypeUniverse {
        self.universe
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn root(&self) -> UnitId {
        self.root
    }

    pub fn elements(&self) -> &[MapperElement] {
        self.registry.elements()
    }

    pub fn element(&self, id: ElementId) -> &MapperElement {
        self.registry.get(id)
    }

    pub fn element_for(&self, decl: DeclId) -> Option<&MapperElement> {
        self.registry.lookup(decl).map(|id| self.registry.get(id))
    }

    /// Elements that get a generated mapper.
    pub fn emittable(&self) -> impl Iterator<Item = &MapperElement> {
        self.elements().iter().filter(|e| e.kind().is_emittable())
    }

    pub fn records(&self) -> &RecordsGroup {
        &self.registry.records
    }

    pub fn prefixes(&self) -> &Prefixes {
        &self.prefixes
    }

    pub fn renderer(&self) -> TypeRenderer<'_> {
        TypeRenderer::new(self.universe, &self.prefixes, &self.registry)
    }

    pub fn plan(&self) -> MapperPlan {
        MapperPlan::build(self)
    }
}

/// Map annotated redirecting constructors of `owner` as their own
/// elements and record their targets as explicit subclasses.
fn add_factory_constructors(cx: AnalysisCtx<'_>, reg: &mut Registry, owner: ElementId) {
    let owner_decl = reg.get(owner).identity();

    for (index, ctor) in cx.universe.constructors(owner_decl).iter().enumerate() {
        let (Some(target), Some(annotation)) = (&ctor.redirect, &ctor.annotation) else {
            continue;
        };
        let Some(target_decl) = target.decl() else {
            continue;
        };
        if annotation.kind != AnnotationKind::Class {
            continue;
        }

        reg.get_mut(owner).add_explicit_sub(TypeRef::named(target_decl));
        // Annotated targets map as themselves.
        if reg.contains(target_decl)
            || cx.universe.has_annotation_of(target_decl, AnnotationKind::Class)
        {
            continue;
        }

        let options = MapperOptions::for_factory(reg.get(owner).options(), Some(&annotation.options));
        let origin = FactoryOrigin {
            owner: owner_decl,
            constructor: index,
        };
        let id = ElementId::new(reg.len());
        reg.insert(cx, MapperElement::factory(id, target_decl, options, origin));
    }
}
