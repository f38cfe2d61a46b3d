//! The mutable state of one analysis run.

use indexmap::IndexMap;
use mapgen_core::{DeclId, TypeUniverse, UnitId};

use super::records::RecordsGroup;
use crate::Config;
use crate::element::{ElementId, ElementKind, MapperElement, MapperOptions};

/// Read-only inputs shared by every discovery step.
#[derive(Clone, Copy)]
pub(crate) struct AnalysisCtx<'a> {
    pub universe: &'a dyn TypeUniverse,
    pub config: &'a Config,
    pub root: UnitId,
}

impl AnalysisCtx<'_> {
    pub fn name(&self, decl: DeclId) -> String {
        self.universe.qualified_name(decl)
    }
}

/// Element arena, identity map and records group.
///
/// Every discovery function takes it as `&mut Registry`; nothing else
/// mutates the graph.
#[derive(Clone, Debug, Default)]
pub(crate) struct Registry {
    elements: Vec<MapperElement>,
    index: IndexMap<DeclId, ElementId>,
    pub records: RecordsGroup,
}

impl Registry {
    pub fn lookup(&self, decl: DeclId) -> Option<ElementId> {
        self.index.get(&decl).copied()
    }

    pub fn contains(&self, decl: DeclId) -> bool {
        self.index.contains_key(&decl)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn elements(&self) -> &[MapperElement] {
        &self.elements
    }

    pub fn get(&self, id: ElementId) -> &MapperElement {
        &self.elements[id.index()]
    }

    pub fn get_mut(&mut self, id: ElementId) -> &mut MapperElement {
        &mut self.elements[id.index()]
    }

    /// Register and initialize a new element for `decl`.
    pub fn create(
        &mut self,
        cx: AnalysisCtx<'_>,
        decl: DeclId,
        kind: ElementKind,
        options: MapperOptions,
    ) -> ElementId {
        let id = ElementId::new(self.elements.len());
        let element = MapperElement::new(id, decl, kind, options, cx.universe);
        self.insert(cx, element)
    }

    pub fn insert(&mut self, cx: AnalysisCtx<'_>, mut element: MapperElement) -> ElementId {
        let id = element.id();
        debug_assert_eq!(id.index(), self.elements.len());
        debug_assert!(!self.contains(element.identity()));

        element.init(cx.universe);
        tracing::debug!(
            target: "mapgen::group",
            element = %cx.name(element.identity()),
            kind = element.kind().as_str(),
            "element created"
        );
        self.index.insert(element.identity(), id);
        self.elements.push(element);
        id
    }

    /// Bidirectional extends edge. Returns false if `child` already has a
    /// different super element.
    pub fn link_super(&mut self, cx: AnalysisCtx<'_>, child: ElementId, parent: ElementId) -> bool {
        match self.get(child).super_element() {
            Some(existing) if existing == parent => {
                self.get_mut(parent).links_mut().add_sub(child);
                true
            }
            Some(_) => false,
            None => {
                self.get_mut(child).links_mut().set_super(parent);
                self.get_mut(parent).links_mut().add_sub(child);
                self.trace_edge(cx, "extends", child, parent);
                true
            }
        }
    }

    /// Bidirectional implements edge.
    pub fn link_interface(&mut self, cx: AnalysisCtx<'_>, child: ElementId, parent: ElementId) {
        let added = self.get_mut(child).links_mut().add_interface(parent);
        self.get_mut(parent).links_mut().add_sub(child);
        if added {
            self.trace_edge(cx, "implements", child, parent);
        }
    }

    fn trace_edge(&self, cx: AnalysisCtx<'_>, relation: &str, child: ElementId, parent: ElementId) {
        tracing::trace!(
            target: "mapgen::group",
            child = %cx.name(self.get(child).identity()),
            parent = %cx.name(self.get(parent).identity()),
            relation,
            "edge linked"
        );
    }
}
