//! Mapper plan: the finished, read-only graph handed to emission.
//!
//! Everything emission needs is resolved here: names, hierarchy links by
//! name, discriminators, field keys and rendered field types.

mod dump;

#[cfg(test)]
mod plan_tests;

use mapgen_core::GenerateMethods;
use serde::Serialize;

use crate::element::{ElementKind, EncodedValue, MapperElement};
use crate::group::MapperElementGroup;
use crate::naming::{RenderOptions, TypeRenderer};

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapperPlan {
    pub unit: String,
    pub elements: Vec<ElementPlan>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<RecordPlan>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPlan {
    pub name: String,
    pub qualified_name: String,
    pub kind: ElementKind,
    pub mapper_name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<String>,
    pub bounded_type: String,
    pub methods: GenerateMethods,
    pub emittable: bool,
    pub top_level: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub polymorphic_base: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub ignore_null: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub super_element: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_elements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<Discriminator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constructor: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldPlan>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<ValuePlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// Discriminator of an element taking part in a polymorphic hierarchy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Discriminator {
    pub key: String,
    /// `None` for polymorphic bases, which are never decoded directly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldPlan {
    pub name: String,
    pub key: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub required: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValuePlan {
    pub name: String,
    pub encoded: EncodedValue,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPlan {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<String>,
    pub shape: String,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl MapperPlan {
    pub fn build(group: &MapperElementGroup<'_>) -> Self {
        let renderer = group.renderer();
        let elements = group
            .elements()
            .iter()
            .map(|e| element_plan(group, &renderer, e))
            .collect();

        let records = group
            .records()
            .iter()
            .map(|alias| RecordPlan {
                name: alias.name.clone(),
                type_params: alias
                    .type_params
                    .iter()
                    .map(|p| renderer.render(p, RenderOptions::PLAIN))
                    .collect(),
                shape: renderer.inline_record(&alias.shape, RenderOptions::NULLABLE),
            })
            .collect();

        Self {
            unit: group.universe().unit_name(group.root()).to_string(),
            elements,
            records,
        }
    }

    pub fn element(&self, name: &str) -> Option<&ElementPlan> {
        self.elements.iter().find(|e| e.name == name)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn element_plan(
    group: &MapperElementGroup<'_>,
    renderer: &TypeRenderer<'_>,
    element: &MapperElement,
) -> ElementPlan {
    let universe = group.universe();
    let decl = element.identity();
    let kind = element.kind();
    let name_of = |id| renderer.decl_name(group.element(id).identity());

    ElementPlan {
        name: renderer.decl_name(decl),
        qualified_name: universe.qualified_name(decl),
        kind,
        mapper_name: renderer.mapper_name(decl),
        type_params: renderer.type_params(decl),
        bounded_type: renderer.bounded_type(decl),
        methods: element.options().generate_methods,
        emittable: kind.is_emittable(),
        top_level: kind.is_top_level(),
        polymorphic_base: is_polymorphic_base(group, element),
        ignore_null: element.options().ignore_null,
        super_element: element.super_element().map(name_of),
        interfaces: element.interface_elements().iter().copied().map(name_of).collect(),
        sub_elements: element.sub_elements().iter().copied().map(name_of).collect(),
        discriminator: discriminator(group, element),
        constructor: element.constructor().map(str::to_string),
        fields: element
            .fields()
            .iter()
            .map(|f| FieldPlan {
                name: f.name.clone(),
                key: f.key.clone(),
                ty: renderer.render(&f.ty, RenderOptions::NULLABLE),
                required: f.required,
            })
            .collect(),
        values: element
            .values()
            .iter()
            .map(|v| ValuePlan {
                name: v.name.clone(),
                encoded: v.encoded.clone(),
            })
            .collect(),
        default_value: element.options().default_value.clone(),
    }
}

/// An abstract class-like element with subclasses; decoding dispatches
/// through its discriminator.
fn is_polymorphic_base(group: &MapperElementGroup<'_>, element: &MapperElement) -> bool {
    let kind = element.kind();
    kind.is_class_like()
        && kind != ElementKind::None
        && !element.sub_elements().is_empty()
        && group.universe().is_abstract(element.hierarchy_decl())
}

fn discriminator(group: &MapperElementGroup<'_>, element: &MapperElement) -> Option<Discriminator> {
    let kind = element.kind();
    if !kind.is_class_like() || kind == ElementKind::None {
        return None;
    }
    if element.super_element().is_none() && element.sub_elements().is_empty() {
        return None;
    }

    let value = if is_polymorphic_base(group, element) {
        None
    } else {
        Some(
            element
                .options()
                .discriminator_value
                .clone()
                .unwrap_or_else(|| group.universe().decl_name(element.identity()).to_string()),
        )
    };

    Some(Discriminator {
        key: discriminator_key(group, element),
        value,
    })
}

/// First explicit key up the super chain, else the configured default.
fn discriminator_key(group: &MapperElementGroup<'_>, element: &MapperElement) -> String {
    let mut current = Some(element.id());
    for _ in 0..group.elements().len() {
        let Some(id) = current else {
            break;
        };
        let e = group.element(id);
        if let Some(key) = &e.options().discriminator_key {
            return key.clone();
        }
        current = e.super_element();
    }
    group.config().discriminator_key.clone()
}
