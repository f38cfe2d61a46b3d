use indoc::indoc;
use mapgen_core::{Method, Scope, TypeRef, TypeUniverse};

use super::registry::AnalysisCtx;
use super::resolve::{Policy, resolve_or_create};
use crate::element::{EncodedValue, ElementKind};
use crate::naming::RenderOptions;
use crate::test_utils::{analyze, analyze_with, element, names, try_analyze, universe};
use crate::{Config, Error};

const HIERARCHY: &str = indoc! {r#"
    {
      "units": [
        {
          "name": "app",
          "imports": ["lib"],
          "decls": [
            { "kind": "class", "name": "Leaf", "extends": "Mid", "annotation": { "kind": "class" } }
          ]
        },
        {
          "name": "lib",
          "decls": [
            { "kind": "class", "name": "Base", "abstract": true, "annotation": { "kind": "class" } },
            { "kind": "class", "name": "Mid", "extends": "Base" }
          ]
        }
      ]
    }
"#};

fn kinds(group: &super::MapperElementGroup<'_>) -> Vec<(String, ElementKind)> {
    group
        .elements()
        .iter()
        .map(|e| (group.universe().decl_name(e.identity()).to_string(), e.kind()))
        .collect()
}

#[test]
fn unannotated_rung_becomes_placeholder() {
    let u = universe(HIERARCHY);
    let group = analyze(&u, "app");

    assert_eq!(
        kinds(&group),
        vec![
            ("Leaf".to_string(), ElementKind::Target),
            ("Mid".to_string(), ElementKind::None),
            ("Base".to_string(), ElementKind::Dependent),
        ]
    );

    let leaf = element(&group, "Leaf");
    let mid = element(&group, "Mid");
    let base = element(&group, "Base");
    assert_eq!(leaf.super_element(), Some(mid.id()));
    assert_eq!(mid.sub_elements(), [leaf.id()]);
    assert_eq!(mid.super_element(), Some(base.id()));
    assert_eq!(base.sub_elements(), [mid.id()]);
    assert_eq!(base.super_element(), None);
}

#[test]
fn placeholders_are_not_emitted() {
    let u = universe(HIERARCHY);
    let group = analyze(&u, "app");

    let emitted: Vec<&str> = group
        .emittable()
        .map(|e| u.decl_name(e.identity()))
        .collect();
    assert_eq!(emitted, ["Leaf", "Base"]);
    assert!(element(&group, "Mid").options().generate_methods.is_empty());
}

#[test]
fn open_base_does_not_discover_subclasses() {
    let u = universe(HIERARCHY);
    let group = analyze(&u, "lib");

    assert_eq!(kinds(&group), vec![("Base".to_string(), ElementKind::Target)]);
    assert!(element(&group, "Base").sub_elements().is_empty());
}

#[test]
fn resolving_twice_returns_same_element() {
    let u = universe(HIERARCHY);
    let mut group = analyze(&u, "app");
    let before = group.elements().len();
    let base = TypeRef::named(u.find_decl("Base").unwrap());
    let mid = TypeRef::named(u.find_decl("Mid").unwrap());

    let cx = AnalysisCtx {
        universe: group.universe,
        config: &group.config,
        root: group.root,
    };
    let first = resolve_or_create(cx, &mut group.registry, &base, Policy::MustExist).unwrap();
    let second = resolve_or_create(cx, &mut group.registry, &base, Policy::IfAnnotated).unwrap();
    let placeholder = resolve_or_create(cx, &mut group.registry, &mid, Policy::MustExist).unwrap();

    assert_eq!(first, Some(element(&group, "Base").id()));
    assert_eq!(first, second);
    assert_eq!(placeholder, Some(element(&group, "Mid").id()));
    assert_eq!(group.elements().len(), before);
    assert_eq!(element(&group, "Base").sub_elements().len(), 1);
}

#[test]
fn builtins_never_resolve() {
    let u = universe(HIERARCHY);
    let mut group = analyze(&u, "app");

    let cx = AnalysisCtx {
        universe: group.universe,
        config: &group.config,
        root: group.root,
    };
    let id = resolve_or_create(
        cx,
        &mut group.registry,
        &TypeRef::builtin("int"),
        Policy::CreateNone,
    )
    .unwrap();
    assert_eq!(id, None);
}

#[test]
fn sealed_base_links_extenders_and_implementers() {
    let u = universe(indoc! {r#"
        {
          "units": [{
            "name": "app",
            "decls": [
              { "kind": "class", "name": "Shape", "sealed": true, "annotation": { "kind": "class" } },
              { "kind": "class", "name": "Circle", "extends": "Shape", "annotation": { "kind": "class" } },
              { "kind": "class", "name": "Square", "implements": ["Shape"], "annotation": { "kind": "class" } }
            ]
          }]
        }
    "#});
    let group = analyze(&u, "app");

    let shape = element(&group, "Shape");
    let circle = element(&group, "Circle");
    let square = element(&group, "Square");

    assert_eq!(names(&group, shape.sub_elements()), ["Circle", "Square"]);
    assert_eq!(circle.super_element(), Some(shape.id()));
    assert!(circle.interface_elements().is_empty());
    assert_eq!(square.super_element(), None);
    assert_eq!(square.interface_elements(), [shape.id()]);
}

#[test]
fn unannotated_interface_becomes_placeholder() {
    let u = universe(indoc! {r#"
        {
          "units": [{
            "name": "app",
            "decls": [
              { "kind": "class", "name": "Named", "abstract": true },
              { "kind": "class", "name": "Dated", "abstract": true },
              {
                "kind": "class", "name": "Post", "implements": ["Named", "Dated"],
                "annotation": { "kind": "class" }
              }
            ]
          }]
        }
    "#});
    let group = analyze(&u, "app");

    let post = element(&group, "Post");
    assert_eq!(names(&group, post.interface_elements()), ["Named", "Dated"]);
    for name in ["Named", "Dated"] {
        let placeholder = element(&group, name);
        assert_eq!(placeholder.kind(), ElementKind::None);
        assert_eq!(placeholder.sub_elements(), [post.id()]);
    }
}

#[test]
fn unannotated_sealed_subclass_fails() {
    let u = universe(indoc! {r#"
        {
          "units": [{
            "name": "app",
            "decls": [
              { "kind": "class", "name": "Shape", "sealed": true, "annotation": { "kind": "class" } },
              { "kind": "class", "name": "Circle", "extends": "Shape", "annotation": { "kind": "class" } },
              { "kind": "class", "name": "Blob", "extends": "Shape" }
            ]
          }]
        }
    "#});
    let (group, result) = try_analyze(&u, "app", Config::new());

    let err = result.unwrap_err();
    assert!(matches!(&err, Error::MissingSubclassMapper { name } if name == "app::Blob"));
    assert_eq!(
        err.to_string(),
        "cannot include subclass app::Blob, it has no generated mapper"
    );
    // Elements registered before the failure stay inspectable.
    assert_eq!(group.elements().len(), 2);
}

#[test]
fn failure_keeps_completed_elements() {
    let u = universe(indoc! {r#"
        {
          "units": [
            {
              "name": "app",
              "imports": ["lib"],
              "decls": [
                { "kind": "class", "name": "Entity", "abstract": true, "annotation": { "kind": "class" } },
                {
                  "kind": "class", "name": "Order", "extends": "Entity", "annotation": { "kind": "class" },
                  "constructors": [{ "params": [{ "name": "line", "type": "Line" }] }]
                },
                { "kind": "class", "name": "Shape", "sealed": true, "annotation": { "kind": "class" } },
                { "kind": "class", "name": "Blob", "extends": "Shape" }
              ]
            },
            {
              "name": "lib",
              "decls": [{ "kind": "class", "name": "Line", "annotation": { "kind": "class" } }]
            }
          ]
        }
    "#});
    let (group, result) = try_analyze(&u, "app", Config::new());

    assert!(matches!(result, Err(Error::MissingSubclassMapper { .. })));
    assert_eq!(
        kinds(&group),
        vec![
            ("Entity".to_string(), ElementKind::Target),
            ("Order".to_string(), ElementKind::Target),
            ("Shape".to_string(), ElementKind::Target),
            ("Line".to_string(), ElementKind::Dependent),
        ]
    );

    let entity = element(&group, "Entity");
    let order = element(&group, "Order");
    assert_eq!(order.super_element(), Some(entity.id()));
    assert_eq!(entity.sub_elements(), [order.id()]);
    assert!(element(&group, "Shape").sub_elements().is_empty());
    assert!(group.element_for(u.find_decl("Blob").unwrap()).is_none());
}

#[test]
fn included_unrelated_class_fails() {
    let u = universe(indoc! {r#"
        {
          "units": [{
            "name": "app",
            "decls": [
              {
                "kind": "class", "name": "Base",
                "annotation": { "kind": "class", "options": { "includeSubClasses": ["Other"] } }
              },
              { "kind": "class", "name": "Other", "annotation": { "kind": "class" } }
            ]
          }]
        }
    "#});
    let (group, result) = try_analyze(&u, "app", Config::new());

    insta::assert_snapshot!(
        result.unwrap_err(),
        @"cannot determine supertype/subtype relation of app::Other to app::Base (it declares no supertype or interfaces)"
    );
    assert_eq!(group.elements().len(), 2);
}

#[test]
fn included_class_with_foreign_parent_fails() {
    let u = universe(indoc! {r#"
        {
          "units": [{
            "name": "app",
            "decls": [
              {
                "kind": "class", "name": "Base",
                "annotation": { "kind": "class", "options": { "includeSubClasses": ["Other"] } }
              },
              { "kind": "class", "name": "Root" },
              { "kind": "class", "name": "Tagged", "abstract": true },
              {
                "kind": "class", "name": "Other", "extends": "Root", "implements": ["Tagged"],
                "annotation": { "kind": "class" }
              }
            ]
          }]
        }
    "#});
    let (_, result) = try_analyze(&u, "app", Config::new());

    let Err(Error::UnknownRelation { sub, parent, detail }) = result else {
        panic!("expected an unknown relation error");
    };
    assert_eq!(sub, "app::Other");
    assert_eq!(parent, "app::Base");
    assert_eq!(detail, "it extends app::Root and implements app::Tagged");
}

#[test]
fn included_subclass_of_open_base_is_linked() {
    let u = universe(indoc! {r#"
        {
          "units": [{
            "name": "app",
            "decls": [
              {
                "kind": "class", "name": "Event", "abstract": true,
                "annotation": { "kind": "class", "options": { "includeSubClasses": ["Click", "Click"] } }
              },
              { "kind": "class", "name": "Click", "extends": "Event", "annotation": { "kind": "class" } }
            ]
          }]
        }
    "#});
    let group = analyze(&u, "app");

    let event = element(&group, "Event");
    assert_eq!(names(&group, event.sub_elements()), ["Click"]);
    assert_eq!(element(&group, "Click").super_element(), Some(event.id()));
}

#[test]
fn reference_cycles_terminate() {
    let u = universe(indoc! {r#"
        {
          "units": [
            {
              "name": "app",
              "imports": ["model"],
              "decls": [
                {
                  "kind": "class", "name": "Node", "annotation": { "kind": "class" },
                  "constructors": [{ "params": [
                    { "name": "next", "type": "Node?" },
                    { "name": "children", "type": "List<Node>" },
                    { "name": "tree", "type": "Tree" }
                  ] }]
                }
              ]
            },
            {
              "name": "model",
              "imports": ["app"],
              "decls": [
                {
                  "kind": "class", "name": "Tree", "annotation": { "kind": "class" },
                  "constructors": [{ "params": [{ "name": "root", "type": "Node" }] }]
                }
              ]
            }
          ]
        }
    "#});
    let group = analyze(&u, "app");

    assert_eq!(
        kinds(&group),
        vec![
            ("Node".to_string(), ElementKind::Target),
            ("Tree".to_string(), ElementKind::Dependent),
        ]
    );
}

#[test]
fn walks_fields_arguments_and_bounds() {
    let u = universe(indoc! {r#"
        {
          "units": [
            {
              "name": "app",
              "imports": ["model"],
              "decls": [
                {
                  "kind": "class", "name": "Person", "annotation": { "kind": "class" },
                  "constructors": [{ "params": [
                    { "name": "address", "type": "Address" },
                    { "name": "tags", "type": "List<Tag>" },
                    { "name": "note", "type": "Plain" },
                    { "name": "scores", "type": "Map<String, Weight>" }
                  ] }]
                },
                {
                  "kind": "class", "name": "Measured", "annotation": { "kind": "class" },
                  "typeParams": [{ "name": "T", "bound": "Metric" }],
                  "constructors": [{ "params": [{ "name": "value", "type": "T" }] }]
                }
              ]
            },
            {
              "name": "model",
              "decls": [
                { "kind": "class", "name": "Address", "annotation": { "kind": "class" } },
                { "kind": "enum", "name": "Tag", "values": ["a"], "annotation": { "kind": "enum" } },
                { "kind": "class", "name": "Plain" },
                { "kind": "class", "name": "Weight", "annotation": { "kind": "class" } },
                { "kind": "class", "name": "Metric", "annotation": { "kind": "class" } }
              ]
            }
          ]
        }
    "#});
    let group = analyze(&u, "app");

    assert_eq!(
        kinds(&group),
        vec![
            ("Person".to_string(), ElementKind::Target),
            ("Measured".to_string(), ElementKind::Target),
            ("Address".to_string(), ElementKind::Dependent),
            ("Tag".to_string(), ElementKind::DependentEnum),
            ("Weight".to_string(), ElementKind::Dependent),
            ("Metric".to_string(), ElementKind::Dependent),
        ]
    );
    assert!(group.element_for(u.find_decl("Plain").unwrap()).is_none());
}

const RECORDS: &str = indoc! {r#"
    {
      "units": [{
        "name": "app",
        "decls": [
          { "kind": "recordAlias", "name": "Pair", "typeParams": ["A", "B"], "shape": "(A, B)" },
          {
            "kind": "class", "name": "Holder", "annotation": { "kind": "class" },
            "constructors": [{ "params": [
              { "name": "first", "type": "Pair<int, String>" },
              { "name": "second", "type": "Pair<int, String>" },
              { "name": "inline", "type": "(int, String)" },
              { "name": "swapped", "type": "(String, int)" },
              { "name": "labels", "type": "({int x, String y})" },
              { "name": "relabeled", "type": "({String y, int x})" },
              { "name": "empty", "type": "()" }
            ] }]
          },
          {
            "kind": "class", "name": "Wrapper", "typeParams": ["T"], "annotation": { "kind": "class" },
            "constructors": [{ "params": [{ "name": "entry", "type": "(T, int)?" }] }]
          }
        ]
      }]
    }
"#};

#[test]
fn record_shapes_are_deduplicated() {
    let u = universe(RECORDS);
    let group = analyze(&u, "app");

    let records: Vec<&str> = group.records().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(records, ["_R0", "_R1", "_R2", "_R3"]);

    let renderer = group.renderer();
    let rendered: Vec<(String, String)> = element(&group, "Holder")
        .fields()
        .iter()
        .map(|f| (f.name.clone(), renderer.render(&f.ty, RenderOptions::NULLABLE)))
        .collect();
    insta::assert_debug_snapshot!(rendered, @r#"
    [
        (
            "first",
            "_R0",
        ),
        (
            "second",
            "_R0",
        ),
        (
            "inline",
            "_R0",
        ),
        (
            "swapped",
            "_R1",
        ),
        (
            "labels",
            "_R2",
        ),
        (
            "relabeled",
            "_R2",
        ),
        (
            "empty",
            "()",
        ),
    ]
    "#);
}

#[test]
fn generic_record_keeps_type_params() {
    let u = universe(RECORDS);
    let group = analyze(&u, "app");

    let alias = group.records().iter().last().unwrap();
    assert_eq!(alias.name, "_R3");
    let renderer = group.renderer();
    assert_eq!(renderer.record_alias(alias, RenderOptions::PLAIN), "_R3<T>");

    let entry = &element(&group, "Wrapper").fields()[0];
    assert_eq!(renderer.render(&entry.ty, RenderOptions::NULLABLE), "_R3<T>?");
    assert_eq!(renderer.render(&entry.ty, RenderOptions::BOUNDED), "_R3<dynamic>");
}

#[test]
fn generic_shape_shared_across_owners() {
    let u = universe(indoc! {r#"
        {
          "units": [{
            "name": "app",
            "decls": [
              {
                "kind": "class", "name": "A", "typeParams": ["T"], "annotation": { "kind": "class" },
                "constructors": [{ "params": [{ "name": "p", "type": "(T, int)" }] }]
              },
              {
                "kind": "class", "name": "B", "typeParams": [{ "name": "U", "bound": "num" }],
                "annotation": { "kind": "class" },
                "constructors": [{ "params": [{ "name": "p", "type": "(U, int)" }] }]
              }
            ]
          }]
        }
    "#});
    let group = analyze(&u, "app");

    assert_eq!(group.records().len(), 1);
    let renderer = group.renderer();
    let a = &element(&group, "A").fields()[0];
    let b = &element(&group, "B").fields()[0];
    assert_eq!(renderer.render(&a.ty, RenderOptions::PLAIN), "_R0<T>");
    assert_eq!(renderer.render(&b.ty, RenderOptions::PLAIN), "_R0<U>");
    assert_eq!(renderer.render(&b.ty, RenderOptions::BOUNDED), "_R0<num>");
}

#[test]
fn recursive_record_alias_registers_once() {
    let u = universe(indoc! {r#"
        {
          "units": [{
            "name": "app",
            "decls": [
              { "kind": "recordAlias", "name": "Chain", "shape": "({int value, Chain? next})" },
              {
                "kind": "class", "name": "Link", "annotation": { "kind": "class" },
                "constructors": [{ "params": [{ "name": "chain", "type": "Chain" }] }]
              }
            ]
          }]
        }
    "#});
    let group = analyze(&u, "app");

    assert_eq!(group.records().len(), 1);
    let field = &element(&group, "Link").fields()[0];
    assert_eq!(group.renderer().render(&field.ty, RenderOptions::NULLABLE), "_R0");
}

#[test]
fn annotated_record_alias_is_its_own_element() {
    let u = universe(indoc! {r#"
        {
          "units": [{
            "name": "app",
            "options": { "caseStyle": "snakeCase" },
            "decls": [
              {
                "kind": "recordAlias", "name": "Point", "shape": "(int, {int posX, int? posY})",
                "annotation": { "kind": "record" }
              },
              {
                "kind": "class", "name": "Line", "annotation": { "kind": "class" },
                "constructors": [{ "params": [{ "name": "start", "type": "Point" }] }]
              }
            ]
          }]
        }
    "#});
    let group = analyze(&u, "app");

    let point = element(&group, "Point");
    assert_eq!(point.kind(), ElementKind::TargetRecord);
    let fields: Vec<(&str, &str, bool)> = point
        .fields()
        .iter()
        .map(|f| (f.name.as_str(), f.key.as_str(), f.required))
        .collect();
    assert_eq!(
        fields,
        [("$1", "$1", true), ("posX", "pos_x", true), ("posY", "pos_y", false)]
    );

    assert!(group.records().is_empty());
    let start = &element(&group, "Line").fields()[0];
    assert_eq!(group.renderer().render(&start.ty, RenderOptions::NULLABLE), "Point");
}

#[test]
fn redirecting_constructors_become_elements() {
    let u = universe(indoc! {r#"
        {
          "units": [{
            "name": "app",
            "decls": [
              {
                "kind": "class", "name": "Outcome", "abstract": true,
                "annotation": { "kind": "class", "options": { "uniqueId": "outcome" } },
                "constructors": [
                  {
                    "name": "ok", "redirect": "Success", "annotation": { "kind": "class" },
                    "params": [{ "name": "value", "type": "int" }]
                  },
                  {
                    "name": "failed", "redirect": "Failure",
                    "annotation": { "kind": "class", "options": { "discriminatorValue": "failure" } },
                    "params": [{ "name": "message", "type": "String", "named": true }]
                  },
                  { "name": "plain", "redirect": "Success" }
                ]
              },
              { "kind": "class", "name": "Success", "extends": "Outcome" },
              { "kind": "class", "name": "Failure", "extends": "Outcome" }
            ]
          }]
        }
    "#});
    let group = analyze(&u, "app");

    assert_eq!(
        kinds(&group),
        vec![
            ("Outcome".to_string(), ElementKind::Target),
            ("Success".to_string(), ElementKind::FactoryConstructor),
            ("Failure".to_string(), ElementKind::FactoryConstructor),
        ]
    );

    let outcome = element(&group, "Outcome");
    let success = element(&group, "Success");
    let failure = element(&group, "Failure");
    assert_eq!(names(&group, outcome.sub_elements()), ["Success", "Failure"]);
    assert_eq!(success.super_element(), Some(outcome.id()));

    assert_eq!(success.constructor(), Some("Outcome.ok"));
    assert_eq!(success.fields()[0].name, "value");
    assert_eq!(failure.constructor(), Some("Outcome.failed"));
    assert!(!failure.fields()[0].required);

    assert!(!success.options().generates(Method::Copy));
    assert!(success.options().generates(Method::Decode));
    assert_eq!(success.options().unique_id, None);
    assert_eq!(failure.options().discriminator_value.as_deref(), Some("failure"));
    assert!(!success.kind().is_top_level());
    assert_eq!(success.factory_origin().unwrap().constructor, 0);
}

#[test]
fn factory_target_already_mapped_is_kept() {
    let u = universe(indoc! {r#"
        {
          "units": [{
            "name": "app",
            "decls": [
              {
                "kind": "class", "name": "Outcome", "abstract": true, "annotation": { "kind": "class" },
                "constructors": [{ "name": "ok", "redirect": "Success", "annotation": { "kind": "class" } }]
              },
              { "kind": "class", "name": "Success", "extends": "Outcome", "annotation": { "kind": "class" } }
            ]
          }]
        }
    "#});
    let group = analyze(&u, "app");

    let success = element(&group, "Success");
    assert_eq!(success.kind(), ElementKind::Target);
    assert_eq!(success.super_element(), Some(element(&group, "Outcome").id()));
}

#[test]
fn alias_maps_aliased_class() {
    let u = universe(indoc! {r#"
        {
          "units": [{
            "name": "app",
            "decls": [
              {
                "kind": "class", "name": "Box", "typeParams": ["T"],
                "constructors": [{ "params": [{ "name": "value", "type": "T" }] }]
              },
              { "kind": "classAlias", "name": "IntBox", "aliased": "Box<int>", "annotation": { "kind": "class" } }
            ]
          }]
        }
    "#});
    let group = analyze(&u, "app");

    let alias = element(&group, "IntBox");
    assert_eq!(alias.kind(), ElementKind::Alias);
    assert_eq!(alias.hierarchy_decl(), u.find_decl("Box").unwrap());
    assert_eq!(alias.constructor(), Some("IntBox"));

    let value = &alias.fields()[0];
    assert_eq!(group.renderer().render(&value.ty, RenderOptions::PLAIN), "int");
    assert!(group.element_for(u.find_decl("Box").unwrap()).is_none());
}

#[test]
fn field_through_unannotated_alias_reaches_class() {
    let u = universe(indoc! {r#"
        {
          "units": [
            {
              "name": "app",
              "imports": ["lib"],
              "decls": [
                {
                  "kind": "class", "name": "Holder", "annotation": { "kind": "class" },
                  "constructors": [{ "params": [{ "name": "b", "type": "IntBox?" }] }]
                }
              ]
            },
            {
              "name": "lib",
              "decls": [
                {
                  "kind": "class", "name": "Box", "typeParams": ["T"], "annotation": { "kind": "class" },
                  "constructors": [{ "params": [{ "name": "value", "type": "T" }] }]
                },
                { "kind": "classAlias", "name": "IntBox", "aliased": "Box<int>" }
              ]
            }
          ]
        }
    "#});
    let group = analyze(&u, "app");

    assert_eq!(
        kinds(&group),
        vec![
            ("Holder".to_string(), ElementKind::Target),
            ("Box".to_string(), ElementKind::Dependent),
        ]
    );
    assert!(group.element_for(u.find_decl("IntBox").unwrap()).is_none());

    let field = &element(&group, "Holder").fields()[0];
    assert_eq!(group.renderer().render(&field.ty, RenderOptions::NULLABLE), "IntBox?");
}

#[test]
fn hierarchy_through_unannotated_alias_links_class() {
    let u = universe(indoc! {r#"
        {
          "units": [
            {
              "name": "app",
              "imports": ["lib"],
              "decls": [
                {
                  "kind": "class", "name": "Leaf", "extends": "BaseAlias", "implements": ["TaggedAlias"],
                  "annotation": { "kind": "class" }
                }
              ]
            },
            {
              "name": "lib",
              "decls": [
                {
                  "kind": "class", "name": "Base", "sealed": true,
                  "annotation": { "kind": "class", "options": { "discriminatorKey": "kind" } }
                },
                { "kind": "classAlias", "name": "BaseAlias", "aliased": "Base" },
                { "kind": "class", "name": "Tagged" },
                { "kind": "classAlias", "name": "TaggedAlias", "aliased": "Tagged" }
              ]
            }
          ]
        }
    "#});
    let group = analyze(&u, "app");

    assert_eq!(
        kinds(&group),
        vec![
            ("Leaf".to_string(), ElementKind::Target),
            ("Base".to_string(), ElementKind::Dependent),
            ("Tagged".to_string(), ElementKind::None),
        ]
    );

    let leaf = element(&group, "Leaf");
    let base = element(&group, "Base");
    let tagged = element(&group, "Tagged");
    assert_eq!(leaf.super_element(), Some(base.id()));
    assert_eq!(base.sub_elements(), [leaf.id()]);
    assert_eq!(leaf.interface_elements(), [tagged.id()]);
    assert_eq!(tagged.sub_elements(), [leaf.id()]);

    let plan = group.plan();
    let discriminator = plan.element("Leaf").unwrap().discriminator.as_ref().unwrap();
    assert_eq!(discriminator.key, "kind");
    assert_eq!(discriminator.value.as_deref(), Some("Leaf"));
}

#[test]
fn enum_values_follow_options() {
    let u = universe(indoc! {r#"
        {
          "units": [{
            "name": "app",
            "options": { "enumCaseStyle": "upperCase" },
            "decls": [
              { "kind": "enum", "name": "Color", "values": ["red", "darkBlue"], "annotation": { "kind": "enum" } },
              {
                "kind": "enum", "name": "Size", "values": ["small", "large"],
                "annotation": { "kind": "enum", "options": { "enumMode": "index" } }
              }
            ]
          }]
        }
    "#});
    let group = analyze(&u, "app");

    let color: Vec<&EncodedValue> = element(&group, "Color").values().iter().map(|v| &v.encoded).collect();
    assert_eq!(
        color,
        [
            &EncodedValue::Name("RED".to_string()),
            &EncodedValue::Name("DARKBLUE".to_string()),
        ]
    );
    let size: Vec<&EncodedValue> = element(&group, "Size").values().iter().map(|v| &v.encoded).collect();
    assert_eq!(size, [&EncodedValue::Index(0), &EncodedValue::Index(1)]);
}

const SCOPED: &str = indoc! {r#"
    {
      "units": [
        {
          "name": "app",
          "path": "lib/app.src",
          "package": "shop",
          "decls": [
            { "kind": "class", "name": "_Local", "annotation": { "kind": "class" } },
            { "kind": "class", "name": "Order", "annotation": { "kind": "class" } }
          ]
        },
        {
          "name": "extra",
          "path": "lib/src/extra.src",
          "package": "shop",
          "decls": [
            { "kind": "class", "name": "_Hidden", "annotation": { "kind": "class" } },
            { "kind": "class", "name": "Invoice", "annotation": { "kind": "class" } }
          ]
        },
        {
          "name": "vendor",
          "path": "lib/vendor.src",
          "package": "vendor",
          "decls": [{ "kind": "class", "name": "Foreign", "annotation": { "kind": "class" } }]
        }
      ]
    }
"#};

fn scoped(scope: Scope) -> Vec<String> {
    let u = universe(SCOPED);
    let group = analyze_with(&u, "app", Config::new().scope(scope));
    group
        .elements()
        .iter()
        .map(|e| u.decl_name(e.identity()).to_string())
        .collect()
}

#[test]
fn scope_selects_units() {
    assert_eq!(scoped(Scope::Unit), ["_Local", "Order"]);
    assert_eq!(scoped(Scope::Directory), ["_Local", "Order", "Foreign"]);
    assert_eq!(scoped(Scope::Package), ["_Local", "Order", "Invoice"]);
}
