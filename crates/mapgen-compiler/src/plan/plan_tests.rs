use indoc::indoc;
use mapgen_core::Colors;

use crate::Config;
use crate::test_utils::{analyze, analyze_with, universe};

const ZOO: &str = indoc! {r#"
    {
      "units": [
        {
          "name": "zoo",
          "imports": [{ "unit": "common", "as": "c" }],
          "options": { "caseStyle": "snakeCase" },
          "decls": [
            {
              "kind": "class", "name": "Animal", "sealed": true,
              "annotation": { "kind": "class", "options": { "discriminatorKey": "species" } }
            },
            {
              "kind": "class", "name": "Cat", "extends": "Animal", "annotation": { "kind": "class" },
              "constructors": [{ "params": [
                { "name": "name", "type": "String" },
                { "name": "lastFed", "type": "c.Stamp?", "named": true }
              ] }]
            },
            {
              "kind": "class", "name": "Dog", "extends": "Animal",
              "annotation": {
                "kind": "class",
                "options": { "discriminatorValue": "doggo", "generateMethods": ["decode", "encode"] }
              },
              "constructors": [{ "params": [
                { "name": "friends", "type": "List<Dog>" },
                { "name": "spot", "type": "(int, int)" }
              ] }]
            },
            {
              "kind": "enum", "name": "Mood", "values": ["calm", "wildEyed"],
              "annotation": { "kind": "enum", "options": { "defaultValue": "calm" } }
            }
          ]
        },
        {
          "name": "common",
          "decls": [{ "kind": "class", "name": "Stamp", "annotation": { "kind": "class" } }]
        }
      ]
    }
"#};

#[test]
fn dump_plan() {
    let u = universe(ZOO);
    let plan = analyze(&u, "zoo").plan();

    insta::assert_snapshot!(plan.dump(Colors::OFF), @r#"
    [elements]
    Animal: target -> AnimalMapper (polymorphic base)
      subs: Cat, Dog
      discriminator: species
    Cat: target -> CatMapper
      super: Animal
      discriminator: species = "Cat"
      constructor: Cat
      fields:
        name: String as "name"
        lastFed: c.Stamp? as "last_fed"
    Dog: target -> DogMapper
      methods: decode, encode
      super: Animal
      discriminator: species = "doggo"
      constructor: Dog
      fields:
        friends: List<Dog> as "friends"
        spot: _R0 as "spot"
    Mood: targetEnum -> MoodMapper
      values:
        calm = "calm"
        wildEyed = "wildEyed"
      default: calm
    c.Stamp: dependent -> c.StampMapper

    [records]
    _R0 = (int, int)
    "#);
}

#[test]
fn dump_with_colors() {
    let u = universe(indoc! {r#"
        {
          "units": [{
            "name": "app",
            "decls": [{ "kind": "class", "name": "Solo", "annotation": { "kind": "class" } }]
          }]
        }
    "#});
    let plan = analyze(&u, "app").plan();

    assert_eq!(
        plan.dump(Colors::ON),
        "\x1b[34m[elements]\x1b[0m\n\
         \x1b[34mSolo\x1b[0m\x1b[2m:\x1b[0m \x1b[32mtarget\x1b[0m \x1b[2m->\x1b[0m SoloMapper\n"
    );
}

#[test]
fn plan_json() {
    let u = universe(ZOO);
    let plan = analyze(&u, "zoo").plan();
    let json: serde_json::Value = serde_json::from_str(&plan.to_json().unwrap()).unwrap();

    assert_eq!(json["unit"], "zoo");

    let animal = &json["elements"][0];
    assert_eq!(animal["qualifiedName"], "zoo::Animal");
    assert_eq!(animal["polymorphicBase"], true);
    assert_eq!(animal["discriminator"], serde_json::json!({ "key": "species" }));
    assert_eq!(animal["subElements"], serde_json::json!(["Cat", "Dog"]));

    let cat = &json["elements"][1];
    assert_eq!(
        cat["fields"][1],
        serde_json::json!({ "name": "lastFed", "key": "last_fed", "type": "c.Stamp?", "required": false })
    );
    assert!(cat.get("polymorphicBase").is_none());

    let dog = &json["elements"][2];
    assert_eq!(dog["methods"], serde_json::json!(["decode", "encode"]));

    let mood = &json["elements"][3];
    assert_eq!(mood["kind"], "targetEnum");
    assert_eq!(mood["values"][1], serde_json::json!({ "name": "wildEyed", "encoded": "wildEyed" }));
    assert_eq!(mood["defaultValue"], "calm");

    assert_eq!(
        json["records"],
        serde_json::json!([{ "name": "_R0", "shape": "(int, int)" }])
    );
}

const OPEN: &str = indoc! {r#"
    {
      "units": [{
        "name": "app",
        "decls": [
          {
            "kind": "class", "name": "Base",
            "annotation": { "kind": "class", "options": { "includeSubClasses": ["Child"] } }
          },
          { "kind": "class", "name": "Child", "extends": "Base", "annotation": { "kind": "class" } },
          { "kind": "class", "name": "Lone", "annotation": { "kind": "class" } }
        ]
      }]
    }
"#};

#[test]
fn discriminator_defaults() {
    let u = universe(OPEN);
    let plan = analyze(&u, "app").plan();

    // A concrete base still decodes itself.
    let base = plan.element("Base").unwrap();
    assert!(!base.polymorphic_base);
    let discriminator = base.discriminator.as_ref().unwrap();
    assert_eq!(discriminator.key, "__type");
    assert_eq!(discriminator.value.as_deref(), Some("Base"));

    let child = plan.element("Child").unwrap().discriminator.as_ref().unwrap();
    assert_eq!(child.value.as_deref(), Some("Child"));

    assert!(plan.element("Lone").unwrap().discriminator.is_none());
}

#[test]
fn discriminator_key_from_config() {
    let u = universe(OPEN);
    let plan = analyze_with(&u, "app", Config::new().discriminator_key("kind")).plan();

    let child = plan.element("Child").unwrap();
    assert_eq!(child.discriminator.as_ref().unwrap().key, "kind");
}

#[test]
fn placeholders_are_planned_but_not_emitted() {
    let u = universe(indoc! {r#"
        {
          "units": [{
            "name": "app",
            "decls": [
              { "kind": "class", "name": "Shape", "abstract": true },
              { "kind": "class", "name": "Dot", "extends": "Shape", "annotation": { "kind": "class" } }
            ]
          }]
        }
    "#});
    let plan = analyze(&u, "app").plan();

    let shape = plan.element("Shape").unwrap();
    assert!(!shape.emittable);
    assert!(shape.discriminator.is_none());
    assert_eq!(shape.sub_elements, ["Dot"]);

    insta::assert_snapshot!(plan.dump(Colors::OFF), @r#"
    [elements]
    Dot: target -> DotMapper
      super: Shape
      discriminator: __type = "Dot"
    Shape: none
      subs: Dot
    "#);
}
