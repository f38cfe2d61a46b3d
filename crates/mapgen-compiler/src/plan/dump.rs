//! Human-readable plan dump.

use std::fmt::Write as _;

use mapgen_core::{Colors, GenerateMethods, Method};

use super::{ElementPlan, MapperPlan};
use crate::element::EncodedValue;

impl MapperPlan {
    /// Render the plan as an indented text tree.
    pub fn dump(&self, colors: Colors) -> String {
        let mut out = String::new();
        let c = &colors;

        writeln!(out, "{}[elements]{}", c.blue, c.reset).unwrap();
        for element in &self.elements {
            dump_element(&mut out, element, c);
        }

        if !self.records.is_empty() {
            out.push('\n');
            writeln!(out, "{}[records]{}", c.blue, c.reset).unwrap();
            for record in &self.records {
                let params = if record.type_params.is_empty() {
                    String::new()
                } else {
                    format!("<{}>", record.type_params.join(", "))
                };
                writeln!(
                    out,
                    "{}{}{}{} {}={} {}",
                    c.blue, record.name, params, c.reset, c.dim, c.reset, record.shape
                )
                .unwrap();
            }
        }

        out
    }
}

fn dump_element(out: &mut String, e: &ElementPlan, c: &Colors) {
    let params = if e.type_params.is_empty() {
        String::new()
    } else {
        format!("<{}>", e.type_params.join(", "))
    };
    write!(
        out,
        "{}{}{}{}{}:{} {}{}{}",
        c.blue,
        e.name,
        params,
        c.reset,
        c.dim,
        c.reset,
        c.green,
        e.kind.as_str(),
        c.reset
    )
    .unwrap();
    if e.emittable {
        write!(out, " {}->{} {}", c.dim, c.reset, e.mapper_name).unwrap();
    }
    if e.polymorphic_base {
        write!(out, " {}(polymorphic base){}", c.dim, c.reset).unwrap();
    }
    out.push('\n');

    if e.emittable && e.methods != GenerateMethods::ALL {
        let methods: Vec<&str> = e.methods.iter().map(Method::as_str).collect();
        line(out, c, "methods", &methods.join(", "));
    }
    if let Some(parent) = &e.super_element {
        line(out, c, "super", parent);
    }
    if !e.interfaces.is_empty() {
        line(out, c, "interfaces", &e.interfaces.join(", "));
    }
    if !e.sub_elements.is_empty() {
        line(out, c, "subs", &e.sub_elements.join(", "));
    }
    if let Some(d) = &e.discriminator {
        let text = match &d.value {
            Some(value) => format!("{} = {value:?}", d.key),
            None => d.key.clone(),
        };
        line(out, c, "discriminator", &text);
    }
    if let Some(ctor) = &e.constructor {
        line(out, c, "constructor", ctor);
    }

    if !e.fields.is_empty() {
        writeln!(out, "  {}fields:{}", c.dim, c.reset).unwrap();
        for f in &e.fields {
            writeln!(
                out,
                "    {}: {} {}as{} {}{:?}{}",
                f.name, f.ty, c.dim, c.reset, c.green, f.key, c.reset
            )
            .unwrap();
        }
    }

    if !e.values.is_empty() {
        writeln!(out, "  {}values:{}", c.dim, c.reset).unwrap();
        for v in &e.values {
            let encoded = match &v.encoded {
                EncodedValue::Name(name) => format!("{name:?}"),
                EncodedValue::Index(index) => index.to_string(),
            };
            writeln!(out, "    {} {}={} {}{}{}", v.name, c.dim, c.reset, c.green, encoded, c.reset)
                .unwrap();
        }
    }
    if let Some(default) = &e.default_value {
        line(out, c, "default", default);
    }
}

fn line(out: &mut String, c: &Colors, label: &str, text: &str) {
    writeln!(out, "  {}{label}:{} {text}", c.dim, c.reset).unwrap();
}
