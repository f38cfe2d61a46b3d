//! One-time element setup from its declaration.

use mapgen_core::{Constructor, EnumMode, Param, TypeUniverse};

use super::{ElementKind, EncodedValue, EnumValue, Field, MapperElement};

impl MapperElement {
    /// Select the decoding constructor and compute field keys (classes),
    /// encode values (enums) or collect fields (records). Runs once.
    pub fn init(&mut self, universe: &dyn TypeUniverse) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        match self.kind {
            ElementKind::None => {}
            kind if kind.is_class_like() => self.init_class(universe),
            kind if kind.is_enum() => self.init_enum(universe),
            _ => self.init_record(universe),
        }
    }

    fn init_class(&mut self, universe: &dyn TypeUniverse) {
        let (constructor, params) = match self.factory {
            Some(origin) => {
                let Some(ctor) = universe.constructors(origin.owner).get(origin.constructor) else {
                    return;
                };
                (
                    ctor.display_name(universe.decl_name(origin.owner)),
                    ctor.params.clone(),
                )
            }
            None => {
                let Some(ctor) = select_constructor(universe.constructors(self.hierarchy_decl))
                else {
                    return;
                };
                let params = ctor
                    .params
                    .iter()
                    .map(|p| Param {
                        ty: p.ty.substitute(self.hierarchy_decl, &self.type_args),
                        ..p.clone()
                    })
                    .collect();
                (
                    ctor.display_name(universe.decl_name(self.identity)),
                    params,
                )
            }
        };

        let style = self.options.case_style;
        self.constructor = Some(constructor);
        self.fields = params
            .into_iter()
            .map(|p| Field {
                key: p
                    .key
                    .clone()
                    .unwrap_or_else(|| style.apply(&p.name)),
                name: p.name,
                ty: p.ty,
                named: p.named,
                required: p.required,
            })
            .collect();
    }

    fn init_enum(&mut self, universe: &dyn TypeUniverse) {
        let style = self.options.enum_case_style;
        let mode = self.options.enum_mode;
        self.values = universe
            .enum_values(self.identity)
            .iter()
            .enumerate()
            .map(|(index, name)| EnumValue {
                name: name.clone(),
                encoded: match mode {
                    EnumMode::Name => EncodedValue::Name(style.apply(name)),
                    EnumMode::Index => EncodedValue::Index(index),
                },
            })
            .collect();
    }

    fn init_record(&mut self, universe: &dyn TypeUniverse) {
        let Some(shape) = universe.record_shape(self.identity) else {
            return;
        };
        let style = self.options.case_style;
        self.fields = shape
            .fields()
            .map(|(label, ty)| {
                let named = !label.starts_with('$');
                Field {
                    key: if named { style.apply(&label) } else { label.clone() },
                    name: label,
                    ty: ty.clone(),
                    named,
                    required: !named || !ty.is_nullable(),
                }
            })
            .collect();
    }
}

/// Decoding constructor: the one marked mappable, else the unnamed one,
/// else the first. Redirecting constructors never qualify.
fn select_constructor(ctors: &[Constructor]) -> Option<&Constructor> {
    let candidates = || ctors.iter().filter(|c| !c.is_redirecting());
    candidates()
        .find(|c| c.mappable)
        .or_else(|| candidates().find(|c| c.name.is_none()))
        .or_else(|| candidates().next())
}
