//! Resolved per-element options.

use mapgen_core::{AnnotationOptions, CaseStyle, EnumMode, GenerateMethods, Method, TypeRef};

use crate::Config;

/// Options of one element after layering config, unit defaults and the
/// declaration's annotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapperOptions {
    pub case_style: CaseStyle,
    pub enum_case_style: CaseStyle,
    pub ignore_null: bool,
    /// Discriminator key set explicitly on this element or its unit.
    pub discriminator_key: Option<String>,
    pub discriminator_value: Option<String>,
    pub generate_methods: GenerateMethods,
    pub enum_mode: EnumMode,
    pub default_value: Option<String>,
    pub include_sub_classes: Vec<TypeRef>,
    pub unique_id: Option<String>,
}

impl MapperOptions {
    /// Layer `config` < `unit` < `annotation`.
    pub fn resolve(
        config: &Config,
        unit: Option<&AnnotationOptions>,
        annotation: Option<&AnnotationOptions>,
    ) -> Self {
        let mut options = Self::from_config(config);
        if let Some(unit) = unit {
            options.overlay_defaults(unit);
        }
        if let Some(annotation) = annotation {
            options.overlay_defaults(annotation);
            options.overlay_declaration(annotation);
        }
        options
    }

    /// Options of a hierarchy placeholder: nothing is generated.
    pub fn placeholder(config: &Config) -> Self {
        Self {
            generate_methods: GenerateMethods::NONE,
            ..Self::from_config(config)
        }
    }

    /// Options of a redirecting constructor mapped as its own element.
    ///
    /// Inherits the owner's defaults, never its declaration-specific values,
    /// and never generates `copy`.
    pub fn for_factory(owner: &MapperOptions, constructor: Option<&AnnotationOptions>) -> Self {
        let mut options = Self {
            discriminator_value: None,
            include_sub_classes: Vec::new(),
            unique_id: None,
            ..owner.clone()
        };
        if let Some(constructor) = constructor {
            options.overlay_defaults(constructor);
            options.overlay_declaration(constructor);
        }
        options.generate_methods = options.generate_methods.without(Method::Copy);
        options
    }

    pub fn generates(&self, method: Method) -> bool {
        self.generate_methods.contains(method)
    }

    fn from_config(config: &Config) -> Self {
        Self {
            case_style: config.case_style,
            enum_case_style: config.enum_case_style,
            ignore_null: config.ignore_null,
            discriminator_key: None,
            discriminator_value: None,
            generate_methods: config.generate_methods,
            enum_mode: config.enum_mode,
            default_value: None,
            include_sub_classes: Vec::new(),
            unique_id: None,
        }
    }

    /// Fields that make sense as inherited defaults.
    fn overlay_defaults(&mut self, o: &AnnotationOptions) {
        if let Some(v) = o.case_style {
            self.case_style = v;
        }
        if let Some(v) = o.enum_case_style {
            self.enum_case_style = v;
        }
        if let Some(v) = o.ignore_null {
            self.ignore_null = v;
        }
        if let Some(v) = &o.discriminator_key {
            self.discriminator_key = Some(v.clone());
        }
        if let Some(v) = o.generate_methods {
            self.generate_methods = v;
        }
        if let Some(v) = o.enum_mode {
            self.enum_mode = v;
        }
    }

    /// Fields that only apply to the annotated declaration itself.
    fn overlay_declaration(&mut self, o: &AnnotationOptions) {
        if let Some(v) = &o.discriminator_value {
            self.discriminator_value = Some(v.clone());
        }
        if let Some(v) = &o.default_value {
            self.default_value = Some(v.clone());
        }
        if !o.include_sub_classes.is_empty() {
            self.include_sub_classes = o.include_sub_classes.clone();
        }
        if let Some(v) = &o.unique_id {
            self.unique_id = Some(v.clone());
        }
    }
}
