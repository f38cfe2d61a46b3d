//! Serialization annotations and their options.
//!
//! A declaration opts into mapper generation by carrying an [`Annotation`].
//! The same [`AnnotationOptions`] record is used at every level (global
//! config, unit-wide defaults, declaration), with unset fields inherited
//! from the enclosing level.

use serde::{Deserialize, Serialize};

use crate::types::TypeRef;
use crate::utils::{to_camel_case, to_param_case, to_pascal_case, to_snake_case};

/// Which annotation a declaration carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    /// Class (or class alias) mapper.
    Class,
    /// Enum mapper.
    Enum,
    /// Record alias mapper.
    Record,
}

/// Annotation attached to a declaration or a redirecting constructor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Annotation {
    pub kind: AnnotationKind,
    pub options: AnnotationOptions,
}

impl Annotation {
    pub fn new(kind: AnnotationKind) -> Self {
        Self {
            kind,
            options: AnnotationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AnnotationOptions) -> Self {
        self.options = options;
        self
    }
}

/// Options shared by all annotation levels. `None` means "inherit".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnnotationOptions {
    pub case_style: Option<CaseStyle>,
    pub enum_case_style: Option<CaseStyle>,
    pub ignore_null: Option<bool>,
    pub discriminator_key: Option<String>,
    pub discriminator_value: Option<String>,
    pub generate_methods: Option<GenerateMethods>,
    /// Subclasses opted in explicitly, in addition to the known subclasses.
    pub include_sub_classes: Vec<TypeRef>,
    pub enum_mode: Option<EnumMode>,
    /// Enum value used when decoding an unknown value.
    pub default_value: Option<String>,
    pub unique_id: Option<String>,
}

/// Naming convention for encoded keys and enum values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaseStyle {
    /// Keep the identifier as written.
    #[default]
    None,
    CamelCase,
    PascalCase,
    SnakeCase,
    ParamCase,
    LowerCase,
    UpperCase,
}

impl CaseStyle {
    pub fn apply(self, name: &str) -> String {
        match self {
            CaseStyle::None => name.to_string(),
            CaseStyle::CamelCase => to_camel_case(name),
            CaseStyle::PascalCase => to_pascal_case(name),
            CaseStyle::SnakeCase => to_snake_case(name),
            CaseStyle::ParamCase => to_param_case(name),
            CaseStyle::LowerCase => crate::utils::split_words(name).concat().to_lowercase(),
            CaseStyle::UpperCase => crate::utils::split_words(name).concat().to_uppercase(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CaseStyle::None => "none",
            CaseStyle::CamelCase => "camelCase",
            CaseStyle::PascalCase => "pascalCase",
            CaseStyle::SnakeCase => "snakeCase",
            CaseStyle::ParamCase => "paramCase",
            CaseStyle::LowerCase => "lowerCase",
            CaseStyle::UpperCase => "upperCase",
        }
    }
}

/// How enum values are encoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumMode {
    #[default]
    Name,
    Index,
}

/// One generated mapper capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Decode,
    Encode,
    Stringify,
    Equals,
    Copy,
}

impl Method {
    pub const ALL: [Method; 5] = [
        Method::Decode,
        Method::Encode,
        Method::Stringify,
        Method::Equals,
        Method::Copy,
    ];

    fn bit(self) -> u8 {
        match self {
            Method::Decode => 1,
            Method::Encode => 1 << 1,
            Method::Stringify => 1 << 2,
            Method::Equals => 1 << 3,
            Method::Copy => 1 << 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Decode => "decode",
            Method::Encode => "encode",
            Method::Stringify => "stringify",
            Method::Equals => "equals",
            Method::Copy => "copy",
        }
    }
}

/// Set of generated mapper capabilities.
///
/// Deserialized from a list of method names (`["decode", "encode"]`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Method>", into = "Vec<Method>")]
pub struct GenerateMethods(u8);

impl GenerateMethods {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(0b1_1111);

    pub fn contains(self, method: Method) -> bool {
        self.0 & method.bit() != 0
    }

    #[must_use]
    pub fn with(self, method: Method) -> Self {
        Self(self.0 | method.bit())
    }

    #[must_use]
    pub fn without(self, method: Method) -> Self {
        Self(self.0 & !method.bit())
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Method> {
        Method::ALL.into_iter().filter(move |&m| self.contains(m))
    }
}

impl Default for GenerateMethods {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<Vec<Method>> for GenerateMethods {
    fn from(methods: Vec<Method>) -> Self {
        methods.into_iter().fold(Self::NONE, Self::with)
    }
}

impl From<GenerateMethods> for Vec<Method> {
    fn from(methods: GenerateMethods) -> Self {
        methods.iter().collect()
    }
}

impl std::fmt::Debug for GenerateMethods {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter().map(Method::as_str)).finish()
    }
}
