//! Global analysis configuration.
//!
//! Lowest options layer: unit-wide defaults and annotations override it.

use mapgen_core::{CaseStyle, EnumMode, GenerateMethods, Scope};
use serde::{Deserialize, Serialize};

/// Discriminator key used when no element in a hierarchy sets one.
pub const DEFAULT_DISCRIMINATOR_KEY: &str = "__type";

/// Configuration for one analysis run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub(crate) case_style: CaseStyle,
    pub(crate) enum_case_style: CaseStyle,
    pub(crate) ignore_null: bool,
    pub(crate) discriminator_key: String,
    pub(crate) generate_methods: GenerateMethods,
    pub(crate) enum_mode: EnumMode,
    pub(crate) scope: Scope,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            case_style: CaseStyle::None,
            enum_case_style: CaseStyle::None,
            ignore_null: false,
            discriminator_key: DEFAULT_DISCRIMINATOR_KEY.to_string(),
            generate_methods: GenerateMethods::ALL,
            enum_mode: EnumMode::Name,
            scope: Scope::Unit,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a camelCase JSON config. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Set the case style for encoded field keys.
    pub fn case_style(mut self, value: CaseStyle) -> Self {
        self.case_style = value;
        self
    }

    /// Set the case style for encoded enum values.
    pub fn enum_case_style(mut self, value: CaseStyle) -> Self {
        self.enum_case_style = value;
        self
    }

    pub fn ignore_null(mut self, value: bool) -> Self {
        self.ignore_null = value;
        self
    }

    /// Set the fallback discriminator key.
    pub fn discriminator_key(mut self, value: impl Into<String>) -> Self {
        self.discriminator_key = value.into();
        self
    }

    /// Set the methods generated unless an annotation says otherwise.
    pub fn generate_methods(mut self, value: GenerateMethods) -> Self {
        self.generate_methods = value;
        self
    }

    pub fn enum_mode(mut self, value: EnumMode) -> Self {
        self.enum_mode = value;
        self
    }

    /// Set which units are analysed together.
    pub fn scope(mut self, value: Scope) -> Self {
        self.scope = value;
        self
    }
}
