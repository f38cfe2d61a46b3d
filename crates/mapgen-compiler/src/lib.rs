//! mapgen compiler: mapper graph analysis and linking.
//!
//! This crate turns a type universe into a linked mapper graph:
//! - `element` - mapper element variants and resolved options
//! - `group` - the element group (registry and graph builder)
//! - `naming` - prefix table and type rendering
//! - `plan` - the finished, read-only plan handed to emission

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod element;
pub mod group;
pub mod naming;
pub mod plan;

#[cfg(test)]
pub mod test_utils;

pub use config::Config;
pub use element::{ElementId, ElementKind, MapperElement, MapperOptions};
pub use group::{MapperElementGroup, RecordAlias, RecordsGroup};
pub use naming::{Prefixes, RenderOptions, TypeRenderer};
pub use plan::MapperPlan;

use mapgen_core::UniverseError;

/// Errors that abort the analysis of a unit.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A subclass reached through the hierarchy carries no annotation.
    #[error("cannot include subclass {name}, it has no generated mapper")]
    MissingSubclassMapper { name: String },

    /// A subclass neither extends nor implements the element that lists it.
    #[error("cannot determine supertype/subtype relation of {sub} to {parent} ({detail})")]
    UnknownRelation {
        sub: String,
        parent: String,
        detail: String,
    },

    #[error(transparent)]
    Universe(#[from] UniverseError),

    #[error("unknown unit `{name}`")]
    UnknownUnit { name: String },
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, Error>;
