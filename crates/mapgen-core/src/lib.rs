#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for mapgen's type universe.
//!
//! Two layers:
//! - **Deserialization layer**: 1:1 mapping to the universe JSON description
//! - **Analysis layer**: ID-indexed declarations with resolved type references
//!
//! The analysis core never talks to the host type system directly. It goes
//! through the [`TypeUniverse`] adapter trait, which [`Universe`] implements
//! for universes loaded from JSON.

pub mod annotation;
mod colors;
pub mod types;
pub mod universe;
pub mod utils;


pub use annotation::{
    Annotation, AnnotationKind, AnnotationOptions, CaseStyle, EnumMode, GenerateMethods, Method,
};
pub use colors::Colors;
pub use types::{
    Constructor, DeclCategory, DeclId, Param, RecordShape, TypeParam, TypeRef, UnitId,
};
pub use universe::{Scope, TypeUniverse, Universe, UniverseError};
