//! Naming: qualifying prefixes and rendering of type references to text.

mod prefixes;
mod render;


pub use prefixes::Prefixes;
pub use render::{RenderOptions, TypeRenderer};
