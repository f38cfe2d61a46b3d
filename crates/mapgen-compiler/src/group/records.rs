//! Records group: structural record shapes and their synthesized aliases.

use indexmap::IndexMap;
use mapgen_core::{RecordShape, TypeRef};

/// Synthesized alias for one record shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordAlias {
    pub name: String,
    /// The shape as first encountered.
    pub shape: RecordShape,
    /// Distinct type parameters of the shape, positional fields first,
    /// then named fields by name.
    pub type_params: Vec<TypeRef>,
}

/// Shapes keyed by structural identity. Positional order matters, named
/// field order does not.
#[derive(Clone, Debug, Default)]
pub struct RecordsGroup {
    aliases: IndexMap<RecordShape, RecordAlias>,
}

impl RecordsGroup {
    /// Register `shape`, returning its alias and whether it was new.
    pub(crate) fn register(&mut self, shape: &RecordShape) -> (&RecordAlias, bool) {
        let key = shape.key();
        let next = self.aliases.len();
        let mut inserted = false;
        let alias = self.aliases.entry(key).or_insert_with(|| {
            inserted = true;
            RecordAlias {
                name: format!("_R{next}"),
                shape: shape.clone(),
                type_params: shape.key_params(),
            }
        });
        (alias, inserted)
    }

    pub fn get(&self, shape: &RecordShape) -> Option<&RecordAlias> {
        self.aliases.get(&shape.key())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordAlias> {
        self.aliases.values()
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
