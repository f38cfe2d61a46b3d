use indexmap::IndexMap;
use mapgen_core::{DeclId, TypeUniverse, UnitId};

/// Qualifier needed to name each declaration from the analysis root:
/// `""` when visible unqualified, `"alias."` when imported under a prefix.
#[derive(Clone, Debug, Default)]
pub struct Prefixes {
    map: IndexMap<DeclId, String>,
}

impl Prefixes {
    pub fn build(universe: &dyn TypeUniverse, root: UnitId) -> Self {
        let map = universe
            .decls()
            .into_iter()
            .map(|decl| {
                let prefix = universe
                    .import_prefix_of(root, decl)
                    .map(|p| format!("{p}."))
                    .unwrap_or_default();
                (decl, prefix)
            })
            .collect();
        Self { map }
    }

    pub fn get(&self, decl: DeclId) -> &str {
        self.map.get(&decl).map_or("", String::as_str)
    }

    /// Declarations that need a qualifier.
    pub fn qualified(&self) -> impl Iterator<Item = (DeclId, &str)> {
        self.map
            .iter()
            .filter(|(_, p)| !p.is_empty())
            .map(|(d, p)| (*d, p.as_str()))
    }
}
