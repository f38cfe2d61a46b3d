//! Test utilities.

use mapgen_core::{TypeUniverse, Universe};

use crate::element::MapperElement;
use crate::{Config, MapperElementGroup, Result};

/// Load a universe, panicking with the loader error.
pub fn universe(json: &str) -> Universe {
    Universe::from_json(json).unwrap_or_else(|e| panic!("invalid test universe: {e}"))
}

/// Analyse `unit` with the default config, panicking on errors.
pub fn analyze<'u>(universe: &'u Universe, unit: &str) -> MapperElementGroup<'u> {
    analyze_with(universe, unit, Config::new())
}

pub fn analyze_with<'u>(universe: &'u Universe, unit: &str, config: Config) -> MapperElementGroup<'u> {
    let (group, result) = try_analyze(universe, unit, config);
    if let Err(e) = result {
        panic!("analysis of `{unit}` failed: {e}");
    }
    group
}

/// Analyse `unit`, returning the group even when analysis fails.
pub fn try_analyze<'u>(
    universe: &'u Universe,
    unit: &str,
    config: Config,
) -> (MapperElementGroup<'u>, Result<()>) {
    let root = universe
        .unit_id(unit)
        .unwrap_or_else(|| panic!("unknown unit `{unit}`"));
    let mut group = MapperElementGroup::new(universe, root, config);
    let result = group.analyze();
    (group, result)
}

/// The element whose declaration is named `name`.
pub fn element<'g>(group: &'g MapperElementGroup<'_>, name: &str) -> &'g MapperElement {
    group
        .elements()
        .iter()
        .find(|e| group.universe().decl_name(e.identity()) == name)
        .unwrap_or_else(|| panic!("no element for `{name}`"))
}

/// Declaration names of the given elements, in order.
pub fn names(group: &MapperElementGroup<'_>, ids: &[crate::ElementId]) -> Vec<String> {
    ids.iter()
        .map(|&id| group.universe().decl_name(group.element(id).identity()).to_string())
        .collect()
}
