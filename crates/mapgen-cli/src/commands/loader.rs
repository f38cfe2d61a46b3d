//! Loading the universe and config files, and running the analysis.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use mapgen_compiler::{Config, MapperElementGroup, MapperPlan};
use mapgen_core::{Scope, UnitId, Universe, UniverseError};

use super::Input;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read '{path}': {source}")]
    Read { path: String, source: io::Error },

    #[error("invalid universe '{path}': {source}")]
    Universe {
        path: String,
        source: UniverseError,
    },

    #[error("invalid config '{path}': {source}")]
    Config {
        path: String,
        source: serde_json::Error,
    },

    #[error("failed to serialize plan: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("universe '{path}' declares no units")]
    NoUnits { path: String },

    #[error(transparent)]
    Analysis(#[from] mapgen_compiler::Error),
}

/// Read and resolve the universe at `path` (`-` reads stdin).
pub fn load_universe(path: &Path) -> Result<Universe, LoadError> {
    let text = read_input(path)?;
    Universe::from_json(&text).map_err(|source| LoadError::Universe {
        path: display(path),
        source,
    })
}

/// Config from `path` (defaults when absent), with `scope` applied on top.
pub fn load_config(path: Option<&Path>, scope: Option<Scope>) -> Result<Config, LoadError> {
    let config = match path {
        Some(path) => {
            let text = read_input(path)?;
            Config::from_json(&text).map_err(|source| LoadError::Config {
                path: display(path),
                source,
            })?
        }
        None => Config::new(),
    };
    Ok(match scope {
        Some(scope) => config.scope(scope),
        None => config,
    })
}

/// The named unit, or the first one.
pub fn select_unit(universe: &Universe, name: Option<&str>, path: &Path) -> Result<UnitId, LoadError> {
    match name {
        Some(name) => universe.unit_id(name).ok_or_else(|| {
            mapgen_compiler::Error::UnknownUnit {
                name: name.to_string(),
            }
            .into()
        }),
        None => universe
            .units()
            .first()
            .map(|unit| unit.id)
            .ok_or_else(|| LoadError::NoUnits {
                path: display(path),
            }),
    }
}

/// Load everything `input` names and analyse the selected unit.
pub fn build_plan(input: &Input) -> Result<MapperPlan, LoadError> {
    let universe = load_universe(&input.universe_path)?;
    let root = select_unit(&universe, input.unit.as_deref(), &input.universe_path)?;
    let config = load_config(input.config_path.as_deref(), input.scope)?;

    tracing::debug!(
        target: "mapgen::cli",
        universe = %self::display(&input.universe_path),
        unit = universe.unit(root).name.as_str(),
        config = input.config_path.is_some(),
        "analysing"
    );

    let mut group = MapperElementGroup::new(&universe, root, config);
    group.analyze()?;
    Ok(group.plan())
}

fn read_input(path: &Path) -> Result<String, LoadError> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| LoadError::Read {
                path: "<stdin>".to_string(),
                source,
            })?;
        return Ok(buf);
    }
    fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: display(path),
        source,
    })
}

fn display(path: &Path) -> String {
    if path.as_os_str() == "-" {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}
