pub mod analyze;
pub mod check;
pub mod loader;


use std::path::PathBuf;

use mapgen_core::{Colors, Scope};

/// What to analyse, shared by `analyze` and `check`.
#[derive(Clone, Debug)]
pub struct Input {
    pub universe_path: PathBuf,
    pub unit: Option<String>,
    pub scope: Option<Scope>,
    pub config_path: Option<PathBuf>,
}

/// Print `error: ...` and exit with status 1.
pub fn fail(err: impl std::fmt::Display, color: bool) -> ! {
    let c = Colors::new(color);
    eprintln!("{}error:{} {err}", c.red, c.reset);
    std::process::exit(1);
}
