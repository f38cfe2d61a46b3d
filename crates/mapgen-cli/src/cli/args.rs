//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so `analyze` and `check` compose the
//! same definitions.

use std::path::PathBuf;

use clap::{Arg, value_parser};

/// Universe description file (positional, `-` for stdin).
pub fn universe_path_arg() -> Arg {
    Arg::new("universe_path")
        .value_name("UNIVERSE")
        .value_parser(value_parser!(PathBuf))
        .default_value("-")
        .help("Universe JSON file, or - to read stdin")
}

/// Root unit (-u/--unit).
pub fn unit_arg() -> Arg {
    Arg::new("unit")
        .short('u')
        .long("unit")
        .value_name("NAME")
        .help("Unit to analyse (defaults to the first unit)")
}

/// Discovery scope (--scope).
pub fn scope_arg() -> Arg {
    Arg::new("scope")
        .long("scope")
        .value_name("SCOPE")
        .value_parser(["unit", "directory", "package"])
        .help("Which units are analysed together (overrides the config file)")
}

/// Config file (-c/--config).
pub fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Config JSON file")
}

/// Output format (--format).
pub fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .value_name("FORMAT")
        .default_value("text")
        .value_parser(["text", "json"])
        .help("Output format")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Log verbosity (--log-level). Global.
pub fn log_level_arg() -> Arg {
    Arg::new("log_level")
        .long("log-level")
        .value_name("LEVEL")
        .global(true)
        .value_parser(["error", "warn", "info", "debug", "trace"])
        .help("Log verbosity (overrides MAPGEN_LOG_LEVEL)")
}

/// Log format (--log-format). Global.
pub fn log_format_arg() -> Arg {
    Arg::new("log_format")
        .long("log-format")
        .value_name("FORMAT")
        .global(true)
        .value_parser(["auto", "text", "json"])
        .help("Log output format (overrides MAPGEN_LOG_FORMAT)")
}
