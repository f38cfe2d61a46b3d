//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("mapgen")
        .about("Mapper graph analysis for annotated type universes")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(log_level_arg())
        .arg(log_format_arg())
        .subcommand(analyze_command())
        .subcommand(check_command())
}

/// Analyse a unit and print its mapper plan.
pub fn analyze_command() -> Command {
    Command::new("analyze")
        .about("Analyse a unit and print its mapper plan")
        .override_usage(
            "\
  mapgen analyze <UNIVERSE> [-u <NAME>]
  mapgen analyze <UNIVERSE> --format json
  mapgen analyze - < universe.json",
        )
        .after_help(
            r#"EXAMPLES:
  mapgen analyze universe.json                 # first unit, text dump
  mapgen analyze universe.json -u models       # a specific unit
  mapgen analyze universe.json --scope package # every unit of the package
  mapgen analyze universe.json --format json   # plan as JSON"#,
        )
        .arg(universe_path_arg())
        .arg(unit_arg())
        .arg(scope_arg())
        .arg(config_arg())
        .arg(format_arg())
        .arg(color_arg())
}

/// Validate that a unit analyses cleanly.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate that a unit analyses without errors")
        .override_usage(
            "\
  mapgen check <UNIVERSE> [-u <NAME>]",
        )
        .after_help(
            r#"EXAMPLES:
  mapgen check universe.json              # silent on success
  mapgen check universe.json -c mapgen.json"#,
        )
        .arg(universe_path_arg())
        .arg(unit_arg())
        .arg(scope_arg())
        .arg(config_arg())
        .arg(color_arg())
}
