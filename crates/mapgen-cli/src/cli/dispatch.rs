//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;
use mapgen_core::Scope;

use super::ColorChoice;
use crate::commands::Input;
use crate::commands::analyze::{AnalyzeArgs, OutputFormat};
use crate::commands::check::CheckArgs;
use crate::logging::{LogFormat, LogLevel, LogSettings};

pub struct AnalyzeParams {
    pub universe_path: PathBuf,
    pub unit: Option<String>,
    pub scope: Option<Scope>,
    pub config_path: Option<PathBuf>,
    pub format: OutputFormat,
    pub color: ColorChoice,
}

impl AnalyzeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            universe_path: parse_universe_path(m),
            unit: m.get_one::<String>("unit").cloned(),
            scope: parse_scope(m),
            config_path: m.get_one::<PathBuf>("config").cloned(),
            format: parse_format(m),
            color: parse_color(m),
        }
    }
}

impl From<AnalyzeParams> for AnalyzeArgs {
    fn from(p: AnalyzeParams) -> Self {
        Self {
            input: Input {
                universe_path: p.universe_path,
                unit: p.unit,
                scope: p.scope,
                config_path: p.config_path,
            },
            format: p.format,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub universe_path: PathBuf,
    pub unit: Option<String>,
    pub scope: Option<Scope>,
    pub config_path: Option<PathBuf>,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            universe_path: parse_universe_path(m),
            unit: m.get_one::<String>("unit").cloned(),
            scope: parse_scope(m),
            config_path: m.get_one::<PathBuf>("config").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            input: Input {
                universe_path: p.universe_path,
                unit: p.unit,
                scope: p.scope,
                config_path: p.config_path,
            },
            color: p.color.should_colorize(),
        }
    }
}

/// Global logging flags, read from any subcommand's matches.
pub struct LogParams {
    pub level: Option<LogLevel>,
    pub format: Option<LogFormat>,
}

impl LogParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            level: m
                .get_one::<String>("log_level")
                .and_then(|s| LogLevel::parse(s)),
            format: m
                .get_one::<String>("log_format")
                .and_then(|s| LogFormat::parse(s)),
        }
    }

    pub fn into_settings(self) -> LogSettings {
        LogSettings {
            format: self.format,
            level: self.level,
        }
    }
}

fn parse_universe_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("universe_path")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("-"))
}

fn parse_scope(m: &ArgMatches) -> Option<Scope> {
    m.get_one::<String>("scope").and_then(|s| Scope::parse(s))
}

fn parse_format(m: &ArgMatches) -> OutputFormat {
    match m.get_one::<String>("format").map(|s| s.as_str()) {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Text,
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
