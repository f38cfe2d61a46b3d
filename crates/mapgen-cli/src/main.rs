mod cli;
mod commands;
mod logging;

use cli::{AnalyzeParams, CheckParams, LogParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();
    let Some((name, m)) = matches.subcommand() else {
        unreachable!("clap should have caught this")
    };

    logging::init(LogParams::from_matches(m).into_settings().merged_with_env());

    match name {
        "analyze" => {
            let params = AnalyzeParams::from_matches(m);
            commands::analyze::run(params.into());
        }
        "check" => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
