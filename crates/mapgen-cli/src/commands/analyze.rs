use mapgen_core::Colors;

use super::loader::{LoadError, build_plan};
use super::{Input, fail};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub struct AnalyzeArgs {
    pub input: Input,
    pub format: OutputFormat,
    pub color: bool,
}

pub fn run(args: AnalyzeArgs) {
    match render(&args) {
        Ok(output) => print!("{output}"),
        Err(e) => fail(e, args.color),
    }
}

fn render(args: &AnalyzeArgs) -> Result<String, LoadError> {
    let plan = build_plan(&args.input)?;
    Ok(match args.format {
        OutputFormat::Text => plan.dump(Colors::new(args.color)),
        OutputFormat::Json => {
            let mut json = plan.to_json().map_err(LoadError::Serialize)?;
            json.push('\n');
            json
        }
    })
}
