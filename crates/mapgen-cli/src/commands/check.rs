use super::loader::build_plan;
use super::{Input, fail};

pub struct CheckArgs {
    pub input: Input,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    if let Err(e) = build_plan(&args.input) {
        fail(e, args.color);
    }

    // Silent on success (like cargo check)
}
