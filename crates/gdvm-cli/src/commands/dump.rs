use std::path::PathBuf;

use gdvm_bytecode::dump;
use gdvm_core::Colors;

use super::run_common::{fail, load_program};

pub struct DumpArgs {
    pub input_path: PathBuf,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let program = load_program(&args.input_path).unwrap_or_else(|e| fail(e, args.color));
    let colors = Colors::new(args.color);
    print!("{}", dump(&program, colors));
}
