//! Assemble a source file into a bytecode file.

use std::path::PathBuf;

use gdvm_bytecode::Version;

use super::run_common::{assemble_file, fail, write_program};

pub struct AsmArgs {
    pub source_path: PathBuf,
    pub output_path: PathBuf,
    pub version: Version,
    pub single_pass: bool,
    pub color: bool,
}

pub fn run(args: AsmArgs) {
    let program = assemble_file(&args.source_path, args.version, args.single_pass)
        .unwrap_or_else(|e| fail(e, args.color));

    // Nothing is written when assembly fails.
    if let Err(e) = write_program(&args.output_path, &program) {
        fail(e, args.color);
    }
}
