//! Assemble in memory and execute, without writing a bytecode file.

use std::path::PathBuf;

use gdvm_bytecode::Version;

use super::run_common::{VmOptions, assemble_file, execute, fail};

pub struct RunArgs {
    pub source_path: PathBuf,
    pub version: Version,
    pub vm: VmOptions,
    pub color: bool,
}

pub fn run(args: RunArgs) {
    let program = assemble_file(&args.source_path, args.version, false)
        .unwrap_or_else(|e| fail(e, args.color));
    execute(&program, &args.vm);
}
