//! Execute a bytecode file.

use std::path::PathBuf;

use super::run_common::{VmOptions, execute, fail, load_bytecode};

pub struct ExecArgs {
    pub bytecode_path: PathBuf,
    pub vm: VmOptions,
}

pub fn run(args: ExecArgs) {
    // Header problems are load errors, reported before anything runs.
    let program = load_bytecode(&args.bytecode_path).unwrap_or_else(|e| fail(e, false));
    execute(&program, &args.vm);
}
