use std::path::PathBuf;

use gdvm_bytecode::Version;

use super::run_common::{assemble_file, fail};

pub struct CheckArgs {
    pub source_path: PathBuf,
    pub version: Version,
    pub single_pass: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    if let Err(e) = assemble_file(&args.source_path, args.version, args.single_pass) {
        fail(e, args.color);
    }

    // Silent on success (like cargo check)
}
