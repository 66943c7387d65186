//! Trace program execution for debugging.

use std::io;
use std::path::PathBuf;

use gdvm_core::Colors;
use gdvm_vm::{PrintTracer, Verbosity};

use super::run_common::{VmOptions, fail, load_program};

pub struct TraceArgs {
    pub input_path: PathBuf,
    pub verbosity: Verbosity,
    pub vm: VmOptions,
    pub color: bool,
}

pub fn run(args: TraceArgs) {
    let program = load_program(&args.input_path).unwrap_or_else(|e| fail(e, args.color));

    let mut vm = args.vm.build();
    let mut tracer = PrintTracer::builder(&program)
        .verbosity(args.verbosity)
        .colored(args.color)
        .build();

    // OUT values already appear in the trace.
    let result = vm.execute_with(&program, &mut io::sink(), &mut tracer);
    tracer.print();

    match result {
        Ok(()) => {
            let colors = Colors::new(args.color);
            println!("{}---{}", colors.dim, colors.reset);
            println!("OK ({} instructions)", vm.steps());
        }
        Err(e) => {
            eprintln!("runtime error: {}", e);
            std::process::exit(1);
        }
    }
}
