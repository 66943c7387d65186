//! Argument constructors reused across subcommands.
//!
//! Ids here are the keys `dispatch.rs` reads back from `ArgMatches`.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Assembly source file (positional).
pub fn source_path_arg() -> Arg {
    Arg::new("source_path")
        .value_name("SOURCE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Assembly source file")
}

/// Bytecode file (positional).
pub fn bytecode_path_arg() -> Arg {
    Arg::new("bytecode_path")
        .value_name("BYTECODE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Bytecode file produced by `gdvm asm`")
}

/// Bytecode or source file (positional).
pub fn input_path_arg() -> Arg {
    Arg::new("input_path")
        .value_name("FILE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Bytecode file, or assembly source to assemble first")
}

/// Write bytecode to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("OUTPUT")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Write bytecode to file")
}

/// Target format revision (--format-version).
pub fn format_version_arg() -> Arg {
    Arg::new("format_version")
        .long("format-version")
        .value_name("N")
        .default_value("2")
        .value_parser(["1", "2"])
        .help("Bytecode format version (1 = legacy arithmetic subset)")
}

/// Resolve labels while encoding (--single-pass).
pub fn single_pass_arg() -> Arg {
    Arg::new("single_pass")
        .long("single-pass")
        .action(ArgAction::SetTrue)
        .help("Assemble in one pass (labels must be declared before use)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Memory size in cells (--memory).
pub fn memory_arg() -> Arg {
    Arg::new("memory")
        .long("memory")
        .value_name("N")
        .default_value("4096")
        .value_parser(value_parser!(usize))
        .help("Number of memory cells")
}

/// Instruction budget (--fuel).
pub fn fuel_arg() -> Arg {
    Arg::new("fuel")
        .long("fuel")
        .value_name("N")
        .value_parser(value_parser!(u64))
        .help("Stop after N instructions (default: unlimited)")
}

/// Call depth limit (--recursion-limit).
pub fn recursion_limit_arg() -> Arg {
    Arg::new("recursion_limit")
        .long("recursion-limit")
        .value_name("N")
        .default_value("65536")
        .value_parser(value_parser!(usize))
        .help("Maximum call depth")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v for verbose, -vv for very verbose)")
}
