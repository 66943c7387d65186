//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. Required arguments and accepted values
//! 2. Params extraction: correct fields are extracted from ArgMatches
//! 3. Params → Args conversion

use std::path::PathBuf;

use gdvm_bytecode::Version;
use gdvm_vm::Verbosity;

use super::*;
use crate::cli::commands::{
    asm_command, check_command, dump_command, exec_command, run_command, trace_command,
};
use crate::commands::trace::TraceArgs;

#[test]
fn asm_extracts_paths_and_version() {
    let m = asm_command()
        .try_get_matches_from(["asm", "prog.gd", "-o", "prog.gdb", "--format-version", "1"])
        .unwrap();
    let params = AsmParams::from_matches(&m);

    assert_eq!(params.source_path, PathBuf::from("prog.gd"));
    assert_eq!(params.output_path, PathBuf::from("prog.gdb"));
    assert_eq!(params.version, Version::V1);
    assert!(!params.single_pass);
    assert_eq!(params.color, ColorChoice::Auto);
}

#[test]
fn asm_requires_output() {
    let result = asm_command().try_get_matches_from(["asm", "prog.gd"]);
    assert!(result.is_err());
}

#[test]
fn asm_rejects_unknown_format_version() {
    let result =
        asm_command().try_get_matches_from(["asm", "prog.gd", "-o", "x", "--format-version", "3"]);
    assert!(result.is_err());
}

#[test]
fn check_defaults_to_latest_version() {
    let m = check_command()
        .try_get_matches_from(["check", "prog.gd", "--single-pass", "--color", "never"])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.version, Version::V2);
    assert!(params.single_pass);
    assert_eq!(params.color, ColorChoice::Never);
}

#[test]
fn dump_takes_one_file() {
    let m = dump_command()
        .try_get_matches_from(["dump", "prog.gdb", "--color", "always"])
        .unwrap();
    let params = DumpParams::from_matches(&m);

    assert_eq!(params.input_path, PathBuf::from("prog.gdb"));
    assert_eq!(params.color, ColorChoice::Always);
}

#[test]
fn exec_runtime_defaults() {
    let m = exec_command()
        .try_get_matches_from(["exec", "prog.gdb"])
        .unwrap();
    let params = ExecParams::from_matches(&m);

    assert_eq!(params.bytecode_path, PathBuf::from("prog.gdb"));
    assert_eq!(params.vm.memory, 4096);
    assert_eq!(params.vm.fuel, None);
    assert_eq!(params.vm.recursion_limit, 65536);
}

#[test]
fn exec_runtime_flags() {
    let m = exec_command()
        .try_get_matches_from([
            "exec",
            "prog.gdb",
            "--memory",
            "64",
            "--fuel",
            "1000",
            "--recursion-limit",
            "8",
        ])
        .unwrap();
    let params = ExecParams::from_matches(&m);

    assert_eq!(params.vm.memory, 64);
    assert_eq!(params.vm.fuel, Some(1000));
    assert_eq!(params.vm.recursion_limit, 8);
}

#[test]
fn exec_rejects_non_numeric_fuel() {
    let result = exec_command().try_get_matches_from(["exec", "prog.gdb", "--fuel", "lots"]);
    assert!(result.is_err());
}

#[test]
fn run_accepts_assembler_and_runtime_flags() {
    let m = run_command()
        .try_get_matches_from(["run", "prog.gd", "--format-version", "1", "--memory", "8"])
        .unwrap();
    let params = RunParams::from_matches(&m);

    assert_eq!(params.source_path, PathBuf::from("prog.gd"));
    assert_eq!(params.version, Version::V1);
    assert_eq!(params.vm.memory, 8);
}

#[test]
fn trace_verbosity_levels() {
    let levels = [
        (vec!["trace", "p.gd"], Verbosity::Default),
        (vec!["trace", "p.gd", "-v"], Verbosity::Verbose),
        (vec!["trace", "p.gd", "-vv"], Verbosity::VeryVerbose),
        (vec!["trace", "p.gd", "-vvv"], Verbosity::VeryVerbose),
    ];

    for (argv, expected) in levels {
        let m = trace_command().try_get_matches_from(&argv).unwrap();
        let args: TraceArgs = TraceParams::from_matches(&m).into();
        assert_eq!(args.verbosity, expected, "{argv:?}");
    }
}

#[test]
fn build_cli_requires_subcommand() {
    let result = build_cli().try_get_matches_from(["gdvm"]);
    assert!(result.is_err());

    let m = build_cli()
        .try_get_matches_from(["gdvm", "check", "prog.gd"])
        .unwrap();
    assert_eq!(m.subcommand_name(), Some("check"));
}
