//! Subcommand definitions.

use clap::Command;

use super::args::*;

/// `--memory`, `--fuel` and `--recursion-limit`, for commands that execute.
fn with_runtime_args(cmd: Command) -> Command {
    cmd.arg(memory_arg())
        .arg(fuel_arg())
        .arg(recursion_limit_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("gdvm")
        .about("Assembler and stack-machine interpreter for gdvm bytecode")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(asm_command())
        .subcommand(check_command())
        .subcommand(dump_command())
        .subcommand(exec_command())
        .subcommand(run_command())
        .subcommand(trace_command())
}

/// Assemble a source file into bytecode.
pub fn asm_command() -> Command {
    Command::new("asm")
        .about("Assemble a source file into bytecode")
        .after_help(
            r#"EXAMPLES:
  gdvm asm prog.gd -o prog.gdb
  gdvm asm prog.gd -o prog.gdb --format-version 1"#,
        )
        .arg(source_path_arg())
        .arg(output_file_arg())
        .arg(format_version_arg())
        .arg(single_pass_arg())
        .arg(color_arg())
}

/// Assemble without writing anything.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Check a source file for errors")
        .arg(source_path_arg())
        .arg(format_version_arg())
        .arg(single_pass_arg())
        .arg(color_arg())
}

/// Show a bytecode listing.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show the instruction listing of a bytecode or source file")
        .arg(input_path_arg())
        .arg(color_arg())
}

/// Execute a bytecode file.
pub fn exec_command() -> Command {
    let cmd = Command::new("exec")
        .about("Execute a bytecode file")
        .arg(bytecode_path_arg());
    with_runtime_args(cmd)
}

/// Assemble in memory and execute.
pub fn run_command() -> Command {
    let cmd = Command::new("run")
        .about("Assemble a source file and execute it")
        .arg(source_path_arg())
        .arg(format_version_arg())
        .arg(color_arg());
    with_runtime_args(cmd)
}

/// Execute with the printing tracer.
pub fn trace_command() -> Command {
    let cmd = Command::new("trace")
        .about("Trace execution for debugging")
        .after_help(
            r#"EXAMPLES:
  gdvm trace prog.gdb          # bytecode file
  gdvm trace prog.gd -vv       # source file, with stack snapshots"#,
        )
        .arg(input_path_arg())
        .arg(verbose_arg())
        .arg(color_arg());
    with_runtime_args(cmd)
}
