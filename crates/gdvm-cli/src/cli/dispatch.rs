//! `ArgMatches` to typed command arguments.
//!
//! `*Params` hold what the user asked for (e.g. `--color auto`); converting
//! into `*Args` resolves it against the environment (is stdout a terminal).

use std::path::PathBuf;

use clap::ArgMatches;
use gdvm_bytecode::Version;
use gdvm_vm::Verbosity;

use super::ColorChoice;
use crate::commands::asm::AsmArgs;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::exec::ExecArgs;
use crate::commands::run::RunArgs;
use crate::commands::run_common::VmOptions;
use crate::commands::trace::TraceArgs;

pub struct AsmParams {
    pub source_path: PathBuf,
    pub output_path: PathBuf,
    pub version: Version,
    pub single_pass: bool,
    pub color: ColorChoice,
}

impl AsmParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: required_path(m, "source_path"),
            output_path: required_path(m, "output"),
            version: parse_version(m),
            single_pass: m.get_flag("single_pass"),
            color: parse_color(m),
        }
    }
}

impl From<AsmParams> for AsmArgs {
    fn from(p: AsmParams) -> Self {
        Self {
            source_path: p.source_path,
            output_path: p.output_path,
            version: p.version,
            single_pass: p.single_pass,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub source_path: PathBuf,
    pub version: Version,
    pub single_pass: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: required_path(m, "source_path"),
            version: parse_version(m),
            single_pass: m.get_flag("single_pass"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            source_path: p.source_path,
            version: p.version,
            single_pass: p.single_pass,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub input_path: PathBuf,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input_path: required_path(m, "input_path"),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            input_path: p.input_path,
            color: p.color.should_colorize(),
        }
    }
}

pub struct ExecParams {
    pub bytecode_path: PathBuf,
    pub vm: VmOptions,
}

impl ExecParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            bytecode_path: required_path(m, "bytecode_path"),
            vm: parse_vm_options(m),
        }
    }
}

impl From<ExecParams> for ExecArgs {
    fn from(p: ExecParams) -> Self {
        Self {
            bytecode_path: p.bytecode_path,
            vm: p.vm,
        }
    }
}

pub struct RunParams {
    pub source_path: PathBuf,
    pub version: Version,
    pub vm: VmOptions,
    pub color: ColorChoice,
}

impl RunParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: required_path(m, "source_path"),
            version: parse_version(m),
            vm: parse_vm_options(m),
            color: parse_color(m),
        }
    }
}

impl From<RunParams> for RunArgs {
    fn from(p: RunParams) -> Self {
        Self {
            source_path: p.source_path,
            version: p.version,
            vm: p.vm,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TraceParams {
    pub input_path: PathBuf,
    pub verbose: u8,
    pub vm: VmOptions,
    pub color: ColorChoice,
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input_path: required_path(m, "input_path"),
            verbose: m.get_count("verbose"),
            vm: parse_vm_options(m),
            color: parse_color(m),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        let verbosity = match p.verbose {
            0 => Verbosity::Default,
            1 => Verbosity::Verbose,
            _ => Verbosity::VeryVerbose,
        };

        Self {
            input_path: p.input_path,
            verbosity,
            vm: p.vm,
            color: p.color.should_colorize(),
        }
    }
}

/// Required positionals are enforced by clap; the fallback only keeps this total.
fn required_path(m: &ArgMatches, id: &str) -> PathBuf {
    m.get_one::<PathBuf>(id).cloned().unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn parse_version(m: &ArgMatches) -> Version {
    match m.get_one::<String>("format_version").map(|s| s.as_str()) {
        Some("1") => Version::V1,
        _ => Version::V2,
    }
}

fn parse_vm_options(m: &ArgMatches) -> VmOptions {
    let defaults = VmOptions::default();
    VmOptions {
        memory: m.get_one::<usize>("memory").copied().unwrap_or(defaults.memory),
        fuel: m.get_one::<u64>("fuel").copied(),
        recursion_limit: m
            .get_one::<usize>("recursion_limit")
            .copied()
            .unwrap_or(defaults.recursion_limit),
    }
}
