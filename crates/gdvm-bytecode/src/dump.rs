//! Human-readable disassembly for debugging.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use gdvm_core::{Colors, width_for_count};

use super::instruction::Instruction;
use super::program::Program;

/// Generate a human-readable listing of the program.
///
/// Branch targets get an `@offset:` marker line so control flow can be
/// followed without counting bytes. Undecodable bytes end the listing with
/// an error line.
pub fn dump(program: &Program, colors: Colors) -> String {
    let mut out = String::new();
    let ctx = DumpContext::new(program, colors);

    dump_header(&mut out, program, &ctx);
    out.push('\n');
    dump_code(&mut out, program, &ctx);

    out
}

struct DumpContext {
    /// Offsets that some branch or call jumps to.
    targets: BTreeSet<u32>,
    offset_width: usize,
    colors: Colors,
}

impl DumpContext {
    fn new(program: &Program, colors: Colors) -> Self {
        let targets = program
            .instructions()
            .filter_map(|item| item.ok())
            .filter_map(|(_, instr)| instr.target())
            .collect();

        Self {
            targets,
            offset_width: width_for_count(program.body().len()),
            colors,
        }
    }
}

fn dump_header(out: &mut String, program: &Program, ctx: &DumpContext) {
    let c = &ctx.colors;
    writeln!(out, "{}[header]{}", c.blue, c.reset).unwrap();
    writeln!(out, "version {}", program.version()).unwrap();
    writeln!(out, "length  {}", program.body().len()).unwrap();
}

fn dump_code(out: &mut String, program: &Program, ctx: &DumpContext) {
    let c = &ctx.colors;
    writeln!(out, "{}[code]{}", c.blue, c.reset).unwrap();

    for item in program.instructions() {
        match item {
            Ok((offset, instr)) => {
                if ctx.targets.contains(&(offset as u32)) {
                    writeln!(out, "{}@{offset}{}:", c.dim, c.reset).unwrap();
                }
                out.push_str(&format_instruction(offset, &instr, ctx));
                out.push('\n');
            }
            Err(e) => {
                writeln!(out, "{}!! {e}{}", c.red, c.reset).unwrap();
            }
        }
    }
}

fn format_instruction(offset: usize, instr: &Instruction, ctx: &DumpContext) -> String {
    let c = &ctx.colors;
    let w = ctx.offset_width;
    let mnemonic = instr.opcode().mnemonic();
    let mut line = format!("{}{offset:>w$}{}  {}{mnemonic}{}", c.dim, c.reset, c.blue, c.reset);

    match instr {
        Instruction::Push(op) | Instruction::Pop(op) => {
            write!(line, " {}{op}{}", c.green, c.reset).unwrap();
        }
        _ => {
            if let Some(target) = instr.target() {
                write!(line, " {}@{target}{}", c.green, c.reset).unwrap();
            }
        }
    }

    line
}
