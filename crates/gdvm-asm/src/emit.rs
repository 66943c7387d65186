//! Encoding passes.
//!
//! `collect_labels` walks the statements once, summing instruction sizes to
//! find every label's offset. `encode` then emits the body against that
//! finished table. Instruction sizes never depend on label values, so the
//! first pass needs no placeholders.
//!
//! Offsets are counted in `u64`; a label that lands past `u32::MAX` cannot be
//! a branch target and is reported instead of declared.

use gdvm_bytecode::{Instruction, Opcode, Version};
use rowan::TextRange;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::labels::LabelTable;
use crate::parser::{Ast, Statement, StatementKind};

/// First pass: offsets of all labels.
pub fn collect_labels(ast: &Ast, version: Version) -> (LabelTable, Diagnostics) {
    let mut labels = LabelTable::new();
    let mut diagnostics = Diagnostics::new();
    let mut offset = 0u64;

    for stmt in &ast.statements {
        match &stmt.kind {
            StatementKind::Label(name) => {
                declare(&mut labels, &mut diagnostics, name, offset, stmt.span);
            }
            kind => offset += statement_size(kind, version),
        }
    }

    (labels, diagnostics)
}

/// Second pass: emit the body, resolving every branch against `labels`.
pub fn encode(ast: &Ast, labels: &LabelTable, version: Version) -> (Vec<u8>, Diagnostics) {
    let mut encoder = Encoder::new(version);

    for stmt in &ast.statements {
        encoder.statement(stmt, labels);
    }

    (encoder.out, encoder.diagnostics)
}

/// Declare and resolve in one walk.
///
/// Only labels declared above a branch are visible to it, so any forward
/// reference is reported as unresolved. Produces the same bytes as the
/// two-pass pipeline whenever it succeeds.
pub fn assemble_single_pass(ast: &Ast, version: Version) -> (LabelTable, Vec<u8>, Diagnostics) {
    let mut labels = LabelTable::new();
    let mut encoder = Encoder::new(version);

    for stmt in &ast.statements {
        if let StatementKind::Label(name) = &stmt.kind {
            let offset = encoder.out.len() as u64;
            declare(&mut labels, &mut encoder.diagnostics, name, offset, stmt.span);
            continue;
        }
        encoder.statement(stmt, &labels);
    }

    (labels, encoder.out, encoder.diagnostics)
}

pub(crate) fn declare(
    labels: &mut LabelTable,
    diagnostics: &mut Diagnostics,
    name: &str,
    offset: u64,
    span: TextRange,
) {
    let Ok(offset) = u32::try_from(offset) else {
        diagnostics
            .report(DiagnosticKind::LabelOutOfRange, span)
            .message(name)
            .emit();
        return;
    };
    if let Err(dup) = labels.declare(name, offset, span) {
        diagnostics
            .report(DiagnosticKind::DuplicateLabel, span)
            .message(name)
            .note("first defined here", dup.first.span)
            .emit();
    }
}

fn statement_size(kind: &StatementKind, version: Version) -> u64 {
    let size = match kind {
        StatementKind::Label(_) => 0,
        StatementKind::Instruction(instr) => instr.size(version),
        StatementKind::Branch { opcode, .. } => branch(*opcode, 0).size(version),
    };
    size as u64
}

fn branch(opcode: Opcode, target: u32) -> Instruction {
    Instruction::branch(opcode, target).unwrap_or(Instruction::Jmp(target))
}

struct Encoder {
    version: Version,
    out: Vec<u8>,
    diagnostics: Diagnostics,
}

impl Encoder {
    fn new(version: Version) -> Self {
        Self {
            version,
            out: Vec::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    fn statement(&mut self, stmt: &Statement, labels: &LabelTable) {
        match &stmt.kind {
            StatementKind::Label(_) => {}
            StatementKind::Instruction(instr) => self.instruction(*instr, stmt.span),
            StatementKind::Branch {
                opcode,
                label,
                label_span,
            } => {
                let target = labels.resolve(label);
                if target.is_none() {
                    self.diagnostics
                        .report(DiagnosticKind::UnresolvedLabel, *label_span)
                        .message(label)
                        .emit();
                }
                self.instruction(branch(*opcode, target.unwrap_or(0)), stmt.span);
            }
        }
    }

    fn instruction(&mut self, instr: Instruction, span: TextRange) {
        if !instr.is_supported(self.version) {
            let shown = match instr.target() {
                Some(_) => instr.opcode().mnemonic().to_string(),
                None => instr.to_string(),
            };
            let detail = format!("`{shown}` needs format version 2");
            self.diagnostics
                .report(DiagnosticKind::UnsupportedInstruction, span)
                .message(detail)
                .emit();
            // keep offsets aligned with collect_labels
            self.out.resize(self.out.len() + instr.size(self.version), 0);
            return;
        }
        instr.encode(self.version, &mut self.out);
    }
}
