//! Parsed statements.

use gdvm_bytecode::{Instruction, Opcode};
use rowan::TextRange;

/// Parsed source file: statements in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ast {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// Label name, or mnemonic through the last operand token.
    pub span: TextRange,
    pub kind: StatementKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    /// `name:` - marks the offset of whatever follows.
    Label(String),
    /// Fully typed instruction with no label reference.
    Instruction(Instruction),
    /// Jump or call whose target is resolved during encoding.
    Branch {
        opcode: Opcode,
        label: String,
        label_span: TextRange,
    },
}

impl Ast {
    /// Declared label names, in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.statements.iter().filter_map(|s| match &s.kind {
            StatementKind::Label(name) => Some(name.as_str()),
            _ => None,
        })
    }
}
