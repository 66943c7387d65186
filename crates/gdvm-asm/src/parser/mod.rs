//! Line-oriented parser.
//!
//! One statement per line: an optional `label:` (colon directly after the
//! name), then an optional instruction. A line that fails to parse reports
//! one diagnostic and is skipped; parsing continues with the next line.

mod ast;
mod operand;


use gdvm_bytecode::{Instruction, Opcode, Operand};
use rowan::TextRange;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::lexer::{SyntaxKind, Token, lex, token_text};

pub use ast::{Ast, Statement, StatementKind};
pub use operand::{OperandError, Term, classify, parse_operand};

/// Keyword accepted as the operand of `pop` to discard the top of stack.
pub const VOID: &str = "void";

/// Parse a whole source file.
pub fn parse(source: &str) -> (Ast, Diagnostics) {
    let tokens = lex(source);
    let mut parser = Parser {
        source,
        ast: Ast::default(),
        diagnostics: Diagnostics::new(),
    };

    for line in tokens.split(|t| t.kind == SyntaxKind::Newline) {
        let significant: Vec<Token> = line
            .iter()
            .copied()
            .filter(|t| !t.kind.is_trivia())
            .collect();
        parser.line(&significant);
    }

    (parser.ast, parser.diagnostics)
}

struct Parser<'src> {
    source: &'src str,
    ast: Ast,
    diagnostics: Diagnostics,
}

impl<'src> Parser<'src> {
    fn text(&self, token: &Token) -> &'src str {
        token_text(self.source, token)
    }

    fn line(&mut self, tokens: &[Token]) {
        let rest = match tokens {
            [name, colon, rest @ ..]
                if name.kind == SyntaxKind::Word
                    && colon.kind == SyntaxKind::Colon
                    && colon.span.start() == name.span.end() =>
            {
                self.push(name.span, StatementKind::Label(self.text(name).to_string()));
                rest
            }
            _ => tokens,
        };

        let Some((head, operands)) = rest.split_first() else {
            return;
        };

        let mnemonic = self.text(head);
        if head.kind != SyntaxKind::Word {
            self.diagnostics
                .report(DiagnosticKind::UnknownMnemonic, head.span)
                .message(mnemonic)
                .emit();
            return;
        }

        let Some(opcode) = Opcode::from_mnemonic(mnemonic) else {
            self.diagnostics
                .report(DiagnosticKind::UnknownMnemonic, head.span)
                .message(mnemonic)
                .emit();
            return;
        };

        let span = operands.last().map_or(head.span, |t| head.span.cover(t.span));
        let kind = if opcode.has_operand() {
            self.operand_instruction(opcode, head.span, operands)
        } else if opcode.has_target() {
            self.branch(opcode, head.span, operands)
        } else {
            self.plain(opcode, operands)
        };

        if let Some(kind) = kind {
            self.push(span, kind);
        }
    }

    fn operand_instruction(
        &mut self,
        opcode: Opcode,
        anchor: TextRange,
        tokens: &[Token],
    ) -> Option<StatementKind> {
        if let [token] = tokens
            && self.text(token) == VOID
        {
            if opcode == Opcode::Pop {
                return Some(StatementKind::Instruction(Instruction::Pop(Operand::VOID)));
            }
            self.malformed(token.span, "`void` is only valid as the operand of `pop`");
            return None;
        }

        let operand = match parse_operand(self.source, tokens, anchor) {
            Ok(operand) => operand,
            Err(err) => {
                self.diagnostics
                    .report(err.kind, err.span)
                    .message(err.detail)
                    .emit();
                return None;
            }
        };

        if opcode == Opcode::Pop
            && !operand.mem
            && (operand.reg.is_none() || operand.imm.is_some())
        {
            let span = tokens[0].span.cover(tokens[tokens.len() - 1].span);
            self.malformed(span, "`pop` stores into a register, a memory cell or `void`");
            return None;
        }

        Some(StatementKind::Instruction(match opcode {
            Opcode::Push => Instruction::Push(operand),
            _ => Instruction::Pop(operand),
        }))
    }

    fn branch(
        &mut self,
        opcode: Opcode,
        anchor: TextRange,
        tokens: &[Token],
    ) -> Option<StatementKind> {
        match tokens {
            [label] if label.kind == SyntaxKind::Word => Some(StatementKind::Branch {
                opcode,
                label: self.text(label).to_string(),
                label_span: label.span,
            }),
            [] => {
                self.malformed(anchor, format!("`{}` needs a label", opcode.mnemonic()));
                None
            }
            [label, extra, ..] if label.kind == SyntaxKind::Word => {
                let detail = format!("unexpected `{}` after label", self.text(extra));
                self.malformed(extra.span, detail);
                None
            }
            [other, ..] => {
                let detail = format!("expected a label, found `{}`", self.text(other));
                self.malformed(other.span, detail);
                None
            }
        }
    }

    fn plain(&mut self, opcode: Opcode, tokens: &[Token]) -> Option<StatementKind> {
        if let Some(first) = tokens.first() {
            let span = first.span.cover(tokens[tokens.len() - 1].span);
            self.malformed(span, format!("`{}` takes no operand", opcode.mnemonic()));
            return None;
        }
        Instruction::simple(opcode).map(StatementKind::Instruction)
    }

    fn malformed(&mut self, span: TextRange, detail: impl AsRef<str>) {
        self.diagnostics
            .report(DiagnosticKind::MalformedOperand, span)
            .message(detail)
            .emit();
    }

    fn push(&mut self, span: TextRange, kind: StatementKind) {
        self.ast.statements.push(Statement { span, kind });
    }
}
