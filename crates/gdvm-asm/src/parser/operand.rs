//! Operand grammar.
//!
//! ```text
//! operand := term | term '+' term | '[' (term | term '+' term) ']'
//! term    := register | literal
//! ```
//!
//! A sum holds at most one register and one literal, in either order.
//! Inside brackets the register must be an address register and the literal
//! must be integral.

use gdvm_bytecode::{Operand, Register};
use rowan::TextRange;

use crate::diagnostics::DiagnosticKind;
use crate::lexer::{SyntaxKind, Token, token_text};

/// Operand parse failure, turned into a diagnostic by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperandError {
    pub kind: DiagnosticKind,
    pub span: TextRange,
    pub detail: String,
}

impl OperandError {
    fn malformed(span: TextRange, detail: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::MalformedOperand,
            span,
            detail: detail.into(),
        }
    }
}

/// One side of a sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Term {
    Register(Register),
    Literal(f64),
}

/// Classify a single word as register, literal or neither.
pub fn classify(text: &str, span: TextRange) -> Result<Term, OperandError> {
    if let Some(reg) = Register::from_name(text) {
        return Ok(Term::Register(reg));
    }

    if looks_numeric(text) {
        return match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Term::Literal(value)),
            _ => Err(OperandError {
                kind: DiagnosticKind::InvalidDoubleLiteral,
                span,
                detail: text.to_string(),
            }),
        };
    }

    Err(OperandError::malformed(
        span,
        format!("`{text}` is neither a register nor a number"),
    ))
}

fn looks_numeric(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('-' | '.') => chars.next().is_some_and(|c| c.is_ascii_digit() || c == '.'),
        _ => false,
    }
}

/// Parse the operand tokens that follow a mnemonic (trivia already removed).
///
/// `anchor` is used as the error span when there are no tokens at all.
pub fn parse_operand(
    source: &str,
    tokens: &[Token],
    anchor: TextRange,
) -> Result<Operand, OperandError> {
    let Some(first) = tokens.first() else {
        return Err(OperandError::malformed(anchor, "missing operand"));
    };

    if first.kind != SyntaxKind::BracketOpen {
        return parse_sum(source, tokens, anchor);
    }

    let Some(close) = tokens.iter().position(|t| t.kind == SyntaxKind::BracketClose) else {
        let last = tokens.last().map_or(first.span, |t| t.span);
        return Err(OperandError::malformed(
            first.span.cover(last),
            "missing closing `]`",
        ));
    };

    if let Some(extra) = tokens.get(close + 1) {
        return Err(unexpected(source, extra));
    }

    let inner = &tokens[1..close];
    if inner.is_empty() {
        return Err(OperandError::malformed(
            first.span.cover(tokens[close].span),
            "empty memory reference",
        ));
    }

    let operand = parse_sum(source, inner, first.span)?;
    if let Some(reg) = operand.reg
        && !reg.is_address()
    {
        let span = inner
            .iter()
            .find(|t| token_text(source, t) == reg.name())
            .map_or(first.span, |t| t.span);
        return Err(OperandError::malformed(
            span,
            format!("`{reg}` cannot index memory, use rax..rdx"),
        ));
    }
    if let Some(imm) = operand.imm
        && imm.fract() != 0.0
    {
        return Err(OperandError::malformed(
            first.span.cover(tokens[close].span),
            "memory offset must be an integer",
        ));
    }

    Ok(operand.memory())
}

/// `term` or `term + term`.
fn parse_sum(source: &str, tokens: &[Token], anchor: TextRange) -> Result<Operand, OperandError> {
    let (lhs, rest) = parse_term(source, tokens, anchor)?;

    let Some((plus, rest)) = rest.split_first() else {
        return Ok(term_operand(lhs, None));
    };
    if plus.kind != SyntaxKind::Plus {
        return Err(unexpected(source, plus));
    }

    if rest.is_empty() {
        return Err(OperandError::malformed(
            plus.span,
            "expected a register or number after `+`",
        ));
    }
    let (rhs, rest) = parse_term(source, rest, plus.span)?;

    if let Some(extra) = rest.first() {
        return Err(match extra.kind {
            SyntaxKind::Plus => OperandError::malformed(
                extra.span,
                "an operand holds at most one register and one number",
            ),
            _ => unexpected(source, extra),
        });
    }

    let span = tokens[0].span.cover(tokens[2].span);
    match (lhs, rhs) {
        (Term::Register(_), Term::Register(_)) => Err(OperandError::malformed(
            span,
            "cannot add two registers",
        )),
        (Term::Literal(_), Term::Literal(_)) => Err(OperandError::malformed(
            span,
            "cannot add two numbers",
        )),
        (lhs, rhs) => Ok(term_operand(lhs, Some(rhs))),
    }
}

fn parse_term<'t>(
    source: &str,
    tokens: &'t [Token],
    anchor: TextRange,
) -> Result<(Term, &'t [Token]), OperandError> {
    let Some((token, rest)) = tokens.split_first() else {
        return Err(OperandError::malformed(anchor, "missing operand"));
    };
    if token.kind != SyntaxKind::Word {
        return Err(unexpected(source, token));
    }
    let term = classify(token_text(source, token), token.span)?;
    Ok((term, rest))
}

fn term_operand(a: Term, b: Option<Term>) -> Operand {
    let mut operand = Operand::VOID;
    for term in std::iter::once(a).chain(b) {
        match term {
            Term::Register(reg) => operand.reg = Some(reg),
            Term::Literal(value) => operand.imm = Some(value),
        }
    }
    operand
}

fn unexpected(source: &str, token: &Token) -> OperandError {
    let text = match token.kind {
        SyntaxKind::Newline => "end of line",
        _ => token_text(source, token),
    };
    OperandError::malformed(token.span, format!("unexpected `{text}`"))
}
