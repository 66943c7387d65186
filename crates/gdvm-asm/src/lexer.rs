//! Tokens for assembly source.
//!
//! Words are everything between separators, so `push`, `rax`, `-1.5e3` and `loop` all lex the
//! same way and the parser decides what they are. Runs of characters no rule accepts (vertical
//! tabs, non-ASCII spaces) become one `Garbage` token.

use logos::Logos;
use rowan::TextRange;

/// Token kinds. `Garbage` is never produced by Logos directly.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    #[regex(r"[^\s+\[\]:;]+")]
    Word,

    #[token("+")]
    Plus,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token(":")]
    Colon,

    #[token("\n")]
    Newline,

    #[regex(r"[ \t\r\f]+")]
    Whitespace,

    #[regex(r";[^\n]*", allow_greedy = true)]
    Comment,

    Garbage,
}

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Comment)
    }
}

/// Token kind plus span; text is sliced from the source on demand with [`token_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    pub fn new(kind: SyntaxKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    for (result, range) in SyntaxKind::lexer(source).spanned() {
        let span = TextRange::new((range.start as u32).into(), (range.end as u32).into());
        let kind = result.unwrap_or(SyntaxKind::Garbage);
        match tokens.last_mut() {
            Some(prev) if kind == SyntaxKind::Garbage && prev.kind == SyntaxKind::Garbage => {
                prev.span = prev.span.cover(span);
            }
            _ => tokens.push(Token::new(kind, span)),
        }
    }
    tokens
}

pub fn token_text<'src>(source: &'src str, token: &Token) -> &'src str {
    &source[token.span]
}
