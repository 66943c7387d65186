use std::fmt;

use rowan::TextRange;

/// Assembler error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // operand grammar
    InvalidDoubleLiteral,
    MalformedOperand,

    UnknownMnemonic,
    UnsupportedInstruction,

    DuplicateLabel,
    UnresolvedLabel,
    LabelOutOfRange,
}

impl DiagnosticKind {
    /// Message for this kind, optionally specialized with a detail string.
    ///
    /// Kinds that talk about a single name quote the detail inline; the rest
    /// append it after a colon.
    pub fn describe(self, detail: Option<&str>) -> String {
        let Some(detail) = detail else {
            return self.summary().to_string();
        };
        match self {
            Self::InvalidDoubleLiteral => format!("`{detail}` is not a valid number"),
            Self::UnknownMnemonic => format!("unknown mnemonic `{detail}`"),
            Self::DuplicateLabel => format!("label `{detail}` is already defined"),
            Self::UnresolvedLabel => format!("label `{detail}` is not defined"),
            Self::LabelOutOfRange => {
                format!("label `{detail}` is past the last offset a 4-byte target can reach")
            }
            Self::MalformedOperand | Self::UnsupportedInstruction => {
                format!("{}: {detail}", self.summary())
            }
        }
    }

    fn summary(self) -> &'static str {
        match self {
            Self::InvalidDoubleLiteral => "invalid numeric literal",
            Self::MalformedOperand => "malformed operand",
            Self::UnknownMnemonic => "unknown mnemonic",
            Self::UnsupportedInstruction => "instruction not supported by the target format",
            Self::DuplicateLabel => "duplicate label",
            Self::UnresolvedLabel => "unresolved label",
            Self::LabelOutOfRange => "label offset out of range",
        }
    }
}

/// Secondary span pointing at something relevant to the error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub(crate) range: TextRange,
    pub(crate) label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// Underlined in rendered output.
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) notes: Vec<Note>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange) -> Self {
        Self {
            kind,
            range,
            message: kind.describe(None),
            notes: Vec::new(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
}

fn write_range(f: &mut fmt::Formatter<'_>, range: TextRange) -> fmt::Result {
    write!(f, "{}..{}", u32::from(range.start()), u32::from(range.end()))
}

/// Offsets only; use the printer for line numbers and snippets.
impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_range(f, self.range)?;
        write!(f, ": error: {}", self.message)?;
        for note in &self.notes {
            write!(f, "; {} at ", note.label)?;
            write_range(f, note.range)?;
        }
        Ok(())
    }
}
