//! Line-tagged assembler errors.
//!
//! Every stage reports into a [`Diagnostics`] sink instead of returning early,
//! so one run surfaces every problem in the file:
//!
//! ```ignore
//! diagnostics
//!     .report(DiagnosticKind::UnresolvedLabel, span)
//!     .message(name)
//!     .emit();
//! ```

mod line_index;
mod message;
mod printer;

#[cfg(test)]
mod tests;

use rowan::TextRange;

pub use line_index::LineIndex;
pub use message::{DiagnosticKind, DiagnosticMessage, Note};
pub use printer::DiagnosticsPrinter;

/// Accumulated assembler errors, in the order they were found.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a diagnostic; nothing is recorded until [`DiagnosticBuilder::emit`].
    pub fn report(&mut self, kind: DiagnosticKind, range: TextRange) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            sink: self,
            pending: DiagnosticMessage::new(kind, range),
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Every diagnostic is an error; any of them fails the assembly.
    pub fn has_errors(&self) -> bool {
        !self.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiagnosticMessage> {
        self.messages.iter()
    }

    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.iter().map(DiagnosticMessage::kind).collect()
    }

    /// Stable: diagnostics on the same position keep their stage order.
    pub fn sort_by_position(&mut self) {
        self.messages.sort_by_key(|m| m.range.start());
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }

    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }

    pub fn render(&self, source: &str) -> String {
        self.printer().source(source).render()
    }

    pub fn render_colored(&self, source: &str, colored: bool) -> String {
        self.printer().source(source).colored(colored).render()
    }

    /// One `line N: error: ...` row per diagnostic.
    pub fn render_compact(&self, source: &str) -> String {
        self.printer().source(source).compact(true).render()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a DiagnosticMessage;
    type IntoIter = std::slice::Iter<'a, DiagnosticMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[must_use = "diagnostic not recorded, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    sink: &'a mut Diagnostics,
    pending: DiagnosticMessage,
}

impl DiagnosticBuilder<'_> {
    /// Specialize the kind's message with `detail` (a name, or an explanation).
    pub fn message(mut self, detail: impl AsRef<str>) -> Self {
        self.pending.message = self.pending.kind.describe(Some(detail.as_ref()));
        self
    }

    pub fn note(mut self, label: impl Into<String>, range: TextRange) -> Self {
        self.pending.notes.push(Note {
            range,
            label: label.into(),
        });
        self
    }

    pub fn emit(self) {
        self.sink.messages.push(self.pending);
    }
}
