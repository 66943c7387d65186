//! Rendering of [`Diagnostics`] as snippets, compact lines, or raw offsets.

use std::fmt::Write;
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use rowan::TextRange;

use super::line_index::LineIndex;
use super::{DiagnosticMessage, Diagnostics};

/// Configures how diagnostics are shown.
///
/// Without a source only offsets can be printed. With a source the default is
/// an annotated snippet per diagnostic; `compact` switches to one line each.
pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
    compact: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            source: None,
            path: None,
            colored: false,
            compact: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        match self.source {
            None => self.write_offsets(w),
            Some(source) if self.compact => self.write_lines(w, source),
            Some(source) => self.write_snippets(w, source),
        }
    }

    fn write_snippets(&self, w: &mut impl Write, source: &str) -> std::fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };
        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            let report = [self.group(diag, source)];
            write!(w, "{}", renderer.render(&report))?;
        }
        Ok(())
    }

    fn group<'a>(&'a self, diag: &'a DiagnosticMessage, source: &'a str) -> Group<'a> {
        let mut snippet = Snippet::source(source)
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(underline(diag.range, source.len())));
        if let Some(path) = self.path {
            snippet = snippet.path(path);
        }
        for note in &diag.notes {
            snippet = snippet.annotation(
                AnnotationKind::Context
                    .span(underline(note.range, source.len()))
                    .label(&note.label),
            );
        }
        Level::ERROR.primary_title(&diag.message).element(snippet)
    }

    fn write_lines(&self, w: &mut impl Write, source: &str) -> std::fmt::Result {
        let index = LineIndex::new(source);
        for diag in self.diagnostics {
            if let Some(path) = self.path {
                write!(w, "{path}:")?;
            }
            let line = index.line(diag.range.start());
            writeln!(w, "line {line}: error: {}", diag.message)?;
        }
        Ok(())
    }

    fn write_offsets(&self, w: &mut impl Write) -> std::fmt::Result {
        let mut first = true;
        for diag in self.diagnostics {
            if !std::mem::take(&mut first) {
                w.write_char('\n')?;
            }
            write!(w, "{diag}")?;
        }
        Ok(())
    }
}

/// Empty ranges (end of input) still underline one character when there is one.
fn underline(range: TextRange, source_len: usize) -> Range<usize> {
    let start = usize::from(range.start());
    let end = usize::from(range.end()).max((start + 1).min(source_len));
    start..end
}
