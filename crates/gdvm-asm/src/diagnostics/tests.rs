use rowan::{TextRange, TextSize};

use super::*;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::MalformedOperand, range(0, 5))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    let msg = diagnostics.iter().next().unwrap();
    assert_eq!(msg.message(), "malformed operand");
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownMnemonic, range(0, 4))
        .message("pusj")
        .emit();
    diagnostics
        .report(DiagnosticKind::MalformedOperand, range(5, 6))
        .message("missing closing `]`")
        .emit();

    let messages: Vec<&str> = diagnostics.iter().map(|m| m.message()).collect();
    assert_eq!(
        messages,
        ["unknown mnemonic `pusj`", "malformed operand: missing closing `]`"]
    );
    assert_eq!(diagnostics.error_count(), 2);
}

#[test]
fn kind_templates() {
    assert_eq!(
        DiagnosticKind::InvalidDoubleLiteral.describe(Some("1.2.3")),
        "`1.2.3` is not a valid number"
    );
    assert_eq!(
        DiagnosticKind::DuplicateLabel.describe(Some("loop")),
        "label `loop` is already defined"
    );
    assert_eq!(
        DiagnosticKind::UnresolvedLabel.describe(Some("end")),
        "label `end` is not defined"
    );
    assert_eq!(
        DiagnosticKind::UnsupportedInstruction.describe(None),
        "instruction not supported by the target format"
    );
    assert_eq!(
        DiagnosticKind::MalformedOperand.describe(Some("trailing `+`")),
        "malformed operand: trailing `+`"
    );
}

#[test]
fn empty_diagnostics_render_nothing() {
    let diagnostics = Diagnostics::new();
    assert!(diagnostics.render("source").is_empty());
    assert!(diagnostics.render_compact("source").is_empty());
}

#[test]
fn printer_snippet() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownMnemonic, range(0, 3))
        .message("foo")
        .emit();

    insta::assert_snapshot!(diagnostics.render("foo 1"), @r"
    error: unknown mnemonic `foo`
      |
    1 | foo 1
      | ^^^
    ");
}

#[test]
fn printer_with_path() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnresolvedLabel, range(4, 8))
        .message("done")
        .emit();

    let result = diagnostics.printer().source("jmp done").path("prog.gd").render();
    insta::assert_snapshot!(result, @r"
    error: label `done` is not defined
     --> prog.gd:1:5
      |
    1 | jmp done
      |     ^^^^
    ");
}

#[test]
fn printer_colored() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::MalformedOperand, range(0, 4))
        .message("test")
        .emit();

    let result = diagnostics.render_colored("push", true);
    assert!(result.contains("test"));
    assert!(result.contains('\x1b'));
}

#[test]
fn compact_render_tags_lines() {
    let source = "push 1\nfoo\n\npush [rax\n";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownMnemonic, range(7, 10))
        .message("foo")
        .emit();
    diagnostics
        .report(DiagnosticKind::MalformedOperand, range(17, 21))
        .message("missing closing `]`")
        .emit();

    insta::assert_snapshot!(diagnostics.render_compact(source), @r"
    line 2: error: unknown mnemonic `foo`
    line 4: error: malformed operand: missing closing `]`
    ");
}

#[test]
fn compact_render_with_path() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownMnemonic, range(0, 1))
        .emit();

    let result = diagnostics
        .printer()
        .source("x")
        .path("a.gd")
        .compact(true)
        .render();
    assert_eq!(result, "a.gd:line 1: error: unknown mnemonic\n");
}

#[test]
fn plain_display_without_source() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::DuplicateLabel, range(10, 14))
        .message("loop")
        .note("first defined here", range(0, 4))
        .emit();

    let first = diagnostics.iter().next().unwrap();
    assert_eq!(first.notes().len(), 1);
    insta::assert_snapshot!(
        diagnostics.printer().render(),
        @"10..14: error: label `loop` is already defined; first defined here at 0..4"
    );
}

#[test]
fn sort_by_position() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnresolvedLabel, range(20, 22))
        .emit();
    diagnostics
        .report(DiagnosticKind::DuplicateLabel, range(3, 5))
        .emit();

    diagnostics.sort_by_position();
    assert_eq!(
        diagnostics.kinds(),
        [DiagnosticKind::DuplicateLabel, DiagnosticKind::UnresolvedLabel]
    );
}

#[test]
fn line_index() {
    let index = LineIndex::new("a\nbc\n\nd");
    assert_eq!(index.line_count(), 4);
    assert_eq!(index.line(TextSize::from(0)), 1);
    assert_eq!(index.line(TextSize::from(1)), 1);
    assert_eq!(index.line(TextSize::from(2)), 2);
    assert_eq!(index.line(TextSize::from(5)), 3);
    assert_eq!(index.line(TextSize::from(6)), 4);
}
