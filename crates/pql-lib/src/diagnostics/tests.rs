use rowan::TextRange;

use super::*;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.report(DiagnosticKind::ExpectedValue, range(0, 5)).emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    insta::assert_snapshot!(diagnostics.to_string(), @"error at 0..5: expected a value");
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownFunction, range(0, 3))
        .message("foo")
        .emit();

    insta::assert_snapshot!(diagnostics.to_string(), @"error at 0..3: `foo` is not a known function");
}

#[test]
fn warnings_are_not_errors() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::RepeatedClause, range(0, 4))
        .message("sort")
        .emit();

    assert!(!diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
    assert_eq!(diagnostics.warning_count(), 1);
    assert_eq!(diagnostics.error_count(), 0);
}

#[test]
fn display_includes_related_and_hint() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::IdentifierAsValue, range(6, 9))
        .related_to("in this call", range(0, 2))
        .emit();

    insta::assert_snapshot!(diagnostics.to_string(), @"error at 6..9: identifier is not a value (related: in this call at 0..2) (hint: quote it: `'value'`)");
}

#[test]
fn builder_with_related() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedCall, range(0, 5))
        .message("primary")
        .related_to("related info", range(6, 10))
        .emit();

    let result = diagnostics.printer("hello world!").render();
    insta::assert_snapshot!(result, @r"
    error: missing closing `)`; primary
      |
    1 | hello world!
      | ^^^^^ ---- related info
    ");
}

#[test]
fn printer_zero_width_span() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedClause, TextRange::empty(0.into()))
        .message("zero width error")
        .emit();

    let result = diagnostics.printer("hello").render();
    insta::assert_snapshot!(result, @r"
    error: expected a clause: zero width error
      |
    1 | hello
      | ^
    ");
}

#[test]
fn printer_multiple_diagnostics() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedCall, range(0, 5))
        .message("first error")
        .emit();
    diagnostics
        .report(DiagnosticKind::UnknownFunction, range(6, 10))
        .message("worl")
        .emit();

    let result = diagnostics.printer("hello world!").render();
    insta::assert_snapshot!(result, @r"
    error: missing closing `)`; first error
      |
    1 | hello world!
      | ^^^^^

    error: `worl` is not a known function
      |
    1 | hello world!
      |       ^^^^
    ");
}

#[test]
fn printer_colored() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.report(DiagnosticKind::ExpectedValue, range(0, 5)).message("test").emit();

    let result = diagnostics.printer("hello").colored(true).render();
    assert!(result.contains("test"));
    assert!(result.contains('\x1b'));
}

#[test]
fn printer_empty_diagnostics() {
    let diagnostics = Diagnostics::new();
    assert!(diagnostics.printer("source").render().is_empty());
}

#[test]
fn filtered_drops_unclosed_at_same_position() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.report(DiagnosticKind::UnclosedCall, range(3, 3)).emit();
    diagnostics.report(DiagnosticKind::ExpectedArgument, range(3, 3)).emit();

    let filtered = diagnostics.filtered();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].kind, DiagnosticKind::ExpectedArgument);
}

#[test]
fn filtered_drops_contained_lower_priority() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownFunction, range(4, 7))
        .suppression_range(range(0, 12))
        .emit();
    diagnostics.report(DiagnosticKind::IdentifierAsValue, range(8, 10)).emit();

    let kinds: Vec<_> = diagnostics.filtered().into_iter().map(|m| m.kind).collect();
    assert_eq!(kinds, [DiagnosticKind::UnknownFunction]);
}

#[test]
fn extend_merges() {
    let mut a = Diagnostics::new();
    a.report(DiagnosticKind::ExpectedValue, range(0, 1)).emit();
    let mut b = Diagnostics::new();
    b.report(DiagnosticKind::RepeatedClause, range(2, 3)).emit();

    a.extend(b);

    assert_eq!(a.len(), 2);
    assert_eq!(
        a.kinds().collect::<Vec<_>>(),
        [DiagnosticKind::ExpectedValue, DiagnosticKind::RepeatedClause]
    );
}
