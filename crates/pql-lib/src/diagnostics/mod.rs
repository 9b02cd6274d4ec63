//! Syntax diagnostics collected while parsing and building a statement.
//!
//! Diagnostics are accumulated, never thrown: a single pass reports as many
//! problems as it can, and cascades are filtered out when rendering.

mod message;
mod printer;

#[cfg(test)]
mod tests;

use std::fmt;

use rowan::TextRange;

pub use message::{DiagnosticKind, Note, Severity};
pub use printer::DiagnosticsPrinter;

use message::Diagnostic;

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

/// A diagnostic being assembled. Nothing is recorded until [`emit`](Self::emit).
#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    sink: &'a mut Diagnostics,
    diagnostic: Diagnostic,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a diagnostic carrying the kind's summary as its message.
    pub fn report(&mut self, kind: DiagnosticKind, range: TextRange) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            sink: self,
            diagnostic: Diagnostic::new(kind, range),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    fn count(&self, severity: Severity) -> usize {
        self.items.iter().filter(|d| d.severity() == severity).count()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    /// Kinds in report order.
    pub fn kinds(&self) -> impl Iterator<Item = DiagnosticKind> + '_ {
        self.items.iter().map(|d| d.kind)
    }

    /// Diagnostics minus the ones caused by another.
    ///
    /// `b` is dropped for `a` when `b` starts strictly inside `a`'s shadow
    /// and `a` outranks it, or when both start at the same offset and `a`
    /// outranks it. At the same offset a missing-token error beats an
    /// unclosed call regardless of rank.
    pub(crate) fn filtered(&self) -> Vec<Diagnostic> {
        let n = self.items.len();
        let mut dropped = vec![false; n];

        for i in 0..n {
            for j in 0..n {
                if i == j || dropped[i] || dropped[j] {
                    continue;
                }
                let (a, b) = (&self.items[i], &self.items[j]);
                dropped[j] = if shadows(a.shadow, b.range) && a.kind.outranks(b.kind) {
                    true
                } else if a.range.start() != b.range.start() {
                    false
                } else if a.kind.is_missing() && b.kind.is_unclosed() {
                    true
                } else if a.kind.is_unclosed() && b.kind.is_missing() {
                    false
                } else {
                    a.kind.outranks(b.kind)
                };
            }
        }

        self.items
            .iter()
            .zip(dropped)
            .filter_map(|(d, dropped)| (!dropped).then(|| d.clone()))
            .collect()
    }

    pub fn printer<'a>(&self, source: &'a str) -> DiagnosticsPrinter<'a> {
        DiagnosticsPrinter::new(self.items.clone(), source)
    }

    /// Printer over [`filtered`](Self::filtered) diagnostics.
    pub fn filtered_printer<'a>(&self, source: &'a str) -> DiagnosticsPrinter<'a> {
        DiagnosticsPrinter::new(self.filtered(), source)
    }

    pub fn render(&self, source: &str) -> String {
        self.printer(source).render()
    }

    pub fn render_filtered(&self, source: &str) -> String {
        self.filtered_printer(source).render()
    }

    pub fn render_filtered_colored(&self, source: &str, colored: bool) -> String {
        self.filtered_printer(source).colored(colored).render()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        for item in &self.items {
            write!(f, "{sep}{item}")?;
            sep = "\n";
        }
        Ok(())
    }
}

impl DiagnosticBuilder<'_> {
    /// Replaces the summary with one that includes `detail`.
    pub fn message(mut self, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        self.diagnostic.text = self.diagnostic.kind.describe(Some(&detail));
        self
    }

    pub fn related_to(mut self, label: impl Into<String>, range: TextRange) -> Self {
        self.diagnostic.notes.push(Note {
            range,
            label: label.into(),
        });
        self
    }

    /// Adds a hint ahead of the kind's own.
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.diagnostic.hints.insert(0, hint.into());
        self
    }

    pub(crate) fn suppression_range(mut self, range: TextRange) -> Self {
        self.diagnostic.shadow = range;
        self
    }

    pub fn emit(self) {
        self.sink.items.push(self.diagnostic);
    }
}

fn shadows(shadow: TextRange, range: TextRange) -> bool {
    shadow.start() < range.start() && range.end() <= shadow.end()
}
