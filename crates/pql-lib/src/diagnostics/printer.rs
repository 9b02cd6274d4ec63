//! Source-annotated rendering through annotate-snippets.

use std::fmt::{self, Write};
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use rowan::TextRange;

use super::message::{Diagnostic, Severity};

pub struct DiagnosticsPrinter<'a> {
    items: Vec<Diagnostic>,
    source: &'a str,
    path: Option<&'a str>,
    colored: bool,
}

impl<'a> DiagnosticsPrinter<'a> {
    pub(crate) fn new(items: Vec<Diagnostic>, source: &'a str) -> Self {
        Self {
            items,
            source,
            path: None,
            colored: false,
        }
    }

    /// File name shown in the snippet header.
    pub fn path(mut self, path: &'a str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).unwrap();
        out
    }

    pub fn format(&self, w: &mut impl Write) -> fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let mut sep = "";
        for item in &self.items {
            write!(w, "{sep}{}", renderer.render(&[self.group(item)]))?;
            sep = "\n";
        }
        Ok(())
    }

    fn group<'s>(&'s self, item: &'s Diagnostic) -> Group<'s> {
        let mut primary = AnnotationKind::Primary.span(self.visible(item.range));
        if let Some(hint) = item.hints.first() {
            primary = primary.label(hint);
        }

        let mut snippet = Snippet::source(self.source).line_start(1).annotation(primary);
        if let Some(path) = self.path {
            snippet = snippet.path(path);
        }
        for note in &item.notes {
            snippet = snippet.annotation(
                AnnotationKind::Context
                    .span(self.visible(note.range))
                    .label(&note.label),
            );
        }
        level(item.severity()).primary_title(&item.text).element(snippet)
    }

    /// Byte range to underline. An empty range still gets one caret.
    fn visible(&self, range: TextRange) -> Range<usize> {
        let range: Range<usize> = range.into();
        if range.is_empty() {
            range.start..(range.start + 1).min(self.source.len())
        } else {
            range
        }
    }
}

fn level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}
