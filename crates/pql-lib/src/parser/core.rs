//! Parser state: token cursor, tree builder, error reporting and limits.

use std::cell::Cell;

use rowan::{GreenNodeBuilder, TextRange, TextSize};

use super::ast::Root;
use super::cst::{SyntaxKind, SyntaxNode, TokenSet};
use super::invariants::{STALL_LIMIT, ensure_root};
use super::lexer::{Token, token_text};
use crate::Error;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

#[derive(Debug)]
pub struct ParseResult {
    pub root: Root,
    pub diagnostics: Diagnostics,
    /// Tokens consumed, when exec fuel is limited.
    pub exec_fuel_consumed: u32,
}

/// Optional budget that counts down.
#[derive(Debug, Clone, Copy, Default)]
struct Fuel {
    limit: Option<u32>,
    spent: u32,
}

impl Fuel {
    fn new(limit: Option<u32>) -> Self {
        Self { limit, spent: 0 }
    }

    /// False once the budget is gone.
    fn spend(&mut self) -> bool {
        match self.limit {
            Some(limit) if self.spent >= limit => false,
            _ => {
                self.spent += 1;
                true
            }
        }
    }
}

/// Recursive-descent parser over a token vector, building a rowan green tree.
///
/// Whitespace is held back and attached in front of the next node or token,
/// so nodes never start with trivia.
pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    pending_trivia: usize,
    builder: GreenNodeBuilder<'static>,
    diagnostics: Diagnostics,
    /// Spans of the `(` of every call being parsed, innermost last.
    open_parens: Vec<TextRange>,
    last_error_at: Option<TextSize>,
    exec_fuel: Fuel,
    depth: u32,
    max_depth: Option<u32>,
    fatal: Option<Error>,
    pub(super) stall: Cell<u32>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            pending_trivia: 0,
            builder: GreenNodeBuilder::new(),
            diagnostics: Diagnostics::new(),
            open_parens: Vec::new(),
            last_error_at: None,
            exec_fuel: Fuel::default(),
            depth: 0,
            max_depth: None,
            fatal: None,
            stall: Cell::new(STALL_LIMIT),
        }
    }

    /// Limits the number of consumed tokens. `None` removes the limit.
    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel = Fuel::new(limit);
        self
    }

    /// Limits how deeply calls nest. `None` removes the limit.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.max_depth = limit;
        self
    }

    pub fn parse(mut self) -> Result<ParseResult, Error> {
        self.parse_root();
        if let Some(err) = self.fatal {
            return Err(err);
        }

        let exec_fuel_consumed = if self.exec_fuel.limit.is_some() {
            self.exec_fuel.spent
        } else {
            0
        };
        Ok(ParseResult {
            root: ensure_root(SyntaxNode::new_root(self.builder.finish())),
            diagnostics: self.diagnostics,
            exec_fuel_consumed,
        })
    }

    fn fail(&mut self, err: Error) {
        self.fatal.get_or_insert(err);
    }

    // --- cursor ---

    /// Index of the first non-trivia token at or after the cursor.
    fn significant(&mut self) -> usize {
        while let Some(token) = self.tokens.get(self.pos + self.pending_trivia)
            && token.kind.is_trivia()
        {
            self.pending_trivia += 1;
        }
        self.pos + self.pending_trivia
    }

    pub(super) fn current(&mut self) -> SyntaxKind {
        self.nth(0)
    }

    /// Kind of the `n`th significant token ahead, `Error` past the end.
    pub(super) fn nth(&mut self, n: usize) -> SyntaxKind {
        self.check_progress();
        let start = self.significant();
        self.tokens[start..]
            .iter()
            .map(|t| t.kind)
            .filter(|kind| !kind.is_trivia())
            .nth(n)
            .unwrap_or(SyntaxKind::Error)
    }

    pub(super) fn current_text(&mut self) -> &'src str {
        let at = self.significant();
        self.tokens.get(at).map_or("", |t| token_text(self.source, t))
    }

    fn current_span(&mut self) -> TextRange {
        let at = self.significant();
        self.tokens
            .get(at)
            .map_or_else(|| TextRange::empty(self.eof_offset()), |t| t.span)
    }

    fn eof_offset(&self) -> TextSize {
        TextSize::of(self.source)
    }

    pub(super) fn at_eof(&mut self) -> bool {
        self.significant() >= self.tokens.len()
    }

    /// End of input, or a limit was hit.
    pub(super) fn should_stop(&mut self) -> bool {
        self.at_eof() || self.fatal.is_some()
    }

    pub(super) fn at(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(super) fn at_any(&mut self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    // --- tree building ---

    /// Emits the trivia already looked past.
    fn flush_trivia(&mut self) {
        for _ in 0..self.pending_trivia {
            let token = self.tokens[self.pos];
            self.builder.token(token.kind.into(), token_text(self.source, &token));
            self.pos += 1;
        }
        self.pending_trivia = 0;
    }

    pub(super) fn eat_trivia(&mut self) {
        self.significant();
        self.flush_trivia();
    }

    pub(super) fn start_node(&mut self, kind: SyntaxKind) {
        self.flush_trivia();
        self.builder.start_node(kind.into());
    }

    pub(super) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    /// Moves the current token into the tree.
    pub(super) fn bump(&mut self) {
        self.eat_trivia();
        self.assert_not_eof();
        self.stall.set(STALL_LIMIT);
        if !self.exec_fuel.spend() {
            self.fail(Error::ExecFuelExhausted);
        }

        let token = self.tokens[self.pos];
        self.builder.token(token.kind.into(), token_text(self.source, &token));
        self.pos += 1;
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> bool {
        let matched = self.at(kind);
        if matched {
            self.bump();
        }
        matched
    }

    /// Wraps the current token in an `Error` node.
    fn bump_as_error(&mut self) {
        if !self.at_eof() {
            self.start_node(SyntaxKind::Error);
            self.bump();
            self.finish_node();
        }
    }

    // --- nesting ---

    pub(super) fn enter_call(&mut self) -> bool {
        if self.max_depth.is_some_and(|max| self.depth >= max) {
            self.fail(Error::RecursionLimitExceeded);
            return false;
        }
        self.depth += 1;
        self.stall.set(STALL_LIMIT);
        true
    }

    pub(super) fn exit_call(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.stall.set(STALL_LIMIT);
    }

    /// Records the `(` under the cursor as the innermost open paren.
    pub(super) fn open_paren(&mut self) {
        let span = self.current_span();
        self.open_parens.push(span);
    }

    pub(super) fn close_paren(&mut self) -> Option<TextRange> {
        self.open_parens.pop()
    }

    // --- diagnostics ---

    /// Span of the current token, unless an error was already reported there.
    fn error_span(&mut self) -> Option<TextRange> {
        let span = self.current_span();
        if self.last_error_at == Some(span.start()) {
            return None;
        }
        self.last_error_at = Some(span.start());
        Some(span)
    }

    /// Follow-up errors inside the innermost open call are suppressed.
    fn suppression_span(&mut self) -> TextRange {
        match self.open_parens.last() {
            Some(open) => TextRange::new(open.start(), self.eof_offset()),
            None => self.current_span(),
        }
    }

    fn report(&mut self, kind: DiagnosticKind, message: Option<String>) {
        let Some(span) = self.error_span() else {
            return;
        };
        let suppression = self.suppression_span();
        let builder = self.diagnostics.report(kind, span).suppression_range(suppression);
        match message {
            Some(message) => builder.message(message).emit(),
            None => builder.emit(),
        }
    }

    pub(super) fn error(&mut self, kind: DiagnosticKind) {
        self.report(kind, None);
    }

    pub(super) fn error_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.report(kind, Some(message.into()));
    }

    pub(super) fn error_and_bump(&mut self, kind: DiagnosticKind) {
        self.error(kind);
        self.bump_as_error();
    }

    /// Reports, then swallows tokens into one `Error` node up to the recovery set.
    pub(super) fn error_recover(&mut self, kind: DiagnosticKind, message: &str, recovery: TokenSet) {
        if self.at_any(recovery) || self.should_stop() {
            self.error_msg(kind, message);
            return;
        }

        self.start_node(SyntaxKind::Error);
        self.error_msg(kind, message);
        while !self.at_any(recovery) && !self.should_stop() {
            self.bump();
        }
        self.finish_node();
    }

    /// Spans from the opening paren to the current token.
    pub(super) fn error_unclosed(&mut self, kind: DiagnosticKind, message: String, open: TextRange) {
        let Some(here) = self.error_span() else {
            return;
        };
        self.diagnostics
            .report(kind, TextRange::new(open.start(), here.end()))
            .message(message)
            .related_to("opened here", open)
            .emit();
    }
}
