//! Grammar productions for PQL.
//!
//! The grammar is deliberately generic: a statement is a comma-separated list
//! of calls, and a call's arguments are calls, literals, field references,
//! sort keys or `*`. Which function takes which arguments is checked when the
//! tree is turned into a statement.

use super::core::Parser;
use super::cst::SyntaxKind;
use super::cst::token_sets::{ARG_FIRST, ARG_RECOVERY, ROOT_RECOVERY};
use crate::diagnostics::DiagnosticKind;

impl Parser<'_> {
    pub fn parse_root(&mut self) {
        self.start_node(SyntaxKind::Root);

        while !self.should_stop() {
            match self.current() {
                SyntaxKind::Id => self.parse_call(),
                SyntaxKind::Comma => {
                    self.error_and_bump(DiagnosticKind::ExpectedClause);
                    continue;
                }
                _ => {
                    self.error_recover(
                        DiagnosticKind::ExpectedClause,
                        "e.g., `eq(field,'value')`",
                        ROOT_RECOVERY,
                    );
                    continue;
                }
            }

            if self.should_stop() {
                break;
            }
            match self.current() {
                SyntaxKind::Comma => {
                    self.bump();
                    if self.should_stop() {
                        self.error_msg(DiagnosticKind::ExpectedClause, "after `,`");
                    }
                }
                SyntaxKind::Id => self.error(DiagnosticKind::MissingSeparator),
                // the next iteration reports it
                _ => {}
            }
        }

        self.eat_trivia();
        self.finish_node();
    }

    /// `name(args...)`
    fn parse_call(&mut self) {
        self.assert_current(SyntaxKind::Id);

        if !self.enter_call() {
            self.start_node(SyntaxKind::Error);
            while !self.should_stop() {
                self.bump();
            }
            self.finish_node();
            return;
        }

        self.start_node(SyntaxKind::Call);
        let name = self.current_text();
        self.bump();

        if self.at(SyntaxKind::ParenOpen) {
            self.parse_arg_list(name);
        } else {
            self.error_msg(DiagnosticKind::ExpectedArgList, format!("after `{name}`"));
        }

        self.finish_node();
        self.exit_call();
    }

    fn parse_arg_list(&mut self, name: &str) {
        self.start_node(SyntaxKind::ArgList);
        self.open_paren();
        self.bump();

        while !self.should_stop() && !self.at(SyntaxKind::ParenClose) {
            self.parse_arg();

            match self.current() {
                SyntaxKind::Comma => {
                    self.bump();
                    if self.at(SyntaxKind::ParenClose) {
                        self.error_msg(DiagnosticKind::ExpectedArgument, "after `,`");
                    }
                }
                SyntaxKind::ParenClose => break,
                kind if ARG_FIRST.contains(kind) => self.error(DiagnosticKind::MissingSeparator),
                _ if self.should_stop() => break,
                _ => self.error_and_bump(DiagnosticKind::UnexpectedToken),
            }
        }

        let open = self.close_paren();
        if !self.eat(SyntaxKind::ParenClose)
            && let Some(open) = open
        {
            self.error_unclosed(DiagnosticKind::UnclosedCall, format!("`{name}` is not closed"), open);
        }

        self.finish_node();
    }

    fn parse_arg(&mut self) {
        match self.current() {
            SyntaxKind::Id if self.nth(1) == SyntaxKind::ParenOpen => self.parse_call(),
            SyntaxKind::Id => self.parse_leaf(SyntaxKind::FieldRef),
            SyntaxKind::Star => self.parse_leaf(SyntaxKind::AllFields),
            SyntaxKind::Int | SyntaxKind::Float => self.parse_leaf(SyntaxKind::Value),
            SyntaxKind::SingleQuote | SyntaxKind::DoubleQuote => self.parse_string(),
            SyntaxKind::Plus | SyntaxKind::Minus => self.parse_sort_key(),
            SyntaxKind::Comma => self.error(DiagnosticKind::ExpectedArgument),
            _ => self.error_recover(DiagnosticKind::UnexpectedToken, "not a valid argument", ARG_RECOVERY),
        }
    }

    fn parse_leaf(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.finish_node();
    }

    /// Quote, optional content, quote. The lexer only produces complete literals.
    fn parse_string(&mut self) {
        self.start_node(SyntaxKind::Value);
        let quote = self.current();
        self.bump();
        self.eat(SyntaxKind::StrVal);
        self.eat(quote);
        self.finish_node();
    }

    /// `+field` | `-field`
    fn parse_sort_key(&mut self) {
        self.start_node(SyntaxKind::SortKey);
        self.bump();
        if !self.eat(SyntaxKind::Id) {
            self.error_msg(DiagnosticKind::ExpectedFieldName, "after sort direction");
        }
        self.finish_node();
    }
}
