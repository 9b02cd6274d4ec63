//! PQL text to a lossless rowan tree.
//!
//! Tokens are spans into the source; text is only copied when a token enters
//! the tree. Whitespace is kept, so the tree prints back to the exact input.
//!
//! Parsing never gives up on bad input. Tokens that fit nowhere end up in
//! `Error` nodes, a missing token is reported without consuming anything, and
//! an unclosed call points back at its `(`. Only running out of fuel (tokens
//! consumed, or call nesting depth) aborts with an [`Error`](crate::Error).

pub mod ast;
pub mod cst;
pub mod lexer;

mod core;
mod grammar;
mod invariants;

#[cfg(test)]
mod cst_tests;
#[cfg(test)]
mod lexer_tests;

use std::fmt::Write;

use rowan::NodeOrToken;

pub use ast::{AllFields, Arg, ArgList, Call, FieldRef, LiteralKind, Root, SortKey, Value};
pub use core::{ParseResult, Parser};
pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};

use lexer::lex;

pub const DEFAULT_EXEC_FUEL: u32 = 1_000_000;
pub const DEFAULT_RECURSION_FUEL: u32 = 512;

/// Parses with the default fuel limits.
pub fn parse(source: &str) -> crate::Result<ParseResult> {
    Parser::new(source, lex(source))
        .with_exec_fuel(Some(DEFAULT_EXEC_FUEL))
        .with_recursion_fuel(Some(DEFAULT_RECURSION_FUEL))
        .parse()
}

/// Indented kind/text dump of a CST, trivia omitted.
pub fn dump_cst(node: &SyntaxNode) -> String {
    let mut out = String::new();
    format_cst(node, 0, &mut out).unwrap();
    out
}

fn format_cst(node: &SyntaxNode, indent: usize, w: &mut impl Write) -> std::fmt::Result {
    let prefix = "  ".repeat(indent);
    writeln!(w, "{}{:?}", prefix, node.kind())?;

    for child in node.children_with_tokens() {
        match child {
            NodeOrToken::Node(n) => format_cst(&n, indent + 1, w)?,
            NodeOrToken::Token(t) if !t.kind().is_trivia() => {
                writeln!(w, "{}  {:?} {:?}", prefix, t.kind(), t.text())?;
            }
            NodeOrToken::Token(_) => {}
        }
    }
    Ok(())
}
