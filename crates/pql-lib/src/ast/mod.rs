//! Language AST: the typed form of a PQL statement.
//!
//! [`Statement::parse`] goes from text to AST, [`serialize`] goes back to
//! canonical text. Serializing and parsing again yields an equal statement.

mod builder;
mod nodes;
mod printer;
mod statement;

#[cfg(test)]
mod statement_tests;

pub use builder::build;
pub use nodes::{CompareOp, Filter, Limit, NodeKind, SortOrder, Value};
pub use printer::serialize;
pub use statement::{ALL, Statement};

use crate::parser::lexer::lex;
use crate::parser::{DEFAULT_EXEC_FUEL, DEFAULT_RECURSION_FUEL, ParseResult, Parser};
use crate::{Error, PassResult, Result};

/// Text to statement, with configurable parser limits.
pub struct StatementParser<'s> {
    source: &'s str,
    exec_fuel: Option<u32>,
    recursion_fuel: Option<u32>,
}

impl<'s> StatementParser<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            exec_fuel: Some(DEFAULT_EXEC_FUEL),
            recursion_fuel: Some(DEFAULT_RECURSION_FUEL),
        }
    }

    /// `None` removes the limit.
    pub fn with_exec_fuel(mut self, fuel: Option<u32>) -> Self {
        self.exec_fuel = fuel;
        self
    }

    /// `None` removes the limit.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel = limit;
        self
    }

    /// Parses and builds, returning parser and builder diagnostics together.
    pub fn parse(self) -> PassResult<Statement> {
        let ParseResult {
            root,
            mut diagnostics,
            ..
        } = Parser::new(self.source, lex(self.source))
            .with_exec_fuel(self.exec_fuel)
            .with_recursion_fuel(self.recursion_fuel)
            .parse()?;

        match build(&root) {
            Ok((statement, built)) => {
                diagnostics.extend(built);
                Ok((statement, diagnostics))
            }
            // a broken tree can produce a bogus shape error; the syntax errors come first
            Err(_) if diagnostics.has_errors() => Err(Error::Syntax(diagnostics)),
            Err(e) => Err(e),
        }
    }
}

impl Statement {
    /// Parses text, failing with [`Error::Syntax`] on any error diagnostic.
    pub fn parse(source: &str) -> Result<Statement> {
        let (statement, diagnostics) = StatementParser::new(source).parse()?;
        if diagnostics.has_errors() {
            return Err(Error::Syntax(diagnostics));
        }
        Ok(statement)
    }
}
