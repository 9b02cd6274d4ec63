//! PQL: the Portal Query Language compiler.
//!
//! Text goes through parsing, name resolution against the document type's
//! field model, lowering to a search IR, nested-document and scoring passes,
//! and finally comes out as a ready-to-send search request.
//!
//! # Example
//!
//! ```
//! use pql::QueryEngine;
//! use pql_core::DocType;
//!
//! let engine = QueryEngine::new("icgc");
//! let request = engine
//!     .execute("eq(gender,'male'),select(id),limit(10)", DocType::DonorCentric)
//!     .expect("valid query");
//! println!("{}", request.to_json_pretty());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod ast;
pub mod diagnostics;
pub mod engine;
pub mod filters;
pub mod ir;
pub mod lower;
pub mod parser;
pub mod request;
pub mod transform;

use pql_core::DocType;

/// Result type for passes that produce both output and diagnostics.
///
/// Each pass returns its typed output alongside any diagnostics it collected.
/// Fatal errors (like fuel exhaustion) use the outer `Result`.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

pub use ast::{Filter, Statement};
pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use engine::{EngineBuilder, QueryContext, QueryEngine, QueryInput};
pub use request::Request;
pub use transform::ScoringConfig;

/// Errors that can occur while compiling a query.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("query parsing failed with {} errors", .0.error_count())]
    Syntax(Diagnostics),

    #[error("unknown field `{alias}` for type `{doc_type}`")]
    UnknownField { alias: String, doc_type: DocType },

    #[error("unsupported type `{0}`")]
    UnsupportedType(String),

    #[error("no nesting is known for `{entity}` on `{target}`")]
    UnknownEntity { entity: String, target: String },

    #[error("invalid statement: {0}")]
    StatementShape(&'static str),

    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("invalid type model: {0}")]
    TypeModel(String),

    /// Malformed IR reached a pass. Carries the IR dump.
    #[error("compiler invariant violated: {message}")]
    CompilerInvariant { message: String, ir: String },

    /// Execution fuel exhausted (too many parser operations).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (input nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,
}

impl Error {
    /// Internal faults, as opposed to problems with the caller's input.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::CompilerInvariant { .. } | Self::TypeModel(_))
    }
}

impl From<pql_core::Error> for Error {
    fn from(err: pql_core::Error) -> Self {
        match err {
            pql_core::Error::UnknownField { alias, doc_type } => Self::UnknownField { alias, doc_type },
            pql_core::Error::UnknownDocType(name) => Self::UnsupportedType(name),
            other => Self::TypeModel(other.to_string()),
        }
    }
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;
