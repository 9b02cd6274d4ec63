//! Search IR: the tree lowering produces and the transformer rewrites.
//!
//! It mirrors the shape of a search request (queries, filters, bool
//! clauses, nested scopes, aggregations) but still carries only canonical
//! field paths, no wire format. The request builder turns it into JSON.

mod dump;
mod nodes;


pub use nodes::{Aggregation, Bound, Expr, Lookup, RangeOp, Root, ScoreMode};
