//! Cross-type filter rewriting.
//!
//! The portal UI describes filters per entity, e.g.
//! `{"donor": {"gender": {"is": ["male"]}}}`. The same filter has to be
//! expressed differently depending on the document type it runs against:
//! donor fields live at the top of a donor-centric document but under the
//! nested `donor` scope of a gene-centric one.
//!
//! [`rewrite`] turns such an object into a Language AST [`Filter`](crate::ast::Filter)
//! that the rest of the pipeline can compile for the target type.

mod nesting;
mod rewriter;

#[cfg(test)]
mod rewriter_tests;

pub use nesting::{Entity, nesting_path};
pub use rewriter::{ENTITY_SET_PREFIX, MISSING, rewrite, rewrite_str};
