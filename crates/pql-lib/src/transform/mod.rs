//! IR transformer: rewrites lowered IR into the shape the search engine needs.
//!
//! Passes run in a fixed order, each consuming the previous one's output:
//!
//! 1. special fields: source fields, entity sets, gene sets, locations
//! 2. nested scopes for predicates on nested fields
//! 3. facets: filtered, nested and missing-value aggregations
//! 4. relevance scoring, then the `not` fix-up
//! 5. cleanup of empty containers and redundant bool wrappers
//!
//! Malformed IR is an internal fault and surfaces as
//! [`Error::CompilerInvariant`](crate::Error::CompilerInvariant) carrying the
//! IR dump.

mod facets;
mod location;
mod nested;
mod optimize;
mod score;
mod special;

#[cfg(test)]
mod nested_tests;
#[cfg(test)]
mod optimize_tests;
#[cfg(test)]
mod score_tests;
#[cfg(test)]
mod special_tests;
#[cfg(test)]
mod transform_tests;

use pql_core::{DocType, TypeModel};

use crate::ir::{Expr, Root};
use crate::{Error, Result};

pub use facets::{MISSING_SUFFIX, TERMS_SIZE};
pub use location::Locus;
pub use optimize::{clean_empty, simplify};
pub use score::{ScoringConfig, nested_only, non_nested_only};

/// What the passes need to know about the target.
#[derive(Debug, Clone, Copy)]
pub struct TransformContext<'a> {
    pub model: &'a TypeModel,
    pub scoring: Option<&'a ScoringConfig>,
}

impl<'a> TransformContext<'a> {
    pub fn new(model: &'a TypeModel) -> Self {
        Self { model, scoring: None }
    }

    pub fn with_scoring(mut self, scoring: Option<&'a ScoringConfig>) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn doc_type(&self) -> DocType {
        self.model.doc_type()
    }
}

pub fn transform(mut root: Root, ctx: TransformContext<'_>) -> Result<Root> {
    let model = ctx.model;

    special::fields_to_source(&mut root, model);
    root = map_filters(root, |expr| special::entity_sets(expr, model))?;
    root = map_filters(root, |expr| special::gene_sets(expr, model))?;
    root = map_filters(root, |expr| location::expand(expr, model))?;
    tracing::debug!(ir = %root.dump(), "expanded special fields");

    root = map_filters(root, |expr| Ok(nested::resolve(expr, model)))?;
    tracing::debug!(ir = %root.dump(), "resolved nested scopes");

    root = facets::resolve(root, model);
    root = facets::add_missing(root);
    root = facets::add_reverse_nested(root, ctx.doc_type());

    if let Some(scoring) = ctx.scoring {
        root = score::score(root, scoring, model)?;
        root = score::fix_not(root, scoring);
        tracing::debug!(ir = %root.dump(), "applied scoring");
    }

    root = optimize::optimize(root);
    tracing::debug!(doc_type = %ctx.doc_type(), ir = %root.dump(), "transformed");
    Ok(root)
}

/// Applies `f` to the query and the post filter.
fn map_filters(mut root: Root, mut f: impl FnMut(Expr) -> Result<Expr>) -> Result<Root> {
    root.query = root.query.map(&mut f).transpose()?;
    root.post_filter = root.post_filter.map(&mut f).transpose()?;
    Ok(root)
}

/// Rewrites every predicate in place, passing the path of the closest
/// enclosing `Nested` scope.
fn map_predicates<F>(expr: Expr, scope: Option<&str>, f: &mut F) -> Result<Expr>
where
    F: FnMut(Expr, Option<&str>) -> Result<Expr>,
{
    if expr.is_predicate() {
        return f(expr, scope);
    }

    match expr {
        Expr::Nested {
            path,
            score_mode,
            children,
        } => {
            let children = children
                .into_iter()
                .map(|child| map_predicates(child, Some(path.as_str()), &mut *f))
                .collect::<Result<_>>()?;
            Ok(Expr::Nested {
                path,
                score_mode,
                children,
            })
        }
        other => other.try_map_children(|child| map_predicates(child, scope, &mut *f).map(Some)),
    }
}

/// Builds the error for malformed IR and logs it with the offending tree.
fn invariant(message: impl Into<String>, ir: &Expr) -> Error {
    let message = message.into();
    let ir = ir.dump();
    tracing::error!(%message, %ir, "compiler invariant violated");
    Error::CompilerInvariant { message, ir }
}
