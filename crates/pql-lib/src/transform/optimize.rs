use crate::ir::{Aggregation, Expr, Root};

pub(super) fn optimize(mut root: Root) -> Root {
    root.query = root.query.and_then(clean_empty).map(simplify);
    root.post_filter = root.post_filter.and_then(clean_empty).map(simplify);
    root.aggregations = std::mem::take(&mut root.aggregations)
        .into_iter()
        .flat_map(optimize_aggregation)
        .collect();
    root
}

/// Removes containers left without children, bottom-up.
///
/// A childless function score is meaningful (it scores every child
/// document) and stays.
pub fn clean_empty(expr: Expr) -> Option<Expr> {
    if expr.is_predicate() {
        return Some(expr);
    }
    let keep_empty = matches!(expr, Expr::FunctionScore { .. });
    let expr = expr.map_children(clean_empty);
    (keep_empty || !expr.children().is_empty()).then_some(expr)
}

/// Collapses a bool with one clause holding one child into that child.
pub fn simplify(expr: Expr) -> Expr {
    match expr.map_children(|child| Some(simplify(child))) {
        Expr::Bool(clauses) => match <[Expr; 1]>::try_from(clauses) {
            Ok([Expr::Must(mut only) | Expr::Should(mut only)]) if only.len() == 1 => only.remove(0),
            Ok([clause]) => Expr::Bool(vec![clause]),
            Err(clauses) => Expr::Bool(clauses),
        },
        other => other,
    }
}

/// A filter aggregation whose filter cleaned away is replaced by its children.
fn optimize_aggregation(aggregation: Aggregation) -> Vec<Aggregation> {
    match aggregation {
        Aggregation::Filter {
            name,
            filter,
            children,
        } => {
            let children: Vec<Aggregation> = children.into_iter().flat_map(optimize_aggregation).collect();
            match clean_empty(filter) {
                Some(filter) => vec![Aggregation::Filter {
                    name,
                    filter: simplify(filter),
                    children,
                }],
                None => children,
            }
        }
        mut other => {
            if let Some(children) = other.children_mut() {
                *children = std::mem::take(children)
                    .into_iter()
                    .flat_map(optimize_aggregation)
                    .collect();
            }
            vec![other]
        }
    }
}
