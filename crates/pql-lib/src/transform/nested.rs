use pql_core::{TypeModel, is_path_within};

use crate::ir::Expr;

/// Wraps each predicate on a nested field in a `Nested` scope at the
/// field's nested path.
pub(super) fn resolve(expr: Expr, model: &TypeModel) -> Expr {
    resolve_in(expr, None, model)
}

/// `scope` is the path of the closest enclosing `Nested`. Inside it only
/// predicates on a strictly deeper nested path get their own scope.
fn resolve_in(expr: Expr, scope: Option<&str>, model: &TypeModel) -> Expr {
    match expr {
        Expr::Nested {
            path,
            score_mode,
            children,
        } => {
            let children = children
                .into_iter()
                .map(|child| resolve_in(child, Some(&path), model))
                .collect();
            Expr::Nested {
                path,
                score_mode,
                children,
            }
        }
        Expr::FunctionScore { .. } => expr,
        pred if pred.is_predicate() => {
            let path = pred.field().and_then(|field| model.nested_path(field));
            match path {
                Some(path) if is_deeper(&path, scope) => Expr::nested(path, pred),
                _ => pred,
            }
        }
        container => container.map_children(|child| Some(resolve_in(child, scope, model))),
    }
}

fn is_deeper(path: &str, scope: Option<&str>) -> bool {
    match scope {
        None => true,
        Some(scope) => path != scope && is_path_within(path, scope),
    }
}
