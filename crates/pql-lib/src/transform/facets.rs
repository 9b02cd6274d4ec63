//! Facet aggregations.
//!
//! A facet counts documents per value of one field under the query's
//! filters, except the filters on that field itself, so the UI can show the
//! counts for the alternatives the user didn't pick. Facets on nested fields
//! run inside nested aggregations, applying the filters that belong to each
//! nesting level on the way down.

use pql_core::{DocType, TypeModel, is_path_within};

use super::optimize::clean_empty;
use crate::ir::{Aggregation, Expr, Root};

/// Name suffix of the aggregation counting documents without the field.
pub const MISSING_SUFFIX: &str = "_missing";

/// Bucket count requested for every terms aggregation.
pub const TERMS_SIZE: usize = 1000;

/// Facets counted per top-level document rather than per nested element.
const REVERSE_NESTED_FIELDS: [&str; 10] = [
    "transcript.consequence.consequence_type",
    "transcript.functional_impact_prediction_summary",
    "ssm_occurrence.observation.platform",
    "ssm_occurrence.observation.verification_status",
    "ssm_occurrence.observation.sequencing_strategy",
    "file_copies.file_format",
    "donors.project_code",
    "donors.primary_site",
    "donors.specimen_type",
    "donors.study",
];

pub(super) fn resolve(mut root: Root, model: &TypeModel) -> Root {
    let filter = root.query_filter().and_then(filter_body);

    root.aggregations = std::mem::take(&mut root.aggregations)
        .into_iter()
        .map(|aggregation| match aggregation {
            Aggregation::Terms { name, field, children } => facet(name, field, children, filter.as_ref(), model),
            other => other,
        })
        .collect();
    root
}

fn filter_body(filter: &Expr) -> Option<Expr> {
    match filter.children() {
        [] => None,
        [only] => Some(only.clone()),
        many => Some(Expr::must(many.to_vec())),
    }
}

fn facet(
    name: String,
    field: String,
    children: Vec<Aggregation>,
    filter: Option<&Expr>,
    model: &TypeModel,
) -> Aggregation {
    let filters = filter
        .and_then(|filter| without_field(filter.clone(), &field))
        .and_then(clean_empty);
    let nested_path = model.nested_path(&field);
    let terms = Aggregation::Terms {
        name: name.clone(),
        field,
        children,
    };

    let body = match &nested_path {
        Some(path) => nested_chain(&name, terms, path, filters.as_ref(), model),
        None => terms,
    };

    match filters {
        Some(filter)
            if nested_path
                .as_deref()
                .is_none_or(|path| has_non_nested_filters(&filter, path, model)) =>
        {
            Aggregation::Filter {
                name,
                filter,
                children: vec![body],
            }
        }
        _ => body,
    }
}

/// Drops every predicate on `field`.
fn without_field(expr: Expr, field: &str) -> Option<Expr> {
    if expr.field() == Some(field) {
        return None;
    }
    Some(expr.map_children(|child| without_field(child, field)))
}

/// Nested aggregations from the outermost nested path down to `target`.
///
/// A level gets a filter aggregation when the filters reach it. Levels
/// above the target without filters are skipped.
fn nested_chain(
    name: &str,
    terms: Aggregation,
    target: &str,
    filters: Option<&Expr>,
    model: &TypeModel,
) -> Aggregation {
    let mut inner = terms;
    for path in model.nested_paths(target).iter().rev() {
        let level_filter = filters
            .filter(|filters| has_filters_at_level(filters, path))
            .and_then(|filters| filters_at_level(filters.clone(), path, model));

        if level_filter.is_none() && path != target {
            continue;
        }
        if let Some(filter) = level_filter {
            inner = Aggregation::Filter {
                name: name.to_owned(),
                filter,
                children: vec![inner],
            };
        }
        inner = Aggregation::Nested {
            name: name.to_owned(),
            path: path.clone(),
            children: vec![inner],
        };
    }
    inner
}

/// Whether a `Nested` scope at exactly `path` is reachable through scopes
/// enclosing it.
fn has_filters_at_level(expr: &Expr, path: &str) -> bool {
    match expr {
        Expr::Nested { path: own, children, .. } => {
            own == path
                || (is_path_within(path, own) && children.iter().any(|child| has_filters_at_level(child, path)))
        }
        other => other.children().iter().any(|child| has_filters_at_level(child, path)),
    }
}

/// The filters as seen from inside a nested aggregation at `path`.
///
/// The scope at `path` itself is unwrapped, deeper scopes stay, anything
/// outside is dropped.
fn filters_at_level(expr: Expr, path: &str, model: &TypeModel) -> Option<Expr> {
    match expr {
        Expr::Nested {
            path: own,
            score_mode,
            children,
        } => {
            if own == path {
                match <[Expr; 1]>::try_from(children) {
                    Ok([only]) => Some(only),
                    Err(children) => Some(Expr::must(children)),
                }
            } else if is_path_within(&own, path) {
                Some(Expr::Nested {
                    path: own,
                    score_mode,
                    children,
                })
            } else {
                None
            }
        }
        pred if pred.is_predicate() => pred
            .field()
            .is_some_and(|field| model.is_nested_under(field, path))
            .then_some(pred),
        container => {
            let container = container.map_children(|child| filters_at_level(child, path, model));
            (!container.children().is_empty()).then_some(container)
        }
    }
}

/// Whether any predicate lies outside the nested scope at `path`.
fn has_non_nested_filters(expr: &Expr, path: &str, model: &TypeModel) -> bool {
    expr.any(&|node| {
        node.field()
            .is_some_and(|field| !model.is_nested_under(field, path))
    })
}

/// Mirrors every facet with a `_missing` twin counting documents that
/// lack the field.
pub(super) fn add_missing(mut root: Root) -> Root {
    let mirrors: Vec<Aggregation> = root.aggregations.iter().filter_map(missing_mirror).collect();
    root.aggregations.extend(mirrors);
    root
}

fn missing_mirror(aggregation: &Aggregation) -> Option<Aggregation> {
    let mirror_children =
        |children: &[Aggregation]| -> Vec<Aggregation> { children.iter().filter_map(missing_mirror).collect() };
    Some(match aggregation {
        Aggregation::Terms { name, field, .. } => Aggregation::Missing {
            name: format!("{name}{MISSING_SUFFIX}"),
            field: field.clone(),
            children: Vec::new(),
        },
        Aggregation::Filter { name, filter, children } => Aggregation::Filter {
            name: format!("{name}{MISSING_SUFFIX}"),
            filter: filter.clone(),
            children: mirror_children(children),
        },
        Aggregation::Nested { name, path, children } => Aggregation::Nested {
            name: format!("{name}{MISSING_SUFFIX}"),
            path: path.clone(),
            children: mirror_children(children),
        },
        Aggregation::Missing { .. } | Aggregation::ReverseNested { .. } => return None,
    })
}

/// Counts on some nested facets are reported per top-level document.
pub(super) fn add_reverse_nested(mut root: Root, doc_type: DocType) -> Root {
    if matches!(doc_type, DocType::MutationCentric | DocType::File) {
        for aggregation in &mut root.aggregations {
            reverse_nested(aggregation);
        }
    }
    root
}

fn reverse_nested(aggregation: &mut Aggregation) {
    match aggregation {
        Aggregation::Terms { name, field, children } | Aggregation::Missing { name, field, children }
            if REVERSE_NESTED_FIELDS.contains(&field.as_str()) =>
        {
            children.push(Aggregation::ReverseNested { name: name.clone() });
        }
        other => {
            if let Some(children) = other.children_mut() {
                children.iter_mut().for_each(reverse_nested);
            }
        }
    }
}
