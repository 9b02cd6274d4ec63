use serde_json::{Map, Value as Json, json};

use crate::ast::Value;
use crate::ir::{Aggregation, Expr, ScoreMode};
use crate::transform::TERMS_SIZE;

pub(super) fn expr(expr: &Expr) -> Json {
    match expr {
        Expr::Query(children) => all_of(children),
        Expr::Filter(children) => json!({ "bool": { "filter": list(children) } }),
        Expr::Bool(clauses) => {
            let mut occurrences = Map::new();
            for clause in clauses {
                let (key, children) = match clause {
                    Expr::Must(children) => ("must", children.as_slice()),
                    Expr::Should(children) => ("should", children.as_slice()),
                    other => ("must", std::slice::from_ref(other)),
                };
                extend_clause(&mut occurrences, key, children);
            }
            json!({ "bool": occurrences })
        }
        Expr::Must(children) => json!({ "bool": { "must": list(children) } }),
        Expr::Should(children) => json!({ "bool": { "should": list(children) } }),
        Expr::Not(children) => json!({ "bool": { "must_not": list(children) } }),
        Expr::Term { field, value } => json!({ "term": { field: literal(value) } }),
        Expr::Terms { field, values } => {
            let values: Vec<Json> = values.iter().map(literal).collect();
            json!({ "terms": { field: values } })
        }
        Expr::TermsLookup { field, lookup } => json!({
            "terms": {
                field: {
                    "index": lookup.index,
                    "type": lookup.doc_type,
                    "id": lookup.id,
                    "path": lookup.path,
                }
            }
        }),
        Expr::Range { field, bounds } => {
            let mut range = Map::new();
            for bound in bounds {
                range.insert(bound.op.as_str().to_owned(), literal(&bound.value));
            }
            json!({ "range": { field: range } })
        }
        Expr::Exists { field } => json!({ "exists": { "field": field } }),
        Expr::Missing { field } => json!({ "bool": { "must_not": [{ "exists": { "field": field } }] } }),
        Expr::Nested {
            path,
            score_mode,
            children,
        } => json!({
            "nested": {
                "path": path,
                "score_mode": score_mode_name(*score_mode),
                "query": all_of(children),
            }
        }),
        Expr::FunctionScore { script, children } => {
            let mut function_score = Map::new();
            if !children.is_empty() {
                function_score.insert("query".into(), all_of(children));
            }
            function_score.insert("boost_mode".into(), json!("replace"));
            function_score.insert("functions".into(), json!([{ "script_score": { "script": script } }]));
            json!({ "function_score": function_score })
        }
    }
}

fn list(children: &[Expr]) -> Vec<Json> {
    children.iter().map(expr).collect()
}

/// One child as is, several under a bool must, none as `match_all`.
fn all_of(children: &[Expr]) -> Json {
    match children {
        [] => json!({ "match_all": {} }),
        [only] => expr(only),
        many => json!({ "bool": { "must": list(many) } }),
    }
}

fn extend_clause(occurrences: &mut Map<String, Json>, key: &str, children: &[Expr]) {
    let entry = occurrences.entry(key).or_insert_with(|| Json::Array(Vec::new()));
    if let Json::Array(items) = entry {
        items.extend(children.iter().map(expr));
    }
}

fn literal(value: &Value) -> Json {
    match value {
        Value::Int(n) => json!(n),
        Value::Float(x) => json!(x),
        Value::Str(s) => json!(s),
    }
}

/// `total` is what the search engine calls `sum`.
fn score_mode_name(mode: ScoreMode) -> &'static str {
    match mode {
        ScoreMode::Total => "sum",
        other => other.as_str(),
    }
}

/// Top-level facets run in `global` scope, ignoring the query.
pub(super) fn global_aggregations(aggregations: &[Aggregation]) -> Json {
    let mut aggs = Map::new();
    for aggregation in aggregations {
        let name = aggregation.name().to_owned();
        let mut inner = Map::new();
        inner.insert(name.clone(), self::aggregation(aggregation));
        aggs.insert(name, json!({ "global": {}, "aggs": inner }));
    }
    Json::Object(aggs)
}

fn aggregation(aggregation: &Aggregation) -> Json {
    let mut body = match aggregation {
        Aggregation::Terms { field, .. } => json!({ "terms": { "field": field, "size": TERMS_SIZE } }),
        Aggregation::Missing { field, .. } => json!({ "missing": { "field": field } }),
        Aggregation::Filter { filter, .. } => json!({ "filter": expr(filter) }),
        Aggregation::Nested { path, .. } => json!({ "nested": { "path": path } }),
        Aggregation::ReverseNested { .. } => json!({ "reverse_nested": {} }),
    };

    let children = aggregation.children();
    if !children.is_empty()
        && let Json::Object(body) = &mut body
    {
        let sub: Map<String, Json> = children
            .iter()
            .map(|child| (child.name().to_owned(), self::aggregation(child)))
            .collect();
        body.insert("aggs".into(), Json::Object(sub));
    }
    body
}
