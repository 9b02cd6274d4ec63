//! Request builder: transformed IR to a search request.
//!
//! The request body uses the search engine's JSON query DSL. Facets are
//! wrapped in `global` aggregations so they count over the whole index; each
//! facet carries its own filter aggregation instead.

mod json;


use serde::Serialize;
use serde_json::{Map, Value as Json, json};

use pql_core::{DocType, TypeModel};

use crate::ir::Root;

/// How the search engine should execute the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    #[default]
    QueryThenFetch,
    /// Only the hit count and aggregations, no documents.
    Count,
}

impl SearchType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::QueryThenFetch => "query_then_fetch",
            Self::Count => "count",
        }
    }
}

/// A ready-to-send search request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    pub index: String,
    #[serde(rename = "type")]
    pub doc_type: DocType,
    pub search_type: SearchType,
    pub body: Json,
}

impl Request {
    pub fn to_json(&self) -> String {
        self.as_json().to_string()
    }

    pub fn to_json_pretty(&self) -> String {
        format!("{:#}", self.as_json())
    }

    fn as_json(&self) -> Json {
        json!({
            "index": self.index,
            "type": self.doc_type.id(),
            "search_type": self.search_type.as_str(),
            "body": self.body,
        })
    }
}

/// Materializes a transformed IR tree.
pub fn build(root: &Root, index: &str, model: &TypeModel) -> Request {
    let mut body = Map::new();

    if let Some(query) = &root.query {
        body.insert("query".into(), json::expr(query));
    }
    if let Some(post_filter) = &root.post_filter {
        body.insert("post_filter".into(), json::expr(post_filter));
    }
    if !root.aggregations.is_empty() {
        body.insert("aggs".into(), json::global_aggregations(&root.aggregations));
    }
    if !root.fields.is_empty() {
        body.insert("fields".into(), json!(root.fields));
    }
    if !root.source.is_empty() {
        body.insert("_source".into(), json!({ "includes": root.source }));
    }
    if !root.sort.is_empty() {
        let sort: Vec<Json> = root
            .sort
            .iter()
            .map(|(field, order)| {
                let mut entry = Map::new();
                entry.insert(sort_field(field, model), json!({ "order": order.as_str() }));
                Json::Object(entry)
            })
            .collect();
        body.insert("sort".into(), Json::Array(sort));
    }
    if let Some(limit) = root.limit {
        body.insert("from".into(), json!(limit.from));
        body.insert("size".into(), json!(limit.size));
    }

    let search_type = if root.count {
        SearchType::Count
    } else {
        SearchType::QueryThenFetch
    };

    let request = Request {
        index: index.to_owned(),
        doc_type: model.doc_type(),
        search_type,
        body: Json::Object(body),
    };
    tracing::debug!(request = %request.to_json(), "built request");
    request
}

/// Project fields on donor documents collide with the `project` type's own
/// fields and are qualified with the document type.
fn sort_field(field: &str, model: &TypeModel) -> String {
    let doc_type = model.doc_type();
    if doc_type == DocType::DonorCentric && field.starts_with("project.") {
        format!("{doc_type}.{field}")
    } else {
        field.to_owned()
    }
}
