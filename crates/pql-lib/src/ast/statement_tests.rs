use indexmap::IndexMap;

use super::{Filter, Limit, NodeKind, SortOrder, Statement};
use crate::Error;

#[test]
fn fresh_count_statement_has_nothing() {
    let statement = Statement::count();
    assert!(statement.is_count());
    assert!(!statement.has_select());
    assert!(!statement.has_facets());
    assert!(!statement.has_filters());
    assert!(!statement.has_sort());
    assert!(!statement.has_limit());
    assert_eq!(statement.kinds(), [NodeKind::Count]);
}

#[test]
fn count_statement_rejects_search_clauses() {
    let mut statement = Statement::count();

    assert!(matches!(
        statement.set_select(vec!["id".into()]),
        Err(Error::StatementShape(_))
    ));
    assert!(matches!(
        statement.add_select(vec!["id".into()]),
        Err(Error::StatementShape(_))
    ));
    assert!(matches!(
        statement.add_facets(vec!["gender".into()]),
        Err(Error::StatementShape(_))
    ));
    assert!(matches!(
        statement.set_sort(IndexMap::from([("id".to_owned(), SortOrder::Asc)])),
        Err(Error::StatementShape(_))
    ));
    assert!(matches!(
        statement.set_limit(Limit::first(10)),
        Err(Error::StatementShape(_))
    ));

    assert!(!statement.has_select());
    assert!(!statement.has_facets());
    assert!(!statement.has_sort());
    assert!(!statement.has_limit());
}

#[test]
fn count_statement_accepts_filter() {
    let mut statement = Statement::count();
    statement.set_filter(Filter::eq("gender", "male"));
    assert!(statement.has_filters());
    assert_eq!(statement.kinds(), [NodeKind::Count, NodeKind::Filter]);
}

#[test]
fn search_statement_cannot_become_count() {
    let mut statement = Statement::new();
    statement.set_limit(Limit::new(10, 20)).unwrap();

    let err = statement.set_count().unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid statement: a count statement takes no select, facets, sort or limit");
    assert!(!statement.is_count());
}

#[test]
fn filtered_statement_can_become_count() {
    let mut statement = Statement::new();
    statement.set_filter(Filter::exists("id"));
    statement.set_count().unwrap();
    assert!(statement.is_count());
    assert!(statement.has_filters());
}

#[test]
fn add_select_merges_without_duplicates() {
    let mut statement = Statement::new();
    statement.add_select(vec!["id".into(), "gene".into()]).unwrap();
    statement.add_select(vec!["gene".into(), "symbol".into()]).unwrap();
    assert_eq!(statement.select(), ["id", "gene", "symbol"]);

    statement.set_select(vec!["name".into()]).unwrap();
    assert_eq!(statement.select(), ["name"]);
}

#[test]
fn kinds_follow_canonical_order() {
    let mut statement = Statement::new();
    statement.set_limit(Limit::first(5)).unwrap();
    statement
        .set_sort(IndexMap::from([("id".to_owned(), SortOrder::Desc)]))
        .unwrap();
    statement.set_filter(Filter::missing("gene"));
    statement.add_facets(vec!["type".into()]).unwrap();
    statement.set_select(vec!["id".into()]).unwrap();

    assert_eq!(
        statement.kinds(),
        [
            NodeKind::Select,
            NodeKind::Facets,
            NodeKind::Filter,
            NodeKind::Sort,
            NodeKind::Limit,
        ]
    );
}

#[test]
fn take_filter_leaves_no_filter() {
    let mut statement = Statement::new();
    statement.set_filter(Filter::exists("id"));
    assert_eq!(statement.take_filter(), Some(Filter::exists("id")));
    assert!(!statement.has_filters());
}
