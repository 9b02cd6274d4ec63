use super::optimize::{clean_empty, optimize, simplify};
use crate::ir::{Aggregation, Expr, Root};

#[test]
fn empty_containers_are_removed() {
    let expr = Expr::Filter(vec![
        Expr::must(Vec::new()),
        Expr::Not(vec![Expr::should(Vec::new())]),
        Expr::term("donor_sex", "male"),
    ]);
    insta::assert_snapshot!(clean_empty(expr).unwrap().dump(), @r"
    Filter
      Term donor_sex 'male'
    ");

    let empty = Expr::Query(vec![Expr::Filter(vec![Expr::must(Vec::new())])]);
    assert_eq!(clean_empty(empty), None);
}

#[test]
fn childless_function_score_survives() {
    let scored = Expr::Nested {
        path: "gene".into(),
        score_mode: crate::ir::ScoreMode::Total,
        children: vec![Expr::FunctionScore {
            script: "1".into(),
            children: Vec::new(),
        }],
    };
    assert_eq!(clean_empty(scored.clone()), Some(scored));
}

#[test]
fn single_clause_bools_collapse() {
    let expr = Expr::Query(vec![Expr::Filter(vec![Expr::must(vec![Expr::should(vec![
        Expr::term("donor_sex", "male"),
    ])])])]);
    insta::assert_snapshot!(simplify(expr).dump(), @r"
    Query
      Filter
        Term donor_sex 'male'
    ");

    let kept = Expr::should(vec![Expr::exists("a"), Expr::exists("b")]);
    assert_eq!(simplify(kept.clone()), kept);
}

#[test]
fn emptied_aggregation_filter_is_dropped() {
    let root = Root {
        aggregations: vec![Aggregation::Filter {
            name: "gender".into(),
            filter: Expr::must(Vec::new()),
            children: vec![Aggregation::terms("gender", "donor_sex")],
        }],
        ..Root::default()
    };
    let root = optimize(root);
    assert_eq!(root.aggregations, [Aggregation::terms("gender", "donor_sex")]);
}
