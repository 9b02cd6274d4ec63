use pql_core::{DocType, type_model};

use super::nested;
use super::score::{ScoringConfig, fix_not, nested_only, non_nested_only, score};
use crate::Error;
use crate::ast::Statement;
use crate::ir::{Expr, Root, ScoreMode};
use crate::lower::lower;

fn prepared(source: &str, doc_type: DocType) -> Root {
    let model = type_model(doc_type);
    let statement = Statement::parse(source).unwrap();
    let mut root = lower(&statement, model).unwrap();
    root.query = root.query.map(|query| nested::resolve(query, model));
    root
}

fn donor_scoring() -> ScoringConfig {
    ScoringConfig::for_type(DocType::DonorCentric).unwrap()
}

#[test]
fn scoring_per_type() {
    assert_eq!(ScoringConfig::for_type(DocType::DonorCentric).unwrap().path, "gene");
    assert_eq!(ScoringConfig::for_type(DocType::GeneCentric).unwrap().path, "donor");
    assert_eq!(
        ScoringConfig::for_type(DocType::MutationCentric).unwrap().path,
        "ssm_occurrence"
    );
    assert!(ScoringConfig::for_type(DocType::Project).is_none());
    assert!(ScoringConfig::for_type(DocType::File).is_none());

    let custom = ScoringConfig::new("gene")
        .with_script("doc['x'].value")
        .with_score_mode(ScoreMode::Max);
    insta::assert_snapshot!(custom.scored(Vec::new()).dump(), @r#"
    Nested gene max
      FunctionScore "doc['x'].value"
    "#);
}

#[test]
fn nested_pass_on_flat_input_is_bare_scoring_wrapper() {
    let filter = Expr::Filter(vec![Expr::term("donor_sex", "male")]);
    let scored = nested_only(filter, &donor_scoring(), type_model(DocType::DonorCentric)).unwrap();

    insta::assert_snapshot!(scored.dump(), @r#"
    Nested gene total
      FunctionScore "1"
    "#);
}

#[test]
fn non_nested_pass_drops_scoring_path() {
    let filter = Expr::Filter(vec![Expr::must(vec![
        Expr::term("donor_sex", "male"),
        Expr::term("gene.symbol", "TP53"),
        Expr::nested("gene.ssm", Expr::term("gene.ssm.mutation_type", "x")),
        Expr::term("project._project_id", "P1"),
    ])]);
    let plain = non_nested_only(filter, "gene", type_model(DocType::DonorCentric)).unwrap();

    insta::assert_snapshot!(plain.dump(), @r"
    Filter
      Bool
        Must
          Term donor_sex 'male'
          Term project._project_id 'P1'
    ");
}

#[test]
fn nested_pass_scores_each_scope() {
    let root = prepared(
        "and(eq(gender,'male'),eq(gene.symbol,'TP53'),eq(mutation.type,'x'))",
        DocType::DonorCentric,
    );
    let filter = root.query_filter().unwrap().clone();
    let scored = nested_only(filter, &donor_scoring(), type_model(DocType::DonorCentric)).unwrap();

    insta::assert_snapshot!(scored.dump(), @r#"
    Bool
      Must
        Nested gene total
          FunctionScore "1"
            Filter
              Term gene.symbol 'TP53'
        Nested gene total
          FunctionScore "1"
            Filter
              Nested gene.ssm avg
                Term gene.ssm.mutation_type 'x'
    "#);
}

#[test]
fn predicates_on_the_scoring_path_score_separately() {
    let root = prepared(
        "eq(gene.symbol,'TP53'),eq(gene.type,'protein_coding')",
        DocType::DonorCentric,
    );
    let filter = root.query_filter().unwrap().clone();
    let scored = nested_only(filter, &donor_scoring(), type_model(DocType::DonorCentric)).unwrap();

    insta::assert_snapshot!(scored.dump(), @r#"
    Bool
      Must
        Nested gene total
          FunctionScore "1"
            Filter
              Term gene.symbol 'TP53'
        Nested gene total
          FunctionScore "1"
            Filter
              Term gene.biotype 'protein_coding'
    "#);
}

#[test]
fn user_scope_on_the_scoring_path_scores_once() {
    let root = prepared(
        "nested(gene,eq(gene.symbol,'TP53'),eq(gene.type,'protein_coding'))",
        DocType::DonorCentric,
    );
    let filter = root.query_filter().unwrap().clone();
    let scored = nested_only(filter, &donor_scoring(), type_model(DocType::DonorCentric)).unwrap();

    insta::assert_snapshot!(scored.dump(), @r#"
    Nested gene total
      FunctionScore "1"
        Filter
          Bool
            Must
              Term gene.symbol 'TP53'
              Term gene.biotype 'protein_coding'
    "#);
}

#[test]
fn no_filter_scores_everything() {
    let root = score(Root::default(), &donor_scoring(), type_model(DocType::DonorCentric)).unwrap();
    insta::assert_snapshot!(root.dump(), @r#"
    Root
      Query
        Nested gene total
          FunctionScore "1"
    "#);
}

#[test]
fn filter_splits_into_plain_and_scored() {
    let root = prepared("eq(gender,'male')", DocType::DonorCentric);
    let root = score(root, &donor_scoring(), type_model(DocType::DonorCentric)).unwrap();

    insta::assert_snapshot!(root.dump(), @r#"
    Root
      Query
        Bool
          Must
            Filter
              Term donor_sex 'male'
            Nested gene total
              FunctionScore "1"
    "#);
}

#[test]
fn negation_is_scored_beside_the_filter() {
    let root = prepared("not(eq(gender,'male'))", DocType::DonorCentric);
    let scoring = donor_scoring();
    let root = score(root, &scoring, type_model(DocType::DonorCentric)).unwrap();
    insta::assert_snapshot!(root.dump(), @r"
    Root
      Query
        Filter
          Not
            Term donor_sex 'male'
    ");

    let root = fix_not(root, &scoring);
    insta::assert_snapshot!(root.dump(), @r#"
    Root
      Query
        Bool
          Must
            Nested gene total
              FunctionScore "1"
            Filter
              Not
                Term donor_sex 'male'
    "#);
}

#[test]
fn query_without_filter_is_an_invariant_violation() {
    let root = Root {
        query: Some(Expr::Query(vec![Expr::term("donor_sex", "male")])),
        ..Root::default()
    };
    let err = score(root, &donor_scoring(), type_model(DocType::DonorCentric)).unwrap_err();

    assert!(err.is_internal());
    let Error::CompilerInvariant { message, ir } = err else {
        panic!("expected an invariant violation");
    };
    assert_eq!(message, "malformed query node");
    insta::assert_snapshot!(ir, @r"
    Query
      Term donor_sex 'male'
    ");
}

#[test]
fn filter_inside_filter_is_an_invariant_violation() {
    let root = Root {
        query: Some(Expr::Query(vec![Expr::Filter(vec![Expr::Filter(vec![
            Expr::term("donor_sex", "male"),
        ])])])),
        ..Root::default()
    };
    let err = score(root, &donor_scoring(), type_model(DocType::DonorCentric)).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"compiler invariant violated: filter node has a filter node child");
}
