use pql_core::{DocType, type_model};

use super::{ScoringConfig, TransformContext, transform};
use crate::Result;
use crate::ast::Statement;
use crate::ir::Root;
use crate::lower::lower;

fn transformed(source: &str, doc_type: DocType) -> Result<Root> {
    let model = type_model(doc_type);
    let scoring = ScoringConfig::for_type(doc_type);
    let statement = Statement::parse(source).unwrap();
    let root = lower(&statement, model)?;
    transform(root, TransformContext::new(model).with_scoring(scoring.as_ref()))
}

#[test]
fn plain_filter_with_facet() {
    let root = transformed("eq(gender,'male'),facets(gender)", DocType::DonorCentric).unwrap();
    insta::assert_snapshot!(root.dump(), @r#"
    Root
      Query
        Bool
          Must
            Filter
              Term donor_sex 'male'
            Nested gene total
              FunctionScore "1"
      Aggregations
        Terms gender donor_sex
        Missing gender_missing donor_sex
    "#);
}

#[test]
fn nested_filter_moves_into_scored_branch() {
    let root = transformed("eq(gene.symbol,'TP53')", DocType::DonorCentric).unwrap();
    insta::assert_snapshot!(root.dump(), @r#"
    Root
      Query
        Nested gene total
          FunctionScore "1"
            Filter
              Term gene.symbol 'TP53'
    "#);
}

#[test]
fn no_filter_still_scores() {
    let root = transformed("select(id,ssmAffectedGenes)", DocType::DonorCentric).unwrap();
    insta::assert_snapshot!(root.dump(), @r#"
    Root
      fields: _donor_id
      Query
        Nested gene total
          FunctionScore "1"
    "#);
}

#[test]
fn unscored_type_keeps_lowered_query() {
    let model = type_model(DocType::DonorCentric);
    let statement = Statement::parse("ne(gender,'male'),sort(-_score)").unwrap();
    let root = transform(lower(&statement, model).unwrap(), TransformContext::new(model)).unwrap();
    insta::assert_snapshot!(root.dump(), @r"
    Root
      Query
        Filter
          Not
            Term donor_sex 'male'
      sort: -_score
    ");
}

#[test]
fn special_field_errors_surface() {
    let err = transformed("eq(gene.location,'chrQ')", DocType::DonorCentric).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid filter: bad location `chrQ`: unknown chromosome");
}
