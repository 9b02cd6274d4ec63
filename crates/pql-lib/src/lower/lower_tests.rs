use pql_core::{DocType, type_model};

use super::lower;
use crate::Error;
use crate::ast::{Limit, SortOrder, Statement};
use crate::ir::{Aggregation, Root};

fn lowered(source: &str, doc_type: DocType) -> Root {
    let statement = Statement::parse(source).unwrap();
    lower(&statement, type_model(doc_type)).unwrap()
}

#[test]
fn filter_goes_under_query() {
    let root = lowered("eq(gender,'male')", DocType::DonorCentric);
    insta::assert_snapshot!(root.dump(), @r"
    Root
      Query
        Filter
          Term donor_sex 'male'
    ");
}

#[test]
fn connectives_and_comparisons() {
    let root = lowered(
        "or(ne(gender,'male'),and(ge(ageAtDiagnosis,30),lt(ageAtDiagnosis,60)),not(missing(vitalStatus)))",
        DocType::DonorCentric,
    );
    insta::assert_snapshot!(root.dump(), @r"
    Root
      Query
        Filter
          Bool
            Should
              Not
                Term donor_sex 'male'
              Bool
                Must
                  Range donor_age_at_diagnosis gte 30
                  Range donor_age_at_diagnosis lt 60
              Not
                Missing donor_vital_status
    ");
}

#[test]
fn user_nested_scope_is_kept() {
    let root = lowered("nested(gene,eq(gene.symbol,'TP53'),exists(gene.type))", DocType::DonorCentric);
    insta::assert_snapshot!(root.dump(), @r"
    Root
      Query
        Filter
          Nested gene avg
            Bool
              Must
                Term gene.symbol 'TP53'
                Exists gene.biotype
    ");
}

#[test]
fn entity_set_alias_marks_lookup_values() {
    let root = lowered("in(donor.entitySetId,'abc','ES:def')", DocType::DonorCentric);
    insta::assert_snapshot!(root.dump(), @r"
    Root
      Query
        Filter
          Terms _donor_id 'ES:abc' 'ES:def'
    ");

    let root = lowered("eq(donor.id,'DO1')", DocType::GeneCentric);
    insta::assert_snapshot!(root.dump(), @r"
    Root
      Query
        Filter
          Term donor._donor_id 'DO1'
    ");
}

#[test]
fn mutation_aliases() {
    let root = lowered("select(id,end),eq(mutation.start,100)", DocType::MutationCentric);
    assert_eq!(root.fields, ["_mutation_id", "chromosome_end"]);
    insta::assert_snapshot!(root.dump(), @r"
    Root
      fields: _mutation_id, chromosome_end
      Query
        Filter
          Term chromosome_start 100
    ");
}

#[test]
fn select_all_uses_public_fields() {
    let root = lowered("select(*)", DocType::DonorCentric);
    assert_eq!(root.fields[0], "_donor_id");
    assert!(root.fields.contains(&"donor_sex".to_owned()));

    let with_extra = lowered("select(*,id)", DocType::DonorCentric);
    assert_eq!(with_extra.fields, root.fields);
}

#[test]
fn selects_merge_without_duplicates() {
    let root = lowered("select(id,gender),select(gender,donor.vitalStatus)", DocType::DonorCentric);
    assert_eq!(root.fields, ["_donor_id", "donor_sex", "donor_vital_status"]);
}

#[test]
fn facets_become_terms_aggregations() {
    let root = lowered("facets(gender,projectId),facets(gender)", DocType::DonorCentric);
    assert_eq!(
        root.aggregations,
        [
            Aggregation::terms("gender", "donor_sex"),
            Aggregation::terms("projectId", "project._project_id"),
        ]
    );

    let root = lowered("facets(*)", DocType::DonorCentric);
    let names: Vec<&str> = root.aggregations.iter().map(Aggregation::name).collect();
    assert_eq!(names, type_model(DocType::DonorCentric).facets());
}

#[test]
fn sort_keeps_score_unresolved() {
    let root = lowered("sort(-_score,+ssmCount)", DocType::DonorCentric);
    let sort: Vec<_> = root.sort.iter().map(|(f, o)| (f.as_str(), *o)).collect();
    assert_eq!(
        sort,
        [("_score", SortOrder::Desc), ("_summary._ssm_count", SortOrder::Asc)]
    );
}

#[test]
fn paging_and_count() {
    let root = lowered("limit(5,10)", DocType::GeneCentric);
    assert_eq!(root.limit, Some(Limit::new(5, 10)));
    assert!(!root.count);

    let root = lowered("count(),exists(id)", DocType::GeneCentric);
    assert!(root.count);
    assert!(root.query.is_some());
}

#[test]
fn unknown_alias_names_the_type() {
    let statement = Statement::parse("eq(shoeSize,42)").unwrap();
    let err = lower(&statement, type_model(DocType::MutationCentric)).unwrap_err();
    assert!(matches!(err, Error::UnknownField { .. }));
    insta::assert_snapshot!(err.to_string(), @"unknown field `shoeSize` for type `mutation-centric`");
}
