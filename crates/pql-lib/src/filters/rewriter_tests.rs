use pql_core::DocType;
use serde_json::json;

use super::{Entity, nesting_path, rewrite, rewrite_str};
use crate::Error;

fn rewritten(filters: serde_json::Value, target: DocType) -> String {
    rewrite(&filters, target)
        .unwrap()
        .map(|f| f.to_string())
        .unwrap_or_default()
}

#[test]
fn entity_set_follows_target_type() {
    let filters = json!({"donor": {"entitySetId": {"is": ["abc"]}}});

    insta::assert_snapshot!(rewritten(filters.clone(), DocType::DonorCentric), @"in(donor.entitySetId,'abc')");
    insta::assert_snapshot!(rewritten(filters.clone(), DocType::GeneCentric), @"nested(donor,in(donor.entitySetId,'abc'))");
    insta::assert_snapshot!(rewritten(filters, DocType::MutationCentric), @"nested(ssm_occurrence,in(donor.entitySetId,'abc'))");
}

#[test]
fn entity_set_ids_move_to_entity_set_field() {
    let filters = json!({"donor": {"id": {"not": ["ES:abc"]}}});
    insta::assert_snapshot!(
        rewritten(filters, DocType::GeneCentric),
        @"nested(donor,not(in(donor.entitySetId,'abc')))"
    );
}

#[test]
fn mixed_ids_and_entity_sets() {
    let filters = json!({"gene": {"id": {"is": ["ENSG01", "ES:abc"]}}});
    insta::assert_snapshot!(
        rewritten(filters, DocType::DonorCentric),
        @"nested(gene,or(in(gene.id,'ENSG01'),in(gene.entitySetId,'abc')))"
    );
}

#[test]
fn scalar_values_compare() {
    insta::assert_snapshot!(
        rewritten(json!({"donor": {"gender": {"is": "male"}}}), DocType::DonorCentric),
        @"eq(donor.gender,'male')"
    );
    insta::assert_snapshot!(
        rewritten(json!({"donor": {"gender": {"not": "male"}}}), DocType::DonorCentric),
        @"ne(donor.gender,'male')"
    );
    insta::assert_snapshot!(
        rewritten(json!({"gene": {"id": {"is": "ES:abc"}}}), DocType::GeneCentric),
        @"eq(gene.entitySetId,'abc')"
    );
}

#[test]
fn missing_marker() {
    insta::assert_snapshot!(
        rewritten(json!({"donor": {"gender": {"is": ["_missing"]}}}), DocType::DonorCentric),
        @"missing(donor.gender)"
    );
    insta::assert_snapshot!(
        rewritten(json!({"donor": {"gender": {"is": ["_missing", "male"]}}}), DocType::DonorCentric),
        @"or(missing(donor.gender),in(donor.gender,'male'))"
    );
    insta::assert_snapshot!(
        rewritten(json!({"donor": {"gender": {"not": "_missing"}}}), DocType::DonorCentric),
        @"exists(donor.gender)"
    );
}

#[test]
fn numbers_and_booleans() {
    insta::assert_snapshot!(
        rewritten(json!({"donor": {"ageAtDiagnosis": {"is": [30, 40.5]}}}), DocType::DonorCentric),
        @"in(donor.ageAtDiagnosis,30,40.5)"
    );
    insta::assert_snapshot!(
        rewritten(json!({"mutation": {"verified": {"is": true}}}), DocType::MutationCentric),
        @"eq(mutation.verified,'true')"
    );
}

#[test]
fn has_fields_test_presence() {
    insta::assert_snapshot!(
        rewritten(json!({"gene": {"hasPathway": true}}), DocType::DonorCentric),
        @"nested(gene,exists(gene.pathwayId))"
    );
    insta::assert_snapshot!(
        rewritten(json!({"gene": {"hasCompound": false}}), DocType::GeneCentric),
        @"missing(gene.compoundId)"
    );

    let err = rewrite(&json!({"gene": {"hasGoTerm": "yes"}}), DocType::GeneCentric).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid filter: `hasGoTerm` takes true or false");
}

#[test]
fn has_flag_and_id_of_one_family_match_either() {
    insta::assert_snapshot!(
        rewritten(
            json!({"gene": {"hasPathway": true, "pathwayId": {"is": ["R-1"]}}}),
            DocType::GeneCentric
        ),
        @"or(exists(gene.pathwayId),in(gene.pathwayId,'R-1'))"
    );
    insta::assert_snapshot!(
        rewritten(
            json!({"gene": {"compoundId": {"is": ["C-1"]}, "hasCompound": false, "symbol": {"is": ["TP53"]}}}),
            DocType::DonorCentric
        ),
        @"nested(gene,or(in(gene.compoundId,'C-1'),missing(gene.compoundId)),in(gene.symbol,'TP53'))"
    );
    insta::assert_snapshot!(
        rewritten(
            json!({"gene": {"hasCuratedSet": true, "hasGoTerm": true, "goTermId": {"is": ["GO:1"]}}}),
            DocType::GeneCentric
        ),
        @"and(or(in(gene.goTermId,'GO:1'),exists(gene.goTermId)),exists(gene.curatedSetId))"
    );
}

#[test]
fn entity_predicates_share_one_nested_scope() {
    let filters = json!({"donor": {"gender": {"is": ["male"]}, "vitalStatus": {"not": ["alive"]}}});
    insta::assert_snapshot!(
        rewritten(filters, DocType::GeneCentric),
        @"nested(donor,in(donor.gender,'male'),not(in(donor.vitalStatus,'alive')))"
    );
}

#[test]
fn entities_combine_under_and() {
    let filters = json!({
        "donor": {"gender": {"is": ["male"]}},
        "gene": {"type": {"is": ["protein_coding"]}},
    });
    insta::assert_snapshot!(
        rewritten(filters, DocType::GeneCentric),
        @"and(nested(donor,in(donor.gender,'male')),in(gene.type,'protein_coding'))"
    );
}

#[test]
fn empty_values_select_nothing() {
    assert_eq!(rewrite(&json!({}), DocType::DonorCentric).unwrap(), None);
    assert_eq!(
        rewrite(&json!({"donor": {"gender": {"is": []}}}), DocType::DonorCentric).unwrap(),
        None
    );
    assert_eq!(
        rewrite(&json!({"donor": {"gender": {"is": ""}}}), DocType::GeneCentric).unwrap(),
        None
    );
}

#[test]
fn unknown_entities() {
    let err = rewrite(&json!({"sample": {"id": {"is": ["x"]}}}), DocType::DonorCentric).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"no nesting is known for `sample` on `donor-centric`");

    let err = rewrite(&json!({"project": {"id": {"is": ["x"]}}}), DocType::GeneCentric).unwrap_err();
    assert!(matches!(err, Error::UnknownEntity { .. }));
}

#[test]
fn malformed_filters() {
    let err = rewrite(&json!({"donor": {"gender": {"eq": "male"}}}), DocType::DonorCentric).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid filter: `donor.gender` needs exactly one of `is` or `not`");

    let err = rewrite(&json!({"donor": {"gender": {"is": "male", "not": "female"}}}), DocType::DonorCentric)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidFilter(_)));

    let err = rewrite(&json!({"donor": {"gender": {"is": [{"a": 1}]}}}), DocType::DonorCentric).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid filter: `donor.gender` takes strings, numbers or booleans");

    assert!(matches!(
        rewrite(&json!(["donor"]), DocType::DonorCentric),
        Err(Error::InvalidFilter(_))
    ));
    assert!(matches!(
        rewrite_str("{donor", DocType::DonorCentric),
        Err(Error::InvalidFilter(_))
    ));
}

#[test]
fn rewrite_from_text() {
    let filter = rewrite_str(r#"{"mutation": {"type": {"is": ["single base substitution"]}}}"#, DocType::DonorCentric)
        .unwrap()
        .unwrap();
    insta::assert_snapshot!(filter.to_string(), @"nested(gene.ssm,in(mutation.type,'single base substitution'))");
}

#[test]
fn nesting_table_covers_centric_types() {
    let centric = [DocType::DonorCentric, DocType::GeneCentric, DocType::MutationCentric];
    for entity in [Entity::Donor, Entity::Gene, Entity::Mutation] {
        for target in centric {
            assert!(nesting_path(entity, target).is_some(), "{entity} on {target}");
        }
        assert_eq!(nesting_path(entity, DocType::File), None);
    }
    assert_eq!(nesting_path(Entity::Project, DocType::Project), Some(""));
    assert_eq!(nesting_path(Entity::Project, DocType::DonorCentric), None);
}
