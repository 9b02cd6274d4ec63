use pql_core::{DocType, type_model};

use super::special::{entity_sets, fields_to_source, gene_sets};
use crate::Error;
use crate::ast::Statement;
use crate::ir::Root;
use crate::lower::lower;

fn lowered(source: &str, doc_type: DocType) -> Root {
    let statement = Statement::parse(source).unwrap();
    lower(&statement, type_model(doc_type)).unwrap()
}

fn with_entity_sets(source: &str, doc_type: DocType) -> String {
    let query = lowered(source, doc_type).query.unwrap();
    entity_sets(query, type_model(doc_type)).unwrap().dump()
}

fn with_gene_sets(source: &str, doc_type: DocType) -> String {
    let query = lowered(source, doc_type).query.unwrap();
    gene_sets(query, type_model(doc_type)).unwrap().dump()
}

#[test]
fn object_fields_move_to_source() {
    let mut root = lowered("select(id,transcripts,externalDbIds)", DocType::GeneCentric);
    fields_to_source(&mut root, type_model(DocType::GeneCentric));

    assert_eq!(root.fields, ["_gene_id"]);
    assert_eq!(root.source, ["transcripts", "external_db_ids"]);
}

#[test]
fn select_all_keeps_plain_fields() {
    let mut root = lowered("select(*)", DocType::MutationCentric);
    fields_to_source(&mut root, type_model(DocType::MutationCentric));

    assert!(root.source.is_empty());
    assert!(root.fields.contains(&"transcript.id".to_owned()));
    assert!(!root.fields.iter().any(|f| f == "_score" || f == "mutation.location"));
}

#[test]
fn entity_set_alias_becomes_lookup() {
    insta::assert_snapshot!(with_entity_sets("eq(donor.entitySetId,'abc')", DocType::DonorCentric), @r"
    Query
      Filter
        TermsLookup _donor_id terms-lookup/donor-ids/abc values
    ");
}

#[test]
fn mixed_ids_and_sets() {
    insta::assert_snapshot!(with_entity_sets("in(id,'DO1','ES:s1','ES:s2')", DocType::DonorCentric), @r"
    Query
      Filter
        Bool
          Should
            Terms _donor_id 'DO1'
            TermsLookup _donor_id terms-lookup/donor-ids/s1 values
            TermsLookup _donor_id terms-lookup/donor-ids/s2 values
    ");
}

#[test]
fn lookup_type_follows_entity() {
    insta::assert_snapshot!(with_entity_sets("in(gene.entitySetId,'s1')", DocType::DonorCentric), @r"
    Query
      Filter
        TermsLookup gene._gene_id terms-lookup/gene-ids/s1 values
    ");
    insta::assert_snapshot!(with_entity_sets("eq(donor.entitySetId,'s2')", DocType::GeneCentric), @r"
    Query
      Filter
        TermsLookup donor._donor_id terms-lookup/donor-ids/s2 values
    ");
}

#[test]
fn entity_set_on_plain_field_is_rejected() {
    let query = lowered("eq(gender,'ES:x')", DocType::DonorCentric).query.unwrap();
    let err = entity_sets(query, type_model(DocType::DonorCentric)).unwrap_err();

    assert!(matches!(err, Error::InvalidFilter(_)));
    insta::assert_snapshot!(err.to_string(), @"invalid filter: `donor_sex` does not take entity sets");
}

#[test]
fn go_terms_fan_out_inside_gene_scope() {
    insta::assert_snapshot!(with_gene_sets("eq(gene.goTermId,'GO:1')", DocType::DonorCentric), @r"
    Query
      Filter
        Nested gene avg
          Bool
            Should
              Term gene.go_term.cellular_component 'GO:1'
              Term gene.go_term.biological_process 'GO:1'
              Term gene.go_term.molecular_function 'GO:1'
    ");
}

#[test]
fn gene_sets_add_pathways_and_curated_sets() {
    insta::assert_snapshot!(with_gene_sets("in(gene.geneSetId,'R1','R2')", DocType::GeneCentric), @r"
    Query
      Filter
        Bool
          Should
            Terms go_term.cellular_component 'R1' 'R2'
            Terms go_term.biological_process 'R1' 'R2'
            Terms go_term.molecular_function 'R1' 'R2'
            Terms pathway 'R1' 'R2'
            Terms curated_set 'R1' 'R2'
    ");
}

#[test]
fn gene_sets_reuse_enclosing_scope() {
    insta::assert_snapshot!(with_gene_sets("nested(gene,eq(gene.goTermId,'GO:1'))", DocType::DonorCentric), @r"
    Query
      Filter
        Nested gene avg
          Bool
            Must
              Bool
                Should
                  Term gene.go_term.cellular_component 'GO:1'
                  Term gene.go_term.biological_process 'GO:1'
                  Term gene.go_term.molecular_function 'GO:1'
    ");
}
