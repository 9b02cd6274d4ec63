use pql_core::{DocType, type_model};

use super::nested::resolve;
use crate::ast::Statement;
use crate::lower::lower;

fn resolved(source: &str, doc_type: DocType) -> String {
    let statement = Statement::parse(source).unwrap();
    let query = lower(&statement, type_model(doc_type)).unwrap().query.unwrap();
    resolve(query, type_model(doc_type)).dump()
}

#[test]
fn each_nested_predicate_gets_its_scope() {
    insta::assert_snapshot!(
        resolved("and(eq(gender,'male'),eq(gene.symbol,'TP53'),eq(mutation.type,'single base substitution'))", DocType::DonorCentric),
        @r"
    Query
      Filter
        Bool
          Must
            Term donor_sex 'male'
            Nested gene avg
              Term gene.symbol 'TP53'
            Nested gene.ssm avg
              Term gene.ssm.mutation_type 'single base substitution'
    "
    );
}

#[test]
fn negation_wraps_the_scope() {
    insta::assert_snapshot!(resolved("ne(donor.gender,'female')", DocType::GeneCentric), @r"
    Query
      Filter
        Not
          Nested donor avg
            Term donor.donor_sex 'female'
    ");
}

#[test]
fn deeper_fields_get_a_scope_inside_user_scopes() {
    insta::assert_snapshot!(resolved("nested(gene,eq(mutation.type,'x'))", DocType::DonorCentric), @r"
    Query
      Filter
        Nested gene avg
          Bool
            Must
              Nested gene.ssm avg
                Term gene.ssm.mutation_type 'x'
    ");
}

#[test]
fn fields_at_the_scope_path_stay_inside_it() {
    insta::assert_snapshot!(resolved("nested(gene,eq(gene.symbol,'TP53'))", DocType::DonorCentric), @r"
    Query
      Filter
        Nested gene avg
          Bool
            Must
              Term gene.symbol 'TP53'
    ");
}

#[test]
fn top_level_fields_stay_flat() {
    insta::assert_snapshot!(resolved("in(id,'DO1','DO2')", DocType::DonorCentric), @r"
    Query
      Filter
        Terms _donor_id 'DO1' 'DO2'
    ");
}
