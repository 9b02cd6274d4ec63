use super::types::render;

#[test]
fn lists_every_type() {
    insta::assert_snapshot!(render(), @r"
    TYPE              PREFIX    SCORED ON
    donor-centric     donor     gene
    gene-centric      gene      donor
    mutation-centric  mutation  ssm_occurrence
    project           project   -
    file              file      -
    ");
}
