use indexmap::IndexMap;

use super::strings;
use crate::field::{
    FieldModel, array_of_strings, identifiable_string, long, nested_array_of_objects, object, string,
};
use crate::model::{
    BIOLOGICAL_PROCESS, CELLULAR_COMPONENT, GENE_GO_TERM, GENE_GO_TERM_ID, GENE_LOCATION,
    GENE_SET_ID, LOOKUP_TYPE, MOLECULAR_FUNCTION, MUTATION_LOCATION, SCORE, TypeModelDef,
};
use crate::DocType;

pub(super) fn definition() -> TypeModelDef {
    TypeModelDef {
        doc_type: DocType::MutationCentric,
        prefix: "mutation".to_owned(),
        fields: fields(),
        facets: strings(&[
            "type",
            "consequenceType",
            "platform",
            "verificationStatus",
            "functionalImpact",
            "sequencingStrategy",
        ]),
        public_fields: strings(&[
            "id",
            "mutation",
            "type",
            "chromosome",
            "start",
            "end",
            "affectedDonorCountTotal",
            "testedDonorCount",
            "consequenceType",
            "platform",
            "verificationStatus",
            "assemblyVersion",
            "referenceGenomeAllele",
            "affectedProjectCount",
            "affectedProjectIds",
            "affectedDonorCountFiltered",
            "transcriptId",
            "functionalImpact",
            "mutation.location",
            "sequencingStrategy",
        ]),
        include_fields: strings(&["transcript", "ssm_occurrence"]),
        internal_aliases: IndexMap::from([
            (BIOLOGICAL_PROCESS.to_owned(), "transcript.gene.go_term.biological_process".to_owned()),
            (CELLULAR_COMPONENT.to_owned(), "transcript.gene.go_term.cellular_component".to_owned()),
            (MOLECULAR_FUNCTION.to_owned(), "transcript.gene.go_term.molecular_function".to_owned()),
            (LOOKUP_TYPE.to_owned(), "mutation-ids".to_owned()),
        ]),
    }
}

fn fields() -> Vec<FieldModel> {
    vec![
        string("assembly_version").alias("assemblyVersion"),
        string("chromosome").aliases(&["chromosome", "mutation.chromosome"]),
        long("chromosome_start").aliases(&["start", "mutation.start"]),
        long("chromosome_end").aliases(&["end", "mutation.end"]),
        identifiable_string("_mutation_id").alias("id"),
        string("mutation").alias("mutation"),
        string("mutation_type").alias("type"),
        string("reference_genome_allele").alias("referenceGenomeAllele"),
        occurrence(),
        transcript(),
        object(
            "_summary",
            vec![
                long("_affected_donor_count").alias("affectedDonorCountTotal"),
                long("_tested_donor_count").alias("testedDonorCount"),
                long("_affected_project_count").alias("affectedProjectCount"),
                array_of_strings("_affected_project_ids").alias("affectedProjectIds"),
            ],
        ),
        // placeholders expanded by the transformer
        string(GENE_GO_TERM_ID).alias(GENE_GO_TERM_ID),
        string(GENE_SET_ID).alias(GENE_SET_ID),
        string(GENE_LOCATION).alias(GENE_LOCATION),
        string(MUTATION_LOCATION).alias(MUTATION_LOCATION),
        string(SCORE).aliases(&[SCORE, "affectedDonorCountFiltered"]),
    ]
}

fn occurrence() -> FieldModel {
    nested_array_of_objects(
        "ssm_occurrence",
        vec![
            object(
                "donor",
                vec![
                    identifiable_string("_donor_id").alias("donor.id"),
                    string("donor_sex").alias("donor.gender"),
                    string("donor_tumour_stage_at_diagnosis").alias("donor.tumourStageAtDiagnosis"),
                    string("donor_vital_status").alias("donor.vitalStatus"),
                    string("disease_status_last_followup").alias("donor.diseaseStatusLastFollowup"),
                    string("donor_relapse_type").alias("donor.relapseType"),
                    object(
                        "_summary",
                        vec![
                            string("_age_at_diagnosis_group").alias("donor.ageAtDiagnosisGroup"),
                            string("_state").alias("donor.state"),
                            array_of_strings("_available_data_type").alias("donor.availableDataTypes"),
                            array_of_strings("_studies").alias("donor.studies"),
                            array_of_strings("experimental_analysis_performed").alias("donor.analysisTypes"),
                        ],
                    ),
                ],
            ),
            object(
                "project",
                vec![
                    string("_project_id").alias("donor.projectId"),
                    string("primary_site").alias("donor.primarySite"),
                    string("project_name").alias("donor.projectName"),
                ],
            ),
            nested_array_of_objects(
                "observation",
                vec![
                    string("platform").alias("platform"),
                    string("verification_status").alias("verificationStatus"),
                    string("sequencing_strategy").alias("sequencingStrategy"),
                ],
            ),
        ],
    )
    .alias("occurrences")
}

fn transcript() -> FieldModel {
    nested_array_of_objects(
        "transcript",
        vec![
            string("id").alias("transcriptId"),
            string("functional_impact_prediction_summary").alias("functionalImpact"),
            object("consequence", vec![string("consequence_type").alias("consequenceType")]),
            object(
                "gene",
                vec![
                    identifiable_string("_gene_id").alias("gene.id"),
                    string("biotype").alias("gene.type"),
                    string("chromosome").alias("gene.chromosome"),
                    long("end").alias("gene.end"),
                    long("start").alias("gene.start"),
                    string("symbol").alias("gene.symbol"),
                    array_of_strings("pathway").alias("gene.pathwayId"),
                    array_of_strings("curated_set").alias("gene.curatedSetId"),
                    array_of_strings("drug").alias("gene.compoundId"),
                    object(
                        "go_term",
                        vec![
                            array_of_strings("biological_process"),
                            array_of_strings("cellular_component"),
                            array_of_strings("molecular_function"),
                        ],
                    )
                    .alias(GENE_GO_TERM),
                ],
            ),
        ],
    )
    .aliases(&["transcripts", "consequences"])
}
