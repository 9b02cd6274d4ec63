use indexmap::IndexMap;

use super::strings;
use crate::field::{
    FieldModel, array_of_strings, boolean, double, identifiable_string, long,
    nested_array_of_objects, object, string,
};
use crate::model::{
    BIOLOGICAL_PROCESS, CELLULAR_COMPONENT, GENE_GO_TERM, GENE_GO_TERM_ID, GENE_LOCATION,
    GENE_SET_ID, LOOKUP_TYPE, MOLECULAR_FUNCTION, MUTATION_LOCATION, SCORE, TypeModelDef,
};
use crate::DocType;

pub(super) fn definition() -> TypeModelDef {
    TypeModelDef {
        doc_type: DocType::DonorCentric,
        prefix: "donor".to_owned(),
        fields: fields(),
        facets: strings(&[
            "projectId",
            "primarySite",
            "gender",
            "tumourStageAtDiagnosis",
            "vitalStatus",
            "diseaseStatusLastFollowup",
            "relapseType",
            "ageAtDiagnosisGroup",
            "availableDataTypes",
            "analysisTypes",
            "projectName",
            "studies",
            "state",
        ]),
        public_fields: strings(&[
            "id",
            "submittedDonorId",
            "projectId",
            "primarySite",
            "projectName",
            "tumourType",
            "tumourSubtype",
            "ssmCount",
            "cnsmExists",
            "stsmExists",
            "sgvExists",
            "pexpExists",
            "mirnaSeqExists",
            "methSeqExists",
            "methArrayExists",
            "expSeqExists",
            "expArrayExists",
            "jcnExists",
            "ageAtDiagnosis",
            "ageAtDiagnosisGroup",
            "ageAtEnrollment",
            "ageAtLastFollowup",
            "diagnosisIcd10",
            "diseaseStatusLastFollowup",
            "intervalOfLastFollowup",
            "gender",
            "vitalStatus",
            "tumourStageAtDiagnosis",
            "tumourStagingSystemAtDiagnosis",
            "tumourStageAtDiagnosisSupplemental",
            "relapseType",
            "relapseInterval",
            "survivalTime",
            "availableDataTypes",
            "analysisTypes",
            "studies",
            "ssmAffectedGenes",
            "state",
            "priorMalignancy",
            "cancerTypePriorMalignancy",
            "cancerHistoryFirstDegreeRelative",
        ]),
        include_fields: Vec::new(),
        internal_aliases: IndexMap::from([
            (BIOLOGICAL_PROCESS.to_owned(), "gene.go_term.biological_process".to_owned()),
            (CELLULAR_COMPONENT.to_owned(), "gene.go_term.cellular_component".to_owned()),
            (MOLECULAR_FUNCTION.to_owned(), "gene.go_term.molecular_function".to_owned()),
            (LOOKUP_TYPE.to_owned(), "donor-ids".to_owned()),
        ]),
    }
}

fn fields() -> Vec<FieldModel> {
    vec![
        identifiable_string("_donor_id").alias("id"),
        string("_project_id"),
        summary(),
        string("disease_status_last_followup").alias("diseaseStatusLastFollowup"),
        long("donor_age_at_diagnosis").alias("ageAtDiagnosis"),
        long("donor_age_at_enrollment").alias("ageAtEnrollment"),
        long("donor_age_at_last_followup").alias("ageAtLastFollowup"),
        string("donor_diagnosis_icd10").alias("diagnosisIcd10"),
        string("donor_id").alias("submittedDonorId"),
        long("donor_interval_of_last_followup").alias("intervalOfLastFollowup"),
        long("donor_relapse_interval").alias("relapseInterval"),
        string("donor_relapse_type").alias("relapseType"),
        string("donor_sex").alias("gender"),
        long("donor_survival_time").alias("survivalTime"),
        string("donor_tumour_stage_at_diagnosis").alias("tumourStageAtDiagnosis"),
        string("donor_tumour_stage_at_diagnosis_supplemental").alias("tumourStageAtDiagnosisSupplemental"),
        string("donor_tumour_staging_system_at_diagnosis").alias("tumourStagingSystemAtDiagnosis"),
        string("donor_vital_status").alias("vitalStatus"),
        gene(),
        project(),
        // placeholders expanded by the transformer
        string(GENE_GO_TERM_ID).alias(GENE_GO_TERM_ID),
        string(GENE_SET_ID).alias(GENE_SET_ID),
        string(GENE_LOCATION).alias(GENE_LOCATION),
        string(MUTATION_LOCATION).alias(MUTATION_LOCATION),
        string(SCORE).aliases(&[SCORE, "ssmAffectedGenes"]),
        string("prior_malignancy").alias("priorMalignancy"),
        string("cancer_type_prior_malignancy").alias("cancerTypePriorMalignancy"),
        string("cancer_history_first_degree_relative").alias("cancerHistoryFirstDegreeRelative"),
    ]
}

fn summary() -> FieldModel {
    object(
        "_summary",
        vec![
            long("_affected_gene_count"),
            string("_age_at_diagnosis_group").alias("ageAtDiagnosisGroup"),
            array_of_strings("_available_data_type").alias("availableDataTypes"),
            boolean("_cngv_exists"),
            boolean("_cnsm_exists").alias("cnsmExists"),
            boolean("_exp_array_exists").alias("expArrayExists"),
            boolean("_exp_seq_exists").alias("expSeqExists"),
            boolean("_jcn_exists").alias("jcnExists"),
            boolean("_meth_array_exists").alias("methArrayExists"),
            boolean("_meth_seq_exists").alias("methSeqExists"),
            boolean("_mirna_seq_exists").alias("mirnaSeqExists"),
            boolean("_pexp_exists").alias("pexpExists"),
            boolean("_sgv_exists").alias("sgvExists"),
            long("_ssm_count").alias("ssmCount"),
            boolean("_stgv_exists"),
            boolean("_stsm_exists").alias("stsmExists"),
            string("_state").alias("state"),
            array_of_strings("_studies").alias("studies"),
            array_of_strings("experimental_analysis_performed").alias("analysisTypes"),
            object(
                "experimental_analysis_performed_sample_count",
                vec![
                    long("AMPLICON"),
                    long("Bisulfite-Seq"),
                    long("RNA-Seq"),
                    long("WGA"),
                    long("WGS"),
                    long("WXS"),
                    long("miRNA-Seq"),
                    long("non-NGS"),
                ],
            ),
            array_of_strings("repository"),
        ],
    )
}

fn gene() -> FieldModel {
    nested_array_of_objects(
        "gene",
        vec![
            identifiable_string("_gene_id").alias("gene.id"),
            object("_summary", vec![long("_ssm_count")]),
            string("biotype").alias("gene.type"),
            string("chromosome").alias("gene.chromosome"),
            long("end").alias("gene.end"),
            long("start").alias("gene.start"),
            string("symbol").alias("gene.symbol"),
            array_of_strings("pathway").aliases(&["gene.pathways", "gene.pathwayId"]),
            array_of_strings("curated_set").alias("gene.curatedSetId"),
            array_of_strings("drug").alias("gene.compoundId"),
            go_term(),
            nested_array_of_objects("ssm", ssm()),
        ],
    )
}

fn go_term() -> FieldModel {
    object(
        "go_term",
        vec![
            array_of_strings("biological_process"),
            array_of_strings("cellular_component"),
            array_of_strings("molecular_function"),
        ],
    )
    .alias(GENE_GO_TERM)
}

fn ssm() -> Vec<FieldModel> {
    vec![
        identifiable_string("_mutation_id").alias("mutation.id"),
        string("_type"),
        string("chromosome").alias("mutation.chromosome"),
        long("chromosome_end").alias("mutation.end"),
        long("chromosome_start").alias("mutation.start"),
        nested_array_of_objects(
            "consequence",
            vec![
                string("consequence_type").alias("mutation.consequenceType"),
                string("functional_impact_prediction_summary").alias("mutation.functionalImpact"),
            ],
        ),
        string("mutation_type").alias("mutation.type"),
        nested_array_of_objects("observation", observation()),
    ]
}

fn observation() -> Vec<FieldModel> {
    vec![
        string("_matched_sample_id"),
        string("_sample_id"),
        string("_specimen_id"),
        string("alignment_algorithm"),
        string("analysis_id"),
        string("analyzed_sample_id"),
        string("base_calling_algorithm"),
        string("biological_validation_platform"),
        string("biological_validation_status"),
        string("experimental_protocol"),
        string("marking"),
        string("matched_sample_id"),
        long("mutant_allele_read_count"),
        string("observation_id"),
        string("other_analysis_algorithm"),
        string("platform").alias("mutation.platform"),
        double("probability"),
        double("quality_score"),
        string("raw_data_accession"),
        string("raw_data_repository"),
        double("seq_coverage"),
        string("sequencing_strategy").alias("mutation.sequencingStrategy"),
        long("total_read_count"),
        string("variation_calling_algorithm"),
        string("verification_platform"),
        string("verification_status").alias("mutation.verificationStatus"),
    ]
}

fn project() -> FieldModel {
    object(
        "project",
        vec![
            string("_project_id").alias("projectId"),
            string("primary_site").alias("primarySite"),
            string("project_name").alias("projectName"),
            string("tumour_type").alias("tumourType"),
            string("tumour_subtype").alias("tumourSubtype"),
        ],
    )
}
