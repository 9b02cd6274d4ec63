use indexmap::IndexMap;

use super::strings;
use crate::field::{
    FieldModel, array_of_objects, array_of_strings, identifiable_string, long,
    nested_array_of_objects, object, string,
};
use crate::model::{
    BIOLOGICAL_PROCESS, CELLULAR_COMPONENT, GENE_GO_TERM, GENE_GO_TERM_ID, GENE_LOCATION,
    GENE_SET_ID, LOOKUP_TYPE, MOLECULAR_FUNCTION, MUTATION_LOCATION, SCORE, TypeModelDef,
};
use crate::DocType;

pub(super) fn definition() -> TypeModelDef {
    TypeModelDef {
        doc_type: DocType::GeneCentric,
        prefix: "gene".to_owned(),
        fields: fields(),
        facets: strings(&["type"]),
        public_fields: strings(&[
            "id",
            "symbol",
            "name",
            "type",
            "chromosome",
            "start",
            "end",
            "strand",
            "description",
            "synonyms",
            "externalDbIds",
            "affectedDonorCountTotal",
            "affectedDonorCountFiltered",
            "affectedTranscriptIds",
            "gene.location",
            "pathwayId",
            "pathways",
            "sets",
        ]),
        include_fields: strings(&["transcripts", "external_db_ids", "project"]),
        internal_aliases: IndexMap::from([
            (BIOLOGICAL_PROCESS.to_owned(), "go_term.biological_process".to_owned()),
            (CELLULAR_COMPONENT.to_owned(), "go_term.cellular_component".to_owned()),
            (MOLECULAR_FUNCTION.to_owned(), "go_term.molecular_function".to_owned()),
            (LOOKUP_TYPE.to_owned(), "gene-ids".to_owned()),
        ]),
    }
}

fn fields() -> Vec<FieldModel> {
    vec![
        identifiable_string("_gene_id").alias("id"),
        string("symbol").alias("symbol"),
        string("name").alias("name"),
        string("biotype").alias("type"),
        string("chromosome").aliases(&["chromosome", "gene.chromosome"]),
        long("start").aliases(&["start", "gene.start"]),
        long("end").aliases(&["end", "gene.end"]),
        long("strand").alias("strand"),
        donor(),
        string("description").alias("description"),
        array_of_strings("synonyms").alias("synonyms"),
        object("external_db_ids", vec![array_of_strings("entrez_gene")]).alias("externalDbIds"),
        summary(),
        array_of_objects("project", Vec::new()).alias("projects"),
        array_of_strings("pathway").aliases(&["pathways", "pathwayId", "gene.pathwayId"]),
        array_of_strings("curated_set").aliases(&["curatedSetId", "gene.curatedSetId"]),
        array_of_strings("drug").alias("gene.compoundId"),
        array_of_objects("transcripts", Vec::new()).alias("transcripts"),
        object(
            "go_term",
            vec![
                array_of_strings("biological_process"),
                array_of_strings("cellular_component"),
                array_of_strings("molecular_function"),
            ],
        )
        .alias(GENE_GO_TERM),
        // placeholders expanded by the transformer
        string(GENE_GO_TERM_ID).alias(GENE_GO_TERM_ID),
        string(GENE_SET_ID).alias(GENE_SET_ID),
        string(GENE_LOCATION).alias(GENE_LOCATION),
        string(MUTATION_LOCATION).alias(MUTATION_LOCATION),
        string(SCORE).aliases(&[SCORE, "affectedDonorCountFiltered"]),
        array_of_objects("sets", Vec::new()).alias("sets"),
    ]
}

fn summary() -> FieldModel {
    object(
        "_summary",
        vec![
            long("_affected_donor_count").alias("affectedDonorCountTotal"),
            long("_affected_project_count"),
            array_of_strings("_affected_transcript_id").alias("affectedTranscriptIds"),
            long("_total_mutation_count"),
            long("_unique_mutation_count"),
        ],
    )
}

fn donor() -> FieldModel {
    nested_array_of_objects(
        "donor",
        vec![
            identifiable_string("_donor_id").alias("donor.id"),
            object(
                "_summary",
                vec![
                    string("_age_at_diagnosis_group").alias("donor.ageAtDiagnosisGroup"),
                    string("_available_data_type").alias("donor.availableDataTypes"),
                    string("experimental_analysis_performed").alias("donor.analysisTypes"),
                ],
            ),
            string("disease_status_last_followup").alias("donor.diseaseStatusLastFollowup"),
            string("donor_relapse_type").alias("donor.relapseType"),
            string("donor_sex").alias("donor.gender"),
            string("donor_tumour_stage_at_diagnosis").alias("donor.tumourStageAtDiagnosis"),
            string("donor_vital_status").alias("donor.vitalStatus"),
            string("_summary._state").alias("donor.state"),
            array_of_strings("_summary._studies").alias("donor.studies"),
            object(
                "project",
                vec![
                    string("_project_id").alias("donor.projectId"),
                    string("primary_site").alias("donor.primarySite"),
                    string("project_name").alias("donor.projectName"),
                ],
            ),
            ssm(),
        ],
    )
}

fn ssm() -> FieldModel {
    nested_array_of_objects(
        "ssm",
        vec![
            identifiable_string("_mutation_id").alias("mutation.id"),
            string("mutation_type").alias("mutation.type"),
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
            nested_array_of_objects(
                "observation",
                vec![
                    string("platform").alias("mutation.platform"),
                    string("sequencing_strategy").alias("mutation.sequencingStrategy"),
                    string("verification_status").alias("mutation.verificationStatus"),
                ],
            ),
        ],
    )
}
