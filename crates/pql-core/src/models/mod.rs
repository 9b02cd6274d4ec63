//! Built-in schemas of the portal document types.
//!
//! Each model is built once on first use and shared read-only afterwards.

use std::sync::LazyLock;

use crate::invariants::ensure_builtin;
use crate::{DocType, TypeModel};

mod donor;
mod file;
mod gene;
mod mutation;
mod project;

static DONOR_CENTRIC: LazyLock<TypeModel> = LazyLock::new(|| ensure_builtin(TypeModel::new(donor::definition())));
static GENE_CENTRIC: LazyLock<TypeModel> = LazyLock::new(|| ensure_builtin(TypeModel::new(gene::definition())));
static MUTATION_CENTRIC: LazyLock<TypeModel> =
    LazyLock::new(|| ensure_builtin(TypeModel::new(mutation::definition())));
static PROJECT: LazyLock<TypeModel> = LazyLock::new(|| ensure_builtin(TypeModel::new(project::definition())));
static FILE: LazyLock<TypeModel> = LazyLock::new(|| ensure_builtin(TypeModel::new(file::definition())));

pub fn type_model(doc_type: DocType) -> &'static TypeModel {
    match doc_type {
        DocType::DonorCentric => &DONOR_CENTRIC,
        DocType::GeneCentric => &GENE_CENTRIC,
        DocType::MutationCentric => &MUTATION_CENTRIC,
        DocType::Project => &PROJECT,
        DocType::File => &FILE,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}
