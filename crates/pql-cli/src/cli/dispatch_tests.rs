//! Tests for CLI dispatch: argument parsing and params extraction.

use std::path::PathBuf;

use pql_core::DocType;

use super::*;
use crate::cli::commands::{ast_command, check_command, compile_command, filter_command};

#[test]
fn compile_defaults() {
    let m = compile_command()
        .try_get_matches_from(["compile", "-q", "count()"])
        .unwrap();
    let params = CompileParams::from_matches(&m);

    assert_eq!(params.query.text.as_deref(), Some("count()"));
    assert_eq!(params.query.path, None);
    assert_eq!(params.doc_type, DocType::DonorCentric);
    assert_eq!(params.index, "icgc");
    assert!(!params.compact);
}

#[test]
fn compile_accepts_both_type_spellings() {
    for spelling in ["gene_centric", "gene-centric", "Gene-Centric"] {
        let m = compile_command()
            .try_get_matches_from(["compile", "-t", spelling, "query.pql"])
            .unwrap();
        let params = CompileParams::from_matches(&m);
        assert_eq!(params.doc_type, DocType::GeneCentric);
        assert_eq!(params.query.path, Some(PathBuf::from("query.pql")));
    }
}

#[test]
fn compile_rejects_unknown_type() {
    let result = compile_command().try_get_matches_from(["compile", "-t", "sample", "-q", "count()"]);
    assert!(result.is_err());
}

#[test]
fn compile_with_index_and_compact() {
    let m = compile_command()
        .try_get_matches_from(["compile", "--index", "icgc27", "--compact", "-"])
        .unwrap();
    let params = CompileParams::from_matches(&m);

    assert_eq!(params.index, "icgc27");
    assert!(params.compact);
    assert_eq!(params.query.path, Some(PathBuf::from("-")));
}

#[test]
fn query_text_and_path_conflict() {
    let result = compile_command().try_get_matches_from(["compile", "query.pql", "-q", "count()"]);
    assert!(result.is_err());
}

#[test]
fn check_type_is_optional() {
    let m = check_command()
        .try_get_matches_from(["check", "query.pql"])
        .unwrap();
    let params = CheckParams::from_matches(&m);
    assert_eq!(params.doc_type, None);
    assert_eq!(params.color, ColorChoice::Auto);

    let m = check_command()
        .try_get_matches_from(["check", "-t", "project", "--color", "never", "query.pql"])
        .unwrap();
    let params = CheckParams::from_matches(&m);
    assert_eq!(params.doc_type, Some(DocType::Project));
    assert_eq!(params.color, ColorChoice::Never);
}

#[test]
fn ast_cst_flag() {
    let m = ast_command()
        .try_get_matches_from(["ast", "-q", "eq(a,1)", "--cst"])
        .unwrap();
    let params = AstParams::from_matches(&m);
    assert!(params.cst);
    assert_eq!(params.query.text.as_deref(), Some("eq(a,1)"));
}

#[test]
fn filter_requires_type() {
    let result = filter_command().try_get_matches_from(["filter", "-q", "{}"]);
    assert!(result.is_err());

    let m = filter_command()
        .try_get_matches_from(["filter", "-t", "mutation-centric", "filters.json"])
        .unwrap();
    let params = FilterParams::from_matches(&m);
    assert_eq!(params.doc_type, DocType::MutationCentric);
    assert_eq!(params.filter.path, Some(PathBuf::from("filters.json")));
}

#[test]
fn verbosity_is_global() {
    let m = build_cli()
        .try_get_matches_from(["pql", "compile", "-vv", "-q", "count()"])
        .unwrap();
    assert_eq!(m.get_count("verbose"), 2);

    let m = build_cli().try_get_matches_from(["pql", "-v", "types"]).unwrap();
    assert_eq!(m.get_count("verbose"), 1);
}

#[test]
fn subcommand_is_required() {
    assert!(build_cli().try_get_matches_from(["pql"]).is_err());
}
