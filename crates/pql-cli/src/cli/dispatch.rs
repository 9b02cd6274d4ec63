//! Turns `ArgMatches` into the typed arguments each command runs with.

use std::path::PathBuf;

use clap::ArgMatches;
use pql_core::DocType;

use super::ColorChoice;
use crate::commands::ast::AstArgs;
use crate::commands::check::CheckArgs;
use crate::commands::compile::CompileArgs;
use crate::commands::filter::FilterArgs;
use crate::commands::query_loader::QuerySource;

fn source(m: &ArgMatches) -> QuerySource {
    QuerySource {
        path: m.get_one::<PathBuf>("query_path").cloned(),
        text: m.get_one::<String>("query_text").cloned(),
    }
}

fn doc_type(m: &ArgMatches) -> Option<DocType> {
    m.get_one::<DocType>("type").copied()
}

pub struct CompileParams {
    pub query: QuerySource,
    pub doc_type: DocType,
    pub index: String,
    pub compact: bool,
}

impl CompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query: source(m),
            doc_type: doc_type(m).unwrap_or(DocType::DonorCentric),
            index: m
                .get_one::<String>("index")
                .map_or_else(|| "icgc".to_owned(), Clone::clone),
            compact: m.get_flag("compact"),
        }
    }
}

impl From<CompileParams> for CompileArgs {
    fn from(p: CompileParams) -> Self {
        Self {
            query: p.query,
            doc_type: p.doc_type,
            index: p.index,
            compact: p.compact,
        }
    }
}

pub struct CheckParams {
    pub query: QuerySource,
    pub doc_type: Option<DocType>,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query: source(m),
            doc_type: doc_type(m),
            color: m.get_one::<ColorChoice>("color").copied().unwrap_or_default(),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            query: p.query,
            doc_type: p.doc_type,
            color: p.color.enabled(),
        }
    }
}

pub struct AstParams {
    pub query: QuerySource,
    pub cst: bool,
}

impl AstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query: source(m),
            cst: m.get_flag("cst"),
        }
    }
}

impl From<AstParams> for AstArgs {
    fn from(p: AstParams) -> Self {
        Self {
            query: p.query,
            cst: p.cst,
        }
    }
}

pub struct FilterParams {
    pub filter: QuerySource,
    pub doc_type: DocType,
}

impl FilterParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            filter: source(m),
            // `filter` marks the type as required
            doc_type: doc_type(m).unwrap_or(DocType::DonorCentric),
        }
    }
}

impl From<FilterParams> for FilterArgs {
    fn from(p: FilterParams) -> Self {
        Self {
            filter: p.filter,
            doc_type: p.doc_type,
        }
    }
}
