//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so commands compose the same
//! definitions.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};
use pql_core::DocType;

use super::ColorChoice;

/// Query file (positional). `-` reads stdin.
pub fn query_path_arg() -> Arg {
    Arg::new("query_path")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .conflicts_with("query_text")
        .help("Query file, or - for stdin")
}

/// Inline query text (-q/--query).
pub fn query_text_arg() -> Arg {
    Arg::new("query_text")
        .short('q')
        .long("query")
        .value_name("TEXT")
        .help("Inline query text")
}

/// Document type (-t/--type).
pub fn doc_type_arg() -> Arg {
    Arg::new("type")
        .short('t')
        .long("type")
        .value_name("TYPE")
        .value_parser(|s: &str| s.parse::<DocType>())
        .help("Document type (see `pql types`)")
}

/// Index name (--index).
pub fn index_arg() -> Arg {
    Arg::new("index")
        .long("index")
        .value_name("NAME")
        .default_value("icgc")
        .help("Index to search")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(value_parser!(ColorChoice))
        .help("Colorize diagnostics")
}

/// Show the concrete syntax tree (--cst).
pub fn cst_arg() -> Arg {
    Arg::new("cst")
        .long("cst")
        .action(ArgAction::SetTrue)
        .help("Show the concrete syntax tree instead of the canonical query")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .global(true)
        .help("Verbosity level (-v for debug logs, -vv for everything)")
}
