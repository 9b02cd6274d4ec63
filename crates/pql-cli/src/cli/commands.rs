//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("pql")
        .about("Portal Query Language compiler")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(compile_command())
        .subcommand(check_command())
        .subcommand(ast_command())
        .subcommand(filter_command())
        .subcommand(types_command())
}

/// Compile a query into a search request.
pub fn compile_command() -> Command {
    Command::new("compile")
        .about("Compile a query into a search request")
        .override_usage(
            "\
  pql compile [-t <TYPE>] <FILE>
  pql compile [-t <TYPE>] -q <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  pql compile -q "eq(gender,'male'),select(id)"
  pql compile -t gene-centric -q 'facets(type),limit(10)'
  pql compile -t mutation-centric query.pql --compact
  echo 'count()' | pql compile -"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(doc_type_arg().default_value("donor-centric"))
        .arg(index_arg())
        .arg(compact_arg())
}

/// Validate a query.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate a query")
        .override_usage(
            "\
  pql check [-t <TYPE>] <FILE>
  pql check [-t <TYPE>] -q <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  pql check query.pql                   # syntax only
  pql check -t donor-centric query.pql  # also resolve field names
  pql check -q 'eq(gender'"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(doc_type_arg())
        .arg(color_arg())
}

/// Show the parsed form of a query.
pub fn ast_command() -> Command {
    Command::new("ast")
        .about("Show the canonical form or the syntax tree of a query")
        .override_usage(
            "\
  pql ast <FILE> [--cst]
  pql ast -q <TEXT> [--cst]",
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(cst_arg())
}

/// Rewrite a JSON filter into PQL.
pub fn filter_command() -> Command {
    Command::new("filter")
        .about("Rewrite a portal JSON filter into a PQL filter")
        .override_usage(
            "\
  pql filter -t <TYPE> <FILE>
  pql filter -t <TYPE> -q <JSON>",
        )
        .after_help(
            r#"EXAMPLES:
  pql filter -t gene-centric -q '{"donor":{"gender":{"is":["male"]}}}'"#,
        )
        .arg(query_path_arg().help("JSON filter file, or - for stdin"))
        .arg(query_text_arg().help("Inline JSON filter"))
        .arg(doc_type_arg().required(true))
}

/// List the supported document types.
pub fn types_command() -> Command {
    Command::new("types").about("List supported document types")
}
