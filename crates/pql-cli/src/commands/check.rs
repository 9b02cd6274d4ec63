use pql::ast::StatementParser;
use pql::{Error, QueryEngine};
use pql_core::DocType;

use super::query_loader::QuerySource;

pub struct CheckArgs {
    pub query: QuerySource,
    pub doc_type: Option<DocType>,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let source = args.query.load_or_exit();

    let statement = match StatementParser::new(&source).parse() {
        Ok((statement, diagnostics)) => {
            if diagnostics.has_errors() || diagnostics.has_warnings() {
                eprint!("{}", diagnostics.render_filtered_colored(&source, args.color));
            }
            if diagnostics.has_errors() {
                std::process::exit(1);
            }
            statement
        }
        Err(Error::Syntax(diagnostics)) => {
            eprint!("{}", diagnostics.render_filtered_colored(&source, args.color));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    // Field names only resolve against a type
    if let Some(doc_type) = args.doc_type
        && let Err(e) = QueryEngine::new("icgc").execute(&statement, doc_type)
    {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
