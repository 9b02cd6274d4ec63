use pql::{Error, QueryEngine};
use pql_core::DocType;

use super::query_loader::QuerySource;

pub struct CompileArgs {
    pub query: QuerySource,
    pub doc_type: DocType,
    pub index: String,
    pub compact: bool,
}

pub fn run(args: CompileArgs) {
    let source = args.query.load_or_exit();

    let engine = QueryEngine::new(&args.index);
    let request = match engine.execute(source.as_str(), args.doc_type) {
        Ok(request) => request,
        Err(Error::Syntax(diagnostics)) => {
            eprint!("{}", diagnostics.render_filtered(&source));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(if e.is_internal() { 2 } else { 1 });
        }
    };

    if args.compact {
        println!("{}", request.to_json());
    } else {
        println!("{}", request.to_json_pretty());
    }
}
