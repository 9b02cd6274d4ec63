//! Show the canonical form or the CST of a query.

use pql::Statement;
use pql::ast::serialize;
use pql::parser::{self, dump_cst};

use super::query_loader::QuerySource;

pub struct AstArgs {
    pub query: QuerySource,
    pub cst: bool,
}

pub fn run(args: AstArgs) {
    let source = args.query.load_or_exit();

    if args.cst {
        print_cst(&source);
    } else {
        print_canonical(&source);
    }
}

fn print_cst(source: &str) {
    let result = match parser::parse(source) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    // The CST is lossless; show it even when recovery kicked in
    if !result.diagnostics.is_empty() {
        eprint!("{}", result.diagnostics.render_filtered(source));
    }
    print!("{}", dump_cst(result.root.as_cst()));
}

fn print_canonical(source: &str) {
    match Statement::parse(source) {
        Ok(statement) => println!("{}", serialize(&statement)),
        Err(pql::Error::Syntax(diagnostics)) => {
            eprint!("{}", diagnostics.render_filtered(source));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
