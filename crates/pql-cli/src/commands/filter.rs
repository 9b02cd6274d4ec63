use pql::filters::rewrite_str;
use pql_core::DocType;

use super::query_loader::QuerySource;

pub struct FilterArgs {
    pub filter: QuerySource,
    pub doc_type: DocType,
}

pub fn run(args: FilterArgs) {
    let json = args.filter.load_or_exit();

    match rewrite_str(&json, args.doc_type) {
        Ok(Some(filter)) => println!("{}", filter),
        // nothing to filter on
        Ok(None) => {}
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
