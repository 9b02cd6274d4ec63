use std::fmt::Write;

use pql::ScoringConfig;
use pql_core::{DocType, type_model};

pub fn run() {
    print!("{}", render());
}

/// One row per type: id, alias prefix, scoring path.
pub fn render() -> String {
    let mut out = String::new();
    writeln!(out, "{:<18}{:<10}SCORED ON", "TYPE", "PREFIX").unwrap();
    for doc_type in DocType::ALL {
        let scoring = ScoringConfig::for_type(doc_type);
        let scored_on = scoring.as_ref().map_or("-", |config| config.path.as_str());
        writeln!(
            out,
            "{:<18}{:<10}{}",
            doc_type.id(),
            type_model(doc_type).prefix(),
            scored_on
        )
        .unwrap();
    }
    out
}
