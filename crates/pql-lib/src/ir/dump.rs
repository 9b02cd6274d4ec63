//! Indented text form of the IR, used in logs, errors and tests.

use std::fmt::Write as _;

use super::nodes::{Aggregation, Expr, Root};

impl Expr {
    pub fn dump(&self) -> String {
        let mut out = String::new();
        dump_expr(self, 0, &mut out);
        out
    }
}

impl Aggregation {
    pub fn dump(&self) -> String {
        let mut out = String::new();
        dump_aggregation(self, 0, &mut out);
        out
    }
}

impl Root {
    pub fn dump(&self) -> String {
        let mut out = String::from("Root\n");
        if self.count {
            out.push_str("  count\n");
        }
        if !self.fields.is_empty() {
            writeln!(out, "  fields: {}", self.fields.join(", ")).unwrap();
        }
        if !self.source.is_empty() {
            writeln!(out, "  source: {}", self.source.join(", ")).unwrap();
        }
        if let Some(query) = &self.query {
            dump_expr(query, 1, &mut out);
        }
        if let Some(post_filter) = &self.post_filter {
            out.push_str("  PostFilter\n");
            dump_expr(post_filter, 2, &mut out);
        }
        if !self.aggregations.is_empty() {
            out.push_str("  Aggregations\n");
            for aggregation in &self.aggregations {
                dump_aggregation(aggregation, 2, &mut out);
            }
        }
        if !self.sort.is_empty() {
            let sort: Vec<String> = self
                .sort
                .iter()
                .map(|(field, order)| format!("{}{field}", order.sign()))
                .collect();
            writeln!(out, "  sort: {}", sort.join(", ")).unwrap();
        }
        if let Some(limit) = self.limit {
            writeln!(out, "  limit: {}, {}", limit.from, limit.size).unwrap();
        }
        out
    }
}

fn dump_expr(expr: &Expr, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    write!(out, "{indent}{}", expr.name()).unwrap();

    match expr {
        Expr::Term { field, value } => write!(out, " {field} {value}").unwrap(),
        Expr::Terms { field, values } => {
            write!(out, " {field}").unwrap();
            for value in values {
                write!(out, " {value}").unwrap();
            }
        }
        Expr::TermsLookup { field, lookup } => write!(
            out,
            " {field} {}/{}/{} {}",
            lookup.index, lookup.doc_type, lookup.id, lookup.path
        )
        .unwrap(),
        Expr::Range { field, bounds } => {
            write!(out, " {field}").unwrap();
            for bound in bounds {
                write!(out, " {} {}", bound.op.as_str(), bound.value).unwrap();
            }
        }
        Expr::Exists { field } | Expr::Missing { field } => write!(out, " {field}").unwrap(),
        Expr::Nested { path, score_mode, .. } => write!(out, " {path} {}", score_mode.as_str()).unwrap(),
        Expr::FunctionScore { script, .. } => write!(out, " {script:?}").unwrap(),
        _ => {}
    }
    out.push('\n');

    for child in expr.children() {
        dump_expr(child, depth + 1, out);
    }
}

fn dump_aggregation(aggregation: &Aggregation, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match aggregation {
        Aggregation::Terms { name, field, .. } => writeln!(out, "{indent}Terms {name} {field}").unwrap(),
        Aggregation::Missing { name, field, .. } => writeln!(out, "{indent}Missing {name} {field}").unwrap(),
        Aggregation::Filter { name, filter, .. } => {
            writeln!(out, "{indent}Filter {name}").unwrap();
            dump_expr(filter, depth + 1, out);
        }
        Aggregation::Nested { name, path, .. } => writeln!(out, "{indent}Nested {name} {path}").unwrap(),
        Aggregation::ReverseNested { name } => writeln!(out, "{indent}ReverseNested {name}").unwrap(),
    }

    for child in aggregation.children() {
        dump_aggregation(child, depth + 1, out);
    }
}
