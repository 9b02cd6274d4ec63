//! Builds a [`Statement`] from the parse tree.
//!
//! The grammar accepts any call with any arguments; this is where function
//! names, arity and argument kinds are checked. Problems become diagnostics
//! and the offending clause is left out. Statement shape violations (a count
//! statement with a select, say) are errors, not diagnostics.

use indexmap::IndexMap;
use rowan::TextRange;

use super::nodes::{CompareOp, Filter, Limit, NodeKind, SortOrder, Value};
use super::statement::{ALL, Statement};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::{Arg, Call, LiteralKind, Root};
use crate::{PassResult, Result};

pub fn build(root: &Root) -> PassResult<Statement> {
    let mut builder = Builder::default();
    for call in root.calls() {
        builder.clause(&call)?;
    }
    builder.finish()
}

#[derive(Default)]
struct Builder {
    statement: Statement,
    filters: Vec<Filter>,
    diagnostics: Diagnostics,
}

impl Builder {
    fn finish(mut self) -> PassResult<Statement> {
        // top-level filters are implicitly and-ed
        if let Some(filter) = Filter::all(self.filters) {
            self.statement.set_filter(filter);
        }
        Ok((self.statement, self.diagnostics))
    }

    fn clause(&mut self, call: &Call) -> Result<()> {
        let Some(name) = call.name().map(|t| t.text().to_owned()) else {
            return Ok(());
        };
        let args = call.args();

        match NodeKind::from_clause_name(&name) {
            Some(NodeKind::Count) => {
                if !args.is_empty() {
                    self.wrong_arity(call, "`count` takes no arguments");
                }
                if self.statement.is_count() {
                    self.repeated(call, &name);
                    return Ok(());
                }
                self.statement.set_count()
            }
            Some(NodeKind::Select) => match self.field_list(call, &name, &args) {
                Some(fields) => self.statement.add_select(fields),
                None => Ok(()),
            },
            Some(NodeKind::Facets) => match self.field_list(call, &name, &args) {
                Some(fields) => self.statement.add_facets(fields),
                None => Ok(()),
            },
            Some(NodeKind::Sort) => {
                let Some(sort) = self.sort_keys(call, &args) else {
                    return Ok(());
                };
                if self.statement.has_sort() {
                    self.repeated(call, &name);
                }
                self.statement.set_sort(sort)
            }
            Some(NodeKind::Limit) => {
                let Some(limit) = self.limit(call, &args) else {
                    return Ok(());
                };
                if self.statement.has_limit() {
                    self.repeated(call, &name);
                }
                self.statement.set_limit(limit)
            }
            Some(NodeKind::Filter) | None => {
                if let Some(filter) = self.filter(call) {
                    self.filters.push(filter);
                }
                Ok(())
            }
        }
    }

    fn field_list(&mut self, call: &Call, name: &str, args: &[Arg]) -> Option<Vec<String>> {
        if args.is_empty() {
            self.wrong_arity(call, format!("`{name}` takes at least one field"));
            return None;
        }

        let mut fields = Vec::with_capacity(args.len());
        let mut valid = true;
        for arg in args {
            match arg {
                Arg::FieldRef(field) => {
                    if let Some(token) = field.name() {
                        fields.push(token.text().to_owned());
                    }
                }
                Arg::AllFields(_) => fields.push(ALL.to_owned()),
                other => {
                    self.not_a_field(other);
                    valid = false;
                }
            }
        }
        valid.then_some(fields)
    }

    fn sort_keys(&mut self, call: &Call, args: &[Arg]) -> Option<IndexMap<String, SortOrder>> {
        if args.is_empty() {
            self.wrong_arity(call, "`sort` takes at least one field");
            return None;
        }

        let mut sort = IndexMap::new();
        let mut valid = true;
        for arg in args {
            match arg {
                Arg::SortKey(key) => {
                    // a missing field was already reported by the parser
                    let Some(field) = key.field() else {
                        valid = false;
                        continue;
                    };
                    let order = match key.sign().map(|t| t.text().to_owned()).as_deref() {
                        Some("-") => SortOrder::Desc,
                        _ => SortOrder::Asc,
                    };
                    sort.insert(field.text().to_owned(), order);
                }
                Arg::FieldRef(field) => {
                    if let Some(token) = field.name() {
                        sort.insert(token.text().to_owned(), SortOrder::Asc);
                    }
                }
                other => {
                    self.not_a_field(other);
                    valid = false;
                }
            }
        }
        valid.then_some(sort)
    }

    fn limit(&mut self, call: &Call, args: &[Arg]) -> Option<Limit> {
        if args.is_empty() || args.len() > 2 {
            self.wrong_arity(call, "`limit` takes a size, or a start and a size");
            return None;
        }

        let numbers: Vec<Option<u32>> = args.iter().map(|arg| self.limit_number(arg)).collect();
        match numbers[..] {
            [Some(size)] => Some(Limit::first(size)),
            [Some(from), Some(size)] => Some(Limit::new(from, size)),
            _ => None,
        }
    }

    fn limit_number(&mut self, arg: &Arg) -> Option<u32> {
        let number = match arg {
            Arg::Value(value) if value.kind() == LiteralKind::Int => value.text().parse::<u32>().ok(),
            _ => None,
        };
        if number.is_none() {
            self.diagnostics
                .report(DiagnosticKind::InvalidLimit, range_of(arg))
                .message("expected a non-negative integer")
                .emit();
        }
        number
    }

    fn filter(&mut self, call: &Call) -> Option<Filter> {
        let name_token = call.name()?;
        let name = name_token.text().to_owned();
        let args = call.args();

        if NodeKind::from_clause_name(&name).is_some() {
            self.diagnostics
                .report(DiagnosticKind::MisplacedClause, call.as_cst().text_range())
                .message(format!("`{name}` inside a filter"))
                .emit();
            return None;
        }

        match name.as_str() {
            "and" | "or" => {
                if args.is_empty() {
                    self.wrong_arity(call, format!("`{name}` takes at least one filter"));
                    return None;
                }
                let children = self.filter_args(&args)?;
                Some(if name == "and" {
                    Filter::And(children)
                } else {
                    Filter::Or(children)
                })
            }
            "not" => {
                if args.len() != 1 {
                    self.wrong_arity(call, "`not` takes exactly one filter");
                    return None;
                }
                self.filter_arg(&args[0]).map(Filter::not)
            }
            "nested" => {
                if args.len() < 2 {
                    self.wrong_arity(call, "`nested` takes a path and at least one filter");
                    return None;
                }
                let path = self.field_arg(&args[0]);
                let children = self.filter_args(&args[1..]);
                Some(Filter::nested(path?, children?))
            }
            "exists" | "missing" => {
                if args.len() != 1 {
                    self.wrong_arity(call, format!("`{name}` takes exactly one field"));
                    return None;
                }
                let field = self.field_arg(&args[0])?;
                Some(if name == "exists" {
                    Filter::exists(field)
                } else {
                    Filter::missing(field)
                })
            }
            "in" => {
                if args.len() < 2 {
                    self.wrong_arity(call, "`in` takes a field and at least one value");
                    return None;
                }
                let field = self.field_arg(&args[0]);
                let values: Vec<Option<Value>> = args[1..].iter().map(|arg| self.value_arg(arg)).collect();
                let values = values.into_iter().collect::<Option<Vec<_>>>();
                Some(Filter::In {
                    field: field?,
                    values: values?,
                })
            }
            _ => {
                let Some(op) = CompareOp::from_name(&name) else {
                    self.diagnostics
                        .report(DiagnosticKind::UnknownFunction, name_token.text_range())
                        .message(name)
                        .emit();
                    return None;
                };
                if args.len() != 2 {
                    self.wrong_arity(call, format!("`{name}` takes a field and a value"));
                    return None;
                }
                let field = self.field_arg(&args[0]);
                let value = self.value_arg(&args[1]);
                Some(Filter::compare(op, field?, value?))
            }
        }
    }

    /// Checks every argument before giving up, so all problems get reported.
    fn filter_args(&mut self, args: &[Arg]) -> Option<Vec<Filter>> {
        let children: Vec<Option<Filter>> = args.iter().map(|arg| self.filter_arg(arg)).collect();
        children.into_iter().collect()
    }

    fn filter_arg(&mut self, arg: &Arg) -> Option<Filter> {
        match arg {
            Arg::Call(call) => self.filter(call),
            _ => {
                self.diagnostics
                    .report(DiagnosticKind::ExpectedFilter, range_of(arg))
                    .emit();
                None
            }
        }
    }

    fn field_arg(&mut self, arg: &Arg) -> Option<String> {
        match arg {
            Arg::FieldRef(field) => field.name().map(|t| t.text().to_owned()),
            _ => {
                self.not_a_field(arg);
                None
            }
        }
    }

    fn value_arg(&mut self, arg: &Arg) -> Option<Value> {
        let range = range_of(arg);
        match arg {
            Arg::Value(value) => {
                let text = value.text();
                match value.kind() {
                    LiteralKind::Str => Some(Value::Str(unescape(&text))),
                    LiteralKind::Float => match text.parse::<f64>() {
                        Ok(n) if n.is_finite() => Some(Value::Float(n)),
                        _ => {
                            self.diagnostics
                                .report(DiagnosticKind::ExpectedValue, range)
                                .message("number out of range")
                                .emit();
                            None
                        }
                    },
                    LiteralKind::Int => match text.parse() {
                        Ok(n) => Some(Value::Int(n)),
                        Err(_) => {
                            self.diagnostics
                                .report(DiagnosticKind::ExpectedValue, range)
                                .message("integer out of range")
                                .emit();
                            None
                        }
                    },
                }
            }
            Arg::FieldRef(_) => {
                self.diagnostics
                    .report(DiagnosticKind::IdentifierAsValue, range)
                    .emit();
                None
            }
            _ => {
                self.diagnostics.report(DiagnosticKind::ExpectedValue, range).emit();
                None
            }
        }
    }

    fn not_a_field(&mut self, arg: &Arg) {
        let range = range_of(arg);
        let builder = match arg {
            Arg::Value(_) => self.diagnostics.report(DiagnosticKind::ValueAsField, range),
            Arg::SortKey(_) => self.diagnostics.report(DiagnosticKind::SortKeyOutsideSort, range),
            Arg::AllFields(_) => self.diagnostics.report(DiagnosticKind::StarNotAllowed, range),
            Arg::Call(_) | Arg::FieldRef(_) => self
                .diagnostics
                .report(DiagnosticKind::ExpectedFieldName, range)
                .message("found a call"),
        };
        builder.emit();
    }

    fn wrong_arity(&mut self, call: &Call, message: impl Into<String>) {
        self.diagnostics
            .report(DiagnosticKind::WrongArity, call.as_cst().text_range())
            .message(message)
            .emit();
    }

    fn repeated(&mut self, call: &Call, name: &str) {
        self.diagnostics
            .report(DiagnosticKind::RepeatedClause, call.as_cst().text_range())
            .message(name)
            .emit();
    }
}

fn range_of(arg: &Arg) -> TextRange {
    arg.as_cst().text_range()
}

/// Drops the backslash of every escape sequence.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(escaped) = chars.next()
        {
            out.push(escaped);
        } else {
            out.push(c);
        }
    }
    out
}
