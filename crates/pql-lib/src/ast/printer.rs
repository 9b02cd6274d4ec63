//! Canonical PQL text for statements and filters.
//!
//! Output parses back into an equal statement: children come in canonical
//! order, strings are single-quoted with `\` and `'` escaped, floats always
//! carry a decimal point.

use std::fmt::{self, Display, Formatter, Write as _};

use super::nodes::{Filter, NodeKind, Value};
use super::statement::Statement;

pub fn serialize(statement: &Statement) -> String {
    statement.to_string()
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => {
                let text = x.to_string();
                if text.contains('.') || !x.is_finite() {
                    f.write_str(&text)
                } else {
                    write!(f, "{text}.0")
                }
            }
            Value::Str(s) => {
                f.write_char('\'')?;
                for c in s.chars() {
                    if matches!(c, '\'' | '\\') {
                        f.write_char('\\')?;
                    }
                    f.write_char(c)?;
                }
                f.write_char('\'')
            }
        }
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Filter::And(children) | Filter::Or(children) => {
                write!(f, "{}(", self.name())?;
                join(f, children)?;
                f.write_char(')')
            }
            Filter::Not(inner) => write!(f, "not({inner})"),
            Filter::Compare { op, field, value } => write!(f, "{}({field},{value})", op.name()),
            Filter::In { field, values } => {
                write!(f, "in({field},")?;
                join(f, values)?;
                f.write_char(')')
            }
            Filter::Exists { field } => write!(f, "exists({field})"),
            Filter::Missing { field } => write!(f, "missing({field})"),
            Filter::Nested { path, children } => {
                write!(f, "nested({path},")?;
                join(f, children)?;
                f.write_char(')')
            }
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let mut sep = |f: &mut Formatter<'_>| -> fmt::Result {
            if !std::mem::take(&mut first) {
                f.write_char(',')?;
            }
            Ok(())
        };

        for kind in self.kinds() {
            match kind {
                NodeKind::Count => {
                    sep(f)?;
                    f.write_str("count()")?;
                }
                NodeKind::Select => {
                    sep(f)?;
                    write!(f, "select({})", self.select().join(","))?;
                }
                NodeKind::Facets => {
                    for facets in self.facets() {
                        sep(f)?;
                        write!(f, "facets({})", facets.join(","))?;
                    }
                }
                NodeKind::Filter => {
                    if let Some(filter) = self.filter() {
                        sep(f)?;
                        write!(f, "{filter}")?;
                    }
                }
                NodeKind::Sort => {
                    sep(f)?;
                    f.write_str("sort(")?;
                    for (i, (field, order)) in self.sort().iter().enumerate() {
                        if i > 0 {
                            f.write_char(',')?;
                        }
                        write!(f, "{}{field}", order.sign())?;
                    }
                    f.write_char(')')?;
                }
                NodeKind::Limit => {
                    if let Some(limit) = self.limit() {
                        sep(f)?;
                        write!(f, "limit({},{})", limit.from, limit.size)?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn join<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_char(',')?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
