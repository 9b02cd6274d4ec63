//! Language AST nodes.

use serde::{Deserialize, Serialize};

/// Literal value of a predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Ge,
    Gt,
    Le,
    Lt,
}

impl CompareOp {
    pub fn name(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Ge => "ge",
            Self::Gt => "gt",
            Self::Le => "le",
            Self::Lt => "lt",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "eq" => Self::Eq,
            "ne" => Self::Ne,
            "ge" => Self::Ge,
            "gt" => Self::Gt,
            "le" => Self::Le,
            "lt" => Self::Lt,
            _ => return None,
        })
    }

    pub fn is_range(self) -> bool {
        matches!(self, Self::Ge | Self::Gt | Self::Le | Self::Lt)
    }
}

/// Filter subtree. Children are ordered.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
    Compare {
        op: CompareOp,
        field: String,
        value: Value,
    },
    In {
        field: String,
        values: Vec<Value>,
    },
    Exists {
        field: String,
    },
    Missing {
        field: String,
    },
    Nested {
        path: String,
        children: Vec<Filter>,
    },
}

impl Filter {
    pub fn name(&self) -> &'static str {
        match self {
            Filter::And(_) => "and",
            Filter::Or(_) => "or",
            Filter::Not(_) => "not",
            Filter::Compare { op, .. } => op.name(),
            Filter::In { .. } => "in",
            Filter::Exists { .. } => "exists",
            Filter::Missing { .. } => "missing",
            Filter::Nested { .. } => "nested",
        }
    }

    pub fn compare(op: CompareOp, field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Compare {
            op,
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(CompareOp::Eq, field, value)
    }

    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(CompareOp::Ne, field, value)
    }

    pub fn any_of<V: Into<Value>>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Filter::In {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn exists(field: impl Into<String>) -> Self {
        Filter::Exists { field: field.into() }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Filter::Missing { field: field.into() }
    }

    pub fn not(inner: Filter) -> Self {
        Filter::Not(Box::new(inner))
    }

    pub fn nested(path: impl Into<String>, children: Vec<Filter>) -> Self {
        Filter::Nested {
            path: path.into(),
            children,
        }
    }

    /// `and` of the filters, or the filter itself when there is just one.
    pub fn all(mut filters: Vec<Filter>) -> Option<Self> {
        match filters.len() {
            0 => None,
            1 => filters.pop(),
            _ => Some(Filter::And(filters)),
        }
    }

    /// Field a predicate tests. `None` for connectives.
    pub fn field(&self) -> Option<&str> {
        match self {
            Filter::Compare { field, .. }
            | Filter::In { field, .. }
            | Filter::Exists { field }
            | Filter::Missing { field } => Some(field),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn sign(self) -> char {
        match self {
            Self::Asc => '+',
            Self::Desc => '-',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limit {
    pub from: u32,
    pub size: u32,
}

impl Limit {
    pub fn new(from: u32, size: u32) -> Self {
        Self { from, size }
    }

    /// `limit(n)` means the first `n` hits.
    pub fn first(size: u32) -> Self {
        Self { from: 0, size }
    }
}

/// Kinds of statement children, declared in canonical serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    Count,
    Select,
    Facets,
    Filter,
    Sort,
    Limit,
}

impl NodeKind {
    pub fn from_clause_name(name: &str) -> Option<Self> {
        Some(match name {
            "count" => Self::Count,
            "select" => Self::Select,
            "facets" => Self::Facets,
            "sort" => Self::Sort,
            "limit" => Self::Limit,
            _ => return None,
        })
    }
}
