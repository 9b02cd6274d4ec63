use indexmap::IndexMap;

use crate::ast::{Limit, SortOrder, Value};

/// How the scores of matching nested documents combine into the parent score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScoreMode {
    #[default]
    Avg,
    Total,
    Max,
    None,
}

impl ScoreMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Avg => "avg",
            Self::Total => "total",
            Self::Max => "max",
            Self::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeOp {
    Gte,
    Gt,
    Lte,
    Lt,
}

impl RangeOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gte => "gte",
            Self::Gt => "gt",
            Self::Lte => "lte",
            Self::Lt => "lt",
        }
    }
}

/// One side of a range.
#[derive(Debug, Clone, PartialEq)]
pub struct Bound {
    pub op: RangeOp,
    pub value: Value,
}

/// Where a terms lookup finds its id list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub index: String,
    pub doc_type: String,
    pub id: String,
    pub path: String,
}

/// Search IR expression.
///
/// Containers hold ordered children. `Bool` holds `Must` and `Should`
/// clauses. `Query` and `Filter` switch between scoring and filter context.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Query(Vec<Expr>),
    Filter(Vec<Expr>),
    Bool(Vec<Expr>),
    Must(Vec<Expr>),
    Should(Vec<Expr>),
    Not(Vec<Expr>),
    Term {
        field: String,
        value: Value,
    },
    Terms {
        field: String,
        values: Vec<Value>,
    },
    TermsLookup {
        field: String,
        lookup: Lookup,
    },
    Range {
        field: String,
        bounds: Vec<Bound>,
    },
    Exists {
        field: String,
    },
    Missing {
        field: String,
    },
    Nested {
        path: String,
        score_mode: ScoreMode,
        children: Vec<Expr>,
    },
    FunctionScore {
        script: String,
        children: Vec<Expr>,
    },
}

impl Expr {
    pub fn term(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Expr::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn terms(field: impl Into<String>, values: Vec<Value>) -> Self {
        Expr::Terms {
            field: field.into(),
            values,
        }
    }

    pub fn range(field: impl Into<String>, op: RangeOp, value: impl Into<Value>) -> Self {
        Expr::Range {
            field: field.into(),
            bounds: vec![Bound {
                op,
                value: value.into(),
            }],
        }
    }

    pub fn exists(field: impl Into<String>) -> Self {
        Expr::Exists { field: field.into() }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Expr::Missing { field: field.into() }
    }

    pub fn not(inner: Expr) -> Self {
        Expr::Not(vec![inner])
    }

    /// `Bool(Must(children))`.
    pub fn must(children: Vec<Expr>) -> Self {
        Expr::Bool(vec![Expr::Must(children)])
    }

    /// `Bool(Should(children))`.
    pub fn should(children: Vec<Expr>) -> Self {
        Expr::Bool(vec![Expr::Should(children)])
    }

    /// Nested scope with the default score mode.
    pub fn nested(path: impl Into<String>, inner: Expr) -> Self {
        Expr::Nested {
            path: path.into(),
            score_mode: ScoreMode::default(),
            children: vec![inner],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Expr::Query(_) => "Query",
            Expr::Filter(_) => "Filter",
            Expr::Bool(_) => "Bool",
            Expr::Must(_) => "Must",
            Expr::Should(_) => "Should",
            Expr::Not(_) => "Not",
            Expr::Term { .. } => "Term",
            Expr::Terms { .. } => "Terms",
            Expr::TermsLookup { .. } => "TermsLookup",
            Expr::Range { .. } => "Range",
            Expr::Exists { .. } => "Exists",
            Expr::Missing { .. } => "Missing",
            Expr::Nested { .. } => "Nested",
            Expr::FunctionScore { .. } => "FunctionScore",
        }
    }

    /// Field a predicate tests. `None` for containers.
    pub fn field(&self) -> Option<&str> {
        match self {
            Expr::Term { field, .. }
            | Expr::Terms { field, .. }
            | Expr::TermsLookup { field, .. }
            | Expr::Range { field, .. }
            | Expr::Exists { field }
            | Expr::Missing { field } => Some(field),
            _ => None,
        }
    }

    pub fn field_mut(&mut self) -> Option<&mut String> {
        match self {
            Expr::Term { field, .. }
            | Expr::Terms { field, .. }
            | Expr::TermsLookup { field, .. }
            | Expr::Range { field, .. }
            | Expr::Exists { field }
            | Expr::Missing { field } => Some(field),
            _ => None,
        }
    }

    /// Copy of a predicate aimed at another field.
    pub fn retarget(&self, field: &str) -> Expr {
        let mut copy = self.clone();
        if let Some(target) = copy.field_mut() {
            *target = field.to_owned();
        }
        copy
    }

    pub fn is_predicate(&self) -> bool {
        self.field().is_some()
    }

    pub fn children(&self) -> &[Expr] {
        match self {
            Expr::Query(children)
            | Expr::Filter(children)
            | Expr::Bool(children)
            | Expr::Must(children)
            | Expr::Should(children)
            | Expr::Not(children)
            | Expr::Nested { children, .. }
            | Expr::FunctionScore { children, .. } => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Expr>> {
        match self {
            Expr::Query(children)
            | Expr::Filter(children)
            | Expr::Bool(children)
            | Expr::Must(children)
            | Expr::Should(children)
            | Expr::Not(children)
            | Expr::Nested { children, .. }
            | Expr::FunctionScore { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Rebuilds a container from its mapped children, dropping the `None`s.
    /// Predicates come back unchanged.
    pub fn map_children(mut self, f: impl FnMut(Expr) -> Option<Expr>) -> Expr {
        if let Some(children) = self.children_mut() {
            *children = std::mem::take(children).into_iter().filter_map(f).collect();
        }
        self
    }

    /// Fallible [`Expr::map_children`].
    pub fn try_map_children<E>(mut self, mut f: impl FnMut(Expr) -> Result<Option<Expr>, E>) -> Result<Expr, E> {
        if let Some(children) = self.children_mut() {
            let mut mapped = Vec::with_capacity(children.len());
            for child in std::mem::take(children) {
                if let Some(child) = f(child)? {
                    mapped.push(child);
                }
            }
            *children = mapped;
        }
        Ok(self)
    }

    /// Depth-first search through the whole subtree, `self` included.
    pub fn any(&self, pred: &impl Fn(&Expr) -> bool) -> bool {
        pred(self) || self.children().iter().any(|c| c.any(pred))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Aggregation {
    Terms {
        name: String,
        field: String,
        children: Vec<Aggregation>,
    },
    Missing {
        name: String,
        field: String,
        children: Vec<Aggregation>,
    },
    Filter {
        name: String,
        filter: Expr,
        children: Vec<Aggregation>,
    },
    Nested {
        name: String,
        path: String,
        children: Vec<Aggregation>,
    },
    ReverseNested {
        name: String,
    },
}

impl Aggregation {
    pub fn terms(name: impl Into<String>, field: impl Into<String>) -> Self {
        Aggregation::Terms {
            name: name.into(),
            field: field.into(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Aggregation::Terms { name, .. }
            | Aggregation::Missing { name, .. }
            | Aggregation::Filter { name, .. }
            | Aggregation::Nested { name, .. }
            | Aggregation::ReverseNested { name } => name,
        }
    }

    pub fn children(&self) -> &[Aggregation] {
        match self {
            Aggregation::Terms { children, .. }
            | Aggregation::Missing { children, .. }
            | Aggregation::Filter { children, .. }
            | Aggregation::Nested { children, .. } => children,
            Aggregation::ReverseNested { .. } => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Aggregation>> {
        match self {
            Aggregation::Terms { children, .. }
            | Aggregation::Missing { children, .. }
            | Aggregation::Filter { children, .. }
            | Aggregation::Nested { children, .. } => Some(children),
            Aggregation::ReverseNested { .. } => None,
        }
    }
}

/// A whole compiled request before materialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Root {
    pub query: Option<Expr>,
    /// Filters applied after aggregations. Lowering never sets one.
    pub post_filter: Option<Expr>,
    pub aggregations: Vec<Aggregation>,
    pub fields: Vec<String>,
    /// `_source` includes.
    pub source: Vec<String>,
    pub sort: IndexMap<String, SortOrder>,
    pub limit: Option<Limit>,
    pub count: bool,
}

impl Root {
    /// The `Filter` directly under the top-level `Query`, if any.
    pub fn query_filter(&self) -> Option<&Expr> {
        match &self.query {
            Some(Expr::Query(children)) => children.iter().find(|c| matches!(c, Expr::Filter(_))),
            _ => None,
        }
    }
}
