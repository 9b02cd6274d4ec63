//! Relevance scoring.
//!
//! Top-level documents are ranked by how many of their nested children (a
//! donor's genes, a gene's donors, a mutation's occurrences) match the
//! query. The query's filter is split in two: the part outside the scoring
//! path stays a plain filter, the part inside moves into a scored nested
//! query whose function score counts the matching children.

use pql_core::{DocType, TypeModel, is_path_within};

use super::invariant;
use crate::ir::{Expr, Root, ScoreMode};
use crate::Result;

/// Where and how documents of a type are scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringConfig {
    /// Nested path whose matching children are counted.
    pub path: String,
    pub script: String,
    pub score_mode: ScoreMode,
}

impl ScoringConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            script: "1".to_owned(),
            score_mode: ScoreMode::Total,
        }
    }

    /// Built-in scoring of a type. Projects and files aren't scored.
    pub fn for_type(doc_type: DocType) -> Option<Self> {
        match doc_type {
            DocType::DonorCentric => Some(Self::new("gene")),
            DocType::GeneCentric => Some(Self::new("donor")),
            DocType::MutationCentric => Some(Self::new("ssm_occurrence")),
            DocType::Project | DocType::File => None,
        }
    }

    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = script.into();
        self
    }

    pub fn with_score_mode(mut self, score_mode: ScoreMode) -> Self {
        self.score_mode = score_mode;
        self
    }

    /// `Nested(path, FunctionScore(children))`.
    pub fn scored(&self, children: Vec<Expr>) -> Expr {
        Expr::Nested {
            path: self.path.clone(),
            score_mode: self.score_mode,
            children: vec![Expr::FunctionScore {
                script: self.script.clone(),
                children,
            }],
        }
    }
}

pub(super) fn score(mut root: Root, config: &ScoringConfig, model: &TypeModel) -> Result<Root> {
    let Some(query) = root.query.take() else {
        root.query = Some(Expr::Query(vec![config.scored(Vec::new())]));
        return Ok(root);
    };

    let Some(filter) = query.children().iter().find(|child| matches!(child, Expr::Filter(_))) else {
        return Err(invariant("malformed query node", &query));
    };
    if filter.children().iter().any(|child| child.any(&|node| matches!(node, Expr::Filter(_)))) {
        return Err(invariant("filter node has a filter node child", &query));
    }
    if matches!(filter.children().first(), Some(Expr::Not(_))) {
        root.query = Some(query);
        return Ok(root);
    }

    let plain = non_nested_only(filter.clone(), &config.path, model).unwrap_or(Expr::Filter(Vec::new()));
    let scored = nested_only(filter.clone(), config, model)?;
    root.query = Some(Expr::Query(vec![Expr::must(vec![plain, scored])]));
    Ok(root)
}

/// The filter without anything at or below `path`.
///
/// Containers are kept even when emptied; the cleanup pass removes them.
pub fn non_nested_only(expr: Expr, path: &str, model: &TypeModel) -> Option<Expr> {
    match expr {
        Expr::Nested { path: ref own, .. } if is_path_within(own, path) => None,
        Expr::Nested { .. } | Expr::FunctionScore { .. } => Some(expr),
        pred if pred.is_predicate() => {
            let inside = pred.field().is_some_and(|field| model.is_nested_under(field, path));
            (!inside).then_some(pred)
        }
        container => Some(container.map_children(|child| non_nested_only(child, path, model))),
    }
}

/// The scored query over only the parts of the filter at or below the
/// scoring path.
///
/// With nothing to score, documents still get scored by their total number
/// of children: the result is the scored wrapper with no function filter.
pub fn nested_only(filter: Expr, config: &ScoringConfig, model: &TypeModel) -> Result<Expr> {
    let Expr::Filter(children) = filter else {
        return Err(invariant("scoring expects a filter node", &filter));
    };

    let mut kept: Vec<Expr> = children
        .into_iter()
        .filter_map(|child| NestedOnly { config, model }.visit(child, false))
        .collect();
    Ok(match kept.len() {
        0 => config.scored(Vec::new()),
        1 => kept.remove(0),
        _ => Expr::must(kept),
    })
}

struct NestedOnly<'a> {
    config: &'a ScoringConfig,
    model: &'a TypeModel,
}

impl NestedOnly<'_> {
    /// `in_scope` is set once inside the scored wrapper, where parts are kept as they are.
    ///
    /// Each predicate or scope met outside a wrapper gets a scored wrapper of
    /// its own, so two predicates on the scoring path score twice. Sharing one
    /// scope is left to a user `nested`, as in the nested pass.
    fn visit(&self, expr: Expr, in_scope: bool) -> Option<Expr> {
        let path = self.config.path.as_str();
        match expr {
            Expr::Nested {
                path: own,
                score_mode,
                children,
            } => {
                if !is_path_within(&own, path) {
                    return None;
                }
                if in_scope {
                    return Some(Expr::Nested {
                        path: own,
                        score_mode,
                        children,
                    });
                }
                if own == path {
                    let body = children.into_iter().filter_map(|c| self.visit(c, true)).collect();
                    Some(self.config.scored(vec![Expr::Filter(body)]))
                } else {
                    let deeper = Expr::Nested {
                        path: own,
                        score_mode,
                        children,
                    };
                    Some(self.config.scored(vec![Expr::Filter(vec![deeper])]))
                }
            }
            pred if pred.is_predicate() => {
                let field = pred.field()?;
                let nested_path = self.model.nested_path(field)?;
                if !is_path_within(&nested_path, path) {
                    return None;
                }
                if in_scope {
                    return Some(pred);
                }
                let enclosed = if nested_path == path {
                    pred
                } else {
                    Expr::nested(nested_path, pred)
                };
                Some(Expr::Query(vec![self.config.scored(vec![Expr::Filter(vec![enclosed])])]))
            }
            Expr::FunctionScore { .. } => None,
            container => {
                let container = container.map_children(|child| self.visit(child, in_scope));
                (!container.children().is_empty()).then_some(container)
            }
        }
    }
}

/// A query made only of a negation still gets scored: the scored wrapper is
/// added beside the negation.
pub(super) fn fix_not(mut root: Root, config: &ScoringConfig) -> Root {
    let Some(Expr::Query(children)) = &mut root.query else {
        return root;
    };
    let [Expr::Filter(filter)] = children.as_mut_slice() else {
        return root;
    };
    if !matches!(filter.first(), Some(Expr::Not(_))) {
        return root;
    }

    let filter = std::mem::take(filter);
    *children = vec![Expr::must(vec![config.scored(Vec::new()), Expr::Filter(filter)])];
    root
}
