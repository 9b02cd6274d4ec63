//! Lowering: Language AST to search IR.
//!
//! Every alias is resolved against the type model here. Structure maps one
//! to one: `and`/`or` become bool clauses, `ne` becomes a negated term, range
//! comparisons become ranges. Nested scopes written by the user are kept;
//! inferring the scopes the user left out is the transformer's job.

#[cfg(test)]
mod lower_tests;

use indexmap::{IndexMap, IndexSet};
use pql_core::TypeModel;
use pql_core::model::SCORE;

use crate::Result;
use crate::ast::{ALL, CompareOp, Filter, SortOrder, Statement, Value};
use crate::filters::ENTITY_SET_PREFIX;
use crate::ir::{Aggregation, Expr, RangeOp, Root, ScoreMode};

pub fn lower(statement: &Statement, model: &TypeModel) -> Result<Root> {
    let lowerer = Lowerer { model };

    let query = statement
        .filter()
        .map(|filter| lowerer.filter(filter))
        .transpose()?
        .map(|filter| Expr::Query(vec![Expr::Filter(vec![filter])]));

    Ok(Root {
        query,
        post_filter: None,
        aggregations: lowerer.facets(statement.facets())?,
        fields: lowerer.select(statement.select())?,
        source: Vec::new(),
        sort: lowerer.sort(statement)?,
        limit: statement.limit(),
        count: statement.is_count(),
    })
}

struct Lowerer<'m> {
    model: &'m TypeModel,
}

impl Lowerer<'_> {
    fn resolve(&self, alias: &str) -> Result<String> {
        Ok(self.model.resolve(alias)?)
    }

    fn filter(&self, filter: &Filter) -> Result<Expr> {
        Ok(match filter {
            Filter::And(children) => Expr::must(self.filters(children)?),
            Filter::Or(children) => Expr::should(self.filters(children)?),
            Filter::Not(inner) => Expr::not(self.filter(inner)?),
            Filter::Compare { op, field, value } => {
                let path = self.resolve(field)?;
                let value = self.value(field, value);
                match op {
                    CompareOp::Eq => Expr::term(path, value),
                    CompareOp::Ne => Expr::not(Expr::term(path, value)),
                    CompareOp::Ge => Expr::range(path, RangeOp::Gte, value),
                    CompareOp::Gt => Expr::range(path, RangeOp::Gt, value),
                    CompareOp::Le => Expr::range(path, RangeOp::Lte, value),
                    CompareOp::Lt => Expr::range(path, RangeOp::Lt, value),
                }
            }
            Filter::In { field, values } => Expr::Terms {
                field: self.resolve(field)?,
                values: values.iter().map(|v| self.value(field, v)).collect(),
            },
            Filter::Exists { field } => Expr::exists(self.resolve(field)?),
            Filter::Missing { field } => Expr::missing(self.resolve(field)?),
            Filter::Nested { path, children } => Expr::Nested {
                path: self.resolve(path)?,
                score_mode: ScoreMode::Avg,
                children: vec![Expr::must(self.filters(children)?)],
            },
        })
    }

    fn filters(&self, filters: &[Filter]) -> Result<Vec<Expr>> {
        filters.iter().map(|f| self.filter(f)).collect()
    }

    /// Values addressed through an `entitySetId` alias are entity-set ids.
    fn value(&self, alias: &str, value: &Value) -> Value {
        match value {
            Value::Str(id) if self.model.is_entity_set_alias(alias) && !id.starts_with(ENTITY_SET_PREFIX) => {
                Value::Str(format!("{ENTITY_SET_PREFIX}{id}"))
            }
            _ => value.clone(),
        }
    }

    fn select(&self, select: &[String]) -> Result<Vec<String>> {
        let mut fields = IndexSet::new();
        for alias in select {
            if alias == ALL {
                for public in self.model.public_fields() {
                    fields.insert(self.resolve(public)?);
                }
            } else {
                fields.insert(self.resolve(alias)?);
            }
        }
        Ok(fields.into_iter().collect())
    }

    fn facets(&self, facets: &[Vec<String>]) -> Result<Vec<Aggregation>> {
        let mut by_name = IndexMap::new();
        for group in facets {
            for alias in group {
                let names = if alias == ALL {
                    self.model.facets()
                } else {
                    std::slice::from_ref(alias)
                };
                for name in names {
                    if !by_name.contains_key(name) {
                        by_name.insert(name.clone(), self.resolve(name)?);
                    }
                }
            }
        }
        Ok(by_name
            .into_iter()
            .map(|(name, field)| Aggregation::terms(name, field))
            .collect())
    }

    /// `_score` is the engine's relevance score, not a document field.
    fn sort(&self, statement: &Statement) -> Result<IndexMap<String, SortOrder>> {
        statement
            .sort()
            .iter()
            .map(|(field, order)| {
                let path = if field == SCORE {
                    field.clone()
                } else {
                    self.resolve(field)?
                };
                Ok((path, *order))
            })
            .collect()
    }
}
