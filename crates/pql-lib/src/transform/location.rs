//! Genomic location filters.
//!
//! `gene.location` and `mutation.location` take values such as `chr12`,
//! `chr12:5000` or `chr12:100-200`. Each becomes a chromosome term plus
//! position ranges on the matching entity's coordinate fields.

use std::fmt;

use pql_core::TypeModel;
use pql_core::is_path_within;
use pql_core::model::{GENE_LOCATION, MUTATION_LOCATION};

use super::map_predicates;
use crate::ast::Value;
use crate::ir::{Expr, RangeOp};
use crate::{Error, Result};

const CHROMOSOMES: [&str; 25] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17", "18", "19", "20",
    "21", "22", "X", "Y", "MT",
];

/// A parsed location value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locus {
    pub chromosome: String,
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl Locus {
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = |why: &str| Error::InvalidFilter(format!("bad location `{text}`: {why}"));

        let trimmed = text.trim();
        let body = match trimmed.get(..3) {
            Some(prefix) if prefix.eq_ignore_ascii_case("chr") => &trimmed[3..],
            _ => trimmed,
        };
        let (name, range) = match body.split_once(':') {
            Some((name, range)) => (name, Some(range)),
            None => (body, None),
        };

        let chromosome = name.to_ascii_uppercase();
        if !CHROMOSOMES.contains(&chromosome.as_str()) {
            return Err(invalid("unknown chromosome"));
        }

        let position = |s: &str| {
            s.trim()
                .replace(',', "")
                .parse::<i64>()
                .ok()
                .filter(|p| *p >= 0)
                .ok_or_else(|| invalid("positions must be non-negative integers"))
        };
        let (start, end) = match range {
            None => (None, None),
            Some(range) => match range.split_once('-') {
                Some((start, end)) => (Some(position(start)?), Some(position(end)?)),
                None => (Some(position(range)?), None),
            },
        };
        if let (Some(start), Some(end)) = (start, end)
            && start > end
        {
            return Err(invalid("start is past end"));
        }

        Ok(Self { chromosome, start, end })
    }
}

impl fmt::Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chr{}", self.chromosome)?;
        match (self.start, self.end) {
            (Some(start), Some(end)) => write!(f, ":{start}-{end}"),
            (Some(start), None) => write!(f, ":{start}"),
            _ => Ok(()),
        }
    }
}

/// Coordinate fields of one entity, resolved for a type.
struct Coordinates {
    chromosome: String,
    start: String,
    end: String,
}

impl Coordinates {
    fn of(field: &str, model: &TypeModel) -> Result<Self> {
        let entity = if field == GENE_LOCATION { "gene" } else { "mutation" };
        Ok(Self {
            chromosome: model.resolve(&format!("{entity}.chromosome"))?,
            start: model.resolve(&format!("{entity}.start"))?,
            end: model.resolve(&format!("{entity}.end"))?,
        })
    }

    fn condition(&self, locus: &Locus) -> Expr {
        let mut must = vec![Expr::term(self.chromosome.clone(), locus.chromosome.clone())];
        match (locus.start, locus.end) {
            (Some(start), Some(end)) => {
                must.push(Expr::range(self.start.clone(), RangeOp::Gte, start));
                must.push(Expr::range(self.end.clone(), RangeOp::Lte, end));
            }
            (Some(position), None) => {
                must.push(Expr::range(self.end.clone(), RangeOp::Gte, position));
                must.push(Expr::range(self.end.clone(), RangeOp::Lte, position));
            }
            _ => {}
        }
        Expr::must(must)
    }
}

pub(super) fn expand(expr: Expr, model: &TypeModel) -> Result<Expr> {
    map_predicates(expr, None, &mut |pred, scope| {
        let Some(field) = pred.field() else {
            return Ok(pred);
        };
        if field != GENE_LOCATION && field != MUTATION_LOCATION {
            return Ok(pred);
        }

        let values: Vec<&Value> = match &pred {
            Expr::Term { value, .. } => vec![value],
            Expr::Terms { values, .. } => values.iter().collect(),
            _ => return Err(Error::InvalidFilter(format!("`{field}` only supports eq and in"))),
        };

        let coordinates = Coordinates::of(field, model)?;
        let mut conditions = Vec::with_capacity(values.len());
        for value in values {
            let text = value
                .as_str()
                .ok_or_else(|| Error::InvalidFilter(format!("`{field}` takes location strings, not `{value}`")))?;
            conditions.push(coordinates.condition(&Locus::parse(text)?));
        }
        let expanded = if conditions.len() == 1 {
            conditions.remove(0)
        } else {
            Expr::should(conditions)
        };

        let Some(path) = model.nested_path(&coordinates.start) else {
            return Ok(expanded);
        };
        match scope {
            Some(scope) if scope == path => Ok(expanded),
            Some(scope) if !is_path_within(&path, scope) => Err(Error::InvalidFilter(format!(
                "`{field}` lives under `{path}` and can't be used inside nested scope `{scope}`"
            ))),
            _ => Ok(Expr::nested(path, expanded)),
        }
    })
}
