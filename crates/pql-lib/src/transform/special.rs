//! Expansion of fields that don't exist in the index as written.

use pql_core::model::{
    BIOLOGICAL_PROCESS, CELLULAR_COMPONENT, GENE_CURATED_SET_ID, GENE_GO_TERM_ID, GENE_PATHWAY_ID,
    GENE_SET_ID, LOOKUP_INDEX, LOOKUP_PATH, MOLECULAR_FUNCTION, SCORE,
};
use pql_core::{TypeModel, is_path_within};

use super::map_predicates;
use crate::ast::Value;
use crate::filters::ENTITY_SET_PREFIX;
use crate::ir::{Expr, Lookup, Root};
use crate::{Error, Result};

/// Object fields can't be fetched through `fields`; they come from `_source`.
/// Placeholders and `_score` aren't stored at all and are dropped.
pub(super) fn fields_to_source(root: &mut Root, model: &TypeModel) {
    let (source, fields): (Vec<String>, Vec<String>) = std::mem::take(&mut root.fields)
        .into_iter()
        .filter(|field| field != SCORE && !model.is_special(field))
        .partition(|field| model.include_fields().contains(field));

    root.fields = fields;
    for field in source {
        if !root.source.contains(&field) {
            root.source.push(field);
        }
    }
}

/// `ES:` values become terms lookups against the entity-set index.
pub(super) fn entity_sets(expr: Expr, model: &TypeModel) -> Result<Expr> {
    map_predicates(expr, None, &mut |pred, _| match pred {
        Expr::Term {
            field,
            value: Value::Str(value),
        } if value.starts_with(ENTITY_SET_PREFIX) => lookup(field, &value, model),
        Expr::Terms { field, values } if values.iter().any(is_entity_set) => {
            let (sets, plain): (Vec<Value>, Vec<Value>) = values.into_iter().partition(is_entity_set);
            let mut alternatives = Vec::with_capacity(sets.len() + 1);
            if !plain.is_empty() {
                alternatives.push(Expr::terms(field.clone(), plain));
            }
            for set in &sets {
                if let Value::Str(id) = set {
                    alternatives.push(lookup(field.clone(), id, model)?);
                }
            }
            Ok(one_of(alternatives))
        }
        other => Ok(other),
    })
}

fn is_entity_set(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.starts_with(ENTITY_SET_PREFIX))
}

fn lookup(field: String, value: &str, model: &TypeModel) -> Result<Expr> {
    let id = value.strip_prefix(ENTITY_SET_PREFIX).unwrap_or(value);
    let doc_type = model
        .lookup_type(&field)
        .ok_or_else(|| Error::InvalidFilter(format!("`{field}` does not take entity sets")))?;
    let internal = |name: &str| {
        model
            .internal_field(name)
            .map(str::to_owned)
            .ok_or_else(|| Error::TypeModel(format!("no `{name}` configured for `{}`", model.doc_type())))
    };

    Ok(Expr::TermsLookup {
        lookup: Lookup {
            index: internal(LOOKUP_INDEX)?,
            doc_type,
            id: id.to_owned(),
            path: internal(LOOKUP_PATH)?,
        },
        field,
    })
}

/// Gene-set ids fan out over every field a set can be recorded in.
///
/// `gene.goTermId` covers the three GO ontologies; `gene.geneSetId` adds
/// pathways and curated sets.
pub(super) fn gene_sets(expr: Expr, model: &TypeModel) -> Result<Expr> {
    map_predicates(expr, None, &mut |pred, scope| {
        let Some(field) = pred.field() else {
            return Ok(pred);
        };
        if field != GENE_GO_TERM_ID && field != GENE_SET_ID {
            return Ok(pred);
        }

        let internal = |name: &str| {
            model
                .internal_field(name)
                .map(str::to_owned)
                .ok_or_else(|| Error::TypeModel(format!("no `{name}` configured for `{}`", model.doc_type())))
        };
        let component = internal(CELLULAR_COMPONENT)?;
        let mut targets = vec![component.clone(), internal(BIOLOGICAL_PROCESS)?, internal(MOLECULAR_FUNCTION)?];
        if field == GENE_SET_ID {
            targets.push(model.resolve(GENE_PATHWAY_ID)?);
            targets.push(model.resolve(GENE_CURATED_SET_ID)?);
        }

        let expanded = one_of(targets.iter().map(|target| pred.retarget(target)).collect());
        Ok(match model.nested_path(&component) {
            Some(path) if !scope.is_some_and(|scope| is_path_within(scope, &path)) => Expr::nested(path, expanded),
            _ => expanded,
        })
    })
}

fn one_of(mut alternatives: Vec<Expr>) -> Expr {
    if alternatives.len() == 1 {
        return alternatives.remove(0);
    }
    Expr::should(alternatives)
}
