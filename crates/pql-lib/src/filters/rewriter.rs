//! JSON filter object to Language AST filter.

use indexmap::IndexMap;
use serde_json::{Map, Value as Json};

use pql_core::{DocType, has_field_target};

use super::nesting::{Entity, nesting_path};
use crate::ast::{Filter, Value};
use crate::{Error, Result};

/// Value marker selecting documents where the field is absent.
pub const MISSING: &str = "_missing";

/// Value prefix marking an entity-set reference.
pub const ENTITY_SET_PREFIX: &str = "ES:";

const ID: &str = "id";
const ENTITY_SET_ID: &str = "entitySetId";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Is,
    Not,
}

/// Rewrites a UI filter object for the given target type.
///
/// Returns `None` when the object selects nothing.
pub fn rewrite(filters: &Json, target: DocType) -> Result<Option<Filter>> {
    let Json::Object(entities) = filters else {
        return Err(Error::InvalidFilter("expected an object of entities".into()));
    };

    let mut groups = Vec::new();
    for (name, fields) in entities {
        let unknown = || Error::UnknownEntity {
            entity: name.clone(),
            target: target.to_string(),
        };
        let entity = Entity::from_name(name).ok_or_else(unknown)?;
        let path = nesting_path(entity, target).ok_or_else(unknown)?;

        let Json::Object(fields) = fields else {
            return Err(Error::InvalidFilter(format!("`{name}` is not an object of fields")));
        };

        let predicates = entity_predicates(entity, fields)?;
        if predicates.is_empty() {
            continue;
        }

        if path.is_empty() {
            groups.extend(predicates);
        } else {
            groups.push(Filter::nested(path, predicates));
        }
    }

    let filter = Filter::all(groups);
    let rendered = filter.as_ref().map(ToString::to_string).unwrap_or_default();
    tracing::debug!(doc_type = %target, filter = %rendered, "rewrote filter");
    Ok(filter)
}

/// Same as [`rewrite`], from JSON text.
pub fn rewrite_str(filters: &str, target: DocType) -> Result<Option<Filter>> {
    let json: Json = serde_json::from_str(filters).map_err(|e| Error::InvalidFilter(e.to_string()))?;
    rewrite(&json, target)
}

/// Predicates for one entity's fields.
///
/// A `has*` flag and the id field it tests form one family; a family with
/// both present matches either.
fn entity_predicates(entity: Entity, fields: &Map<String, Json>) -> Result<Vec<Filter>> {
    let mut families: IndexMap<String, Vec<Filter>> = IndexMap::with_capacity(fields.len());
    for (field, spec) in fields {
        if let Some(target) = has_field_target(field) {
            let predicate = has_predicate(field, target, spec)?;
            families.entry(target.to_owned()).or_default().push(predicate);
            continue;
        }

        let path = format!("{entity}.{field}");
        let (op, value) = single_op(entity, field, spec)?;
        if let Some(predicate) = field_predicate(&path, field == ID, op, value)? {
            families.entry(path).or_default().push(predicate);
        }
    }

    Ok(families
        .into_values()
        .map(|mut members| match members.len() {
            1 => members.remove(0),
            _ => Filter::Or(members),
        })
        .collect())
}

fn has_predicate(field: &str, target: &str, spec: &Json) -> Result<Filter> {
    match spec {
        Json::Bool(true) => Ok(Filter::exists(target)),
        Json::Bool(false) => Ok(Filter::missing(target)),
        _ => Err(Error::InvalidFilter(format!("`{field}` takes true or false"))),
    }
}

fn single_op<'j>(entity: Entity, field: &str, spec: &'j Json) -> Result<(Op, &'j Json)> {
    let invalid = || Error::InvalidFilter(format!("`{entity}.{field}` needs exactly one of `is` or `not`"));

    let Json::Object(ops) = spec else {
        return Err(invalid());
    };
    let mut ops = ops.iter();
    let (Some((op, value)), None) = (ops.next(), ops.next()) else {
        return Err(invalid());
    };

    let op = match op.as_str() {
        "is" => Op::Is,
        "not" => Op::Not,
        _ => return Err(invalid()),
    };
    Ok((op, value))
}

fn field_predicate(field: &str, is_id: bool, op: Op, value: &Json) -> Result<Option<Filter>> {
    match value {
        Json::Array(items) => {
            let values = items
                .iter()
                .map(|item| literal(field, item))
                .collect::<Result<Vec<_>>>()?;
            if values.is_empty() {
                return Ok(None);
            }
            let positive = list_predicate(field, is_id, values);
            Ok(Some(match op {
                Op::Is => positive,
                Op::Not => Filter::not(positive),
            }))
        }
        _ => {
            let value = literal(field, value)?;
            if value.as_str().is_some_and(str::is_empty) {
                return Ok(None);
            }
            Ok(Some(scalar_predicate(field, is_id, op, value)))
        }
    }
}

fn scalar_predicate(field: &str, is_id: bool, op: Op, value: Value) -> Filter {
    if value.as_str() == Some(MISSING) {
        return match op {
            Op::Is => Filter::missing(field),
            Op::Not => Filter::exists(field),
        };
    }

    let (field, value) = match value.as_str().and_then(|s| s.strip_prefix(ENTITY_SET_PREFIX)) {
        Some(id) if is_id => (entity_set_field(field), Value::from(id)),
        _ => (field.to_owned(), value),
    };
    match op {
        Op::Is => Filter::eq(field, value),
        Op::Not => Filter::ne(field, value),
    }
}

fn list_predicate(field: &str, is_id: bool, values: Vec<Value>) -> Filter {
    let missing = values.iter().any(|v| v.as_str() == Some(MISSING));
    let rest: Vec<Value> = values
        .into_iter()
        .filter(|v| v.as_str() != Some(MISSING))
        .collect();

    let mut alternatives = Vec::new();
    if missing {
        alternatives.push(Filter::missing(field));
    }
    if !rest.is_empty() {
        alternatives.push(membership(field, is_id, rest));
    }

    match alternatives.len() {
        1 => alternatives.remove(0),
        _ => Filter::Or(alternatives),
    }
}

/// `in` on the field, with `ES:` ids moved to the entity-set alias.
fn membership(field: &str, is_id: bool, values: Vec<Value>) -> Filter {
    if !is_id {
        return Filter::any_of(field, values);
    }

    let mut ids = Vec::new();
    let mut sets = Vec::new();
    for value in values {
        match value.as_str().and_then(|s| s.strip_prefix(ENTITY_SET_PREFIX)) {
            Some(set) => sets.push(Value::from(set)),
            None => ids.push(value),
        }
    }

    match (ids.is_empty(), sets.is_empty()) {
        (_, true) => Filter::any_of(field, ids),
        (true, false) => Filter::any_of(entity_set_field(field), sets),
        (false, false) => Filter::Or(vec![
            Filter::any_of(field, ids),
            Filter::any_of(entity_set_field(field), sets),
        ]),
    }
}

fn entity_set_field(id_field: &str) -> String {
    match id_field.strip_suffix(ID) {
        Some(entity) => format!("{entity}{ENTITY_SET_ID}"),
        None => ENTITY_SET_ID.to_owned(),
    }
}

fn literal(field: &str, value: &Json) -> Result<Value> {
    match value {
        Json::String(s) => Ok(Value::Str(s.clone())),
        Json::Bool(b) => Ok(Value::Str(b.to_string())),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Ok(Value::Int(i)),
            None => n
                .as_f64()
                .map(Value::Float)
                .ok_or_else(|| Error::InvalidFilter(format!("`{field}` has an unsupported number {n}"))),
        },
        _ => Err(Error::InvalidFilter(format!("`{field}` takes strings, numbers or booleans"))),
    }
}
