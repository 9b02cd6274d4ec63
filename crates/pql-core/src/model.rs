//! Type models: a document schema indexed for alias resolution and nesting lookups.

use std::fmt::Write as _;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::field::{FieldKind, FieldModel, FieldType};
use crate::{DocType, Error, Result};

pub const GENE_GO_TERM: &str = "gene.GoTerm";
pub const MOLECULAR_FUNCTION: &str = "go_term.molecular_function";
pub const BIOLOGICAL_PROCESS: &str = "go_term.biological_process";
pub const CELLULAR_COMPONENT: &str = "go_term.cellular_component";

pub const HAS_PATHWAY: &str = "hasPathway";
pub const HAS_GO_TERM: &str = "hasGoTerm";
pub const HAS_CURATED_SET: &str = "hasCuratedSet";
pub const HAS_COMPOUND: &str = "hasCompound";

pub const GENE_PATHWAY_ID: &str = "gene.pathwayId";
pub const GENE_SET_ID: &str = "gene.geneSetId";
pub const GENE_GO_TERM_ID: &str = "gene.goTermId";
pub const GENE_CURATED_SET_ID: &str = "gene.curatedSetId";
pub const GENE_COMPOUND_ID: &str = "gene.compoundId";

pub const GENE_LOCATION: &str = "gene.location";
pub const MUTATION_LOCATION: &str = "mutation.location";

pub const SCORE: &str = "_score";

pub const LOOKUP_PATH: &str = "lookup.path";
pub const LOOKUP_INDEX: &str = "lookup.index";
pub const LOOKUP_TYPE: &str = "lookup.type";

/// Alias suffix addressing an identifiable field through its entity sets.
pub const ENTITY_SET_ID: &str = "entitySetId";

/// Placeholder fields expanded by the IR transformer. Resolution returns
/// them unchanged and they never take part in nesting inference.
pub const SPECIAL_FIELDS: [&str; 4] = [GENE_GO_TERM_ID, GENE_SET_ID, GENE_LOCATION, MUTATION_LOCATION];

const HAS_FIELDS: [(&str, &str); 4] = [
    (HAS_PATHWAY, GENE_PATHWAY_ID),
    (HAS_CURATED_SET, GENE_CURATED_SET_ID),
    (HAS_GO_TERM, GENE_GO_TERM_ID),
    (HAS_COMPOUND, GENE_COMPOUND_ID),
];

/// Serialized form of a type model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeModelDef {
    #[serde(rename = "type")]
    pub doc_type: DocType,
    pub prefix: String,
    pub fields: Vec<FieldModel>,
    /// Facet aliases available through `facets(*)`.
    #[serde(default)]
    pub facets: Vec<String>,
    /// Field aliases returned by `select(*)`.
    #[serde(default)]
    pub public_fields: Vec<String>,
    /// Canonical paths always fetched from `_source`.
    #[serde(default)]
    pub include_fields: Vec<String>,
    #[serde(default)]
    pub internal_aliases: IndexMap<String, String>,
}

/// Facts about one canonical field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub field_type: FieldType,
    pub nested: bool,
    pub identifiable: bool,
    /// Entity an identifiable field belongs to, when it's not the model's own.
    pub entity: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TypeModel {
    def: TypeModelDef,
    by_path: IndexMap<String, FieldInfo>,
    by_alias: IndexMap<String, String>,
    internal: IndexMap<String, String>,
}

impl TypeModel {
    pub fn new(def: TypeModelDef) -> Result<Self> {
        let mut by_path = IndexMap::new();
        let mut by_alias = IndexMap::new();
        for field in &def.fields {
            index_field(field, "", &mut by_path, &mut by_alias)?;
        }

        let mut internal = IndexMap::new();
        internal.insert(LOOKUP_INDEX.to_owned(), "terms-lookup".to_owned());
        internal.insert(LOOKUP_PATH.to_owned(), "values".to_owned());
        internal.extend(def.internal_aliases.clone());

        Ok(Self {
            def,
            by_path,
            by_alias,
            internal,
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let def: TypeModelDef = serde_json::from_str(json)?;
        Self::new(def)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.def)?)
    }

    pub fn doc_type(&self) -> DocType {
        self.def.doc_type
    }

    pub fn prefix(&self) -> &str {
        &self.def.prefix
    }

    pub fn facets(&self) -> &[String] {
        &self.def.facets
    }

    pub fn public_fields(&self) -> &[String] {
        &self.def.public_fields
    }

    pub fn include_fields(&self) -> &[String] {
        &self.def.include_fields
    }

    pub fn definition(&self) -> &TypeModelDef {
        &self.def
    }

    pub fn is_special(&self, field: &str) -> bool {
        SPECIAL_FIELDS.contains(&field)
    }

    /// Resolves a UI alias to its canonical field path.
    ///
    /// Special fields come back unchanged. A leading segment equal to the
    /// model's prefix is optional. Canonical paths resolve to themselves.
    pub fn resolve(&self, alias: &str) -> Result<String> {
        if self.is_special(alias) {
            return Ok(alias.to_owned());
        }

        if let Some(target) = has_field_target(alias) {
            return self.resolve(target);
        }

        if let Some(rest) = self.strip_prefix(alias)
            && let Some(path) = self.by_alias.get(rest)
        {
            return Ok(path.clone());
        }

        if let Some(path) = self.by_alias.get(alias) {
            return Ok(path.clone());
        }

        if self.by_path.contains_key(alias) {
            return Ok(alias.to_owned());
        }

        Err(Error::UnknownField {
            alias: alias.to_owned(),
            doc_type: self.doc_type(),
        })
    }

    /// Whether the alias addresses an identifiable field through `entitySetId`.
    pub fn is_entity_set_alias(&self, alias: &str) -> bool {
        alias == ENTITY_SET_ID
            || alias
                .rsplit_once('.')
                .is_some_and(|(_, last)| last == ENTITY_SET_ID)
    }

    pub fn internal_field(&self, name: &str) -> Option<&str> {
        self.internal.get(name).map(String::as_str)
    }

    pub fn field(&self, path: &str) -> Option<&FieldInfo> {
        self.by_path.get(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = (&str, &FieldInfo)> {
        self.by_path.iter().map(|(path, info)| (path.as_str(), info))
    }

    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_alias.iter().map(|(a, p)| (a.as_str(), p.as_str()))
    }

    pub fn is_identifiable(&self, path: &str) -> bool {
        self.by_path.get(path).is_some_and(|f| f.identifiable)
    }

    /// Terms-lookup type holding the entity sets of an identifiable field.
    pub fn lookup_type(&self, path: &str) -> Option<String> {
        let info = self.by_path.get(path).filter(|f| f.identifiable)?;
        match &info.entity {
            Some(entity) => Some(format!("{entity}-ids")),
            None => self.internal_field(LOOKUP_TYPE).map(str::to_owned),
        }
    }

    pub fn is_nested(&self, field: &str) -> bool {
        self.nested_path(field).is_some()
    }

    /// Whether the field's nearest nested ancestor lies at or below `path`.
    pub fn is_nested_under(&self, field: &str, path: &str) -> bool {
        self.nested_path(field)
            .is_some_and(|nested| is_path_within(&nested, path))
    }

    /// Path of the deepest nested ancestor, the field itself included.
    pub fn nested_path(&self, field: &str) -> Option<String> {
        let full = self.full_path(field);
        if self.is_special(full) {
            return None;
        }

        path_prefixes(full)
            .rev()
            .find(|p| self.by_path.get(*p).is_some_and(|f| f.nested))
            .map(str::to_owned)
    }

    /// Closest nested ancestor of `path`, excluding `path` itself.
    pub fn parent_nested_path(&self, path: &str) -> Option<String> {
        path_prefixes(path)
            .rev()
            .filter(|p| *p != path)
            .find(|p| self.by_path.get(*p).is_some_and(|f| f.nested))
            .map(str::to_owned)
    }

    /// Every nested path from the outermost down to `path`.
    pub fn nested_paths(&self, path: &str) -> Vec<String> {
        path_prefixes(path)
            .filter(|p| self.by_path.get(*p).is_some_and(|f| f.nested))
            .map(str::to_owned)
            .collect()
    }

    /// One line per canonical path, in declaration order.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (path, info) in &self.by_path {
            write!(out, "{path}: {}", info.field_type).unwrap();
            if info.nested {
                out.push_str(" nested");
            }
            if info.identifiable {
                out.push_str(" id");
            }
            out.push('\n');
        }
        out
    }

    fn strip_prefix<'a>(&self, alias: &'a str) -> Option<&'a str> {
        alias
            .split_once('.')
            .filter(|(first, _)| *first == self.prefix())
            .map(|(_, rest)| rest)
    }

    fn full_path<'a>(&'a self, field: &'a str) -> &'a str {
        self.by_alias.get(field).map_or(field, String::as_str)
    }
}

/// Field a boolean `has*` alias tests for, e.g. `hasPathway` tests `gene.pathwayId`.
pub fn has_field_target(alias: &str) -> Option<&'static str> {
    HAS_FIELDS
        .iter()
        .find(|(has, _)| *has == alias)
        .map(|(_, target)| *target)
}

/// Segment-aware prefix test: `gene.ssm` is within `gene`, `genes` is not.
pub fn is_path_within(path: &str, ancestor: &str) -> bool {
    path == ancestor
        || path
            .strip_prefix(ancestor)
            .is_some_and(|rest| rest.starts_with('.'))
}

/// `a.b.c` yields `a`, `a.b`, `a.b.c`.
fn path_prefixes(path: &str) -> impl DoubleEndedIterator<Item = &str> {
    path.match_indices('.')
        .map(|(i, _)| &path[..i])
        .chain(std::iter::once(path))
}

fn join(parent: &str, name: &str) -> String {
    match (parent.is_empty(), name.is_empty()) {
        (true, _) => name.to_owned(),
        (false, true) => parent.to_owned(),
        (false, false) => format!("{parent}.{name}"),
    }
}

fn index_field(
    field: &FieldModel,
    parent: &str,
    by_path: &mut IndexMap<String, FieldInfo>,
    by_alias: &mut IndexMap<String, String>,
) -> Result<()> {
    let path = join(parent, &field.name);

    if !field.is_anonymous() {
        let entity = field
            .aliases
            .iter()
            .find_map(|a| a.strip_suffix(".id"))
            .filter(|_| field.identifiable && !field.aliases.iter().any(|a| a == "id"))
            .map(str::to_owned);

        by_path.insert(
            path.clone(),
            FieldInfo {
                field_type: field.field_type(),
                nested: field.nested,
                identifiable: field.identifiable,
                entity,
            },
        );

        for alias in &field.aliases {
            insert_alias(by_alias, alias, &path)?;
            if field.identifiable {
                if alias == "id" {
                    insert_alias(by_alias, ENTITY_SET_ID, &path)?;
                } else if let Some(entity) = alias.strip_suffix(".id") {
                    insert_alias(by_alias, &format!("{entity}.{ENTITY_SET_ID}"), &path)?;
                }
            }
        }
    }

    match &field.kind {
        FieldKind::Array(element) if matches!(element.kind, FieldKind::Object(_)) => {
            index_field(element, &path, by_path, by_alias)
        }
        FieldKind::Object(children) => children
            .iter()
            .try_for_each(|child| index_field(child, &path, by_path, by_alias)),
        _ => Ok(()),
    }
}

fn insert_alias(by_alias: &mut IndexMap<String, String>, alias: &str, path: &str) -> Result<()> {
    match by_alias.get(alias) {
        Some(existing) if existing != path => Err(Error::DuplicateAlias {
            alias: alias.to_owned(),
            first: existing.clone(),
            second: path.to_owned(),
        }),
        _ => {
            by_alias.insert(alias.to_owned(), path.to_owned());
            Ok(())
        }
    }
}
