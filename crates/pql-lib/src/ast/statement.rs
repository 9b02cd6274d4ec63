//! Statement: the root of a Language AST.

use indexmap::IndexMap;

use super::nodes::{Filter, Limit, NodeKind, SortOrder};
use crate::{Error, Result};

/// Field list meaning "every field".
pub const ALL: &str = "*";

const COUNT_EXCLUSIVE: &str = "a count statement takes no select, facets, sort or limit";

/// A count statement or a search statement.
///
/// A count statement has a filter at most. A search statement has at most one
/// select, sort and limit, any number of facets, and at most one filter.
/// Operations that would break this fail with [`Error::StatementShape`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    count: bool,
    select: Vec<String>,
    facets: Vec<Vec<String>>,
    filter: Option<Filter>,
    sort: IndexMap<String, SortOrder>,
    limit: Option<Limit>,
}

impl Statement {
    /// An empty search statement.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count() -> Self {
        Self {
            count: true,
            ..Self::default()
        }
    }

    pub fn is_count(&self) -> bool {
        self.count
    }

    pub fn has_select(&self) -> bool {
        !self.select.is_empty()
    }

    pub fn has_facets(&self) -> bool {
        !self.facets.is_empty()
    }

    pub fn has_filters(&self) -> bool {
        self.filter.is_some()
    }

    pub fn has_sort(&self) -> bool {
        !self.sort.is_empty()
    }

    pub fn has_limit(&self) -> bool {
        self.limit.is_some()
    }

    pub fn select(&self) -> &[String] {
        &self.select
    }

    pub fn facets(&self) -> &[Vec<String>] {
        &self.facets
    }

    pub fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    pub fn sort(&self) -> &IndexMap<String, SortOrder> {
        &self.sort
    }

    pub fn limit(&self) -> Option<Limit> {
        self.limit
    }

    /// Kinds of the children present, in canonical order.
    pub fn kinds(&self) -> Vec<NodeKind> {
        let present = [
            (NodeKind::Count, self.count),
            (NodeKind::Select, self.has_select()),
            (NodeKind::Facets, self.has_facets()),
            (NodeKind::Filter, self.has_filters()),
            (NodeKind::Sort, self.has_sort()),
            (NodeKind::Limit, self.has_limit()),
        ];
        present
            .into_iter()
            .filter_map(|(kind, has)| has.then_some(kind))
            .collect()
    }

    /// Turns the statement into a count statement.
    pub fn set_count(&mut self) -> Result<()> {
        if self.has_select() || self.has_facets() || self.has_sort() || self.has_limit() {
            return Err(Error::StatementShape(COUNT_EXCLUSIVE));
        }
        self.count = true;
        Ok(())
    }

    /// Replaces the selected fields.
    pub fn set_select(&mut self, fields: Vec<String>) -> Result<()> {
        self.ensure_search()?;
        self.select = fields;
        Ok(())
    }

    /// Merges fields into the select list, skipping ones already present.
    pub fn add_select(&mut self, fields: Vec<String>) -> Result<()> {
        self.ensure_search()?;
        for field in fields {
            if !self.select.contains(&field) {
                self.select.push(field);
            }
        }
        Ok(())
    }

    pub fn add_facets(&mut self, facets: Vec<String>) -> Result<()> {
        self.ensure_search()?;
        self.facets.push(facets);
        Ok(())
    }

    /// Replaces the filter. Allowed on count statements too.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = Some(filter);
    }

    pub fn take_filter(&mut self) -> Option<Filter> {
        self.filter.take()
    }

    pub fn set_sort(&mut self, sort: IndexMap<String, SortOrder>) -> Result<()> {
        self.ensure_search()?;
        self.sort = sort;
        Ok(())
    }

    pub fn set_limit(&mut self, limit: Limit) -> Result<()> {
        self.ensure_search()?;
        self.limit = Some(limit);
        Ok(())
    }

    fn ensure_search(&self) -> Result<()> {
        if self.count {
            return Err(Error::StatementShape(COUNT_EXCLUSIVE));
        }
        Ok(())
    }
}
