//! Query engine facade.
//!
//! One immutable context per document type: the index to search, the type's
//! field model and its scoring. The engine is built once and shared; each
//! [`QueryEngine::execute`] call runs the whole pipeline on its own.


use std::borrow::Cow;

use indexmap::IndexMap;
use pql_core::{DocType, TypeModel, type_model};

use crate::ast::{Statement, StatementParser, serialize};
use crate::lower::lower;
use crate::request::{Request, build};
use crate::transform::{ScoringConfig, TransformContext, transform};
use crate::{Error, Result};

/// Where documents of a type are searched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryContext {
    pub index: String,
    pub doc_type: DocType,
}

impl QueryContext {
    pub fn new(index: impl Into<String>, doc_type: DocType) -> Self {
        Self {
            index: index.into(),
            doc_type,
        }
    }
}

/// What [`QueryEngine::execute`] compiles: query text or an already built statement.
#[derive(Debug, Clone, Copy)]
pub enum QueryInput<'a> {
    Text(&'a str),
    Statement(&'a Statement),
}

impl<'a> From<&'a str> for QueryInput<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for QueryInput<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a Statement> for QueryInput<'a> {
    fn from(statement: &'a Statement) -> Self {
        Self::Statement(statement)
    }
}

#[derive(Debug, Clone)]
struct Context {
    index: String,
    model: Cow<'static, TypeModel>,
    scoring: Option<ScoringConfig>,
}

/// Assembles a [`QueryEngine`].
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    contexts: IndexMap<DocType, Context>,
    scoring: IndexMap<DocType, Option<ScoringConfig>>,
    // outer `None` keeps the parser default
    exec_fuel: Option<Option<u32>>,
    recursion_fuel: Option<Option<u32>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type with its built-in model and default scoring.
    pub fn with_context(mut self, context: QueryContext) -> Self {
        self.contexts.insert(
            context.doc_type,
            Context {
                index: context.index,
                model: Cow::Borrowed(type_model(context.doc_type)),
                scoring: ScoringConfig::for_type(context.doc_type),
            },
        );
        self
    }

    /// Registers a type with a custom model, e.g. one loaded with
    /// [`TypeModel::from_json`]. Replaces any context of the same type.
    pub fn with_model(mut self, index: impl Into<String>, model: TypeModel) -> Self {
        let doc_type = model.doc_type();
        self.contexts.insert(
            doc_type,
            Context {
                index: index.into(),
                model: Cow::Owned(model),
                scoring: ScoringConfig::for_type(doc_type),
            },
        );
        self
    }

    /// Overrides the scoring of a type. `None` turns scoring off.
    pub fn with_scoring(mut self, doc_type: DocType, scoring: Option<ScoringConfig>) -> Self {
        self.scoring.insert(doc_type, scoring);
        self
    }

    /// Parser operation limit. `None` removes the limit.
    pub fn with_exec_fuel(mut self, fuel: Option<u32>) -> Self {
        self.exec_fuel = Some(fuel);
        self
    }

    /// Parser nesting limit. `None` removes the limit.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel = Some(limit);
        self
    }

    pub fn build(self) -> QueryEngine {
        let mut contexts = self.contexts;
        for (doc_type, scoring) in self.scoring {
            match contexts.get_mut(&doc_type) {
                Some(context) => context.scoring = scoring,
                None => tracing::warn!(%doc_type, "scoring set for an unregistered type"),
            }
        }

        QueryEngine {
            contexts,
            exec_fuel: self.exec_fuel,
            recursion_fuel: self.recursion_fuel,
        }
    }
}

/// Compiles queries for the registered document types.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    contexts: IndexMap<DocType, Context>,
    exec_fuel: Option<Option<u32>>,
    recursion_fuel: Option<Option<u32>>,
}

impl QueryEngine {
    /// All built-in types on one index, with default scoring.
    pub fn new(index: &str) -> Self {
        DocType::ALL
            .into_iter()
            .fold(EngineBuilder::new(), |builder, doc_type| {
                builder.with_context(QueryContext::new(index, doc_type))
            })
            .build()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub fn doc_types(&self) -> impl Iterator<Item = DocType> + '_ {
        self.contexts.keys().copied()
    }

    pub fn model(&self, doc_type: DocType) -> Option<&TypeModel> {
        self.contexts.get(&doc_type).map(|context| context.model.as_ref())
    }

    pub fn scoring(&self, doc_type: DocType) -> Option<&ScoringConfig> {
        self.contexts.get(&doc_type)?.scoring.as_ref()
    }

    /// Parses with the engine's parser limits.
    pub fn parse(&self, text: &str) -> Result<Statement> {
        let mut parser = StatementParser::new(text);
        if let Some(fuel) = self.exec_fuel {
            parser = parser.with_exec_fuel(fuel);
        }
        if let Some(limit) = self.recursion_fuel {
            parser = parser.with_recursion_fuel(limit);
        }

        let (statement, diagnostics) = parser.parse()?;
        if diagnostics.has_errors() {
            return Err(Error::Syntax(diagnostics));
        }
        Ok(statement)
    }

    /// Compiles a query for `doc_type` into a search request.
    pub fn execute<'a>(&self, input: impl Into<QueryInput<'a>>, doc_type: DocType) -> Result<Request> {
        let Some(context) = self.contexts.get(&doc_type) else {
            tracing::warn!(%doc_type, "no context for type");
            return Err(Error::UnsupportedType(doc_type.to_string()));
        };

        let parsed;
        let statement = match input.into() {
            QueryInput::Text(text) => {
                parsed = self.parse(text)?;
                &parsed
            }
            QueryInput::Statement(statement) => statement,
        };
        tracing::debug!(%doc_type, query = %serialize(statement), "compiling");

        let model = context.model.as_ref();
        let root = lower(statement, model)?;
        tracing::debug!(ir = %root.dump(), "lowered");

        let ctx = TransformContext::new(model).with_scoring(context.scoring.as_ref());
        let root = transform(root, ctx)?;
        Ok(build(&root, &context.index, model))
    }
}
