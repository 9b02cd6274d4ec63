#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Field and type models for the portal document types.
//!
//! A [`TypeModel`] indexes a tree of [`FieldModel`]s by canonical path and by
//! UI alias. The compiler uses it to:
//! - resolve aliases such as `end` to `chromosome_end`
//! - find the nested scope a field lives in
//! - find the terms-lookup type for identifiable fields
//!
//! Built-in models for every [`DocType`] are available through [`type_model`].

mod doc_type;
pub mod field;
mod invariants;
pub mod model;
mod models;

#[cfg(test)]
mod field_tests;

pub use doc_type::DocType;
pub use field::{FieldKind, FieldModel, FieldType};
pub use model::{FieldInfo, TypeModel, TypeModelDef, has_field_target, is_path_within};
pub use models::type_model;

/// Errors raised while building or loading a type model, or resolving against one.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid type model: {0}")]
    Json(#[from] serde_json::Error),

    #[error("alias `{alias}` maps to both `{first}` and `{second}`")]
    DuplicateAlias {
        alias: String,
        first: String,
        second: String,
    },

    #[error("unknown field `{alias}` for type `{doc_type}`")]
    UnknownField { alias: String, doc_type: DocType },

    #[error("unknown document type `{0}`")]
    UnknownDocType(String),

    #[error("array field `{0}` has no element type")]
    MissingElement(String),
}

pub type Result<T> = std::result::Result<T, Error>;
