//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{Result, TypeModel};

pub(crate) fn ensure_builtin(model: Result<TypeModel>) -> TypeModel {
    model.unwrap_or_else(|e| panic!("built-in type model is malformed: {e}"))
}
