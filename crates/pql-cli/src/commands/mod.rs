pub mod ast;
pub mod check;
pub mod compile;
pub mod filter;
pub mod query_loader;
pub mod types;

#[cfg(test)]
mod types_tests;
