//! Condition-tree to query-filter compiler for document databases, plus a thin repository
//! façade that hands compiled filters, sort clauses and update documents to a driver.
//!
//! ```
//! use docfilter::query::{compile, CompareOperator, Condition, FilterExpression};
//!
//! let filter = FilterExpression::new(Condition::and(vec![
//!     Condition::number("age", CompareOperator::GreaterThan, 18),
//!     Condition::text("name", CompareOperator::Equal, "Alice"),
//! ]));
//! assert_eq!(
//!     compile(&filter).unwrap(),
//!     r#"{ $and : [ { "age" : { $gt: 18 } },{ "name" : { $eq: "Alice" } } ] }"#
//! );
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod query;
pub mod utils;

pub use client::{AsyncDocumentDriver, DocumentDriver, Entity, FindOptions, Repository};
pub use errors::FilterError;

/// Initializes logging from `log4rs.yaml`.
///
/// # Errors
/// Returns an error if the logging configuration cannot be loaded.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    utils::logger::init()?;
    Ok(())
}
