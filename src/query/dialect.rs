use bson::Document;

use crate::errors::FilterError;

use super::compile::compile;
use super::sort::get_sort_definitions;
use super::types::{FilterExpression, SortField};
use super::update::UpdateSpec;

/// An update ready for a driver: the selecting filter and the update document.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledUpdate {
    pub filter: String,
    pub update: Document,
}

/// Store-specific rendering of filters, sorts and updates.
pub trait QueryDialect {
    /// # Errors
    /// Returns `FilterError::Structural` when the filter tree is malformed.
    fn compile_filter(&self, filter: &FilterExpression) -> Result<String, FilterError>;

    fn compile_sort(&self, sorts: &[SortField]) -> Option<Document>;

    /// # Errors
    /// Returns `FilterError::Structural` when the update's target filter is malformed.
    fn compile_update(&self, update: &UpdateSpec) -> Result<CompiledUpdate, FilterError>;
}

/// Extended-JSON filter syntax with `$`-operators.
#[derive(Debug, Clone, Copy, Default)]
pub struct MongoDialect;

impl QueryDialect for MongoDialect {
    fn compile_filter(&self, filter: &FilterExpression) -> Result<String, FilterError> {
        compile(filter)
    }

    fn compile_sort(&self, sorts: &[SortField]) -> Option<Document> {
        get_sort_definitions(sorts)
    }

    fn compile_update(&self, update: &UpdateSpec) -> Result<CompiledUpdate, FilterError> {
        Ok(CompiledUpdate {
            filter: update.compile_target()?,
            update: update.get_update_definition(),
        })
    }
}
