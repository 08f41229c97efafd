// Submodules for separation of concerns
pub mod catalog;
pub mod convert;
mod compile;
mod dialect;
mod parse;
mod sort;
mod types;
mod update;
mod validate;

// Public API re-exports
pub use catalog::{CompareToken, REGEX_OPTIONS, RegexShape};
pub use compile::compile;
pub use dialect::{CompiledUpdate, MongoDialect, QueryDialect};
pub use parse::{
    ConditionSerde, FilterSerde, UpdateSpecSerde, parse_filter_json, parse_sort_field,
    parse_update_json,
};
pub use sort::get_sort_definitions;
pub use types::{
    CompareOperator, Condition, FieldType, FieldValue, FilterExpression, GroupOperator, ID_FIELD,
    MATCH_ALL, Predicate, SortDirection, SortField,
};
pub use update::{UpdateSpec, UpdateSpecBuilder, UpdateTarget};
pub use validate::{validate, validate_condition};
