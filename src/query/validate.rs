use crate::errors::FilterError;

use super::types::{Condition, FilterExpression, GroupOperator};

/// Checks the whole filter tree, pre-order, before anything is rendered.
///
/// # Errors
/// Returns `FilterError::Structural` for the first node that is neither a usable leaf nor a
/// non-empty group.
pub fn validate(filter: &FilterExpression) -> Result<(), FilterError> {
    match filter {
        FilterExpression::Single(condition) => validate_condition(condition),
        FilterExpression::Group { op, conditions } => {
            check_group(*op, conditions.len(), "filter")?;
            conditions.iter().try_for_each(validate_condition)
        }
    }
}

/// # Errors
/// Returns `FilterError::Structural` when this node or any descendant is malformed.
pub fn validate_condition(condition: &Condition) -> Result<(), FilterError> {
    match condition {
        Condition::Leaf(p) => {
            if p.parameter.is_empty() {
                return Err(FilterError::structural(
                    "condition should have either a single condition or a group condition",
                ));
            }
            Ok(())
        }
        Condition::Group { op, children } => {
            check_group(*op, children.len(), "condition")?;
            children.iter().try_for_each(validate_condition)
        }
    }
}

fn check_group(op: GroupOperator, len: usize, what: &str) -> Result<(), FilterError> {
    if op == GroupOperator::None || len == 0 {
        return Err(FilterError::structural(format!(
            "{what} should have either a single condition or a group condition"
        )));
    }
    Ok(())
}
