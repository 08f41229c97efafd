use crate::errors::FilterError;
use bson::Bson;
use serde::{Deserialize, Serialize};

use super::types::{
    CompareOperator, Condition, FieldType, FieldValue, FilterExpression, GroupOperator, SortDirection,
    SortField,
};
use super::update::UpdateSpec;

// Serde-facing property-bag forms. Every field is optional, so a node can arrive with both leaf
// content and children, or with neither; conversion into the typed tree rejects both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConditionSerde {
    pub parameter: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub compare: CompareOperator,
    pub value: Option<Bson>,
    pub group_operator: GroupOperator,
    pub group_conditions: Vec<ConditionSerde>,
}

impl Default for ConditionSerde {
    fn default() -> Self {
        Self {
            parameter: String::new(),
            field_type: FieldType::String,
            compare: CompareOperator::Equal,
            value: None,
            // nested groups default to AND when only the children are given
            group_operator: GroupOperator::And,
            group_conditions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterSerde {
    pub condition: Option<ConditionSerde>,
    pub group_operator: GroupOperator,
    pub group_conditions: Vec<ConditionSerde>,
}

impl TryFrom<ConditionSerde> for Condition {
    type Error = FilterError;
    fn try_from(cs: ConditionSerde) -> Result<Self, Self::Error> {
        let has_group = !cs.group_conditions.is_empty() && cs.group_operator != GroupOperator::None;
        let has_leaf = !cs.parameter.is_empty();
        match (has_leaf, has_group) {
            (true, true) => Err(FilterError::structural(
                "condition should not have single condition and group condition both",
            )),
            (false, false) => Err(FilterError::structural(
                "condition should have atleast single condition or group condition",
            )),
            (true, false) => Ok(Self::leaf(
                cs.parameter,
                cs.field_type,
                cs.compare,
                cs.value.unwrap_or(Bson::Null),
            )),
            (false, true) => Ok(Self::Group {
                op: cs.group_operator,
                children: cs
                    .group_conditions
                    .into_iter()
                    .map(Self::try_from)
                    .collect::<Result<_, _>>()?,
            }),
        }
    }
}

impl TryFrom<FilterSerde> for FilterExpression {
    type Error = FilterError;
    fn try_from(fs: FilterSerde) -> Result<Self, Self::Error> {
        let has_group = !fs.group_conditions.is_empty() && fs.group_operator != GroupOperator::None;
        match (fs.condition, has_group) {
            (Some(_), true) => Err(FilterError::structural(
                "filter should not have single condition and group condition both",
            )),
            (None, false) => Err(FilterError::structural(
                "filter should have atleast single condition or group condition",
            )),
            (Some(c), false) => Ok(Self::Single(Condition::try_from(c)?)),
            (None, true) => Ok(Self::Group {
                op: fs.group_operator,
                conditions: fs
                    .group_conditions
                    .into_iter()
                    .map(Condition::try_from)
                    .collect::<Result<_, _>>()?,
            }),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateSpecSerde {
    pub filter_id: Option<String>,
    pub filter: Option<FilterSerde>,
    pub field_values: Vec<FieldValue>,
}

impl TryFrom<UpdateSpecSerde> for UpdateSpec {
    type Error = FilterError;
    fn try_from(us: UpdateSpecSerde) -> Result<Self, Self::Error> {
        let mut b = Self::builder().set_all(us.field_values);
        if let Some(id) = us.filter_id {
            b = b.id(id);
        }
        if let Some(f) = us.filter {
            b = b.filter(FilterExpression::try_from(f)?);
        }
        b.build()
    }
}

/// # Errors
/// Returns an error if the JSON cannot be parsed or the parsed tree is structurally invalid.
pub fn parse_filter_json(json: &str) -> Result<FilterExpression, FilterError> {
    let fs: FilterSerde = serde_json::from_str(json)?;
    FilterExpression::try_from(fs)
}

/// # Errors
/// Returns an error if the JSON cannot be parsed, the target filter is invalid, or no field is set.
pub fn parse_update_json(json: &str) -> Result<UpdateSpec, FilterError> {
    let us: UpdateSpecSerde = serde_json::from_str(json)?;
    UpdateSpec::try_from(us)
}

/// Parses `field`, `field:asc` or `field:desc`.
///
/// # Errors
/// Returns `FilterError::Structural` for an empty field name or an unknown direction.
pub fn parse_sort_field(s: &str) -> Result<SortField, FilterError> {
    let (field, dir) = match s.rsplit_once(':') {
        Some((f, d)) => (f.trim(), d.trim()),
        None => (s.trim(), "asc"),
    };
    if field.is_empty() {
        return Err(FilterError::structural(format!("sort field missing in '{s}'")));
    }
    let direction = match dir.to_ascii_lowercase().as_str() {
        "asc" | "ascending" | "1" => SortDirection::Ascending,
        "desc" | "descending" | "-1" => SortDirection::Descending,
        other => {
            return Err(FilterError::structural(format!("unknown sort direction '{other}'")));
        }
    };
    Ok(SortField::new(field, direction))
}
