use bson::Bson;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Primary key field of every stored document.
pub const ID_FIELD: &str = "_id";

/// Filter text matching every document.
pub const MATCH_ALL: &str = "{ }";

/// Governs how a leaf value is quoted when compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FieldType {
    #[default]
    String,
    Number,
    DateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompareOperator {
    #[default]
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanEqual,
    LessThan,
    LessThanEqual,
    Contains,
    BeginWith,
    EndWith,
    In,
    NotIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GroupOperator {
    #[default]
    #[serde(rename = "NONE")]
    None,
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
    #[serde(rename = "NOT")]
    Not,
    #[serde(rename = "NOR")]
    Nor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// A single field comparison.
///
/// Built only through the [`Condition`] constructors; the compiler picks the literal form from
/// the field type and the kind of value together.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub(crate) parameter: String,
    pub(crate) field_type: FieldType,
    pub(crate) compare: CompareOperator,
    pub(crate) value: Bson,
}

impl Predicate {
    #[must_use]
    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        self.field_type
    }

    #[must_use]
    pub const fn compare(&self) -> CompareOperator {
        self.compare
    }

    #[must_use]
    pub const fn value(&self) -> &Bson {
        &self.value
    }
}

/// A node of the condition tree: either a leaf predicate or a boolean group of children.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Leaf(Predicate),
    Group { op: GroupOperator, children: Vec<Condition> },
}

impl Condition {
    pub fn leaf(
        parameter: impl Into<String>,
        field_type: FieldType,
        compare: CompareOperator,
        value: impl Into<Bson>,
    ) -> Self {
        Self::Leaf(Predicate {
            parameter: parameter.into(),
            field_type,
            compare,
            value: value.into(),
        })
    }

    /// String comparison; the value is quoted when compiled.
    pub fn text(
        parameter: impl Into<String>,
        compare: CompareOperator,
        value: impl Into<String>,
    ) -> Self {
        Self::leaf(parameter, FieldType::String, compare, Bson::String(value.into()))
    }

    pub fn number(
        parameter: impl Into<String>,
        compare: CompareOperator,
        value: impl Into<Bson>,
    ) -> Self {
        Self::leaf(parameter, FieldType::Number, compare, value)
    }

    /// Date comparison rendered as an `ISODate("...")` shell literal, millisecond precision.
    pub fn date_time(
        parameter: impl Into<String>,
        compare: CompareOperator,
        value: DateTime<Utc>,
    ) -> Self {
        let at = bson::DateTime::from_millis(value.timestamp_millis());
        Self::leaf(parameter, FieldType::DateTime, compare, Bson::DateTime(at))
    }

    /// `$in` over the given values; they are stored as an array and rendered as JSON text.
    pub fn one_of<V: Into<Bson>>(parameter: impl Into<String>, values: Vec<V>) -> Self {
        let arr = values.into_iter().map(Into::into).collect::<Vec<Bson>>();
        Self::leaf(parameter, FieldType::Number, CompareOperator::In, Bson::Array(arr))
    }

    pub fn none_of<V: Into<Bson>>(parameter: impl Into<String>, values: Vec<V>) -> Self {
        let arr = values.into_iter().map(Into::into).collect::<Vec<Bson>>();
        Self::leaf(parameter, FieldType::Number, CompareOperator::NotIn, Bson::Array(arr))
    }

    pub fn group(op: GroupOperator, children: Vec<Self>) -> Self {
        Self::Group { op, children }
    }

    pub fn and(children: Vec<Self>) -> Self {
        Self::group(GroupOperator::And, children)
    }

    pub fn or(children: Vec<Self>) -> Self {
        Self::group(GroupOperator::Or, children)
    }
}

/// Top-level filter handed to every query-driving operation.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpression {
    Single(Condition),
    Group { op: GroupOperator, conditions: Vec<Condition> },
}

impl FilterExpression {
    #[must_use]
    pub const fn new(condition: Condition) -> Self {
        Self::Single(condition)
    }

    #[must_use]
    pub const fn group(op: GroupOperator, conditions: Vec<Condition>) -> Self {
        Self::Group { op, conditions }
    }

    /// Equality on `_id`. Hex ids render as `ObjectId("...")`, anything else as a plain string.
    #[must_use]
    pub fn by_id(id: &str) -> Self {
        let condition = match ObjectId::parse_str(id) {
            Ok(oid) => Condition::leaf(
                ID_FIELD,
                FieldType::Number,
                CompareOperator::Equal,
                Bson::ObjectId(oid),
            ),
            Err(_) => Condition::text(ID_FIELD, CompareOperator::Equal, id),
        };
        Self::Single(condition)
    }
}

impl From<Condition> for FilterExpression {
    fn from(condition: Condition) -> Self {
        Self::Single(condition)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortField {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self { field: field.into(), direction }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Descending)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    pub field: String,
    pub value: Bson,
}

impl FieldValue {
    pub fn new(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Self { field: field.into(), value: value.into() }
    }
}
