//! Operator catalog: maps group and comparison operators to query-language tokens.

use super::types::{CompareOperator, GroupOperator};

/// Options attached to every regex comparator: case-insensitive + multiline.
pub const REGEX_OPTIONS: &str = "im";

/// How a comparison operator is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareToken {
    /// Fixed token with a typed literal (`$eq`, `$gt`, ...).
    Scalar(&'static str),
    /// Fixed token with the raw, pre-rendered array text (`$in`, `$nin`).
    Set(&'static str),
    /// Regex pattern built around the raw value.
    Pattern(RegexShape),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegexShape {
    Contains,
    BeginWith,
    EndWith,
}

impl RegexShape {
    /// Wraps `raw` into the pattern body. The value is not escaped.
    #[must_use]
    pub fn pattern(self, raw: &str) -> String {
        match self {
            Self::Contains => format!(".*{raw}.*"),
            Self::BeginWith => format!("^{raw}"),
            Self::EndWith => format!("{raw}$"),
        }
    }
}

impl GroupOperator {
    /// `None` has no token; a group carrying it never passes validation.
    #[must_use]
    pub const fn token(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::And => Some("$and"),
            Self::Or => Some("$or"),
            Self::Not => Some("$not"),
            Self::Nor => Some("$nor"),
        }
    }
}

impl CompareOperator {
    #[must_use]
    pub const fn token(self) -> CompareToken {
        match self {
            Self::Equal => CompareToken::Scalar("$eq"),
            Self::NotEqual => CompareToken::Scalar("$ne"),
            Self::GreaterThan => CompareToken::Scalar("$gt"),
            Self::GreaterThanEqual => CompareToken::Scalar("$gte"),
            Self::LessThan => CompareToken::Scalar("$lt"),
            Self::LessThanEqual => CompareToken::Scalar("$lte"),
            Self::In => CompareToken::Set("$in"),
            Self::NotIn => CompareToken::Set("$nin"),
            Self::Contains => CompareToken::Pattern(RegexShape::Contains),
            Self::BeginWith => CompareToken::Pattern(RegexShape::BeginWith),
            Self::EndWith => CompareToken::Pattern(RegexShape::EndWith),
        }
    }
}
