//! Core kind definitions for the field constraint model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AcqSchemaError;

/// Validation strategy applied to a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstraintKind {
    /// Exact value match.
    #[serde(rename = "value")]
    Value,
    /// Numeric range (inclusive bounds).
    #[serde(rename = "range")]
    Range,
    /// Numeric value with an allowed tolerance.
    #[serde(rename = "value+tolerance")]
    ValueTolerance,
    /// Substring match.
    #[serde(rename = "contains")]
    Contains,
}

impl ConstraintKind {
    /// Wire name of the constraint kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintKind::Value => "value",
            ConstraintKind::Range => "range",
            ConstraintKind::ValueTolerance => "value+tolerance",
            ConstraintKind::Contains => "contains",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConstraintKind {
    type Err = AcqSchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "value" => Ok(ConstraintKind::Value),
            "range" => Ok(ConstraintKind::Range),
            "value+tolerance" => Ok(ConstraintKind::ValueTolerance),
            "contains" => Ok(ConstraintKind::Contains),
            other => Err(AcqSchemaError::UnsupportedFormat(format!(
                "unknown constraint kind '{}'",
                other
            ))),
        }
    }
}

/// Interpretation of the elements of a list value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListElementKind {
    Number,
    #[default]
    String,
}

/// Primitive type of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataKind {
    /// A single number.
    Number,
    /// Free text.
    #[default]
    String,
    /// Comma-separated list of numbers or strings.
    List(ListElementKind),
    /// Arbitrary JSON, parsed at compile time.
    RawJson,
}

impl DataKind {
    /// Wire name of the base data kind (without the list element kind).
    pub fn as_str(&self) -> &'static str {
        match self {
            DataKind::Number => "number",
            DataKind::String => "string",
            DataKind::List(_) => "list",
            DataKind::RawJson => "raw_json",
        }
    }

    /// Element kind for lists, `None` for every other data kind.
    pub fn list_element(&self) -> Option<ListElementKind> {
        match self {
            DataKind::List(element) => Some(*element),
            _ => None,
        }
    }

    /// Constraint kinds this data kind accepts, default first.
    pub fn allowed_constraints(&self) -> &'static [ConstraintKind] {
        allowed_constraint_kinds(*self)
    }

    /// The constraint kind a field falls back to after a data kind change.
    pub fn default_constraint(&self) -> ConstraintKind {
        self.allowed_constraints()[0]
    }

    /// Whether `constraint` may be used with this data kind.
    pub fn allows(&self, constraint: ConstraintKind) -> bool {
        self.allowed_constraints().contains(&constraint)
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataKind::List(ListElementKind::Number) => f.write_str("list<number>"),
            DataKind::List(ListElementKind::String) => f.write_str("list<string>"),
            other => f.write_str(other.as_str()),
        }
    }
}

const NUMBER_CONSTRAINTS: &[ConstraintKind] = &[
    ConstraintKind::Value,
    ConstraintKind::Range,
    ConstraintKind::ValueTolerance,
];
const TEXT_CONSTRAINTS: &[ConstraintKind] = &[ConstraintKind::Value, ConstraintKind::Contains];
const JSON_CONSTRAINTS: &[ConstraintKind] = &[ConstraintKind::Value];

/// Ordered constraint kinds allowed for a data kind. The first entry is the
/// default picked whenever a field's data kind changes.
pub fn allowed_constraint_kinds(data_kind: DataKind) -> &'static [ConstraintKind] {
    match data_kind {
        DataKind::Number => NUMBER_CONSTRAINTS,
        DataKind::String | DataKind::List(_) => TEXT_CONSTRAINTS,
        DataKind::RawJson => JSON_CONSTRAINTS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_constraint_table() {
        assert_eq!(
            allowed_constraint_kinds(DataKind::Number),
            &[
                ConstraintKind::Value,
                ConstraintKind::Range,
                ConstraintKind::ValueTolerance
            ]
        );
        assert_eq!(
            allowed_constraint_kinds(DataKind::String),
            &[ConstraintKind::Value, ConstraintKind::Contains]
        );
        assert_eq!(
            allowed_constraint_kinds(DataKind::List(ListElementKind::Number)),
            allowed_constraint_kinds(DataKind::String)
        );
        assert_eq!(
            allowed_constraint_kinds(DataKind::RawJson),
            &[ConstraintKind::Value]
        );
    }

    #[test]
    fn test_default_constraint_is_first_allowed() {
        for kind in [
            DataKind::Number,
            DataKind::String,
            DataKind::List(ListElementKind::String),
            DataKind::RawJson,
        ] {
            assert_eq!(kind.default_constraint(), ConstraintKind::Value);
        }
        assert!(!DataKind::RawJson.allows(ConstraintKind::Contains));
        assert!(DataKind::Number.allows(ConstraintKind::Range));
    }

    #[test]
    fn test_constraint_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&ConstraintKind::ValueTolerance).unwrap(),
            "\"value+tolerance\""
        );
        assert_eq!(
            "contains".parse::<ConstraintKind>().unwrap(),
            ConstraintKind::Contains
        );
        assert!("between".parse::<ConstraintKind>().is_err());
    }
}
