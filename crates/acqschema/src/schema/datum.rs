//! The editable field datum: a constraint kind, a data kind and string values.

use serde::{Deserialize, Serialize};

use crate::error::{AcqSchemaError, Result};

use super::types::{ConstraintKind, DataKind, ListElementKind};

/// One field's constraint as edited by the operator.
///
/// Values are held as the strings the operator typed regardless of the data
/// kind; typed conversion only happens in [`crate::compile`]. The pairing of
/// constraint kind and data kind is checked on construction and on
/// deserialization, so a datum with e.g. a `range` over `raw_json` cannot
/// exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFieldDatum", into = "RawFieldDatum")]
pub struct FieldDatum {
    constraint: ConstraintKind,
    data_kind: DataKind,
    /// Primary value (also the substring for `contains`).
    pub value: String,
    /// Lower bound for `range`.
    pub min: Option<String>,
    /// Upper bound for `range`.
    pub max: Option<String>,
    /// Allowed deviation for `value+tolerance`.
    pub tolerance: Option<String>,
}

impl FieldDatum {
    /// Create an empty datum, rejecting constraint kinds the data kind does not allow.
    pub fn new(constraint: ConstraintKind, data_kind: DataKind) -> Result<Self> {
        if !data_kind.allows(constraint) {
            return Err(AcqSchemaError::IncompatibleConstraint {
                constraint,
                data_kind,
            });
        }
        Ok(Self {
            constraint,
            data_kind,
            value: String::new(),
            min: None,
            max: None,
            tolerance: None,
        })
    }

    /// Empty datum using the default constraint kind of `data_kind`.
    pub fn empty(data_kind: DataKind) -> Self {
        Self {
            constraint: data_kind.default_constraint(),
            data_kind,
            value: String::new(),
            min: None,
            max: None,
            tolerance: None,
        }
    }

    /// Exact-value datum.
    pub fn exact(data_kind: DataKind, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::empty(data_kind)
        }
    }

    /// Exact-value string datum, the shape used for `Series` labels.
    pub fn text(value: impl Into<String>) -> Self {
        Self::exact(DataKind::String, value)
    }

    /// Numeric range datum.
    pub fn range(min: impl Into<String>, max: impl Into<String>) -> Self {
        Self {
            constraint: ConstraintKind::Range,
            min: Some(min.into()),
            max: Some(max.into()),
            ..Self::empty(DataKind::Number)
        }
    }

    /// Numeric value with tolerance.
    pub fn with_tolerance(value: impl Into<String>, tolerance: impl Into<String>) -> Self {
        Self {
            constraint: ConstraintKind::ValueTolerance,
            value: value.into(),
            tolerance: Some(tolerance.into()),
            ..Self::empty(DataKind::Number)
        }
    }

    /// Substring datum.
    pub fn contains(data_kind: DataKind, value: impl Into<String>) -> Result<Self> {
        let mut datum = Self::new(ConstraintKind::Contains, data_kind)?;
        datum.value = value.into();
        Ok(datum)
    }

    /// The constraint kind.
    pub fn constraint(&self) -> ConstraintKind {
        self.constraint
    }

    /// The data kind.
    pub fn data_kind(&self) -> DataKind {
        self.data_kind
    }

    /// Switch to another constraint kind allowed by the current data kind.
    pub fn set_constraint(&mut self, constraint: ConstraintKind) -> Result<()> {
        if !self.data_kind.allows(constraint) {
            return Err(AcqSchemaError::IncompatibleConstraint {
                constraint,
                data_kind: self.data_kind,
            });
        }
        self.constraint = constraint;
        Ok(())
    }

    /// Change the data kind.
    ///
    /// A new base kind resets the constraint kind to the kind's default and
    /// clears every value. Switching only the element kind of a list keeps
    /// the constraint and the values.
    pub fn set_data_kind(&mut self, data_kind: DataKind) {
        if data_kind.as_str() == self.data_kind.as_str() {
            self.data_kind = data_kind;
            return;
        }
        *self = Self::empty(data_kind);
    }

    /// Builder form of [`FieldDatum::set_data_kind`].
    pub fn into_data_kind(mut self, data_kind: DataKind) -> Self {
        self.set_data_kind(data_kind);
        self
    }

    /// An unfilled datum of the same data kind.
    pub fn blank(&self) -> Self {
        Self::empty(self.data_kind)
    }

    /// The bound/tolerance slots as the empty-string-defaulted strings used
    /// in identity keys.
    pub(crate) fn slots(&self) -> [&str; 3] {
        [
            self.min.as_deref().unwrap_or(""),
            self.max.as_deref().unwrap_or(""),
            self.tolerance.as_deref().unwrap_or(""),
        ]
    }
}

impl Default for FieldDatum {
    fn default() -> Self {
        Self::empty(DataKind::String)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum DataType {
    Number,
    String,
    List,
    RawJson,
}

/// Serialized form of a [`FieldDatum`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawFieldDatum {
    constraint_type: ConstraintKind,
    data_type: DataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    list_element_type: Option<ListElementKind>,
    #[serde(default)]
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tolerance: Option<String>,
}

impl TryFrom<RawFieldDatum> for FieldDatum {
    type Error = AcqSchemaError;

    fn try_from(raw: RawFieldDatum) -> Result<Self> {
        let data_kind = match raw.data_type {
            DataType::Number => DataKind::Number,
            DataType::String => DataKind::String,
            DataType::List => DataKind::List(raw.list_element_type.unwrap_or_default()),
            DataType::RawJson => DataKind::RawJson,
        };
        let mut datum = FieldDatum::new(raw.constraint_type, data_kind)?;
        datum.value = raw.value;
        datum.min = raw.min_value;
        datum.max = raw.max_value;
        datum.tolerance = raw.tolerance;
        Ok(datum)
    }
}

impl From<FieldDatum> for RawFieldDatum {
    fn from(datum: FieldDatum) -> Self {
        let data_type = match datum.data_kind {
            DataKind::Number => DataType::Number,
            DataKind::String => DataType::String,
            DataKind::List(_) => DataType::List,
            DataKind::RawJson => DataType::RawJson,
        };
        Self {
            constraint_type: datum.constraint,
            data_type,
            list_element_type: datum.data_kind.list_element(),
            value: datum.value,
            min_value: datum.min,
            max_value: datum.max,
            tolerance: datum.tolerance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_disallowed_pairing() {
        let err = FieldDatum::new(ConstraintKind::Range, DataKind::RawJson).unwrap_err();
        assert!(matches!(
            err,
            AcqSchemaError::IncompatibleConstraint {
                constraint: ConstraintKind::Range,
                data_kind: DataKind::RawJson
            }
        ));
        assert!(FieldDatum::contains(DataKind::Number, "4").is_err());
        assert!(FieldDatum::contains(DataKind::String, "SE").is_ok());
    }

    #[test]
    fn test_data_kind_change_resets_values() {
        let mut datum = FieldDatum::with_tolerance("2.5", "0.1");
        datum.set_data_kind(DataKind::String);

        assert_eq!(datum.constraint(), ConstraintKind::Value);
        assert_eq!(datum.data_kind(), DataKind::String);
        assert!(datum.value.is_empty());
        assert_eq!(datum.tolerance, None);
    }

    #[test]
    fn test_list_element_change_keeps_values() {
        let mut datum = FieldDatum::exact(DataKind::List(ListElementKind::String), "1,2");
        datum.set_data_kind(DataKind::List(ListElementKind::Number));

        assert_eq!(datum.value, "1,2");
        assert_eq!(
            datum.data_kind(),
            DataKind::List(ListElementKind::Number)
        );
    }

    #[test]
    fn test_set_constraint_checks_data_kind() {
        let mut datum = FieldDatum::text("ep2d");
        assert!(datum.set_constraint(ConstraintKind::Range).is_err());
        datum.set_constraint(ConstraintKind::Contains).unwrap();
        assert_eq!(datum.constraint(), ConstraintKind::Contains);
    }

    #[test]
    fn test_serde_shape() {
        let datum = FieldDatum::exact(DataKind::List(ListElementKind::Number), "1,2");
        let json = serde_json::to_value(&datum).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "constraint_type": "value",
                "data_type": "list",
                "list_element_type": "number",
                "value": "1,2"
            })
        );

        let back: FieldDatum = serde_json::from_value(json).unwrap();
        assert_eq!(back, datum);
    }

    #[test]
    fn test_deserialize_rejects_disallowed_pairing() {
        let json = serde_json::json!({
            "constraint_type": "contains",
            "data_type": "raw_json",
            "value": "{}"
        });
        assert!(serde_json::from_value::<FieldDatum>(json).is_err());
    }
}
