//! Typed payloads handed to the compliance engine.

use serde::{Serialize, Serializer};
use serde_json::Value;

use super::number::serialize_number;

/// A field value after type conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// Parsed number; NaN when the text did not parse.
    Number(f64),
    /// Text passed through (or raw JSON that failed to parse).
    Text(String),
    /// Split list.
    List(Vec<TypedValue>),
    /// Parsed raw JSON.
    Json(Value),
}

impl Serialize for TypedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TypedValue::Number(n) => serialize_number(n, serializer),
            TypedValue::Text(s) => serializer.serialize_str(s),
            TypedValue::List(items) => serializer.collect_seq(items),
            TypedValue::Json(value) => value.serialize(serializer),
        }
    }
}

/// Constraint-specific part of a compiled field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConstraintPayload {
    /// `{value}`
    Value { value: TypedValue },
    /// `{contains}`, always the literal string.
    Contains { contains: String },
    /// `{minValue, maxValue}`
    Range {
        #[serde(rename = "minValue")]
        min_value: TypedValue,
        #[serde(rename = "maxValue")]
        max_value: TypedValue,
    },
    /// `{value, tolerance}`
    ValueTolerance {
        value: TypedValue,
        #[serde(serialize_with = "serialize_number")]
        tolerance: f64,
    },
}

/// One compiled field: its name plus the flattened constraint payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledField {
    pub field: String,
    #[serde(flatten)]
    pub constraint: ConstraintPayload,
}

/// One compiled series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledSeries {
    pub name: String,
    pub fields: Vec<CompiledField>,
}

/// The acquisition description consumed by the compliance engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompiledAcquisition {
    pub fields: Vec<CompiledField>,
    pub series: Vec<CompiledSeries>,
}

impl CompiledAcquisition {
    /// Serialize to a JSON value.
    pub fn to_json(&self) -> Value {
        // Plain data with string keys: serialization cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
