//! Constant/variable partition of sampled fields.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::input::SampleRow;

/// Result of partitioning the selected fields of a sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    /// Fields holding the same value in every row, with that value.
    pub constant: IndexMap<String, Value>,
    /// Fields whose value differs between rows, in selection order.
    pub variable: Vec<String>,
}

impl Partition {
    /// Whether neither side holds any field.
    pub fn is_empty(&self) -> bool {
        self.constant.is_empty() && self.variable.is_empty()
    }
}

/// Classify each selected field as constant or variable.
///
/// A field is constant when every row's value is strictly equal to the first
/// row's value. Missing values compare as `null`. Scalars compare by value;
/// arrays and objects compare by identity, so structured values taken from
/// two different rows are never equal, even with the same content.
///
/// With no rows the selection is dropped entirely: both sides come back
/// empty rather than every field being reported as variable.
pub fn compute_constant_fields<S: AsRef<str>>(rows: &[SampleRow], selected: &[S]) -> Partition {
    let mut partition = Partition::default();

    let Some(first) = rows.first() else {
        return partition;
    };

    for field in selected {
        let field = field.as_ref();
        let first_value = first.get(field).unwrap_or(&Value::Null);
        let is_constant = rows[1..]
            .iter()
            .all(|row| strictly_equal(first_value, row.get(field).unwrap_or(&Value::Null)));

        if is_constant {
            partition
                .constant
                .insert(field.to_string(), first_value.clone());
        } else {
            partition.variable.push(field.to_string());
        }
    }

    partition
}

fn strictly_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Array(_) | Value::Object(_), _) | (_, Value::Array(_) | Value::Object(_)) => false,
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}
