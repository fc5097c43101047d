//! Data kind inference from sampled values.

use serde_json::Value;

use crate::compile::is_numeric;
use crate::schema::{DataKind, FieldDatum, ListElementKind};

/// Infer the data kind of a sampled scalar or array.
///
/// Arrays become lists of numbers when every element is a number or a
/// string that parses as one, lists of strings otherwise (including the
/// empty array). Numbers stay numbers; everything else is a string.
pub fn infer_data_kind(sample: &Value) -> DataKind {
    match sample {
        Value::Array(items) => {
            let numeric = !items.is_empty() && items.iter().all(is_numeric_element);
            if numeric {
                DataKind::List(ListElementKind::Number)
            } else {
                DataKind::List(ListElementKind::String)
            }
        }
        Value::Number(_) => DataKind::Number,
        _ => DataKind::String,
    }
}

fn is_numeric_element(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => is_numeric(s),
        _ => false,
    }
}

/// Render a sampled value as the editable string held by a [`FieldDatum`].
pub fn display_value(sample: &Value) -> String {
    match sample {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Exact-value datum seeded from a sampled value.
pub fn datum_from_sample(sample: &Value) -> FieldDatum {
    FieldDatum::exact(infer_data_kind(sample), display_value(sample))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_infer_scalars() {
        assert_eq!(infer_data_kind(&json!(2.5)), DataKind::Number);
        assert_eq!(infer_data_kind(&json!("2.5")), DataKind::String);
        assert_eq!(infer_data_kind(&json!(true)), DataKind::String);
        assert_eq!(infer_data_kind(&Value::Null), DataKind::String);
    }

    #[test]
    fn test_infer_lists() {
        assert_eq!(
            infer_data_kind(&json!([0.5, "0.5"])),
            DataKind::List(ListElementKind::Number)
        );
        assert_eq!(
            infer_data_kind(&json!(["ORIGINAL", "PRIMARY"])),
            DataKind::List(ListElementKind::String)
        );
        assert_eq!(
            infer_data_kind(&json!([])),
            DataKind::List(ListElementKind::String)
        );
        assert_eq!(
            infer_data_kind(&json!([1, ""])),
            DataKind::List(ListElementKind::String)
        );
    }

    #[test]
    fn test_non_finite_strings_stay_strings() {
        for sample in [json!(["NaN"]), json!(["inf"]), json!(["infinity", "1"]), json!(["NaN", "inf"])] {
            assert_eq!(
                infer_data_kind(&sample),
                DataKind::List(ListElementKind::String),
                "{sample}"
            );
        }
        assert_eq!(
            infer_data_kind(&json!([" 2.5", "1e3"])),
            DataKind::List(ListElementKind::Number)
        );
    }

    #[test]
    fn test_datum_from_sample() {
        let datum = datum_from_sample(&json!([0.5, 0.5]));
        assert_eq!(datum.value, "0.5, 0.5");
        assert_eq!(datum.data_kind(), DataKind::List(ListElementKind::Number));

        let datum = datum_from_sample(&json!(3));
        assert_eq!(datum.value, "3");
        assert_eq!(datum.data_kind(), DataKind::Number);

        assert_eq!(display_value(&json!({"a": 1})), "{\"a\":1}");
    }
}
