//! Type compiler: operator-edited strings to typed constraint payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{AcqSchemaError, Result};
use crate::schema::{AcquisitionForm, ConstraintKind, DataKind, FieldDatum, ListElementKind};

use super::number::parse_float;
use super::payload::{CompiledAcquisition, CompiledField, CompiledSeries, ConstraintPayload, TypedValue};

/// Convert a raw string according to a data kind.
///
/// Raw JSON that fails to parse is logged and passed through as the original
/// string. Numbers that fail to parse become NaN.
pub fn transform_value(data_kind: DataKind, raw: &str) -> TypedValue {
    convert(data_kind, raw, &mut Vec::new())
}

/// Compile one field datum into its constraint payload.
pub fn transform_field_datum(datum: &FieldDatum) -> ConstraintPayload {
    lower(datum, &mut Vec::new())
}

fn convert(data_kind: DataKind, raw: &str, notes: &mut Vec<String>) -> TypedValue {
    match data_kind {
        DataKind::RawJson => match serde_json::from_str::<Value>(raw) {
            Ok(parsed) => TypedValue::Json(parsed),
            Err(e) => {
                warn!(value = raw, error = %e, "raw JSON value does not parse, passing it through as text");
                notes.push(format!("invalid JSON '{}': {}", raw, e));
                TypedValue::Text(raw.to_string())
            }
        },
        DataKind::List(element) => TypedValue::List(
            raw.split(',')
                .map(str::trim)
                .map(|item| match element {
                    ListElementKind::Number => number(item, notes),
                    ListElementKind::String => TypedValue::Text(item.to_string()),
                })
                .collect(),
        ),
        DataKind::Number => number(raw, notes),
        DataKind::String => TypedValue::Text(raw.to_string()),
    }
}

fn number(raw: &str, notes: &mut Vec<String>) -> TypedValue {
    let parsed = parse_float(raw);
    if parsed.is_nan() {
        notes.push(format!("'{}' is not a number", raw));
    }
    TypedValue::Number(parsed)
}

fn lower(datum: &FieldDatum, notes: &mut Vec<String>) -> ConstraintPayload {
    let kind = datum.data_kind();
    match datum.constraint() {
        ConstraintKind::Value => ConstraintPayload::Value {
            value: convert(kind, &datum.value, notes),
        },
        ConstraintKind::Contains => ConstraintPayload::Contains {
            contains: datum.value.clone(),
        },
        ConstraintKind::Range => ConstraintPayload::Range {
            min_value: convert(kind, datum.min.as_deref().unwrap_or(""), notes),
            max_value: convert(kind, datum.max.as_deref().unwrap_or(""), notes),
        },
        ConstraintKind::ValueTolerance => {
            let raw = datum.tolerance.as_deref().unwrap_or("");
            let tolerance = parse_float(raw);
            if tolerance.is_nan() && !raw.trim().is_empty() {
                notes.push(format!("tolerance '{}' is not a number", raw));
            }
            ConstraintPayload::ValueTolerance {
                value: convert(kind, &datum.value, notes),
                tolerance: if tolerance.is_nan() { 0.0 } else { tolerance },
            }
        }
    }
}

/// A value the compiler degraded instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileWarning {
    /// Field name.
    pub field: String,
    /// Series label for variable columns, `None` for constants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    /// What was degraded.
    pub message: String,
}

impl std::fmt::Display for CompileWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.series {
            Some(series) => write!(f, "{} (series {}): {}", self.field, series, self.message),
            None => write!(f, "{}: {}", self.field, self.message),
        }
    }
}

/// Compiled acquisition plus the degradations absorbed on the way.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub acquisition: CompiledAcquisition,
    pub warnings: Vec<CompileWarning>,
}

/// Compiles whole acquisition forms.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    strict: bool,
}

impl Compiler {
    /// Create a lenient compiler.
    pub fn new() -> Self {
        Self::default()
    }

    /// In strict mode any degraded value fails compilation.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Compile a form, collecting warnings for degraded values.
    pub fn compile_with_warnings(&self, form: &AcquisitionForm) -> Compilation {
        let mut warnings = Vec::new();

        let fields = form
            .constant_fields()
            .iter()
            .map(|constant| compile_field(&constant.name, &constant.datum, None, &mut warnings))
            .collect();

        let series = form
            .rows()
            .iter()
            .map(|row| CompiledSeries {
                name: row.label().to_string(),
                fields: row
                    .fields()
                    .iter()
                    .map(|(name, datum)| compile_field(name, datum, Some(row.label()), &mut warnings))
                    .collect(),
            })
            .collect();

        Compilation {
            acquisition: CompiledAcquisition { fields, series },
            warnings,
        }
    }

    /// Compile a form. Strict compilers fail on the first degraded value.
    pub fn compile(&self, form: &AcquisitionForm) -> Result<CompiledAcquisition> {
        let compilation = self.compile_with_warnings(form);

        if self.strict {
            if let Some(warning) = compilation.warnings.into_iter().next() {
                return Err(AcqSchemaError::Compile {
                    field: warning.field,
                    message: warning.message,
                });
            }
        }

        Ok(compilation.acquisition)
    }
}

fn compile_field(
    name: &str,
    datum: &FieldDatum,
    series: Option<&str>,
    warnings: &mut Vec<CompileWarning>,
) -> CompiledField {
    let mut notes = Vec::new();
    let constraint = lower(datum, &mut notes);

    warnings.extend(notes.into_iter().map(|message| CompileWarning {
        field: name.to_string(),
        series: series.map(str::to_string),
        message,
    }));

    CompiledField {
        field: name.to_string(),
        constraint,
    }
}
