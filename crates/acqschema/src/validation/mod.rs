//! Editing-boundary validation of field data.
//!
//! Checks run before a datum is committed into a form snapshot. The
//! compiler assumes data that passed here and does not re-check it.

mod issue;

pub use issue::{FieldIssue, IssueKind};

use crate::compile::is_numeric;
use crate::error::{AcqSchemaError, Result};
use crate::schema::{ConstraintKind, DataKind, FieldDatum, ListElementKind};

/// Collect every problem with a field name and datum.
pub fn validate_field(name: &str, datum: &FieldDatum) -> Vec<FieldIssue> {
    let mut issues = Vec::new();

    if name.trim().is_empty() {
        issues.push(FieldIssue::new(name, IssueKind::MissingName, "field name is required"));
    }

    match datum.constraint() {
        ConstraintKind::Value | ConstraintKind::Contains => {
            require(&mut issues, name, "value", Some(&datum.value));
        }
        ConstraintKind::Range => {
            require(&mut issues, name, "min", datum.min.as_deref());
            require(&mut issues, name, "max", datum.max.as_deref());
        }
        ConstraintKind::ValueTolerance => {
            require(&mut issues, name, "value", Some(&datum.value));
            require(&mut issues, name, "tolerance", datum.tolerance.as_deref());
        }
    }

    // Contains is always compiled as the literal string.
    if datum.constraint() != ConstraintKind::Contains {
        check_typed(&mut issues, name, datum);
    }

    issues
}

/// Fail with the first issue, if any.
pub fn ensure_valid(name: &str, datum: &FieldDatum) -> Result<()> {
    match validate_field(name, datum).into_iter().next() {
        Some(issue) => Err(AcqSchemaError::InvalidField {
            field: name.to_string(),
            message: issue.message,
        }),
        None => Ok(()),
    }
}

fn require(issues: &mut Vec<FieldIssue>, name: &str, slot: &str, value: Option<&str>) {
    if value.is_none_or(|v| v.trim().is_empty()) {
        issues.push(FieldIssue::new(
            name,
            IssueKind::MissingValue,
            format!("{} is required", slot),
        ));
    }
}

fn check_typed(issues: &mut Vec<FieldIssue>, name: &str, datum: &FieldDatum) {
    let filled = |s: &str| !s.trim().is_empty();

    match datum.data_kind() {
        DataKind::Number => {
            let slots = [
                ("value", Some(datum.value.as_str())),
                ("min", datum.min.as_deref()),
                ("max", datum.max.as_deref()),
                ("tolerance", datum.tolerance.as_deref()),
            ];
            for (slot, value) in slots {
                if let Some(v) = value.filter(|v| filled(v)) {
                    if !is_numeric(v) {
                        issues.push(FieldIssue::new(
                            name,
                            IssueKind::NotANumber,
                            format!("{} '{}' is not a number", slot, v),
                        ));
                    }
                }
            }
        }
        DataKind::List(ListElementKind::Number) if filled(&datum.value) => {
            for element in datum.value.split(',') {
                if !is_numeric(element) {
                    issues.push(FieldIssue::new(
                        name,
                        IssueKind::NotANumber,
                        format!("list element '{}' is not a number", element.trim()),
                    ));
                }
            }
        }
        DataKind::RawJson if filled(&datum.value) => {
            if let Err(e) = serde_json::from_str::<serde_json::Value>(&datum.value) {
                issues.push(FieldIssue::new(
                    name,
                    IssueKind::InvalidJson,
                    format!("value is not valid JSON: {}", e),
                ));
            }
        }
        _ => {}
    }
}
