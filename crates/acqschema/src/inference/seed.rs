//! Seed the initial acquisition form from sampled rows.

use serde_json::Value;
use tracing::debug;

use crate::input::SampleRow;
use crate::schema::{AcquisitionForm, ConstantField, VariableRow};
use crate::transform::deduplicate_rows;

use super::kind::datum_from_sample;
use super::partition::compute_constant_fields;

/// Build the first form snapshot for an acquisition.
///
/// Constant fields become exact-value constraints. Each sampled row becomes a
/// series holding the variable fields, then duplicate series are collapsed.
/// When nothing varies no series are created.
pub fn seed_form<S: AsRef<str>>(rows: &[SampleRow], selected: &[S]) -> AcquisitionForm {
    let partition = compute_constant_fields(rows, selected);

    let constants: Vec<ConstantField> = partition
        .constant
        .iter()
        .map(|(name, value)| ConstantField::new(name.clone(), datum_from_sample(value)))
        .collect();

    let variable_rows = if partition.variable.is_empty() {
        Vec::new()
    } else {
        let seeded: Vec<VariableRow> = rows
            .iter()
            .enumerate()
            .map(|(index, sample)| {
                partition
                    .variable
                    .iter()
                    .fold(VariableRow::new((index + 1).to_string()), |row, name| {
                        let value = sample.get(name).unwrap_or(&Value::Null);
                        row.with_field(name.clone(), datum_from_sample(value))
                    })
            })
            .collect();
        deduplicate_rows(&seeded)
    };

    debug!(
        constants = constants.len(),
        series = variable_rows.len(),
        "seeded acquisition form"
    );

    AcquisitionForm::from_parts(constants, variable_rows)
}
