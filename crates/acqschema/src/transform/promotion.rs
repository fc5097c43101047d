//! Promotion/demotion between constant fields and variable columns, and the
//! series lifecycle.
//!
//! Every function takes a snapshot by reference and returns a new one.

use crate::error::{AcqSchemaError, Result};
use crate::schema::{AcquisitionForm, ConstantField, FieldDatum, SERIES_FIELD, VariableRow};

use super::dedup::{deduplicate_rows, renumber};

/// Move a constant field into the variable table.
///
/// The datum is copied unchanged onto every series. With no series yet a
/// single series `"1"` is created to hold it.
pub fn make_variable(form: &AcquisitionForm, field_id: &str) -> Result<AcquisitionForm> {
    let (mut constants, mut rows) = form.clone().into_parts();

    let position = constants
        .iter()
        .position(|c| c.id == field_id)
        .ok_or_else(|| AcqSchemaError::UnknownField(field_id.to_string()))?;
    let field = constants.remove(position);

    if rows.iter().any(|row| row.get(&field.name).is_some()) {
        return Err(AcqSchemaError::DuplicateField(field.name));
    }

    if rows.is_empty() {
        rows.push(VariableRow::new("1").with_field(field.name, field.datum));
    } else {
        for row in &mut rows {
            row.insert(field.name.clone(), field.datum.clone());
        }
    }

    Ok(AcquisitionForm::from_parts(constants, rows))
}

/// Move a variable column into the constant fields.
///
/// The constant takes the first series' datum (an empty string value when
/// there are no series). The column is removed everywhere, the table is
/// deduplicated, and series left without any column are dropped one by one.
pub fn make_constant(form: &AcquisitionForm, column: &str) -> Result<AcquisitionForm> {
    let (mut constants, rows) = form.clone().into_parts();

    if column == SERIES_FIELD || constants.iter().any(|c| c.name == column) {
        return Err(AcqSchemaError::DuplicateField(column.to_string()));
    }

    let datum = match rows.first() {
        Some(first) => first
            .get(column)
            .cloned()
            .ok_or_else(|| AcqSchemaError::UnknownField(column.to_string()))?,
        None => FieldDatum::default(),
    };
    let field = ConstantField::unique(column, datum, &constants);
    constants.push(field);

    let stripped = strip_column(rows, column);
    let rows = deduplicate_rows(&stripped)
        .into_iter()
        .filter(|row| !row.is_blank())
        .collect();

    Ok(AcquisitionForm::from_parts(constants, rows))
}

/// Delete a variable column outright.
///
/// After removal and deduplication, the whole table is cleared when no
/// series has any column left.
pub fn delete_variable_column(form: &AcquisitionForm, column: &str) -> Result<AcquisitionForm> {
    let (constants, rows) = form.clone().into_parts();

    if !rows.iter().any(|row| row.get(column).is_some()) {
        return Err(AcqSchemaError::UnknownField(column.to_string()));
    }

    let mut rows = deduplicate_rows(&strip_column(rows, column));
    if rows.iter().all(VariableRow::is_blank) {
        rows.clear();
    }

    Ok(AcquisitionForm::from_parts(constants, rows))
}

/// Append a series and return the new snapshot with the new series index.
///
/// The series mirrors the first series' columns with blank data of the same
/// data kinds.
pub fn add_series(form: &AcquisitionForm) -> (AcquisitionForm, usize) {
    let (constants, mut rows) = form.clone().into_parts();

    let mut row = VariableRow::new((rows.len() + 1).to_string());
    if let Some(first) = rows.first() {
        for (name, datum) in first.fields() {
            row.insert(name.clone(), datum.blank());
        }
    }
    rows.push(row);
    let index = rows.len() - 1;

    (AcquisitionForm::from_parts(constants, rows), index)
}

/// Remove the series at `index` and relabel the rest.
pub fn delete_series(form: &AcquisitionForm, index: usize) -> Result<AcquisitionForm> {
    let (constants, mut rows) = form.clone().into_parts();

    if index >= rows.len() {
        return Err(AcqSchemaError::SeriesOutOfRange {
            index,
            len: rows.len(),
        });
    }
    rows.remove(index);
    renumber(&mut rows);

    Ok(AcquisitionForm::from_parts(constants, rows))
}

fn strip_column(mut rows: Vec<VariableRow>, column: &str) -> Vec<VariableRow> {
    for row in &mut rows {
        row.remove(column);
    }
    rows
}
