//! Direct field-datum edits, validated before they are committed.

use crate::error::{AcqSchemaError, Result};
use crate::schema::{AcquisitionForm, ConstantField, FieldDatum};
use crate::validation::ensure_valid;

/// Add a new constant field.
pub fn add_constant(form: &AcquisitionForm, name: &str, datum: FieldDatum) -> Result<AcquisitionForm> {
    ensure_valid(name, &datum)?;
    if form.has_field(name) {
        return Err(AcqSchemaError::DuplicateField(name.to_string()));
    }

    let (mut constants, rows) = form.clone().into_parts();
    let field = ConstantField::unique(name, datum, &constants);
    constants.push(field);
    Ok(AcquisitionForm::from_parts(constants, rows))
}

/// Replace a constant's name and datum, keeping its identifier.
pub fn update_constant(
    form: &AcquisitionForm,
    field_id: &str,
    name: &str,
    datum: FieldDatum,
) -> Result<AcquisitionForm> {
    ensure_valid(name, &datum)?;

    let (mut constants, rows) = form.clone().into_parts();
    let position = constants
        .iter()
        .position(|c| c.id == field_id)
        .ok_or_else(|| AcqSchemaError::UnknownField(field_id.to_string()))?;

    if constants[position].name != name && form.has_field(name) {
        return Err(AcqSchemaError::DuplicateField(name.to_string()));
    }

    let constant = &mut constants[position];
    constant.name = name.to_string();
    constant.datum = datum;
    Ok(AcquisitionForm::from_parts(constants, rows))
}

/// Remove a constant field.
pub fn delete_constant(form: &AcquisitionForm, field_id: &str) -> Result<AcquisitionForm> {
    let (mut constants, rows) = form.clone().into_parts();
    let before = constants.len();
    constants.retain(|c| c.id != field_id);
    if constants.len() == before {
        return Err(AcqSchemaError::UnknownField(field_id.to_string()));
    }
    Ok(AcquisitionForm::from_parts(constants, rows))
}

/// Replace one series' datum for an existing column.
pub fn update_cell(
    form: &AcquisitionForm,
    index: usize,
    column: &str,
    datum: FieldDatum,
) -> Result<AcquisitionForm> {
    ensure_valid(column, &datum)?;

    let (constants, mut rows) = form.clone().into_parts();
    let len = rows.len();
    let row = rows
        .get_mut(index)
        .ok_or(AcqSchemaError::SeriesOutOfRange { index, len })?;
    let cell = row
        .get_mut(column)
        .ok_or_else(|| AcqSchemaError::UnknownField(column.to_string()))?;
    *cell = datum;

    Ok(AcquisitionForm::from_parts(constants, rows))
}
