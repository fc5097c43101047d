//! Engine that applies form operations to snapshots.

use tracing::debug;

use crate::error::Result;
use crate::schema::AcquisitionForm;

use super::edits::{add_constant, delete_constant, update_cell, update_constant};
use super::operations::{FormChange, FormOperation};
use super::promotion::{
    add_series, delete_series, delete_variable_column, make_constant, make_variable,
};

/// The snapshot produced by an operation, with its change summary.
#[derive(Debug, Clone)]
pub struct Transition {
    pub form: AcquisitionForm,
    pub change: FormChange,
}

/// Engine for applying operations to acquisition forms.
pub struct TransformEngine;

impl TransformEngine {
    /// Create a new transform engine.
    pub fn new() -> Self {
        Self
    }

    /// Apply one operation, leaving `form` untouched.
    pub fn apply(&self, form: &AcquisitionForm, operation: &FormOperation) -> Result<Transition> {
        let mut focus = None;

        let next = match operation {
            FormOperation::MakeVariable { field_id } => make_variable(form, field_id)?,
            FormOperation::MakeConstant { column } => make_constant(form, column)?,
            FormOperation::DeleteVariableColumn { column } => delete_variable_column(form, column)?,
            FormOperation::AddSeries => {
                let (next, index) = add_series(form);
                focus = Some(index);
                next
            }
            FormOperation::DeleteSeries { index } => delete_series(form, *index)?,
            FormOperation::AddConstant { name, datum } => add_constant(form, name, datum.clone())?,
            FormOperation::UpdateConstant {
                field_id,
                name,
                datum,
            } => update_constant(form, field_id, name, datum.clone())?,
            FormOperation::DeleteConstant { field_id } => delete_constant(form, field_id)?,
            FormOperation::UpdateCell {
                index,
                column,
                datum,
            } => update_cell(form, *index, column, datum.clone())?,
        };

        let change = FormChange {
            description: operation.description(),
            series_before: form.rows().len(),
            series_after: next.rows().len(),
            focus,
        };

        if operation.removes_column() && change.series_removed() > 0 {
            debug!(
                removed = change.series_removed(),
                "{}: collapsed duplicate or empty series",
                change.description
            );
        } else {
            debug!("{}", change.description);
        }

        Ok(Transition { form: next, change })
    }

    /// Apply operations in order, stopping at the first failure.
    pub fn apply_all(
        &self,
        form: &AcquisitionForm,
        operations: &[FormOperation],
    ) -> Result<(AcquisitionForm, Vec<FormChange>)> {
        let mut current = form.clone();
        let mut changes = Vec::with_capacity(operations.len());

        for operation in operations {
            let transition = self.apply(&current, operation)?;
            current = transition.form;
            changes.push(transition.change);
        }

        Ok((current, changes))
    }
}

impl Default for TransformEngine {
    fn default() -> Self {
        Self::new()
    }
}
